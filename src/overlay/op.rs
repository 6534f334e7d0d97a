use crate::location::CoordPos;

/// One of the four Boolean set operators the overlay engine supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

/// `isResult(loc0, loc1, op)` (spec §4.3): promotes BOUNDARY to INTERIOR on
/// each side, then applies the operator's set-membership rule. A `None`
/// location (the component isn't labelled for that argument at all) is
/// never interior.
pub fn is_result(loc0: Option<CoordPos>, loc1: Option<CoordPos>, op: OpCode) -> bool {
    let in0 = matches!(loc0.map(CoordPos::promote_boundary), Some(CoordPos::Interior));
    let in1 = matches!(loc1.map(CoordPos::promote_boundary), Some(CoordPos::Interior));
    match op {
        OpCode::Intersection => in0 && in1,
        OpCode::Union => in0 || in1,
        OpCode::Difference => in0 && !in1,
        OpCode::SymDifference => in0 != in1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_requires_both_interior() {
        assert!(is_result(Some(CoordPos::Interior), Some(CoordPos::Interior), OpCode::Intersection));
        assert!(!is_result(Some(CoordPos::Interior), Some(CoordPos::Exterior), OpCode::Intersection));
    }

    #[test]
    fn boundary_promotes_to_interior() {
        assert!(is_result(Some(CoordPos::Boundary), Some(CoordPos::Interior), OpCode::Intersection));
    }

    #[test]
    fn sym_difference_is_exclusive_or() {
        assert!(is_result(Some(CoordPos::Interior), Some(CoordPos::Exterior), OpCode::SymDifference));
        assert!(!is_result(Some(CoordPos::Interior), Some(CoordPos::Interior), OpCode::SymDifference));
    }

    #[test]
    fn none_is_never_interior() {
        assert!(is_result(None, Some(CoordPos::Interior), OpCode::Union));
        assert!(!is_result(None, None, OpCode::Union));
    }
}
