//! Polygonal batch union: the overlap-partitioned pairwise union, the
//! cascaded reduction built on top of it, and the dimension-partitioned
//! unary union driver (spec §4.5, §4.8).

mod cascaded_union;
mod overlap_union;
mod unary_union;

pub use cascaded_union::CascadedUnion;
pub use overlap_union::{overlap_union, overlap_union_with_precision};
pub use unary_union::unary_union;
