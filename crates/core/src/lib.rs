pub mod dynamic;
pub mod routines;
pub mod traits;

pub use dynamic::{DynamicList, Value};
pub use routines::{
    CompensatedSum, IndexedLoop, IteratorSum, LaneSum, PairwiseSum, all_routines, reference_sum,
};
pub use traits::Summation;
