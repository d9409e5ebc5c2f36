mod plan;
mod range;
mod step;

pub use plan::*;
pub use range::*;
pub use step::{DEFAULT_STRIDE, StepIter};
