mod deferred;
mod filter;

pub use deferred::{decode_instructions, DeferredInstruction};
pub use filter::MergeFilter;
