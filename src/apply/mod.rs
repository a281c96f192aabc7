mod applicator;
mod completion;

pub use applicator::{Applicator, ApplyReport};
pub use completion::{CompletionSignal, CompletionSubscription};
