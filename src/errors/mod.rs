mod advice_error;

pub use advice_error::{AdviceError, AdviceErrorKind};
