pub mod advisory;
pub mod error;

pub use advisory::{Advice, AdvisoryRequest, AdvisoryResponse, Citation, FallbackReason};
pub use error::{AquaError, ErrorCategory, ErrorClassifier, GenerationError, Result};
