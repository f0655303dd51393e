//! Balance computation and submission checks for journal entry drafts.

pub mod balance;
pub mod error;
pub mod validation;

pub use balance::{Balance, compute, is_balanced};
pub use error::ValidationError;
pub use validation::DraftValidator;
