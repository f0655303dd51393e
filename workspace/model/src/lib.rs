//! Client-side journal entry model: the lines of a draft and the draft itself.
//!
//! Nothing here talks to the backend. A [`Draft`] is a transient, exclusively
//! owned value that is composed field by field and handed to the submission
//! pipeline as one unit.

pub mod draft;
pub mod line;

pub use draft::{Draft, DraftDefaults, HeaderField};
pub use line::{Line, LineField, LineHandle};
