//! Intake of project enquiries.
//!
//! A [`SubmissionForm`] is validated and handed to a [`SubmissionSink`]. The
//! provided sink, [`JsonFileStore`], appends records to a pretty-printed JSON
//! array on disk.

mod error;
mod store;
mod submission;

pub use error::{IntakeError, Result};
pub use store::JsonFileStore;
pub use submission::{Submission, SubmissionForm, SubmissionSink};
