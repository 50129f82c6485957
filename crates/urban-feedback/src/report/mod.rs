//! Submitted incident reports: the record, the newest-first store and the
//! finalizer that turns a completed run into a report.

pub mod finalizer;
pub mod model;
pub mod store;

pub use finalizer::{Submission, SubmissionFinalizer};
pub use model::{Report, ReportStatus};
pub use store::{ReportStore, StatusCounts};
