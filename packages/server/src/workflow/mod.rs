//! The certification workflow engine: state machine, listing, referrals.

mod bulk;
mod engine;
mod error;
mod query;
mod referral;

pub use bulk::{BulkFailure, BulkOutcome};
pub use engine::{DEFAULT_BULK_CONCURRENCY, WorkflowEngine};
pub use error::WorkflowError;
pub use query::{Listing, ListingPage, StatusCount, listing_order};
pub use crate::store::{DateRange, SubmissionFilter};
