mod error;
mod filter;
mod traits;

pub mod database;
pub mod memory;

pub use database::DbSubmissionStore;
pub use error::StoreError;
pub use filter::{DateRange, SubmissionFilter};
pub use memory::MemorySubmissionStore;
pub use traits::SubmissionStore;
