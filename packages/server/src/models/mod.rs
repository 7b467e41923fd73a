pub mod period;
pub mod shared;
pub mod submission;
