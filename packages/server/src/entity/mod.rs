pub mod academic_period;
pub mod submission;
pub mod transition_audit;
