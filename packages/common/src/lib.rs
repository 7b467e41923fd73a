pub mod audit;
pub mod certification_status;
pub mod document_slots;
pub mod period;
pub mod submission;
pub mod transition;
pub mod trigger;

pub use audit::{Actor, AuditEntry};
pub use certification_status::CertificationStatus;
pub use document_slots::DocumentSlots;
pub use period::AcademicPeriod;
pub use submission::{StatusUpdate, Submission, SubmissionId};
pub use transition::{TransitionError, available_triggers, plan_transition};
pub use trigger::Trigger;
