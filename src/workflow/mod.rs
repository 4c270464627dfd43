//! Recruitment workflow engine: the application and interview state machines
//! and the coordinator that links them.

pub mod application;
pub mod coordinator;
pub mod interview;

pub use application::ProcessCommand;
pub use coordinator::{CoordinatorOutcome, INTERVIEW_COMPLETED_COMMENT};
pub use interview::{InterviewDraft, InterviewPatch, PatchOutcome};
