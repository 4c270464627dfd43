//! Hiring-decision state machine for a single application.
//!
//! Guards run in a fixed order against the status the caller read inside its
//! unit of work. The first failing guard decides the error, and nothing is
//! mutated unless every guard passes.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::interview::{Interview, InterviewStatus};

/// A staff decision on an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    pub status: ApplicationStatus,
    pub comment: Option<String>,
}

impl ProcessCommand {
    pub fn new(status: ApplicationStatus, comment: Option<String>) -> Self {
        Self { status, comment }
    }

    /// Whether the guards need the application's interviews to decide.
    pub fn needs_interview_evidence(&self) -> bool {
        self.status == ApplicationStatus::InterviewCompleted
    }
}

/// Checks every guard of the transition without touching the application.
pub fn check_transition(
    current: ApplicationStatus,
    command: &ProcessCommand,
    interviews: &[Interview],
) -> Result<()> {
    let target = command.status;

    if current.is_terminal() {
        return Err(Error::InvalidTransition(format!(
            "Application is {} and can no longer be modified",
            current
        )));
    }

    if current == ApplicationStatus::Pending && target != ApplicationStatus::UnderReview {
        return Err(Error::InvalidTransition(format!(
            "A pending application must be put under review first (requested {})",
            target
        )));
    }

    if target == ApplicationStatus::InterviewCompleted {
        if current != ApplicationStatus::InterviewOffered {
            return Err(Error::InvalidTransition(format!(
                "Only an application with an interview offered can be marked {} (current {})",
                target, current
            )));
        }
        let completed = interviews
            .iter()
            .filter(|interview| interview.status == InterviewStatus::Completed)
            .count();
        if completed == 0 {
            return Err(Error::PreconditionFailed(
                "At least one completed interview is required for this status".to_string(),
            ));
        }
    }

    if matches!(
        target,
        ApplicationStatus::Hired | ApplicationStatus::RejectedAfterInterview
    ) && current != ApplicationStatus::InterviewCompleted
    {
        return Err(Error::InvalidTransition(format!(
            "The application must be {} before deciding {} (current {})",
            ApplicationStatus::InterviewCompleted,
            target,
            current
        )));
    }

    if !current.can_move_to(target) {
        return Err(Error::InvalidTransition(format!(
            "Cannot move an application from {} to {}",
            current, target
        )));
    }

    if target.is_rejection() && is_blank(command.comment.as_deref()) {
        return Err(Error::Validation(
            "A comment is required to justify a rejection".to_string(),
        ));
    }

    Ok(())
}

/// Applies a staff decision, returning the updated application.
pub fn process(
    application: &Application,
    command: &ProcessCommand,
    interviews: &[Interview],
    now: DateTime<Utc>,
) -> Result<Application> {
    check_transition(application.status, command, interviews)?;

    let mut next = application.clone();
    next.status = command.status;
    next.comment = command.comment.clone();
    next.processed_at = Some(now);
    next.updated_at = Some(now);
    Ok(next)
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
