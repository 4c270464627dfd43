//! Promotes an application when one of its interviews completes.
//!
//! The rule is one-shot and one-directional: only an application sitting in
//! INTERVIEW_OFFERED moves, and only to INTERVIEW_COMPLETED. It runs inside
//! the caller's transaction so the interview write and the application write
//! commit together.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::database::store::StoreTx;
use crate::error::Result;
use crate::models::application::{Application, ApplicationStatus};

pub const INTERVIEW_COMPLETED_COMMENT: &str = "interview completed — awaiting final decision";

#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatorOutcome {
    Advanced(Application),
    Unchanged(ApplicationStatus),
}

/// Pure part of the rule: the advanced application, if the rule fires.
pub fn advance_on_interview_completed(
    application: &Application,
    now: DateTime<Utc>,
) -> Option<Application> {
    if application.status != ApplicationStatus::InterviewOffered {
        return None;
    }

    let mut next = application.clone();
    next.status = ApplicationStatus::InterviewCompleted;
    next.comment = Some(INTERVIEW_COMPLETED_COMMENT.to_string());
    next.updated_at = Some(now);
    Some(next)
}

/// Applies the rule to an application the caller already locked in `tx`.
pub async fn on_interview_completed(
    tx: &mut dyn StoreTx,
    application: &Application,
    now: DateTime<Utc>,
) -> Result<CoordinatorOutcome> {
    match advance_on_interview_completed(application, now) {
        Some(advanced) => {
            tx.update_application(&advanced).await?;
            info!(
                application_id = %advanced.id,
                from = %application.status,
                to = %advanced.status,
                "Application advanced by completed interview"
            );
            Ok(CoordinatorOutcome::Advanced(advanced))
        }
        None => {
            debug!(
                application_id = %application.id,
                status = %application.status,
                "Completed interview left application unchanged"
            );
            Ok(CoordinatorOutcome::Unchanged(application.status))
        }
    }
}
