use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

/// Hiring-decision status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    InterviewOffered,
    InterviewCompleted,
    Hired,
    Rejected,
    RejectedAfterInterview,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 7] = [
        ApplicationStatus::Pending,
        ApplicationStatus::UnderReview,
        ApplicationStatus::InterviewOffered,
        ApplicationStatus::InterviewCompleted,
        ApplicationStatus::Hired,
        ApplicationStatus::Rejected,
        ApplicationStatus::RejectedAfterInterview,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::UnderReview => "UNDER_REVIEW",
            ApplicationStatus::InterviewOffered => "INTERVIEW_OFFERED",
            ApplicationStatus::InterviewCompleted => "INTERVIEW_COMPLETED",
            ApplicationStatus::Hired => "HIRED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::RejectedAfterInterview => "REJECTED_AFTER_INTERVIEW",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Hired
                | ApplicationStatus::Rejected
                | ApplicationStatus::RejectedAfterInterview
        )
    }

    pub const fn is_rejection(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Rejected | ApplicationStatus::RejectedAfterInterview
        )
    }

    /// Forward edges of the hiring pipeline.
    pub const fn successors(self) -> &'static [ApplicationStatus] {
        match self {
            ApplicationStatus::Pending => &[ApplicationStatus::UnderReview],
            ApplicationStatus::UnderReview => &[
                ApplicationStatus::InterviewOffered,
                ApplicationStatus::Rejected,
            ],
            ApplicationStatus::InterviewOffered => &[
                ApplicationStatus::InterviewCompleted,
                ApplicationStatus::Rejected,
            ],
            ApplicationStatus::InterviewCompleted => &[
                ApplicationStatus::Hired,
                ApplicationStatus::RejectedAfterInterview,
                ApplicationStatus::Rejected,
            ],
            ApplicationStatus::Hired
            | ApplicationStatus::Rejected
            | ApplicationStatus::RejectedAfterInterview => &[],
        }
    }

    pub fn can_move_to(self, next: ApplicationStatus) -> bool {
        self.successors().contains(&next)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::Validation(format!("Unknown application status '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub job_offer_id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub comment: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
