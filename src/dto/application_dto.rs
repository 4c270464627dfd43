use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::application::{Application, ApplicationStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitApplicationPayload {
    pub job_offer_id: Uuid,
    #[validate(length(min = 1))]
    pub firstname: String,
    #[validate(length(min = 1))]
    pub lastname: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 10))]
    pub phone: String,
    pub cover_letter: Option<String>,
}

/// Contact-field corrections. Status is only ever changed by processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateApplicationPayload {
    #[validate(length(min = 1))]
    pub firstname: Option<String>,
    #[validate(length(min = 1))]
    pub lastname: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 10))]
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
}

/// Raw staff decision; `status` is parsed at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessApplicationPayload {
    pub status: String,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationListQuery {
    pub status: Option<String>,
    pub job_offer_id: Option<Uuid>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub items: Vec<ApplicationResponse>,
    pub total: usize,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            job_offer_id: value.job_offer_id,
            firstname: value.firstname,
            lastname: value.lastname,
            email: value.email,
            phone: value.phone,
            cover_letter: value.cover_letter,
            status: value.status,
            comment: value.comment,
            applied_at: value.applied_at,
            processed_at: value.processed_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Vec<Application>> for ApplicationListResponse {
    fn from(value: Vec<Application>) -> Self {
        Self {
            total: value.len(),
            items: value.into_iter().map(Into::into).collect(),
        }
    }
}
