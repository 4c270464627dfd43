use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::models::address::Address;
use crate::models::interview::{Interview, InterviewStatus, InterviewType};
use crate::workflow::{InterviewDraft, InterviewPatch};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInterviewPayload {
    pub application_id: Uuid,
    #[serde(rename = "type")]
    pub interview_type: String,
    pub scheduled_at: DateTime<Utc>,
    #[validate(length(max = 2048))]
    pub visio_link: Option<String>,
    pub address: Option<Address>,
    pub notes: Option<String>,
}

impl CreateInterviewPayload {
    pub fn into_draft(self) -> Result<InterviewDraft> {
        Ok(InterviewDraft {
            application_id: self.application_id,
            interview_type: self.interview_type.parse()?,
            scheduled_at: self.scheduled_at,
            visio_link: self.visio_link,
            address: self.address,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateInterviewPayload {
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub interview_type: Option<String>,
    #[validate(length(max = 2048))]
    pub visio_link: Option<String>,
    pub address: Option<Address>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl UpdateInterviewPayload {
    pub fn into_patch(self) -> Result<InterviewPatch> {
        Ok(InterviewPatch {
            scheduled_at: self.scheduled_at,
            interview_type: self
                .interview_type
                .as_deref()
                .map(str::parse::<InterviewType>)
                .transpose()?,
            visio_link: self.visio_link,
            address: self.address,
            status: self
                .status
                .as_deref()
                .map(str::parse::<InterviewStatus>)
                .transpose()?,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterviewListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub id: Uuid,
    pub application_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub interview_type: InterviewType,
    pub status: InterviewStatus,
    pub visio_link: Option<String>,
    pub address: Option<Address>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewListResponse {
    pub items: Vec<InterviewResponse>,
    pub total: usize,
}

impl From<Interview> for InterviewResponse {
    fn from(value: Interview) -> Self {
        Self {
            id: value.id,
            application_id: value.application_id,
            scheduled_at: value.scheduled_at,
            interview_type: value.interview_type,
            status: value.status,
            visio_link: value.visio_link,
            address: value.address,
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
            cancelled_at: value.cancelled_at,
        }
    }
}

impl From<Vec<Interview>> for InterviewListResponse {
    fn from(value: Vec<Interview>) -> Self {
        Self {
            total: value.len(),
            items: value.into_iter().map(Into::into).collect(),
        }
    }
}
