use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::address::Address;
use crate::models::job_offer::JobOffer;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobOfferPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub specialty: String,
    #[validate(length(min = 1))]
    pub contract_type: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub address: Option<Address>,
    pub salary: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateJobOfferPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub specialty: Option<String>,
    #[validate(length(min = 1))]
    pub contract_type: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub address: Option<Address>,
    pub salary: Option<Decimal>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobOfferListQuery {
    pub active_only: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOfferResponse {
    pub id: uuid::Uuid,
    pub title: String,
    pub specialty: String,
    pub contract_type: String,
    pub content: String,
    pub address: Option<Address>,
    pub salary: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOfferListResponse {
    pub items: Vec<JobOfferResponse>,
    pub total: usize,
}

impl From<JobOffer> for JobOfferResponse {
    fn from(value: JobOffer) -> Self {
        Self {
            id: value.id,
            title: value.title,
            specialty: value.specialty,
            contract_type: value.contract_type,
            content: value.content,
            address: value.address,
            salary: value.salary,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Vec<JobOffer>> for JobOfferListResponse {
    fn from(value: Vec<JobOffer>) -> Self {
        Self {
            total: value.len(),
            items: value.into_iter().map(Into::into).collect(),
        }
    }
}
