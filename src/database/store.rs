//! Persistence contract for the recruitment workflow.
//!
//! Every mutating operation runs inside one [`StoreTx`]. Dropping a
//! transaction without calling [`StoreTx::commit`] discards all of its
//! writes. Rows are locked Application first, Interview second.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::interview::{Interview, InterviewStatus};
use crate::models::job_offer::JobOffer;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub job_offer_id: Option<Uuid>,
    pub email: Option<String>,
}

impl ApplicationFilter {
    pub fn matches(&self, application: &Application) -> bool {
        self.status.map_or(true, |s| application.status == s)
            && self.job_offer_id.map_or(true, |id| application.job_offer_id == id)
            && self
                .email
                .as_deref()
                .map_or(true, |email| application.email.eq_ignore_ascii_case(email))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterviewFilter {
    pub status: Option<InterviewStatus>,
    pub application_id: Option<Uuid>,
}

impl InterviewFilter {
    pub fn matches(&self, interview: &Interview) -> bool {
        self.status.map_or(true, |s| interview.status == s)
            && self
                .application_id
                .map_or(true, |id| interview.application_id == id)
    }
}

/// Entry point to storage: lock-free reads plus transactions for writes.
#[async_trait]
pub trait RecruitmentStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn StoreTx>>;

    async fn get_job_offer(&self, id: Uuid) -> Result<Option<JobOffer>>;
    /// Newest first.
    async fn list_job_offers(&self, active_only: bool) -> Result<Vec<JobOffer>>;

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>>;
    /// Most recent submissions first.
    async fn list_applications(&self, filter: &ApplicationFilter) -> Result<Vec<Application>>;

    async fn get_interview(&self, id: Uuid) -> Result<Option<Interview>>;
    /// Earliest slot first.
    async fn list_interviews(&self, filter: &InterviewFilter) -> Result<Vec<Interview>>;
}

/// One unit of work. `lock_*` reads hold the row until commit or drop.
#[async_trait]
pub trait StoreTx: Send {
    async fn lock_job_offer(&mut self, id: Uuid) -> Result<Option<JobOffer>>;
    /// Unlocked read inside the transaction. Does not block submissions.
    async fn find_job_offer(&mut self, id: Uuid) -> Result<Option<JobOffer>>;
    async fn insert_job_offer(&mut self, offer: &JobOffer) -> Result<()>;
    async fn update_job_offer(&mut self, offer: &JobOffer) -> Result<()>;

    async fn lock_application(&mut self, id: Uuid) -> Result<Option<Application>>;
    async fn application_exists(&mut self, job_offer_id: Uuid, email: &str) -> Result<bool>;
    async fn insert_application(&mut self, application: &Application) -> Result<()>;
    async fn update_application(&mut self, application: &Application) -> Result<()>;

    /// Unlocked read, used to find the owning application before locking.
    async fn find_interview(&mut self, id: Uuid) -> Result<Option<Interview>>;
    async fn lock_interview(&mut self, id: Uuid) -> Result<Option<Interview>>;
    async fn interviews_for_application(&mut self, application_id: Uuid) -> Result<Vec<Interview>>;
    async fn insert_interview(&mut self, interview: &Interview) -> Result<()>;
    async fn update_interview(&mut self, interview: &Interview) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
