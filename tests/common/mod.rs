#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use recruitment_workflow::database::memory::MemoryStore;
use recruitment_workflow::database::store::{
    ApplicationFilter, InterviewFilter, RecruitmentStore, StoreTx,
};
use recruitment_workflow::dto::application_dto::SubmitApplicationPayload;
use recruitment_workflow::dto::job_offer_dto::CreateJobOfferPayload;
use recruitment_workflow::error::{Error, Result};
use recruitment_workflow::models::address::Address;
use recruitment_workflow::models::application::{Application, ApplicationStatus};
use recruitment_workflow::models::interview::{Interview, InterviewType};
use recruitment_workflow::models::job_offer::JobOffer;
use recruitment_workflow::utils::time::{Clock, FixedClock};
use recruitment_workflow::workflow::{InterviewDraft, ProcessCommand};
use recruitment_workflow::AppState;
use uuid::Uuid;

pub struct Harness {
    pub store: MemoryStore,
    pub clock: Arc<FixedClock>,
    pub state: AppState,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap()
}

pub fn harness() -> Harness {
    let store = MemoryStore::new();
    let clock = Arc::new(FixedClock::new(start()));
    let state = AppState::new(Arc::new(store.clone()), clock.clone());
    Harness {
        store,
        clock,
        state,
    }
}

pub fn office() -> Address {
    Address {
        street: Some("Rue de la Loi".into()),
        number: Some("16".into()),
        postal_code: Some("1000".into()),
        city: Some("Bruxelles".into()),
        country: Some("Belgique".into()),
    }
}

pub fn offer_payload(address: Option<Address>) -> CreateJobOfferPayload {
    CreateJobOfferPayload {
        title: "Backend developer".into(),
        specialty: "Rust".into(),
        contract_type: "CDI".into(),
        content: "Build and run the hiring platform".into(),
        address,
        salary: None,
    }
}

pub fn candidate(job_offer_id: Uuid, email: &str) -> SubmitApplicationPayload {
    SubmitApplicationPayload {
        job_offer_id,
        firstname: "Camille".into(),
        lastname: "Lambert".into(),
        email: email.into(),
        phone: "0471234567".into(),
        cover_letter: Some("Keen to join".into()),
    }
}

pub fn on_site(application_id: Uuid, address: Option<Address>) -> InterviewDraft {
    InterviewDraft {
        application_id,
        interview_type: InterviewType::OnSite,
        scheduled_at: start() + chrono::Duration::days(7),
        visio_link: None,
        address,
        notes: None,
    }
}

pub fn remote(application_id: Uuid) -> InterviewDraft {
    InterviewDraft {
        application_id,
        interview_type: InterviewType::Remote,
        scheduled_at: start() + chrono::Duration::days(3),
        visio_link: Some("https://meet.example.com/abc-defg".into()),
        address: None,
        notes: None,
    }
}

pub fn decide(status: ApplicationStatus, comment: Option<&str>) -> ProcessCommand {
    ProcessCommand::new(status, comment.map(str::to_string))
}

impl Harness {
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub async fn offer(&self, address: Option<Address>) -> JobOffer {
        self.state
            .job_offer_service
            .create(offer_payload(address))
            .await
            .expect("create job offer")
    }

    pub async fn application(&self, offer: &JobOffer) -> Application {
        self.state
            .application_service
            .submit(candidate(offer.id, "camille.lambert@example.com"))
            .await
            .expect("submit application")
    }

    /// A fresh application already moved to INTERVIEW_OFFERED.
    pub async fn offered_application(&self, offer: &JobOffer) -> Application {
        let application = self.application(offer).await;
        let service = &self.state.application_service;
        service
            .process(application.id, decide(ApplicationStatus::UnderReview, None))
            .await
            .expect("under review");
        service
            .process(
                application.id,
                decide(ApplicationStatus::InterviewOffered, Some("Strong profile")),
            )
            .await
            .expect("interview offered")
    }

    pub async fn interview(&self, draft: InterviewDraft) -> Interview {
        self.state
            .interview_service
            .create(draft)
            .await
            .expect("schedule interview")
    }
}

/// Delegates to another store but fails every application update.
pub struct BrokenApplicationWrites {
    inner: Arc<dyn RecruitmentStore>,
}

impl BrokenApplicationWrites {
    pub fn wrap(inner: Arc<dyn RecruitmentStore>) -> Self {
        Self { inner }
    }
}

pub struct BrokenTx {
    inner: Box<dyn StoreTx>,
}

#[async_trait]
impl RecruitmentStore for BrokenApplicationWrites {
    async fn begin(&self) -> Result<Box<dyn StoreTx>> {
        let inner = self.inner.begin().await?;
        Ok(Box::new(BrokenTx { inner }))
    }

    async fn get_job_offer(&self, id: Uuid) -> Result<Option<JobOffer>> {
        self.inner.get_job_offer(id).await
    }

    async fn list_job_offers(&self, active_only: bool) -> Result<Vec<JobOffer>> {
        self.inner.list_job_offers(active_only).await
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>> {
        self.inner.get_application(id).await
    }

    async fn list_applications(&self, filter: &ApplicationFilter) -> Result<Vec<Application>> {
        self.inner.list_applications(filter).await
    }

    async fn get_interview(&self, id: Uuid) -> Result<Option<Interview>> {
        self.inner.get_interview(id).await
    }

    async fn list_interviews(&self, filter: &InterviewFilter) -> Result<Vec<Interview>> {
        self.inner.list_interviews(filter).await
    }
}

#[async_trait]
impl StoreTx for BrokenTx {
    async fn lock_job_offer(&mut self, id: Uuid) -> Result<Option<JobOffer>> {
        self.inner.lock_job_offer(id).await
    }

    async fn find_job_offer(&mut self, id: Uuid) -> Result<Option<JobOffer>> {
        self.inner.find_job_offer(id).await
    }

    async fn insert_job_offer(&mut self, offer: &JobOffer) -> Result<()> {
        self.inner.insert_job_offer(offer).await
    }

    async fn update_job_offer(&mut self, offer: &JobOffer) -> Result<()> {
        self.inner.update_job_offer(offer).await
    }

    async fn lock_application(&mut self, id: Uuid) -> Result<Option<Application>> {
        self.inner.lock_application(id).await
    }

    async fn application_exists(&mut self, job_offer_id: Uuid, email: &str) -> Result<bool> {
        self.inner.application_exists(job_offer_id, email).await
    }

    async fn insert_application(&mut self, application: &Application) -> Result<()> {
        self.inner.insert_application(application).await
    }

    async fn update_application(&mut self, _application: &Application) -> Result<()> {
        Err(Error::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_interview(&mut self, id: Uuid) -> Result<Option<Interview>> {
        self.inner.find_interview(id).await
    }

    async fn lock_interview(&mut self, id: Uuid) -> Result<Option<Interview>> {
        self.inner.lock_interview(id).await
    }

    async fn interviews_for_application(&mut self, application_id: Uuid) -> Result<Vec<Interview>> {
        self.inner.interviews_for_application(application_id).await
    }

    async fn insert_interview(&mut self, interview: &Interview) -> Result<()> {
        self.inner.insert_interview(interview).await
    }

    async fn update_interview(&mut self, interview: &Interview) -> Result<()> {
        self.inner.update_interview(interview).await
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.inner.commit().await
    }
}
