pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod utils;
pub mod workflow;

use std::sync::Arc;

use crate::database::store::RecruitmentStore;
use crate::services::{
    application_service::ApplicationService, interview_service::InterviewService,
    job_offer_service::JobOfferService,
};
use crate::utils::time::Clock;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecruitmentStore>,
    pub clock: Arc<dyn Clock>,
    pub job_offer_service: JobOfferService,
    pub application_service: ApplicationService,
    pub interview_service: InterviewService,
}

impl AppState {
    pub fn new(store: Arc<dyn RecruitmentStore>, clock: Arc<dyn Clock>) -> Self {
        let job_offer_service = JobOfferService::new(store.clone(), clock.clone());
        let application_service = ApplicationService::new(store.clone(), clock.clone());
        let interview_service = InterviewService::new(store.clone(), clock.clone());

        Self {
            store,
            clock,
            job_offer_service,
            application_service,
            interview_service,
        }
    }
}
