use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::database::store::RecruitmentStore;
use crate::dto::job_offer_dto::{CreateJobOfferPayload, UpdateJobOfferPayload};
use crate::error::{Error, Result};
use crate::models::job_offer::JobOffer;
use crate::utils::time::Clock;

#[derive(Clone)]
pub struct JobOfferService {
    store: Arc<dyn RecruitmentStore>,
    clock: Arc<dyn Clock>,
}

impl JobOfferService {
    pub fn new(store: Arc<dyn RecruitmentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    #[tracing::instrument(skip_all, fields(title = %payload.title))]
    pub async fn create(&self, payload: CreateJobOfferPayload) -> Result<JobOffer> {
        let offer = JobOffer {
            id: Uuid::new_v4(),
            title: payload.title,
            specialty: payload.specialty,
            contract_type: payload.contract_type,
            content: payload.content,
            address: payload.address,
            salary: payload.salary,
            is_active: true,
            created_at: self.clock.now(),
            updated_at: None,
        };

        let mut tx = self.store.begin().await?;
        tx.insert_job_offer(&offer).await?;
        tx.commit().await?;

        info!(job_offer_id = %offer.id, "Job offer created");
        Ok(offer)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<JobOffer> {
        self.store
            .get_job_offer(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<JobOffer>> {
        self.store.list_job_offers(active_only).await
    }

    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: Uuid, payload: UpdateJobOfferPayload) -> Result<JobOffer> {
        let mut tx = self.store.begin().await?;
        let mut offer = tx.lock_job_offer(id).await?.ok_or_else(|| not_found(id))?;

        if let Some(title) = payload.title {
            offer.title = title;
        }
        if let Some(specialty) = payload.specialty {
            offer.specialty = specialty;
        }
        if let Some(contract_type) = payload.contract_type {
            offer.contract_type = contract_type;
        }
        if let Some(content) = payload.content {
            offer.content = content;
        }
        if let Some(address) = payload.address {
            match offer.address.as_mut() {
                Some(existing) => existing.merge(&address),
                None => offer.address = Some(address),
            }
        }
        if let Some(salary) = payload.salary {
            offer.salary = Some(salary);
        }
        if let Some(is_active) = payload.is_active {
            offer.is_active = is_active;
        }
        offer.updated_at = Some(self.clock.now());

        tx.update_job_offer(&offer).await?;
        tx.commit().await?;

        info!(job_offer_id = %offer.id, "Job offer updated");
        Ok(offer)
    }

    /// Soft delete: the offer stays readable but stops accepting applications.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate(&self, id: Uuid) -> Result<JobOffer> {
        let mut tx = self.store.begin().await?;
        let mut offer = tx.lock_job_offer(id).await?.ok_or_else(|| not_found(id))?;

        offer.is_active = false;
        offer.updated_at = Some(self.clock.now());
        tx.update_job_offer(&offer).await?;
        tx.commit().await?;

        info!(job_offer_id = %offer.id, "Job offer deactivated");
        Ok(offer)
    }
}

fn not_found(id: Uuid) -> Error {
    Error::NotFound(format!("Job offer {} not found", id))
}
