use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::database::store::{InterviewFilter, RecruitmentStore, StoreTx};
use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::models::interview::{Interview, InterviewStatus};
use crate::utils::time::Clock;
use crate::workflow::{self, coordinator, InterviewDraft, InterviewPatch};

#[derive(Clone)]
pub struct InterviewService {
    store: Arc<dyn RecruitmentStore>,
    clock: Arc<dyn Clock>,
}

impl InterviewService {
    pub fn new(store: Arc<dyn RecruitmentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    #[tracing::instrument(skip_all, fields(application_id = %draft.application_id, interview_type = %draft.interview_type))]
    pub async fn create(&self, draft: InterviewDraft) -> Result<Interview> {
        let mut tx = self.store.begin().await?;
        let application = tx
            .lock_application(draft.application_id)
            .await?
            .ok_or_else(|| application_not_found(draft.application_id))?;
        let offer = tx.find_job_offer(application.job_offer_id).await?;
        let offer_address = offer.as_ref().and_then(|offer| offer.address.as_ref());

        let interview = workflow::interview::schedule(draft, offer_address, self.clock.now())
            .map_err(|err| {
                warn!(application_id = %application.id, "Interview refused: {}", err);
                err
            })?;

        tx.insert_interview(&interview).await?;
        tx.commit().await?;

        info!(
            interview_id = %interview.id,
            application_id = %interview.application_id,
            scheduled_at = %interview.scheduled_at,
            "Interview scheduled"
        );
        Ok(interview)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Interview> {
        self.store
            .get_interview(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn list(&self, status: Option<InterviewStatus>) -> Result<Vec<Interview>> {
        let filter = InterviewFilter {
            status,
            application_id: None,
        };
        self.store.list_interviews(&filter).await
    }

    pub async fn list_for_application(&self, application_id: Uuid) -> Result<Vec<Interview>> {
        if self.store.get_application(application_id).await?.is_none() {
            return Err(application_not_found(application_id));
        }
        let filter = InterviewFilter {
            status: None,
            application_id: Some(application_id),
        };
        self.store.list_interviews(&filter).await
    }

    /// Applies a partial update. Completing a scheduled interview also runs the
    /// coordinator against the parent application in the same transaction.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(&self, id: Uuid, patch: InterviewPatch) -> Result<Interview> {
        let mut tx = self.store.begin().await?;
        let (application, current) = lock_pair(&mut *tx, id).await?;
        let offer = tx.find_job_offer(application.job_offer_id).await?;
        let offer_address = offer.as_ref().and_then(|offer| offer.address.as_ref());
        let now = self.clock.now();

        let outcome = workflow::interview::apply_patch(&current, &patch, offer_address, now)
            .map_err(|err| {
                warn!(
                    interview_id = %id,
                    status = %current.status,
                    kind = err.kind().as_str(),
                    "Interview update refused: {}",
                    err
                );
                err
            })?;

        tx.update_interview(&outcome.interview).await?;
        if outcome.completed {
            coordinator::on_interview_completed(&mut *tx, &application, now).await?;
        }
        tx.commit().await?;

        info!(
            interview_id = %id,
            from = %current.status,
            to = %outcome.interview.status,
            "Interview updated"
        );
        Ok(outcome.interview)
    }

    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, id: Uuid) -> Result<Interview> {
        let mut tx = self.store.begin().await?;
        let (_, current) = lock_pair(&mut *tx, id).await?;

        let cancelled = workflow::interview::cancel(&current, self.clock.now()).map_err(|err| {
            warn!(interview_id = %id, "Interview cancellation refused: {}", err);
            err
        })?;

        tx.update_interview(&cancelled).await?;
        tx.commit().await?;

        info!(interview_id = %id, from = %current.status, "Interview cancelled");
        Ok(cancelled)
    }
}

/// Locks the owning application, then the interview.
async fn lock_pair(tx: &mut dyn StoreTx, id: Uuid) -> Result<(Application, Interview)> {
    let found = tx.find_interview(id).await?.ok_or_else(|| not_found(id))?;
    let application = tx
        .lock_application(found.application_id)
        .await?
        .ok_or_else(|| application_not_found(found.application_id))?;
    let interview = tx.lock_interview(id).await?.ok_or_else(|| not_found(id))?;
    Ok((application, interview))
}

fn not_found(id: Uuid) -> Error {
    Error::NotFound(format!("Interview {} not found", id))
}

fn application_not_found(id: Uuid) -> Error {
    Error::NotFound(format!("Application {} not found", id))
}
