//! In-process store used by the test-suite and by local runs without a
//! database. A transaction holds the writer mutex for its whole lifetime and
//! works on a staged copy, so concurrent writers are serialized and an
//! uncommitted transaction leaves no trace. Reads never take the writer
//! mutex: they see the last committed snapshot.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::store::{ApplicationFilter, InterviewFilter, RecruitmentStore, StoreTx};
use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::models::interview::Interview;
use crate::models::job_offer::JobOffer;

#[derive(Debug, Clone, Default)]
struct Tables {
    job_offers: HashMap<Uuid, JobOffer>,
    applications: HashMap<Uuid, Application>,
    interviews: HashMap<Uuid, Interview>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    writer: Arc<Mutex<()>>,
    committed: Arc<RwLock<Arc<Tables>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> Arc<Tables> {
        self.committed
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

#[async_trait]
impl RecruitmentStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>> {
        let guard = self.writer.clone().lock_owned().await;
        let staged = Tables::clone(&self.snapshot());
        Ok(Box::new(MemoryTx {
            _guard: guard,
            committed: self.committed.clone(),
            staged,
        }))
    }

    async fn get_job_offer(&self, id: Uuid) -> Result<Option<JobOffer>> {
        Ok(self.snapshot().job_offers.get(&id).cloned())
    }

    async fn list_job_offers(&self, active_only: bool) -> Result<Vec<JobOffer>> {
        let tables = self.snapshot();
        let mut offers: Vec<JobOffer> = tables
            .job_offers
            .values()
            .filter(|offer| !active_only || offer.is_active)
            .cloned()
            .collect();
        offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(offers)
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>> {
        Ok(self.snapshot().applications.get(&id).cloned())
    }

    async fn list_applications(&self, filter: &ApplicationFilter) -> Result<Vec<Application>> {
        let tables = self.snapshot();
        let mut applications: Vec<Application> = tables
            .applications
            .values()
            .filter(|application| filter.matches(application))
            .cloned()
            .collect();
        applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(applications)
    }

    async fn get_interview(&self, id: Uuid) -> Result<Option<Interview>> {
        Ok(self.snapshot().interviews.get(&id).cloned())
    }

    async fn list_interviews(&self, filter: &InterviewFilter) -> Result<Vec<Interview>> {
        let tables = self.snapshot();
        let mut interviews: Vec<Interview> = tables
            .interviews
            .values()
            .filter(|interview| filter.matches(interview))
            .cloned()
            .collect();
        interviews.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at));
        Ok(interviews)
    }
}

pub struct MemoryTx {
    _guard: OwnedMutexGuard<()>,
    committed: Arc<RwLock<Arc<Tables>>>,
    staged: Tables,
}

fn missing(entity: &str, id: Uuid) -> Error {
    Error::NotFound(format!("{} {} does not exist", entity, id))
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn lock_job_offer(&mut self, id: Uuid) -> Result<Option<JobOffer>> {
        Ok(self.staged.job_offers.get(&id).cloned())
    }

    async fn find_job_offer(&mut self, id: Uuid) -> Result<Option<JobOffer>> {
        Ok(self.staged.job_offers.get(&id).cloned())
    }

    async fn insert_job_offer(&mut self, offer: &JobOffer) -> Result<()> {
        self.staged.job_offers.insert(offer.id, offer.clone());
        Ok(())
    }

    async fn update_job_offer(&mut self, offer: &JobOffer) -> Result<()> {
        let slot = self
            .staged
            .job_offers
            .get_mut(&offer.id)
            .ok_or_else(|| missing("Job offer", offer.id))?;
        *slot = offer.clone();
        Ok(())
    }

    async fn lock_application(&mut self, id: Uuid) -> Result<Option<Application>> {
        Ok(self.staged.applications.get(&id).cloned())
    }

    async fn application_exists(&mut self, job_offer_id: Uuid, email: &str) -> Result<bool> {
        Ok(self.staged.applications.values().any(|application| {
            application.job_offer_id == job_offer_id && application.email.eq_ignore_ascii_case(email)
        }))
    }

    async fn insert_application(&mut self, application: &Application) -> Result<()> {
        if !self.staged.job_offers.contains_key(&application.job_offer_id) {
            return Err(missing("Job offer", application.job_offer_id));
        }
        self.staged
            .applications
            .insert(application.id, application.clone());
        Ok(())
    }

    async fn update_application(&mut self, application: &Application) -> Result<()> {
        let slot = self
            .staged
            .applications
            .get_mut(&application.id)
            .ok_or_else(|| missing("Application", application.id))?;
        *slot = application.clone();
        Ok(())
    }

    async fn find_interview(&mut self, id: Uuid) -> Result<Option<Interview>> {
        Ok(self.staged.interviews.get(&id).cloned())
    }

    async fn lock_interview(&mut self, id: Uuid) -> Result<Option<Interview>> {
        Ok(self.staged.interviews.get(&id).cloned())
    }

    async fn interviews_for_application(&mut self, application_id: Uuid) -> Result<Vec<Interview>> {
        let mut interviews: Vec<Interview> = self
            .staged
            .interviews
            .values()
            .filter(|interview| interview.application_id == application_id)
            .cloned()
            .collect();
        interviews.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at));
        Ok(interviews)
    }

    async fn insert_interview(&mut self, interview: &Interview) -> Result<()> {
        if !self
            .staged
            .applications
            .contains_key(&interview.application_id)
        {
            return Err(missing("Application", interview.application_id));
        }
        self.staged.interviews.insert(interview.id, interview.clone());
        Ok(())
    }

    async fn update_interview(&mut self, interview: &Interview) -> Result<()> {
        let slot = self
            .staged
            .interviews
            .get_mut(&interview.id)
            .ok_or_else(|| missing("Interview", interview.id))?;
        *slot = interview.clone();
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTx {
            _guard,
            committed,
            staged,
        } = *self;
        *committed.write().unwrap_or_else(|p| p.into_inner()) = Arc::new(staged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn offer() -> JobOffer {
        JobOffer {
            id: Uuid::new_v4(),
            title: "Support engineer".into(),
            specialty: "Linux".into(),
            contract_type: "CDI".into(),
            content: "Keep the fleet healthy".into(),
            address: None,
            salary: None,
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn dropped_transaction_leaves_no_trace() {
        let store = MemoryStore::new();
        let offer = offer();

        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_job_offer(&offer).await.unwrap();
        }
        assert!(store.get_job_offer(offer.id).await.unwrap().is_none());

        let mut tx = store.begin().await.unwrap();
        tx.insert_job_offer(&offer).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(store.get_job_offer(offer.id).await.unwrap(), Some(offer));
    }

    #[tokio::test]
    async fn updating_a_missing_row_is_not_found() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let err = tx.update_job_offer(&offer()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn reads_do_not_wait_for_an_open_transaction() {
        let store = MemoryStore::new();
        let offer = offer();
        let mut tx = store.begin().await.unwrap();
        tx.insert_job_offer(&offer).await.unwrap();
        tx.commit().await.unwrap();

        let mut open = store.begin().await.unwrap();
        let mut renamed = offer.clone();
        renamed.title = "Platform engineer".into();
        open.update_job_offer(&renamed).await.unwrap();

        let seen = tokio::time::timeout(Duration::from_secs(1), store.get_job_offer(offer.id))
            .await
            .expect("read blocked behind the open transaction")
            .unwrap();
        assert_eq!(seen, Some(offer.clone()));
        let listed = tokio::time::timeout(Duration::from_secs(1), store.list_job_offers(false))
            .await
            .expect("listing blocked behind the open transaction")
            .unwrap();
        assert_eq!(listed.len(), 1);

        open.commit().await.unwrap();
        assert_eq!(store.get_job_offer(offer.id).await.unwrap(), Some(renamed));
    }
}
