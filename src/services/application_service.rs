use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::database::store::{ApplicationFilter, RecruitmentStore};
use crate::dto::application_dto::{
    ApplicationListQuery, SubmitApplicationPayload, UpdateApplicationPayload,
};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::utils::time::Clock;
use crate::workflow::{self, ProcessCommand};

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn RecruitmentStore>,
    clock: Arc<dyn Clock>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn RecruitmentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    #[tracing::instrument(skip_all, fields(job_offer_id = %payload.job_offer_id))]
    pub async fn submit(&self, payload: SubmitApplicationPayload) -> Result<Application> {
        let mut tx = self.store.begin().await?;

        let offer = tx
            .lock_job_offer(payload.job_offer_id)
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!("Job offer {} not found", payload.job_offer_id))
            })?;
        if !offer.is_active {
            return Err(Error::Validation(
                "This job offer no longer accepts applications".to_string(),
            ));
        }
        let email = payload.email.trim().to_string();
        if tx.application_exists(offer.id, &email).await? {
            return Err(Error::Validation(format!(
                "{} has already applied to this job offer",
                email
            )));
        }

        let application = Application {
            id: Uuid::new_v4(),
            job_offer_id: offer.id,
            firstname: payload.firstname,
            lastname: payload.lastname,
            email,
            phone: payload.phone,
            cover_letter: payload.cover_letter,
            status: ApplicationStatus::Pending,
            comment: None,
            applied_at: self.clock.now(),
            processed_at: None,
            updated_at: None,
        };
        tx.insert_application(&application).await?;
        tx.commit().await?;

        info!(application_id = %application.id, "Application submitted");
        Ok(application)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Application> {
        self.store
            .get_application(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn list(&self, query: ApplicationListQuery) -> Result<Vec<Application>> {
        let filter = ApplicationFilter {
            status: query
                .status
                .as_deref()
                .map(str::parse::<ApplicationStatus>)
                .transpose()?,
            job_offer_id: query.job_offer_id,
            email: query.email,
        };
        self.store.list_applications(&filter).await
    }

    /// Corrects contact details. The status only moves through [`Self::process`].
    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: Uuid, payload: UpdateApplicationPayload) -> Result<Application> {
        let mut tx = self.store.begin().await?;
        let mut application = tx.lock_application(id).await?.ok_or_else(|| not_found(id))?;

        if let Some(email) = payload.email {
            let email = email.trim().to_string();
            if !email.eq_ignore_ascii_case(&application.email)
                && tx.application_exists(application.job_offer_id, &email).await?
            {
                return Err(Error::Validation(format!(
                    "{} has already applied to this job offer",
                    email
                )));
            }
            application.email = email;
        }
        if let Some(firstname) = payload.firstname {
            application.firstname = firstname;
        }
        if let Some(lastname) = payload.lastname {
            application.lastname = lastname;
        }
        if let Some(phone) = payload.phone {
            application.phone = phone;
        }
        if let Some(cover_letter) = payload.cover_letter {
            application.cover_letter = Some(cover_letter);
        }
        application.updated_at = Some(self.clock.now());

        tx.update_application(&application).await?;
        tx.commit().await?;

        info!(application_id = %application.id, "Application contact details updated");
        Ok(application)
    }

    /// Applies a staff decision. The application row stays locked from the
    /// guard checks until the write commits.
    #[tracing::instrument(skip(self, command), fields(target = %command.status))]
    pub async fn process(&self, id: Uuid, command: ProcessCommand) -> Result<Application> {
        let mut tx = self.store.begin().await?;
        let current = tx.lock_application(id).await?.ok_or_else(|| not_found(id))?;

        let interviews = if command.needs_interview_evidence() {
            tx.interviews_for_application(id).await?
        } else {
            Vec::new()
        };

        let next = match workflow::application::process(
            &current,
            &command,
            &interviews,
            self.clock.now(),
        ) {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    application_id = %id,
                    from = %current.status,
                    to = %command.status,
                    kind = err.kind().as_str(),
                    "Application transition refused: {}",
                    err
                );
                return Err(err);
            }
        };

        tx.update_application(&next).await?;
        tx.commit().await?;

        info!(
            application_id = %id,
            from = %current.status,
            to = %next.status,
            "Application processed"
        );
        Ok(next)
    }
}

fn not_found(id: Uuid) -> Error {
    Error::NotFound(format!("Application {} not found", id))
}
