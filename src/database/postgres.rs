use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use super::store::{ApplicationFilter, InterviewFilter, RecruitmentStore, StoreTx};
use crate::error::{Error, Result};
use crate::models::address::Address;
use crate::models::application::Application;
use crate::models::interview::Interview;
use crate::models::job_offer::JobOffer;

const JOB_OFFER_COLUMNS: &str = "id, title, specialty, contract_type, content, address, salary, is_active, created_at, updated_at";
const APPLICATION_COLUMNS: &str = "id, job_offer_id, firstname, lastname, email, phone, cover_letter, status, comment, applied_at, processed_at, updated_at";
const INTERVIEW_COLUMNS: &str = "id, application_id, scheduled_at, interview_type, status, visio_link, address, notes, created_at, updated_at, cancelled_at";

#[derive(Debug, FromRow)]
struct JobOfferRow {
    id: Uuid,
    title: String,
    specialty: String,
    contract_type: String,
    content: String,
    address: Option<Json<Address>>,
    salary: Option<Decimal>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<JobOfferRow> for JobOffer {
    fn from(row: JobOfferRow) -> Self {
        JobOffer {
            id: row.id,
            title: row.title,
            specialty: row.specialty,
            contract_type: row.contract_type,
            content: row.content,
            address: row.address.map(|Json(address)| address),
            salary: row.salary,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: Uuid,
    job_offer_id: Uuid,
    firstname: String,
    lastname: String,
    email: String,
    phone: String,
    cover_letter: Option<String>,
    status: String,
    comment: Option<String>,
    applied_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = Error;

    fn try_from(row: ApplicationRow) -> Result<Self> {
        Ok(Application {
            id: row.id,
            job_offer_id: row.job_offer_id,
            firstname: row.firstname,
            lastname: row.lastname,
            email: row.email,
            phone: row.phone,
            cover_letter: row.cover_letter,
            status: row.status.parse().map_err(corrupt_column)?,
            comment: row.comment,
            applied_at: row.applied_at,
            processed_at: row.processed_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct InterviewRow {
    id: Uuid,
    application_id: Uuid,
    scheduled_at: DateTime<Utc>,
    interview_type: String,
    status: String,
    visio_link: Option<String>,
    address: Option<Json<Address>>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
}

impl TryFrom<InterviewRow> for Interview {
    type Error = Error;

    fn try_from(row: InterviewRow) -> Result<Self> {
        Ok(Interview {
            id: row.id,
            application_id: row.application_id,
            scheduled_at: row.scheduled_at,
            interview_type: row.interview_type.parse().map_err(corrupt_column)?,
            status: row.status.parse().map_err(corrupt_column)?,
            visio_link: row.visio_link,
            address: row.address.map(|Json(address)| address),
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
            cancelled_at: row.cancelled_at,
        })
    }
}

// A status string the enums reject means the row was written outside the
// service, which is a storage problem rather than caller input.
fn corrupt_column(err: Error) -> Error {
    Error::Internal(format!("Unreadable stored value: {}", err))
}

fn collect<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = Error>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecruitmentStore for PgStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgTx { tx }))
    }

    async fn get_job_offer(&self, id: Uuid) -> Result<Option<JobOffer>> {
        let row = sqlx::query_as::<_, JobOfferRow>(&format!(
            "SELECT {} FROM job_offers WHERE id = $1",
            JOB_OFFER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(JobOffer::from))
    }

    async fn list_job_offers(&self, active_only: bool) -> Result<Vec<JobOffer>> {
        let rows = sqlx::query_as::<_, JobOfferRow>(&format!(
            "SELECT {} FROM job_offers WHERE ($1 = FALSE OR is_active) ORDER BY created_at DESC",
            JOB_OFFER_COLUMNS
        ))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(JobOffer::from).collect())
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Application::try_from).transpose()
    }

    async fn list_applications(&self, filter: &ApplicationFilter) -> Result<Vec<Application>> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM applications WHERE TRUE",
            APPLICATION_COLUMNS
        ));
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(job_offer_id) = filter.job_offer_id {
            query.push(" AND job_offer_id = ").push_bind(job_offer_id);
        }
        if let Some(email) = &filter.email {
            query.push(" AND lower(email) = lower(").push_bind(email.clone()).push(")");
        }
        query.push(" ORDER BY applied_at DESC");

        let rows = query
            .build_query_as::<ApplicationRow>()
            .fetch_all(&self.pool)
            .await?;
        collect(rows)
    }

    async fn get_interview(&self, id: Uuid) -> Result<Option<Interview>> {
        let row = sqlx::query_as::<_, InterviewRow>(&format!(
            "SELECT {} FROM interviews WHERE id = $1",
            INTERVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Interview::try_from).transpose()
    }

    async fn list_interviews(&self, filter: &InterviewFilter) -> Result<Vec<Interview>> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM interviews WHERE TRUE",
            INTERVIEW_COLUMNS
        ));
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(application_id) = filter.application_id {
            query.push(" AND application_id = ").push_bind(application_id);
        }
        query.push(" ORDER BY scheduled_at ASC");

        let rows = query
            .build_query_as::<InterviewRow>()
            .fetch_all(&self.pool)
            .await?;
        collect(rows)
    }
}

pub struct PgTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTx for PgTx {
    async fn lock_job_offer(&mut self, id: Uuid) -> Result<Option<JobOffer>> {
        let row = sqlx::query_as::<_, JobOfferRow>(&format!(
            "SELECT {} FROM job_offers WHERE id = $1 FOR UPDATE",
            JOB_OFFER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(JobOffer::from))
    }

    async fn find_job_offer(&mut self, id: Uuid) -> Result<Option<JobOffer>> {
        let row = sqlx::query_as::<_, JobOfferRow>(&format!(
            "SELECT {} FROM job_offers WHERE id = $1",
            JOB_OFFER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(JobOffer::from))
    }

    async fn insert_job_offer(&mut self, offer: &JobOffer) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO job_offers (
                id, title, specialty, contract_type, content,
                address, salary, is_active, created_at, updated_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
            "#,
        )
        .bind(offer.id)
        .bind(&offer.title)
        .bind(&offer.specialty)
        .bind(&offer.contract_type)
        .bind(&offer.content)
        .bind(offer.address.clone().map(Json))
        .bind(offer.salary)
        .bind(offer.is_active)
        .bind(offer.created_at)
        .bind(offer.updated_at)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn update_job_offer(&mut self, offer: &JobOffer) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE job_offers
            SET title = $2, specialty = $3, contract_type = $4, content = $5,
                address = $6, salary = $7, is_active = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(offer.id)
        .bind(&offer.title)
        .bind(&offer.specialty)
        .bind(&offer.contract_type)
        .bind(&offer.content)
        .bind(offer.address.clone().map(Json))
        .bind(offer.salary)
        .bind(offer.is_active)
        .bind(offer.updated_at)
        .execute(&mut *self.tx)
        .await?;
        expect_one_row(result.rows_affected(), "Job offer", offer.id)
    }

    async fn lock_application(&mut self, id: Uuid) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {} FROM applications WHERE id = $1 FOR UPDATE",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        row.map(Application::try_from).transpose()
    }

    async fn application_exists(&mut self, job_offer_id: Uuid, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS (SELECT 1 FROM applications WHERE job_offer_id = $1 AND lower(email) = lower($2))"#,
        )
        .bind(job_offer_id)
        .bind(email)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(exists)
    }

    async fn insert_application(&mut self, application: &Application) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO applications (
                id, job_offer_id, firstname, lastname, email, phone, cover_letter,
                status, comment, applied_at, processed_at, updated_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)
            "#,
        )
        .bind(application.id)
        .bind(application.job_offer_id)
        .bind(&application.firstname)
        .bind(&application.lastname)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.cover_letter)
        .bind(application.status.as_str())
        .bind(&application.comment)
        .bind(application.applied_at)
        .bind(application.processed_at)
        .bind(application.updated_at)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn update_application(&mut self, application: &Application) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE applications
            SET firstname = $2, lastname = $3, email = $4, phone = $5, cover_letter = $6,
                status = $7, comment = $8, processed_at = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(application.id)
        .bind(&application.firstname)
        .bind(&application.lastname)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.cover_letter)
        .bind(application.status.as_str())
        .bind(&application.comment)
        .bind(application.processed_at)
        .bind(application.updated_at)
        .execute(&mut *self.tx)
        .await?;
        expect_one_row(result.rows_affected(), "Application", application.id)
    }

    async fn find_interview(&mut self, id: Uuid) -> Result<Option<Interview>> {
        let row = sqlx::query_as::<_, InterviewRow>(&format!(
            "SELECT {} FROM interviews WHERE id = $1",
            INTERVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        row.map(Interview::try_from).transpose()
    }

    async fn lock_interview(&mut self, id: Uuid) -> Result<Option<Interview>> {
        let row = sqlx::query_as::<_, InterviewRow>(&format!(
            "SELECT {} FROM interviews WHERE id = $1 FOR UPDATE",
            INTERVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        row.map(Interview::try_from).transpose()
    }

    async fn interviews_for_application(&mut self, application_id: Uuid) -> Result<Vec<Interview>> {
        let rows = sqlx::query_as::<_, InterviewRow>(&format!(
            "SELECT {} FROM interviews WHERE application_id = $1 ORDER BY scheduled_at ASC",
            INTERVIEW_COLUMNS
        ))
        .bind(application_id)
        .fetch_all(&mut *self.tx)
        .await?;
        collect(rows)
    }

    async fn insert_interview(&mut self, interview: &Interview) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO interviews (
                id, application_id, scheduled_at, interview_type, status,
                visio_link, address, notes, created_at, updated_at, cancelled_at
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
            "#,
        )
        .bind(interview.id)
        .bind(interview.application_id)
        .bind(interview.scheduled_at)
        .bind(interview.interview_type.as_str())
        .bind(interview.status.as_str())
        .bind(&interview.visio_link)
        .bind(interview.address.clone().map(Json))
        .bind(&interview.notes)
        .bind(interview.created_at)
        .bind(interview.updated_at)
        .bind(interview.cancelled_at)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn update_interview(&mut self, interview: &Interview) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE interviews
            SET scheduled_at = $2, interview_type = $3, status = $4, visio_link = $5,
                address = $6, notes = $7, updated_at = $8, cancelled_at = $9
            WHERE id = $1
            "#,
        )
        .bind(interview.id)
        .bind(interview.scheduled_at)
        .bind(interview.interview_type.as_str())
        .bind(interview.status.as_str())
        .bind(&interview.visio_link)
        .bind(interview.address.clone().map(Json))
        .bind(&interview.notes)
        .bind(interview.updated_at)
        .bind(interview.cancelled_at)
        .execute(&mut *self.tx)
        .await?;
        expect_one_row(result.rows_affected(), "Interview", interview.id)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let PgTx { tx } = *self;
        tx.commit().await?;
        Ok(())
    }
}

fn expect_one_row(affected: u64, entity: &str, id: Uuid) -> Result<()> {
    if affected == 0 {
        return Err(Error::NotFound(format!("{} {} does not exist", entity, id)));
    }
    Ok(())
}
