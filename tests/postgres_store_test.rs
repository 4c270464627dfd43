//! Runs the workflow against PostgreSQL. Skipped when `DATABASE_URL` is unset.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{candidate, decide, offer_payload, office, on_site, start, BrokenApplicationWrites};
use recruitment_workflow::config::Config;
use recruitment_workflow::database::pool::{create_pool, run_migrations};
use recruitment_workflow::database::postgres::PgStore;
use recruitment_workflow::database::store::RecruitmentStore;
use recruitment_workflow::dto::job_offer_dto::UpdateJobOfferPayload;
use recruitment_workflow::error::ErrorKind;
use recruitment_workflow::models::address::Address;
use recruitment_workflow::models::application::{Application, ApplicationStatus};
use recruitment_workflow::models::interview::InterviewStatus;
use recruitment_workflow::models::job_offer::JobOffer;
use recruitment_workflow::utils::time::{Clock, FixedClock};
use recruitment_workflow::workflow::{InterviewPatch, INTERVIEW_COMPLETED_COMMENT};
use recruitment_workflow::AppState;
use uuid::Uuid;

struct PgHarness {
    store: Arc<PgStore>,
    clock: Arc<FixedClock>,
    state: AppState,
}

async fn pg_harness() -> Option<PgHarness> {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").map_or(true, |url| url.is_empty()) {
        eprintln!("DATABASE_URL is not set; skipping PostgreSQL test");
        return None;
    }
    std::env::set_var("SERVER_ADDRESS", "127.0.0.1:0");

    let config = Config::from_env().expect("load config");
    let pool = create_pool(&config).await.expect("create pool");
    run_migrations(&pool).await.expect("run migrations");

    let store = Arc::new(PgStore::new(pool));
    let clock = Arc::new(FixedClock::new(start()));
    let state = AppState::new(store.clone(), clock.clone());
    Some(PgHarness {
        store,
        clock,
        state,
    })
}

fn unique_email() -> String {
    format!("candidate-{}@example.com", Uuid::new_v4())
}

impl PgHarness {
    async fn offer(&self, address: Option<Address>) -> JobOffer {
        self.state
            .job_offer_service
            .create(offer_payload(address))
            .await
            .expect("create job offer")
    }

    async fn offered_application(&self, offer: &JobOffer) -> Application {
        let service = &self.state.application_service;
        let application = service
            .submit(candidate(offer.id, &unique_email()))
            .await
            .expect("submit application");
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
}

fn complete() -> InterviewPatch {
    InterviewPatch {
        status: Some(InterviewStatus::Completed),
        notes: Some("Solid systems answers".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn candidate_is_hired_on_postgres() {
    let Some(h) = pg_harness().await else {
        return;
    };
    let offer = h.offer(Some(office())).await;
    let application = h.offered_application(&offer).await;
    assert_eq!(application.status, ApplicationStatus::InterviewOffered);

    let interview = h
        .state
        .interview_service
        .create(on_site(application.id, None))
        .await
        .unwrap();
    assert_eq!(interview.address, Some(office()));

    h.clock.advance(chrono::Duration::days(7));
    let completed = h
        .state
        .interview_service
        .update(interview.id, complete())
        .await
        .unwrap();
    assert_eq!(completed.status, InterviewStatus::Completed);

    let promoted = h
        .state
        .application_service
        .get_by_id(application.id)
        .await
        .unwrap();
    assert_eq!(promoted.status, ApplicationStatus::InterviewCompleted);
    assert_eq!(promoted.comment.as_deref(), Some(INTERVIEW_COMPLETED_COMMENT));

    let hired = h
        .state
        .application_service
        .process(
            application.id,
            decide(ApplicationStatus::Hired, Some("Offer accepted")),
        )
        .await
        .unwrap();
    assert_eq!(hired.status, ApplicationStatus::Hired);
    assert_eq!(hired.processed_at, Some(h.clock.now()));
}

#[tokio::test]
async fn failed_promotion_rolls_back_on_postgres() {
    let Some(h) = pg_harness().await else {
        return;
    };
    let offer = h.offer(None).await;
    let application = h.offered_application(&offer).await;
    let interview = h
        .state
        .interview_service
        .create(common::remote(application.id))
        .await
        .unwrap();

    let broken = AppState::new(
        Arc::new(BrokenApplicationWrites::wrap(h.store.clone())),
        h.clock.clone(),
    );
    let err = broken
        .interview_service
        .update(interview.id, complete())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);

    let stored = h.state.interview_service.get_by_id(interview.id).await.unwrap();
    assert_eq!(stored.status, InterviewStatus::Scheduled);
    assert!(stored.notes.is_none());
    let stored = h
        .state
        .application_service
        .get_by_id(application.id)
        .await
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::InterviewOffered);
    assert_eq!(stored.comment.as_deref(), Some("Strong profile"));
}

#[tokio::test]
async fn interview_address_is_a_snapshot_on_postgres() {
    let Some(h) = pg_harness().await else {
        return;
    };
    let offer = h.offer(Some(office())).await;
    let application = h.offered_application(&offer).await;
    let interview = h
        .state
        .interview_service
        .create(on_site(application.id, None))
        .await
        .unwrap();

    let moved = h
        .state
        .job_offer_service
        .update(
            offer.id,
            UpdateJobOfferPayload {
                address: Some(Address {
                    city: Some("Namur".into()),
                    postal_code: Some("5000".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let moved_address = moved.address.unwrap();
    assert_eq!(moved_address.city.as_deref(), Some("Namur"));
    assert_eq!(moved_address.street, office().street);

    let stored = h.state.interview_service.get_by_id(interview.id).await.unwrap();
    assert_eq!(stored.address, Some(office()));
    let reread = h.state.job_offer_service.get_by_id(offer.id).await.unwrap();
    assert_eq!(reread.address, Some(moved_address));
}

#[tokio::test]
async fn offer_address_read_does_not_wait_for_a_row_lock() {
    let Some(h) = pg_harness().await else {
        return;
    };
    let offer = h.offer(Some(office())).await;

    let mut holder = h.store.begin().await.unwrap();
    assert!(holder.lock_job_offer(offer.id).await.unwrap().is_some());

    let mut reader = h.store.begin().await.unwrap();
    let seen = tokio::time::timeout(Duration::from_secs(2), reader.find_job_offer(offer.id))
        .await
        .expect("offer read blocked behind FOR UPDATE")
        .unwrap();
    assert_eq!(seen.and_then(|offer| offer.address), Some(office()));

    drop(reader);
    drop(holder);
}
