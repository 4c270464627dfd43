use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_offer_dto::{
        CreateJobOfferPayload, JobOfferListQuery, JobOfferListResponse, JobOfferResponse,
        UpdateJobOfferPayload,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/job-offers",
    request_body = CreateJobOfferPayload,
    responses(
        (status = 201, description = "Job offer created", body = Json<JobOfferResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_job_offer(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobOfferPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let offer = state.job_offer_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(JobOfferResponse::from(offer))))
}

#[utoipa::path(
    get,
    path = "/api/job-offers",
    params(
        ("active_only" = Option<bool>, Query, description = "Only offers still accepting applications")
    ),
    responses(
        (status = 200, description = "Job offers, newest first", body = Json<JobOfferListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_job_offers(
    State(state): State<AppState>,
    Query(query): Query<JobOfferListQuery>,
) -> Result<impl IntoResponse> {
    let offers = state
        .job_offer_service
        .list(query.active_only.unwrap_or(false))
        .await?;
    Ok(Json(JobOfferListResponse::from(offers)))
}

#[utoipa::path(
    get,
    path = "/api/job-offers/{id}",
    params(
        ("id" = Uuid, Path, description = "Job offer ID")
    ),
    responses(
        (status = 200, description = "Job offer found", body = Json<JobOfferResponse>),
        (status = 404, description = "Job offer not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job_offer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let offer = state.job_offer_service.get_by_id(id).await?;
    Ok(Json(JobOfferResponse::from(offer)))
}

#[utoipa::path(
    patch,
    path = "/api/job-offers/{id}",
    params(
        ("id" = Uuid, Path, description = "Job offer ID")
    ),
    request_body = UpdateJobOfferPayload,
    responses(
        (status = 200, description = "Job offer updated", body = Json<JobOfferResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job offer not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job_offer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobOfferPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let offer = state.job_offer_service.update(id, payload).await?;
    Ok(Json(JobOfferResponse::from(offer)))
}

#[utoipa::path(
    post,
    path = "/api/job-offers/{id}/deactivate",
    params(
        ("id" = Uuid, Path, description = "Job offer ID")
    ),
    responses(
        (status = 200, description = "Job offer deactivated", body = Json<JobOfferResponse>),
        (status = 404, description = "Job offer not found")
    )
)]
#[axum::debug_handler]
pub async fn deactivate_job_offer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let offer = state.job_offer_service.deactivate(id).await?;
    Ok(Json(JobOfferResponse::from(offer)))
}
