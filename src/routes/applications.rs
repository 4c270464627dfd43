use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{
        ApplicationListQuery, ApplicationListResponse, ApplicationResponse,
        ProcessApplicationPayload, SubmitApplicationPayload, UpdateApplicationPayload,
    },
    dto::interview_dto::InterviewListResponse,
    error::Result,
    models::application::ApplicationStatus,
    workflow::ProcessCommand,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = SubmitApplicationPayload,
    responses(
        (status = 201, description = "Application submitted", body = Json<ApplicationResponse>),
        (status = 400, description = "Invalid payload, inactive offer or duplicate email"),
        (status = 404, description = "Job offer not found"),
        (status = 429, description = "Rate limit exceeded")
    )
)]
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    Json(payload): Json<SubmitApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state.application_service.submit(payload).await?;
    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(application))))
}

#[utoipa::path(
    get,
    path = "/api/applications",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("job_offer_id" = Option<Uuid>, Query, description = "Filter by job offer"),
        ("email" = Option<String>, Query, description = "Filter by candidate email")
    ),
    responses(
        (status = 200, description = "Applications, most recent first", body = Json<ApplicationListResponse>),
        (status = 400, description = "Unknown status")
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list(query).await?;
    Ok(Json(ApplicationListResponse::from(applications)))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = Json<ApplicationResponse>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(id).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Contact details updated", body = Json<ApplicationResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state.application_service.update(id, payload).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}/process",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = ProcessApplicationPayload,
    responses(
        (status = 200, description = "Decision applied", body = Json<ApplicationResponse>),
        (status = 400, description = "Unknown status or missing rejection comment"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Transition not allowed from the current status"),
        (status = 422, description = "No completed interview yet")
    )
)]
#[axum::debug_handler]
pub async fn process_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProcessApplicationPayload>,
) -> Result<impl IntoResponse> {
    let status: ApplicationStatus = payload.status.parse()?;
    let command = ProcessCommand::new(status, payload.comment);
    let application = state.application_service.process(id, command).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}/interviews",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Interviews of the application, earliest first", body = Json<InterviewListResponse>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn list_application_interviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let interviews = state.interview_service.list_for_application(id).await?;
    Ok(Json(InterviewListResponse::from(interviews)))
}
