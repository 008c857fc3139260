use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    handler::Handler,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::servicedb::ServiceExt,
    dtos::{
        servicedtos::{
            IssueListResponseDto, IssueQueryDto, IssueResponseDto, SaveIssueDto,
            SaveServiceDto, ServiceListResponseDto, ServiceResponseDto, UpdateIssueDto,
        },
        userdtos::{RequestQueryDto, Response},
    },
    error::HttpError,
    middleware,
    AppState,
};

/// Catalog reads are public so the booking flow can render without a
/// session; catalog writes are admin-only.
pub fn services_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_services).post(
                create_service
                    .layer(axum::middleware::from_fn(middleware::admin_only))
                    .layer(axum::middleware::from_fn(middleware::auth)),
            ),
        )
        .route(
            "/:service_id",
            put(update_service)
                .delete(delete_service)
                .layer(axum::middleware::from_fn(middleware::admin_only))
                .layer(axum::middleware::from_fn(middleware::auth)),
        )
}

pub fn issues_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_issues).post(
                create_issue
                    .layer(axum::middleware::from_fn(middleware::admin_only))
                    .layer(axum::middleware::from_fn(middleware::auth)),
            ),
        )
        .route(
            "/:issue_id",
            put(update_issue)
                .delete(delete_issue)
                .layer(axum::middleware::from_fn(middleware::admin_only))
                .layer(axum::middleware::from_fn(middleware::auth)),
        )
}

pub async fn get_services(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(20);

    let services = app_state
        .db_client
        .get_services(page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = app_state
        .db_client
        .get_service_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ServiceListResponseDto {
        status: "success".to_string(),
        services,
        results,
    }))
}

pub async fn create_service(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveServiceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let service = app_state
        .db_client
        .save_service(body.service, body.description, body.icon_name)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ServiceResponseDto {
        status: "success".to_string(),
        service,
    }))
}

pub async fn update_service(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(service_id): Path<Uuid>,
    Json(body): Json<SaveServiceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_service(service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_none() {
        return Err(HttpError::not_found("Service not found"));
    }

    let service = app_state
        .db_client
        .update_service(service_id, body.service, body.description, body.icon_name)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ServiceResponseDto {
        status: "success".to_string(),
        service,
    }))
}

pub async fn delete_service(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(service_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_service(service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: "Service deleted".to_string(),
    }))
}

pub async fn get_issues(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<IssueQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(20);

    let issues = app_state
        .db_client
        .get_issues(query.service_id, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = app_state
        .db_client
        .get_issue_count(query.service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(IssueListResponseDto {
        status: "success".to_string(),
        issues,
        results,
    }))
}

pub async fn create_issue(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveIssueDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let service = app_state
        .db_client
        .get_service(body.service_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if service.is_none() {
        return Err(HttpError::bad_request("Unknown service for issue"));
    }

    let issue = app_state
        .db_client
        .save_issue(body.service_id, body.issue_name, body.basic_cost)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(IssueResponseDto {
        status: "success".to_string(),
        issue,
    }))
}

pub async fn update_issue(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(issue_id): Path<Uuid>,
    Json(body): Json<UpdateIssueDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let issue = app_state
        .db_client
        .update_issue(issue_id, body.issue_name, body.basic_cost)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(IssueResponseDto {
        status: "success".to_string(),
        issue,
    }))
}

pub async fn delete_issue(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(issue_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_issue(issue_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: "Issue deleted".to_string(),
    }))
}
