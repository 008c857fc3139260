use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    handler::Handler,
    response::IntoResponse,
    routing::{patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::professionaldb::{NewProfessional, ProfessionalFilter},
    dtos::professionaldtos::{
        ApproveProfessionalDto, FilterProfessionalDto, ProfessionalListResponseDto,
        ProfessionalQueryDto, ProfessionalResponseDto, ProfessionalStatusUpdateDto,
        RegisterProfessionalDto,
    },
    error::HttpError,
    middleware,
    models::professionalmodel::RegistrationWay,
    AppState,
};

/// Public registration plus the admin review surface. Registration stays
/// open so the website signup form can post without a session; everything
/// else is admin-only.
pub fn professionals_handler() -> Router {
    Router::new()
        .route(
            "/",
            post(register_professional).get(
                get_professionals
                    .layer(axum::middleware::from_fn(middleware::admin_only))
                    .layer(axum::middleware::from_fn(middleware::auth)),
            ),
        )
        .route(
            "/:professional_id/status",
            patch(update_status)
                .layer(axum::middleware::from_fn(middleware::admin_only))
                .layer(axum::middleware::from_fn(middleware::auth)),
        )
        .route(
            "/:professional_id/approve",
            post(approve_professional)
                .layer(axum::middleware::from_fn(middleware::admin_only))
                .layer(axum::middleware::from_fn(middleware::auth)),
        )
}

pub async fn register_professional(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterProfessionalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let professional = app_state
        .professional_service
        .register(NewProfessional {
            name: body.name,
            email: body.email,
            phone: body.phone,
            service_id: body.service_id,
            experience_years: body.experience_years,
            district: body.district,
            location: body.location,
            lat: body.lat,
            lng: body.lng,
            nic_number: body.nic_number,
            way: body.way.unwrap_or(RegistrationWay::Website),
            profile_image: body.profile_image,
        })
        .await?;

    Ok(Json(ProfessionalResponseDto {
        status: "success".to_string(),
        professional: FilterProfessionalDto::filter_professional(&professional),
    }))
}

pub async fn get_professionals(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<ProfessionalQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(20);

    let professionals = app_state
        .professional_service
        .list(
            &ProfessionalFilter {
                status: query.status,
                district: query.district,
                search: query.search,
                way: query.way,
            },
            page,
            limit,
        )
        .await?;

    let professionals: Vec<FilterProfessionalDto> = professionals
        .iter()
        .map(FilterProfessionalDto::filter_professional)
        .collect();

    Ok(Json(ProfessionalListResponseDto {
        status: "success".to_string(),
        results: professionals.len() as i64,
        professionals,
    }))
}

pub async fn update_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(professional_id): Path<Uuid>,
    Json(body): Json<ProfessionalStatusUpdateDto>,
) -> Result<impl IntoResponse, HttpError> {
    let professional = app_state
        .professional_service
        .update_status(professional_id, body.status)
        .await?;

    Ok(Json(ProfessionalResponseDto {
        status: "success".to_string(),
        professional: FilterProfessionalDto::filter_professional(&professional),
    }))
}

pub async fn approve_professional(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(professional_id): Path<Uuid>,
    Json(body): Json<ApproveProfessionalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let professional = app_state
        .professional_service
        .approve(
            professional_id,
            body.name,
            body.phone,
            body.service_id,
            body.experience_years,
            body.district,
            body.location,
            body.lat,
            body.lng,
            body.nic_number,
            body.profile_image,
            body.initial_password,
        )
        .await?;

    Ok(Json(ProfessionalResponseDto {
        status: "success".to_string(),
        professional: FilterProfessionalDto::filter_professional(&professional),
    }))
}
