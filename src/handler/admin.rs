use std::sync::Arc;

use axum::{
    extract::Query,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::Datelike;
use validator::Validate;

use crate::{
    db::{bookingdb::BookingExt, userdb::UserExt},
    dtos::{
        admindtos::{
            BookingsByServiceResponseDto, DashboardSummaryResponseDto, MonthlyBookingResponseDto,
            MonthlyRevenueResponseDto, UpdateCredentialsDto, VerifyPasswordDto, YearQueryDto,
        },
        userdtos::{FilterUserDto, Response, UserData, UserResponseDto},
    },
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddeware,
    service::booking_views,
    utils::{password, phone},
    AppState,
};

pub fn admin_auth_handler() -> Router {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/verify", post(verify_password))
        .route("/credentials", put(update_credentials))
}

pub fn dashboard_handler() -> Router {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/monthly-revenue", get(get_monthly_revenue))
        .route("/monthly-booking", get(get_monthly_bookings))
        .route("/bookings-by-service", get(get_bookings_by_service))
}

pub async fn get_profile(
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&auth.user),
        },
    }))
}

/// First step of a credential change: the client confirms the current
/// password before showing the edit form.
pub async fn verify_password(
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<VerifyPasswordDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let matched = password::compare(&body.password, &auth.user.password)
        .map_err(|_| HttpError::bad_request(ErrorMessage::WrongCredentials.to_string()))?;

    if !matched {
        return Err(HttpError::bad_request(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    Ok(Json(Response {
        status: "success",
        message: "Password verified".to_string(),
    }))
}

/// The current password is re-checked here as well; the earlier verify call
/// only gates the UI.
pub async fn update_credentials(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateCredentialsDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let matched = password::compare(&body.current_password, &auth.user.password)
        .map_err(|_| HttpError::bad_request(ErrorMessage::WrongCredentials.to_string()))?;

    if !matched {
        return Err(HttpError::bad_request(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let normalized_phone = match body.new_phone.as_deref() {
        Some(raw) => Some(phone::normalize_sri_lankan(raw).ok_or_else(|| {
            HttpError::bad_request(ErrorMessage::InvalidPhoneNumber.to_string())
        })?),
        None => None,
    };

    let mut user = app_state
        .db_client
        .update_user_contact(auth.user.id, body.new_email, normalized_phone)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(new_password) = body.new_password {
        let hashed =
            password::hash(&new_password).map_err(|e| HttpError::server_error(e.to_string()))?;

        user = app_state
            .db_client
            .update_user_password(auth.user.id, hashed)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}

pub async fn get_summary(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let summary = app_state.booking_service.dashboard_summary().await?;

    Ok(Json(DashboardSummaryResponseDto {
        status: "success".to_string(),
        summary,
    }))
}

fn report_year(query: &YearQueryDto) -> i32 {
    query
        .year
        .unwrap_or_else(|| booking_views::now_colombo().year())
}

pub async fn get_monthly_revenue(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<YearQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let months = app_state
        .db_client
        .get_monthly_revenue(report_year(&query))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(MonthlyRevenueResponseDto {
        status: "success".to_string(),
        months,
    }))
}

pub async fn get_monthly_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<YearQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let months = app_state
        .db_client
        .get_monthly_bookings(report_year(&query))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(MonthlyBookingResponseDto {
        status: "success".to_string(),
        months,
    }))
}

pub async fn get_bookings_by_service(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let services = app_state
        .db_client
        .get_bookings_by_service()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(BookingsByServiceResponseDto {
        status: "success".to_string(),
        services,
    }))
}
