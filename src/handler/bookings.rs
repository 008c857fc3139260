use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    handler::Handler,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::bookingdb::{NewBooking, ReviewSide, RevenueFilter},
    dtos::bookingdtos::{
        AssignBookingDto, BookingListResponseDto, BookingResponseDto, CreateBookingDto,
        FilterBookingDetailedDto, FilterBookingDto, PaymentDto, RevenueQueryDto,
        RevenueResponseDto, SubmitReviewDto, UpdateBookingStatusDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::{self, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::booking_views::AdminView,
    AppState,
};

/// Everything here sits behind [`middleware::auth`] (layered in
/// `routes.rs`); the reporting and lifecycle routes additionally require the
/// admin role. Creating a booking is the one thing a customer session can do.
pub fn bookings_handler() -> Router {
    Router::new()
        .route("/", post(create_booking))
        .route(
            "/all-detailed",
            get(get_all_detailed.layer(axum::middleware::from_fn(middleware::admin_only))),
        )
        .route(
            "/view/:view",
            get(get_view.layer(axum::middleware::from_fn(middleware::admin_only))),
        )
        .route(
            "/revenue",
            get(get_revenue.layer(axum::middleware::from_fn(middleware::admin_only))),
        )
        .route(
            "/payments",
            get(get_payments.layer(axum::middleware::from_fn(middleware::admin_only))),
        )
        .route(
            "/notifications/overdue",
            get(get_overdue_notifications
                .layer(axum::middleware::from_fn(middleware::admin_only))),
        )
        .route(
            "/update-status/:booking_id",
            put(update_status.layer(axum::middleware::from_fn(middleware::admin_only))),
        )
        .route(
            "/:booking_id/assign",
            put(assign_booking.layer(axum::middleware::from_fn(middleware::admin_only))),
        )
        .route("/:booking_id/progress", put(progress_booking))
        .route("/:booking_id/payment", put(record_payment))
        .route("/:booking_id/review", put(submit_review))
}

pub async fn create_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking = app_state
        .booking_service
        .create_booking(NewBooking {
            customer_id: auth.user.id,
            service_id: body.service_id,
            issue_type: body.issue_type,
            description: body.description,
            location_city: body.location.city,
            location_district: body.location.district,
            location_area: body.location.area,
            location_address: body.location.address,
            lat: body.location.lat,
            lng: body.location.lng,
            scheduled_time: body.scheduled_time,
        })
        .await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        booking: FilterBookingDto::filter_booking(&booking),
    }))
}

pub async fn get_all_detailed(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let bookings = app_state.booking_service.all_detailed().await?;

    let bookings: Vec<FilterBookingDetailedDto> = bookings
        .iter()
        .map(FilterBookingDetailedDto::filter_detailed)
        .collect();

    Ok(Json(BookingListResponseDto {
        status: "success".to_string(),
        results: bookings.len() as i64,
        bookings,
    }))
}

pub async fn get_view(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(view): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let view = AdminView::from_slug(&view)
        .ok_or_else(|| HttpError::bad_request(format!("Unknown booking view: {}", view)))?;

    let bookings = app_state.booking_service.view(view).await?;

    let bookings: Vec<FilterBookingDetailedDto> = bookings
        .iter()
        .map(FilterBookingDetailedDto::filter_detailed)
        .collect();

    Ok(Json(BookingListResponseDto {
        status: "success".to_string(),
        results: bookings.len() as i64,
        bookings,
    }))
}

pub async fn get_revenue(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<RevenueQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let report = app_state
        .booking_service
        .revenue_report(&RevenueFilter {
            year: query.year,
            from: query.from,
            to: query.to,
            district: query.district,
            professional_id: query.professional_id,
            status: query.status,
        })
        .await?;

    Ok(Json(RevenueResponseDto {
        status: "success".to_string(),
        bookings: report
            .bookings
            .iter()
            .map(FilterBookingDto::filter_booking)
            .collect(),
        revenue_total: report.revenue_total,
        commission_total: report.commission_total,
        professional_earnings: report.professional_earnings,
    }))
}

pub async fn get_payments(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let report = app_state.booking_service.payments_report().await?;

    Ok(Json(RevenueResponseDto {
        status: "success".to_string(),
        bookings: report
            .bookings
            .iter()
            .map(FilterBookingDto::filter_booking)
            .collect(),
        revenue_total: report.revenue_total,
        commission_total: report.commission_total,
        professional_earnings: report.professional_earnings,
    }))
}

pub async fn get_overdue_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let bookings = app_state.booking_service.overdue_notifications().await?;

    let bookings: Vec<FilterBookingDetailedDto> = bookings
        .iter()
        .map(FilterBookingDetailedDto::filter_detailed)
        .collect();

    Ok(Json(BookingListResponseDto {
        status: "success".to_string(),
        results: bookings.len() as i64,
        bookings,
    }))
}

pub async fn update_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<UpdateBookingStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .booking_service
        .update_status(booking_id, body.status)
        .await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        booking: FilterBookingDto::filter_booking(&booking),
    }))
}

pub async fn assign_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<AssignBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .booking_service
        .assign(booking_id, body.professional_id)
        .await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        booking: FilterBookingDto::filter_booking(&booking),
    }))
}

pub async fn progress_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<UpdateBookingStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .booking_service
        .progress(booking_id, body.status, &auth.user)
        .await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        booking: FilterBookingDto::filter_booking(&booking),
    }))
}

pub async fn record_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<PaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .booking_service
        .record_payment(
            booking_id,
            body.payment_by_user,
            body.payment_by_worker,
            body.payment_method,
            &auth.user,
        )
        .await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        booking: FilterBookingDto::filter_booking(&booking),
    }))
}

/// Which review a session writes follows from its role; admins moderate,
/// they do not review.
pub async fn submit_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<SubmitReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let side = match auth.user.role {
        UserRole::Customer => ReviewSide::Client,
        UserRole::Worker => ReviewSide::Worker,
        UserRole::Admin => {
            return Err(HttpError::new(
                ErrorMessage::PermissionDenied.to_string(),
                axum::http::StatusCode::FORBIDDEN,
            ))
        }
    };

    let booking = app_state
        .booking_service
        .record_review(booking_id, side, body.rating, body.comment, &auth.user)
        .await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        booking: FilterBookingDto::filter_booking(&booking),
    }))
}
