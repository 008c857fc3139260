use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::bookingmodel::{Booking, BookingDetailed, BookingStatus, PaymentMethod},
    service::commission,
};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingDto {
    pub service_id: Uuid,

    #[validate(length(min = 1, message = "Issue type is required"))]
    pub issue_type: String,

    #[validate(length(max = 2000, message = "Description is too long"))]
    pub description: String,

    pub location: LocationDto,

    pub scheduled_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LocationDto {
    pub city: String,
    pub district: String,
    pub area: Option<String>,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub payment_by_user: BigDecimal,
    pub payment_by_worker: BigDecimal,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDto {
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusDto {
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBookingDto {
    pub professional_id: Uuid,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 1000, message = "Comment is too long"))]
    pub comment: Option<String>,
}

/// Booking as the frontends consume it: nested location/payment/review
/// objects and the commission derived on the way out.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBookingDto {
    pub id: String,
    pub customer_id: String,
    pub professional_id: Option<String>,
    pub service_id: String,
    pub issue_type: String,
    pub description: String,
    pub status: BookingStatus,
    pub location: LocationDto,
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<BigDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_review: Option<ReviewDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_review: Option<ReviewDto>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl FilterBookingDto {
    pub fn filter_booking(booking: &Booking) -> Self {
        let payment = match (&booking.payment_by_user, &booking.payment_by_worker) {
            (Some(by_user), Some(by_worker)) => booking.payment_method.map(|method| PaymentDto {
                payment_by_user: by_user.clone(),
                payment_by_worker: by_worker.clone(),
                payment_method: method,
            }),
            _ => None,
        };

        FilterBookingDto {
            id: booking.id.to_string(),
            customer_id: booking.customer_id.to_string(),
            professional_id: booking.professional_id.map(|id| id.to_string()),
            service_id: booking.service_id.to_string(),
            issue_type: booking.issue_type.clone(),
            description: booking.description.clone(),
            status: booking.status,
            location: LocationDto {
                city: booking.location_city.clone(),
                district: booking.location_district.clone(),
                area: booking.location_area.clone(),
                address: booking.location_address.clone(),
                lat: booking.lat,
                lng: booking.lng,
            },
            scheduled_time: booking.scheduled_time,
            payment,
            commission: commission::booking_commission(booking),
            client_review: booking.client_review_rating.map(|rating| ReviewDto {
                rating,
                comment: booking.client_review_comment.clone(),
            }),
            worker_review: booking.worker_review_rating.map(|rating| ReviewDto {
                rating,
                comment: booking.worker_review_comment.clone(),
            }),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
            paid_at: booking.paid_at,
            verified_at: booking.verified_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBookingDetailedDto {
    #[serde(flatten)]
    pub booking: FilterBookingDto,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub professional_name: Option<String>,
    pub professional_phone: Option<String>,
    pub service_name: String,
}

impl FilterBookingDetailedDto {
    pub fn filter_detailed(detailed: &BookingDetailed) -> Self {
        FilterBookingDetailedDto {
            booking: FilterBookingDto::filter_booking(&detailed.booking),
            customer_name: detailed.customer_name.clone(),
            customer_email: detailed.customer_email.clone(),
            customer_phone: detailed.customer_phone.clone(),
            professional_name: detailed.professional_name.clone(),
            professional_phone: detailed.professional_phone.clone(),
            service_name: detailed.service_name.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingListResponseDto {
    pub status: String,
    pub bookings: Vec<FilterBookingDetailedDto>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponseDto {
    pub status: String,
    pub booking: FilterBookingDto,
}

#[derive(Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct RevenueQueryDto {
    #[validate(range(min = 2000, max = 2100))]
    pub year: Option<i32>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub district: Option<String>,
    pub professional_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueResponseDto {
    pub status: String,
    pub bookings: Vec<FilterBookingDto>,
    pub revenue_total: BigDecimal,
    pub commission_total: BigDecimal,
    pub professional_earnings: BigDecimal,
}
