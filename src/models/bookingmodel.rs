use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The full booking lifecycle. Every admin/customer/worker view filters a
/// subset of these; the subsets themselves live in `service::booking_views`
/// so no view can drift out of sync with the others.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum BookingStatus {
    Requested,
    Assigned,
    Inspecting,
    Approved,
    InProgress,
    Completed,
    Cancelled,
    Paid,
    Verified,
    Denied,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub professional_id: Option<Uuid>,
    pub service_id: Uuid,
    pub issue_type: String,
    pub description: String,
    pub status: BookingStatus,
    pub location_city: String,
    pub location_district: String,
    pub location_area: Option<String>,
    pub location_address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub scheduled_time: Option<DateTime<Utc>>,
    // Recorded once the booking reaches `paid`; commission is never stored,
    // it is derived from payment_by_worker at read time.
    pub payment_by_user: Option<BigDecimal>,
    pub payment_by_worker: Option<BigDecimal>,
    pub payment_method: Option<PaymentMethod>,
    pub client_review_rating: Option<i32>,
    pub client_review_comment: Option<String>,
    pub worker_review_rating: Option<i32>,
    pub worker_review_comment: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub verified_at: Option<DateTime<Utc>>,
}

/// Booking joined with customer and professional contact details, as served
/// by `GET /api/bookings/all-detailed`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookingDetailed {
    #[sqlx(flatten)]
    pub booking: Booking,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub professional_name: Option<String>,
    pub professional_phone: Option<String>,
    pub service_name: String,
}
