use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub active_bookings: i64,
    pub completed_bookings: i64,
    pub verified_payments: i64,
    pub revenue_total: BigDecimal,
    pub commission_total: BigDecimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardSummaryResponseDto {
    pub status: String,
    pub summary: DashboardSummaryDto,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueRow {
    pub month: i32,
    pub customer_paid: BigDecimal,
    pub worker_collected: BigDecimal,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct MonthlyCountRow {
    pub month: i32,
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceCountRow {
    pub service: String,
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthlyRevenueResponseDto {
    pub status: String,
    pub months: Vec<MonthlyRevenueRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthlyBookingResponseDto {
    pub status: String,
    pub months: Vec<MonthlyCountRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingsByServiceResponseDto {
    pub status: String,
    pub services: Vec<ServiceCountRow>,
}

#[derive(Serialize, Deserialize, Validate, Default)]
pub struct YearQueryDto {
    #[validate(range(min = 2000, max = 2100))]
    pub year: Option<i32>,
}

/// Step one of the admin credential update: confirm the current password.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct VerifyPasswordDto {
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Step two: apply the change, re-presenting the current password.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredentialsDto {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(email(message = "Email is invalid"))]
    pub new_email: Option<String>,

    pub new_phone: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: Option<String>,
}
