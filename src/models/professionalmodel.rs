use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "professional_status", rename_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum ProfessionalStatus {
    Pending,
    Accepted,
    Paused,
    Denied,
}

/// How the professional entered the system: added by an admin or
/// self-registered through the website form.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "registration_way", rename_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum RegistrationWay {
    Manual,
    Website,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Professional {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_id: Uuid,
    pub experience_years: i32,
    pub district: String,
    pub location: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub nic_number: String,
    pub status: ProfessionalStatus,
    pub way: RegistrationWay,
    pub rating: Option<f32>,
    pub total_jobs: Option<i32>,
    pub profile_image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
