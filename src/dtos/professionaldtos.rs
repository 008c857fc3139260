use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::professionalmodel::{Professional, ProfessionalStatus, RegistrationWay};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfessionalDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 6, max = 20, message = "Phone number must be between 6-20 characters"))]
    pub phone: String,

    pub service_id: Uuid,

    #[validate(range(min = 0, max = 60, message = "Experience must be between 0-60 years"))]
    pub experience_years: i32,

    #[validate(length(min = 1, message = "District is required"))]
    pub district: String,

    pub location: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    #[validate(length(min = 10, max = 12, message = "NIC number must be 10-12 characters"))]
    pub nic_number: String,

    pub way: Option<RegistrationWay>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalStatusUpdateDto {
    pub status: ProfessionalStatus,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveProfessionalDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 6, max = 20, message = "Phone number must be between 6-20 characters"))]
    pub phone: String,

    pub service_id: Uuid,

    #[validate(range(min = 0, max = 60, message = "Experience must be between 0-60 years"))]
    pub experience_years: i32,

    #[validate(length(min = 1, message = "District is required"))]
    pub district: String,

    pub location: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    #[validate(length(min = 10, max = 12, message = "NIC number must be 10-12 characters"))]
    pub nic_number: String,

    pub profile_image: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub initial_password: String,
}

#[derive(Serialize, Deserialize, Validate, Default)]
pub struct ProfessionalQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
    pub status: Option<ProfessionalStatus>,
    pub district: Option<String>,
    pub search: Option<String>,
    pub way: Option<RegistrationWay>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterProfessionalDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_id: String,
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

impl FilterProfessionalDto {
    pub fn filter_professional(professional: &Professional) -> Self {
        FilterProfessionalDto {
            id: professional.id.to_string(),
            name: professional.name.clone(),
            email: professional.email.clone(),
            phone: professional.phone.clone(),
            service_id: professional.service_id.to_string(),
            experience_years: professional.experience_years,
            district: professional.district.clone(),
            location: professional.location.clone(),
            lat: professional.lat,
            lng: professional.lng,
            nic_number: professional.nic_number.clone(),
            status: professional.status,
            way: professional.way,
            rating: professional.rating,
            total_jobs: professional.total_jobs,
            profile_image: professional.profile_image.clone(),
            created_at: professional.created_at,
            updated_at: professional.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfessionalResponseDto {
    pub status: String,
    pub professional: FilterProfessionalDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfessionalListResponseDto {
    pub status: String,
    pub professionals: Vec<FilterProfessionalDto>,
    pub results: i64,
}
