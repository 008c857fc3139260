use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{
        db::DBClient,
        professionaldb::{
            ApprovalForm, NewProfessional, ProfessionalExt, ProfessionalFilter, WorkerLogin,
        },
        userdb::UserExt,
    },
    models::professionalmodel::{Professional, ProfessionalStatus},
    service::error::ServiceError,
    utils::{password, phone},
};

#[derive(Debug, Clone)]
pub struct ProfessionalService {
    db_client: Arc<DBClient>,
}

impl ProfessionalService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn register(
        &self,
        mut professional: NewProfessional,
    ) -> Result<Professional, ServiceError> {
        let normalized = phone::normalize_sri_lankan(&professional.phone).ok_or_else(|| {
            ServiceError::Validation(format!(
                "phone number {:?} is not a valid Sri Lankan number",
                professional.phone
            ))
        })?;
        professional.phone = normalized;

        let existing = self
            .db_client
            .get_professional_by_email(&professional.email)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Validation(
                "A professional with this email already exists".to_string(),
            ));
        }

        let professional = self.db_client.create_professional(professional).await?;

        tracing::info!(
            "professional {} registered via {:?}, pending review",
            professional.id,
            professional.way
        );

        Ok(professional)
    }

    pub async fn list(
        &self,
        filter: &ProfessionalFilter,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Professional>, ServiceError> {
        Ok(self.db_client.get_professionals(filter, page, limit).await?)
    }

    /// Status PATCH transitions: `pending -> denied` and the
    /// `accepted <-> paused` toggle. Approval goes through
    /// [`ProfessionalService::approve`] instead, since it carries the
    /// profile-completion form.
    pub async fn update_status(
        &self,
        professional_id: Uuid,
        status: ProfessionalStatus,
    ) -> Result<Professional, ServiceError> {
        let professional = self
            .db_client
            .get_professional(professional_id)
            .await?
            .ok_or(ServiceError::ProfessionalNotFound(professional_id))?;

        let allowed = matches!(
            (professional.status, status),
            (ProfessionalStatus::Pending, ProfessionalStatus::Denied)
                | (ProfessionalStatus::Accepted, ProfessionalStatus::Paused)
                | (ProfessionalStatus::Paused, ProfessionalStatus::Accepted)
        );

        if !allowed {
            return Err(ServiceError::InvalidProfessionalTransition {
                id: professional_id,
                from: professional.status,
                to: status,
            });
        }

        Ok(self
            .db_client
            .update_professional_status(professional_id, status)
            .await?)
    }

    /// `pending -> accepted` with the completed profile. A worker login is
    /// created for the professional as part of approval.
    pub async fn approve(
        &self,
        professional_id: Uuid,
        name: String,
        raw_phone: String,
        service_id: Uuid,
        experience_years: i32,
        district: String,
        location: Option<String>,
        lat: Option<f64>,
        lng: Option<f64>,
        nic_number: String,
        profile_image: Option<String>,
        initial_password: String,
    ) -> Result<Professional, ServiceError> {
        let professional = self
            .db_client
            .get_professional(professional_id)
            .await?
            .ok_or(ServiceError::ProfessionalNotFound(professional_id))?;

        if professional.status != ProfessionalStatus::Pending {
            return Err(ServiceError::InvalidProfessionalTransition {
                id: professional_id,
                from: professional.status,
                to: ProfessionalStatus::Accepted,
            });
        }

        let existing = self
            .db_client
            .get_user(None, Some(&professional.email))
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Validation(
                "A user account with this email already exists".to_string(),
            ));
        }

        let phone = phone::normalize_sri_lankan(&raw_phone).ok_or_else(|| {
            ServiceError::Validation(format!(
                "phone number {:?} is not a valid Sri Lankan number",
                raw_phone
            ))
        })?;

        let hashed_password = password::hash(initial_password)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let approved = self
            .db_client
            .approve_professional(
                professional_id,
                ApprovalForm {
                    name,
                    phone,
                    service_id,
                    experience_years,
                    district,
                    location,
                    lat,
                    lng,
                    nic_number,
                    profile_image,
                },
                WorkerLogin {
                    email: professional.email.clone(),
                    password: hashed_password,
                },
            )
            .await?;

        tracing::info!("professional {} approved and activated", approved.id);

        Ok(approved)
    }
}
