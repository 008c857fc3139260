use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::{
    professionalmodel::{Professional, ProfessionalStatus, RegistrationWay},
    usermodel::{User, UserRole},
};

/// Optional filters for the professionals list
/// (`GET /api/professionals?status&district&search&way`).
#[derive(Debug, Default, Clone)]
pub struct ProfessionalFilter {
    pub status: Option<ProfessionalStatus>,
    pub district: Option<String>,
    pub search: Option<String>,
    pub way: Option<RegistrationWay>,
}

pub struct NewProfessional {
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
    pub way: RegistrationWay,
    pub profile_image: Option<String>,
}

pub struct ApprovalForm {
    pub name: String,
    pub phone: String,
    pub service_id: Uuid,
    pub experience_years: i32,
    pub district: String,
    pub location: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub nic_number: String,
    pub profile_image: Option<String>,
}

/// Credentials for the worker account created alongside approval. Name and
/// phone come from the approval form.
pub struct WorkerLogin {
    pub email: String,
    pub password: String,
}

#[async_trait]
pub trait ProfessionalExt {
    async fn create_professional(
        &self,
        professional: NewProfessional,
    ) -> Result<Professional, sqlx::Error>;

    async fn get_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Option<Professional>, sqlx::Error>;

    async fn get_professional_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Professional>, sqlx::Error>;

    async fn get_professionals(
        &self,
        filter: &ProfessionalFilter,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Professional>, sqlx::Error>;

    async fn update_professional_status(
        &self,
        professional_id: Uuid,
        status: ProfessionalStatus,
    ) -> Result<Professional, sqlx::Error>;

    /// Applies the full profile-completion form while moving the
    /// professional to `accepted`, creating the worker login in the same
    /// transaction. Neither write lands without the other.
    async fn approve_professional(
        &self,
        professional_id: Uuid,
        form: ApprovalForm,
        login: WorkerLogin,
    ) -> Result<Professional, sqlx::Error>;
}

#[async_trait]
impl ProfessionalExt for DBClient {
    async fn create_professional(
        &self,
        professional: NewProfessional,
    ) -> Result<Professional, sqlx::Error> {
        sqlx::query_as::<_, Professional>(
            r#"
            INSERT INTO professionals
            (name, email, phone, service_id, experience_years, district,
             location, lat, lng, nic_number, status, way, profile_image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending', $11, $12)
            RETURNING *
            "#,
        )
        .bind(professional.name)
        .bind(professional.email)
        .bind(professional.phone)
        .bind(professional.service_id)
        .bind(professional.experience_years)
        .bind(professional.district)
        .bind(professional.location)
        .bind(professional.lat)
        .bind(professional.lng)
        .bind(professional.nic_number)
        .bind(professional.way)
        .bind(professional.profile_image)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Option<Professional>, sqlx::Error> {
        sqlx::query_as::<_, Professional>("SELECT * FROM professionals WHERE id = $1")
            .bind(professional_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_professional_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Professional>, sqlx::Error> {
        sqlx::query_as::<_, Professional>("SELECT * FROM professionals WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_professionals(
        &self,
        filter: &ProfessionalFilter,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Professional>, sqlx::Error> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        sqlx::query_as::<_, Professional>(
            r#"
            SELECT * FROM professionals
            WHERE ($1::professional_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR district = $2)
              AND ($3::registration_way IS NULL OR way = $3)
              AND ($4::text IS NULL
                   OR name ILIKE '%' || $4 || '%'
                   OR email ILIKE '%' || $4 || '%'
                   OR phone ILIKE '%' || $4 || '%')
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filter.status)
        .bind(filter.district.as_deref())
        .bind(filter.way)
        .bind(filter.search.as_deref())
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_professional_status(
        &self,
        professional_id: Uuid,
        status: ProfessionalStatus,
    ) -> Result<Professional, sqlx::Error> {
        sqlx::query_as::<_, Professional>(
            r#"
            UPDATE professionals
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(professional_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn approve_professional(
        &self,
        professional_id: Uuid,
        form: ApprovalForm,
        login: WorkerLogin,
    ) -> Result<Professional, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, phone, password, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, password, role, created_at, updated_at
            "#,
        )
        .bind(&form.name)
        .bind(login.email)
        .bind(&form.phone)
        .bind(login.password)
        .bind(UserRole::Worker)
        .fetch_one(&mut *tx)
        .await?;

        let professional = sqlx::query_as::<_, Professional>(
            r#"
            UPDATE professionals
            SET name = $2,
                phone = $3,
                service_id = $4,
                experience_years = $5,
                district = $6,
                location = $7,
                lat = $8,
                lng = $9,
                nic_number = $10,
                profile_image = $11,
                user_id = $12,
                status = 'accepted',
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(professional_id)
        .bind(form.name)
        .bind(form.phone)
        .bind(form.service_id)
        .bind(form.experience_years)
        .bind(form.district)
        .bind(form.location)
        .bind(form.lat)
        .bind(form.lng)
        .bind(form.nic_number)
        .bind(form.profile_image)
        .bind(user.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(professional)
    }
}
