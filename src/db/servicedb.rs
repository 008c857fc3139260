use async_trait::async_trait;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::servicemodel::{Issue, ServiceCategory};

#[async_trait]
pub trait ServiceExt {
    async fn get_services(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<ServiceCategory>, sqlx::Error>;

    async fn get_service(
        &self,
        service_id: Uuid,
    ) -> Result<Option<ServiceCategory>, sqlx::Error>;

    async fn get_service_count(&self) -> Result<i64, sqlx::Error>;

    async fn save_service(
        &self,
        service: String,
        description: String,
        icon_name: Option<String>,
    ) -> Result<ServiceCategory, sqlx::Error>;

    async fn update_service(
        &self,
        service_id: Uuid,
        service: String,
        description: String,
        icon_name: Option<String>,
    ) -> Result<ServiceCategory, sqlx::Error>;

    async fn delete_service(&self, service_id: Uuid) -> Result<(), sqlx::Error>;

    async fn get_issues(
        &self,
        service_id: Option<Uuid>,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Issue>, sqlx::Error>;

    async fn get_issue_count(&self, service_id: Option<Uuid>) -> Result<i64, sqlx::Error>;

    async fn save_issue(
        &self,
        service_id: Uuid,
        issue_name: String,
        basic_cost: BigDecimal,
    ) -> Result<Issue, sqlx::Error>;

    async fn update_issue(
        &self,
        issue_id: Uuid,
        issue_name: String,
        basic_cost: BigDecimal,
    ) -> Result<Issue, sqlx::Error>;

    async fn delete_issue(&self, issue_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl ServiceExt for DBClient {
    async fn get_services(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<ServiceCategory>, sqlx::Error> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        sqlx::query_as::<_, ServiceCategory>(
            r#"
            SELECT * FROM services
            ORDER BY service ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_service(
        &self,
        service_id: Uuid,
    ) -> Result<Option<ServiceCategory>, sqlx::Error> {
        sqlx::query_as::<_, ServiceCategory>("SELECT * FROM services WHERE id = $1")
            .bind(service_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_service_count(&self) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn save_service(
        &self,
        service: String,
        description: String,
        icon_name: Option<String>,
    ) -> Result<ServiceCategory, sqlx::Error> {
        sqlx::query_as::<_, ServiceCategory>(
            r#"
            INSERT INTO services (service, description, icon_name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(service)
        .bind(description)
        .bind(icon_name)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_service(
        &self,
        service_id: Uuid,
        service: String,
        description: String,
        icon_name: Option<String>,
    ) -> Result<ServiceCategory, sqlx::Error> {
        sqlx::query_as::<_, ServiceCategory>(
            r#"
            UPDATE services
            SET service = $2, description = $3, icon_name = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(service_id)
        .bind(service)
        .bind(description)
        .bind(icon_name)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_service(&self, service_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(service_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_issues(
        &self,
        service_id: Option<Uuid>,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Issue>, sqlx::Error> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        sqlx::query_as::<_, Issue>(
            r#"
            SELECT * FROM issues
            WHERE ($1::uuid IS NULL OR service_id = $1)
            ORDER BY issue_name ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(service_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_issue_count(&self, service_id: Option<Uuid>) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM issues WHERE ($1::uuid IS NULL OR service_id = $1)",
        )
        .bind(service_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn save_issue(
        &self,
        service_id: Uuid,
        issue_name: String,
        basic_cost: BigDecimal,
    ) -> Result<Issue, sqlx::Error> {
        sqlx::query_as::<_, Issue>(
            r#"
            INSERT INTO issues (service_id, issue_name, basic_cost)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(service_id)
        .bind(issue_name)
        .bind(basic_cost)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_issue(
        &self,
        issue_id: Uuid,
        issue_name: String,
        basic_cost: BigDecimal,
    ) -> Result<Issue, sqlx::Error> {
        sqlx::query_as::<_, Issue>(
            r#"
            UPDATE issues
            SET issue_name = $2, basic_cost = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(issue_id)
        .bind(issue_name)
        .bind(basic_cost)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_issue(&self, issue_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(issue_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
