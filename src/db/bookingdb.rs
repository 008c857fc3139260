use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;

use crate::{
    dtos::admindtos::{MonthlyCountRow, MonthlyRevenueRow, ServiceCountRow},
    models::bookingmodel::{Booking, BookingDetailed, BookingStatus, PaymentMethod},
};

/// Optional filters applied on top of the Revenue view partition.
#[derive(Debug, Default, Clone)]
pub struct RevenueFilter {
    pub year: Option<i32>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub district: Option<String>,
    pub professional_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
}

/// Which of the two per-booking reviews is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSide {
    Client,
    Worker,
}

pub struct NewBooking {
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub issue_type: String,
    pub description: String,
    pub location_city: String,
    pub location_district: String,
    pub location_area: Option<String>,
    pub location_address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub scheduled_time: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait BookingExt {
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, sqlx::Error>;

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>, sqlx::Error>;

    async fn get_bookings_detailed(&self) -> Result<Vec<BookingDetailed>, sqlx::Error>;

    async fn get_bookings_by_statuses(
        &self,
        statuses: &[BookingStatus],
    ) -> Result<Vec<BookingDetailed>, sqlx::Error>;

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, sqlx::Error>;

    async fn verify_booking(
        &self,
        booking_id: Uuid,
        verified_at: DateTime<Utc>,
    ) -> Result<Booking, sqlx::Error>;

    async fn assign_professional(
        &self,
        booking_id: Uuid,
        professional_id: Uuid,
    ) -> Result<Booking, sqlx::Error>;

    async fn record_payment(
        &self,
        booking_id: Uuid,
        payment_by_user: BigDecimal,
        payment_by_worker: BigDecimal,
        payment_method: PaymentMethod,
        paid_at: DateTime<Utc>,
    ) -> Result<Booking, sqlx::Error>;

    async fn record_review(
        &self,
        booking_id: Uuid,
        side: ReviewSide,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Booking, sqlx::Error>;

    async fn get_revenue_bookings(
        &self,
        statuses: &[BookingStatus],
        filter: &RevenueFilter,
    ) -> Result<Vec<Booking>, sqlx::Error>;

    async fn count_bookings_by_status(
        &self,
        statuses: &[BookingStatus],
    ) -> Result<i64, sqlx::Error>;

    async fn get_monthly_revenue(&self, year: i32) -> Result<Vec<MonthlyRevenueRow>, sqlx::Error>;

    async fn get_monthly_bookings(&self, year: i32) -> Result<Vec<MonthlyCountRow>, sqlx::Error>;

    async fn get_bookings_by_service(&self) -> Result<Vec<ServiceCountRow>, sqlx::Error>;
}

#[async_trait]
impl BookingExt for DBClient {
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
            (customer_id, service_id, issue_type, description, status,
             location_city, location_district, location_area, location_address,
             lat, lng, scheduled_time)
            VALUES ($1, $2, $3, $4, 'requested', $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(booking.customer_id)
        .bind(booking.service_id)
        .bind(booking.issue_type)
        .bind(booking.description)
        .bind(booking.location_city)
        .bind(booking.location_district)
        .bind(booking.location_area)
        .bind(booking.location_address)
        .bind(booking.lat)
        .bind(booking.lng)
        .bind(booking.scheduled_time)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_bookings_detailed(&self) -> Result<Vec<BookingDetailed>, sqlx::Error> {
        sqlx::query_as::<_, BookingDetailed>(
            r#"
            SELECT b.*,
                   cu.name  AS customer_name,
                   cu.email AS customer_email,
                   cu.phone AS customer_phone,
                   p.name   AS professional_name,
                   p.phone  AS professional_phone,
                   s.service AS service_name
            FROM bookings b
            JOIN users cu ON cu.id = b.customer_id
            LEFT JOIN professionals p ON p.id = b.professional_id
            JOIN services s ON s.id = b.service_id
            ORDER BY b.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_bookings_by_statuses(
        &self,
        statuses: &[BookingStatus],
    ) -> Result<Vec<BookingDetailed>, sqlx::Error> {
        sqlx::query_as::<_, BookingDetailed>(
            r#"
            SELECT b.*,
                   cu.name  AS customer_name,
                   cu.email AS customer_email,
                   cu.phone AS customer_phone,
                   p.name   AS professional_name,
                   p.phone  AS professional_phone,
                   s.service AS service_name
            FROM bookings b
            JOIN users cu ON cu.id = b.customer_id
            LEFT JOIN professionals p ON p.id = b.professional_id
            JOIN services s ON s.id = b.service_id
            WHERE b.status = ANY($1)
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(statuses)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn verify_booking(
        &self,
        booking_id: Uuid,
        verified_at: DateTime<Utc>,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'verified', verified_at = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(verified_at)
        .fetch_one(&self.pool)
        .await
    }

    async fn assign_professional(
        &self,
        booking_id: Uuid,
        professional_id: Uuid,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET professional_id = $2, status = 'assigned', updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(professional_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn record_payment(
        &self,
        booking_id: Uuid,
        payment_by_user: BigDecimal,
        payment_by_worker: BigDecimal,
        payment_method: PaymentMethod,
        paid_at: DateTime<Utc>,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET payment_by_user = $2,
                payment_by_worker = $3,
                payment_method = $4,
                paid_at = $5,
                status = 'paid',
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(payment_by_user)
        .bind(payment_by_worker)
        .bind(payment_method)
        .bind(paid_at)
        .fetch_one(&self.pool)
        .await
    }

    async fn record_review(
        &self,
        booking_id: Uuid,
        side: ReviewSide,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Booking, sqlx::Error> {
        let query = match side {
            ReviewSide::Client => {
                r#"
                UPDATE bookings
                SET client_review_rating = $2,
                    client_review_comment = $3,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
                "#
            }
            ReviewSide::Worker => {
                r#"
                UPDATE bookings
                SET worker_review_rating = $2,
                    worker_review_comment = $3,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
                "#
            }
        };

        sqlx::query_as::<_, Booking>(query)
            .bind(booking_id)
            .bind(rating)
            .bind(comment)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_revenue_bookings(
        &self,
        statuses: &[BookingStatus],
        filter: &RevenueFilter,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE status = ANY($1)
              AND ($2::booking_status IS NULL OR status = $2)
              AND ($3::int IS NULL OR EXTRACT(YEAR FROM created_at)::int = $3)
              AND ($4::timestamptz IS NULL OR created_at >= $4)
              AND ($5::timestamptz IS NULL OR created_at <= $5)
              AND ($6::text IS NULL OR location_district = $6)
              AND ($7::uuid IS NULL OR professional_id = $7)
            ORDER BY created_at DESC
            "#,
        )
        .bind(statuses)
        .bind(filter.status)
        .bind(filter.year)
        .bind(filter.from)
        .bind(filter.to)
        .bind(filter.district.as_deref())
        .bind(filter.professional_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_bookings_by_status(
        &self,
        statuses: &[BookingStatus],
    ) -> Result<i64, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE status = ANY($1)")
                .bind(statuses)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    async fn get_monthly_revenue(&self, year: i32) -> Result<Vec<MonthlyRevenueRow>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyRevenueRow>(
            r#"
            SELECT EXTRACT(MONTH FROM created_at)::int AS month,
                   COALESCE(SUM(payment_by_user), 0)   AS customer_paid,
                   COALESCE(SUM(payment_by_worker), 0) AS worker_collected
            FROM bookings
            WHERE status IN ('paid', 'completed', 'verified')
              AND EXTRACT(YEAR FROM created_at)::int = $1
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_monthly_bookings(&self, year: i32) -> Result<Vec<MonthlyCountRow>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyCountRow>(
            r#"
            SELECT EXTRACT(MONTH FROM created_at)::int AS month,
                   COUNT(*) AS total
            FROM bookings
            WHERE EXTRACT(YEAR FROM created_at)::int = $1
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_bookings_by_service(&self) -> Result<Vec<ServiceCountRow>, sqlx::Error> {
        sqlx::query_as::<_, ServiceCountRow>(
            r#"
            SELECT s.service AS service, COUNT(b.id) AS total
            FROM services s
            LEFT JOIN bookings b ON b.service_id = s.id
            GROUP BY s.service
            ORDER BY total DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
