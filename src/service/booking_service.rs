use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use bigdecimal::BigDecimal;

use crate::{
    db::{
        bookingdb::{BookingExt, NewBooking, ReviewSide, RevenueFilter},
        db::DBClient,
        professionaldb::ProfessionalExt,
    },
    dtos::admindtos::DashboardSummaryDto,
    models::{
        bookingmodel::{Booking, BookingDetailed, BookingStatus, PaymentMethod},
        professionalmodel::ProfessionalStatus,
        usermodel::{User, UserRole},
    },
    service::{
        booking_views::{is_overdue, AdminView},
        commission::{self, RevenueBasis},
        error::ServiceError,
    },
};

#[derive(Debug, Clone)]
pub struct BookingService {
    db_client: Arc<DBClient>,
}

/// Revenue report as served to the admin Revenue screen. Totals are derived
/// here, never read from storage.
#[derive(Debug)]
pub struct RevenueReport {
    pub bookings: Vec<Booking>,
    pub revenue_total: bigdecimal::BigDecimal,
    pub commission_total: bigdecimal::BigDecimal,
    pub professional_earnings: bigdecimal::BigDecimal,
}

impl BookingService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn create_booking(&self, booking: NewBooking) -> Result<Booking, ServiceError> {
        let booking = self.db_client.create_booking(booking).await?;

        tracing::info!("booking {} created as requested", booking.id);

        Ok(booking)
    }

    pub async fn all_detailed(&self) -> Result<Vec<BookingDetailed>, ServiceError> {
        Ok(self.db_client.get_bookings_detailed().await?)
    }

    /// Bookings for one admin view, filtered server-side through the shared
    /// partition table.
    pub async fn view(&self, view: AdminView) -> Result<Vec<BookingDetailed>, ServiceError> {
        Ok(self
            .db_client
            .get_bookings_by_statuses(view.allowed_statuses())
            .await?)
    }

    /// The only client-initiated transition on the admin surface:
    /// `completed`/`paid` to `verified`, stamping `verified_at`. Every other
    /// requested transition is rejected; the worker app owns the rest of the
    /// lifecycle and its legality is not guessed at here.
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, ServiceError> {
        let booking = self
            .db_client
            .get_booking(booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        if !verification_allowed(booking.status, status) {
            return Err(ServiceError::InvalidBookingTransition {
                id: booking_id,
                from: booking.status,
                to: status,
            });
        }

        let verified = self.db_client.verify_booking(booking_id, Utc::now()).await?;

        tracing::info!("booking {} verified", verified.id);

        Ok(verified)
    }

    /// Puts a requested booking in the hands of an accepted professional.
    pub async fn assign(
        &self,
        booking_id: Uuid,
        professional_id: Uuid,
    ) -> Result<Booking, ServiceError> {
        let booking = self
            .db_client
            .get_booking(booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        if booking.status != BookingStatus::Requested {
            return Err(ServiceError::InvalidBookingTransition {
                id: booking_id,
                from: booking.status,
                to: BookingStatus::Assigned,
            });
        }

        let professional = self
            .db_client
            .get_professional(professional_id)
            .await?
            .ok_or(ServiceError::ProfessionalNotFound(professional_id))?;

        if professional.status != ProfessionalStatus::Accepted {
            return Err(ServiceError::Validation(format!(
                "professional {} is {:?}, only accepted professionals can take work",
                professional_id, professional.status
            )));
        }

        let assigned = self
            .db_client
            .assign_professional(booking_id, professional_id)
            .await?;

        tracing::info!(
            "booking {} assigned to professional {}",
            booking_id,
            professional_id
        );

        Ok(assigned)
    }

    /// User id behind the booking's assigned professional, if the
    /// professional has a worker login.
    async fn assigned_worker_user_id(
        &self,
        booking: &Booking,
    ) -> Result<Option<Uuid>, ServiceError> {
        match booking.professional_id {
            Some(professional_id) => Ok(self
                .db_client
                .get_professional(professional_id)
                .await?
                .and_then(|professional| professional.user_id)),
            None => Ok(None),
        }
    }

    /// On-site lifecycle steps, as reported by the worker and customer
    /// frontends for their own bookings. The verification step is
    /// deliberately absent here; see [`BookingService::update_status`].
    pub async fn progress(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
        user: &User,
    ) -> Result<Booking, ServiceError> {
        let booking = self
            .db_client
            .get_booking(booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        let assigned_user_id = self.assigned_worker_user_id(&booking).await?;
        if !may_act_on(&booking, assigned_user_id, user) {
            return Err(ServiceError::PermissionDenied(format!(
                "user {} is not a participant in booking {}",
                user.id, booking_id
            )));
        }

        if !progress_allowed(booking.status, status) {
            return Err(ServiceError::InvalidBookingTransition {
                id: booking_id,
                from: booking.status,
                to: status,
            });
        }

        Ok(self
            .db_client
            .update_booking_status(booking_id, status)
            .await?)
    }

    /// Records what the customer paid and what the worker collected, moving
    /// a completed booking to `paid`. Amounts are recorded, never charged.
    pub async fn record_payment(
        &self,
        booking_id: Uuid,
        payment_by_user: BigDecimal,
        payment_by_worker: BigDecimal,
        payment_method: PaymentMethod,
        user: &User,
    ) -> Result<Booking, ServiceError> {
        let booking = self
            .db_client
            .get_booking(booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        let assigned_user_id = self.assigned_worker_user_id(&booking).await?;
        if !may_act_on(&booking, assigned_user_id, user) {
            return Err(ServiceError::PermissionDenied(format!(
                "user {} is not a participant in booking {}",
                user.id, booking_id
            )));
        }

        if booking.status != BookingStatus::Completed {
            return Err(ServiceError::InvalidBookingTransition {
                id: booking_id,
                from: booking.status,
                to: BookingStatus::Paid,
            });
        }

        let paid = self
            .db_client
            .record_payment(
                booking_id,
                payment_by_user,
                payment_by_worker,
                payment_method,
                Utc::now(),
            )
            .await?;

        tracing::info!("booking {} marked paid", booking_id);

        Ok(paid)
    }

    /// One review per side, only once the job is done, and only from the
    /// session that lived that side of the booking.
    pub async fn record_review(
        &self,
        booking_id: Uuid,
        side: ReviewSide,
        rating: i32,
        comment: Option<String>,
        user: &User,
    ) -> Result<Booking, ServiceError> {
        let booking = self
            .db_client
            .get_booking(booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        let assigned_user_id = self.assigned_worker_user_id(&booking).await?;
        if !review_side_allowed(&booking, assigned_user_id, side, user) {
            return Err(ServiceError::PermissionDenied(format!(
                "user {} may not write the {:?} review for booking {}",
                user.id, side, booking_id
            )));
        }

        if !matches!(
            booking.status,
            BookingStatus::Completed | BookingStatus::Paid | BookingStatus::Verified
        ) {
            return Err(ServiceError::Validation(format!(
                "booking {} is {:?}, reviews are only accepted after completion",
                booking_id, booking.status
            )));
        }

        Ok(self
            .db_client
            .record_review(booking_id, side, rating, comment)
            .await?)
    }

    /// Requested bookings that have waited longer than the threshold. The
    /// age rule lives in [`is_overdue`] next to the view partitions.
    pub async fn overdue_notifications(&self) -> Result<Vec<BookingDetailed>, ServiceError> {
        let now = Utc::now();

        let requested = self
            .db_client
            .get_bookings_by_statuses(&[BookingStatus::Requested])
            .await?;

        Ok(requested
            .into_iter()
            .filter(|detailed| {
                detailed
                    .booking
                    .created_at
                    .map(|created| is_overdue(created, now))
                    .unwrap_or(false)
            })
            .collect())
    }

    /// Revenue view with its optional filters. The report basis is what the
    /// customer paid; the commission stays derived from what the worker
    /// collected.
    pub async fn revenue_report(
        &self,
        filter: &RevenueFilter,
    ) -> Result<RevenueReport, ServiceError> {
        if let Some(status) = filter.status {
            if !AdminView::Revenue.includes(status) {
                return Err(ServiceError::Validation(format!(
                    "status {:?} is outside the revenue view",
                    status
                )));
            }
        }

        let bookings = self
            .db_client
            .get_revenue_bookings(AdminView::Revenue.allowed_statuses(), filter)
            .await?;

        let revenue_total = commission::revenue_total(&bookings, RevenueBasis::CustomerPaid);
        let commission_total = commission::commission_total(&bookings);
        let professional_earnings =
            commission::professional_earnings(&revenue_total, &commission_total);

        Ok(RevenueReport {
            bookings,
            revenue_total,
            commission_total,
            professional_earnings,
        })
    }

    /// Verified bookings with payment totals for the Payments screen; the
    /// basis here is the worker-collected amount.
    pub async fn payments_report(&self) -> Result<RevenueReport, ServiceError> {
        let bookings: Vec<Booking> = self
            .db_client
            .get_bookings_by_statuses(AdminView::Payments.allowed_statuses())
            .await?
            .into_iter()
            .map(|detailed| detailed.booking)
            .collect();

        let revenue_total = commission::revenue_total(&bookings, RevenueBasis::WorkerCollected);
        let commission_total = commission::commission_total(&bookings);
        let professional_earnings =
            commission::professional_earnings(&revenue_total, &commission_total);

        Ok(RevenueReport {
            bookings,
            revenue_total,
            commission_total,
            professional_earnings,
        })
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummaryDto, ServiceError> {
        let active = self
            .db_client
            .count_bookings_by_status(AdminView::ActiveBookings.allowed_statuses())
            .await?;
        let history = self
            .db_client
            .count_bookings_by_status(AdminView::History.allowed_statuses())
            .await?;
        let verified = self
            .db_client
            .count_bookings_by_status(AdminView::Payments.allowed_statuses())
            .await?;

        let report = self.revenue_report(&RevenueFilter::default()).await?;

        Ok(DashboardSummaryDto {
            active_bookings: active,
            completed_bookings: history,
            verified_payments: verified,
            revenue_total: report.revenue_total,
            commission_total: report.commission_total,
        })
    }
}

/// The admin verify gate: `verified` is the only target, and only out of
/// `completed` or `paid`.
fn verification_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    to == BookingStatus::Verified
        && matches!(from, BookingStatus::Completed | BookingStatus::Paid)
}

/// A session may move or pay a booking when it belongs to its customer, to
/// its assigned professional's worker login, or to an admin.
fn may_act_on(booking: &Booking, assigned_user_id: Option<Uuid>, user: &User) -> bool {
    user.role == UserRole::Admin
        || booking.customer_id == user.id
        || assigned_user_id == Some(user.id)
}

/// The client review belongs to the booking's customer, the worker review
/// to its assigned professional's login. Nobody else writes either.
fn review_side_allowed(
    booking: &Booking,
    assigned_user_id: Option<Uuid>,
    side: ReviewSide,
    user: &User,
) -> bool {
    match side {
        ReviewSide::Client => booking.customer_id == user.id,
        ReviewSide::Worker => assigned_user_id == Some(user.id),
    }
}

/// Transitions the worker and customer frontends may request. `paid` goes
/// through [`BookingService::record_payment`] and `verified` through
/// [`BookingService::update_status`], so neither appears here.
fn progress_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;

    matches!(
        (from, to),
        (Requested, Cancelled)
            | (Assigned, Inspecting)
            | (Assigned, Cancelled)
            | (Inspecting, Approved)
            | (Inspecting, Denied)
            | (Approved, InProgress)
            | (Approved, Cancelled)
            | (InProgress, Completed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn booking(customer_id: Uuid, professional_id: Option<Uuid>, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            customer_id,
            professional_id,
            service_id: Uuid::new_v4(),
            issue_type: "leak".to_string(),
            description: "tap leaking".to_string(),
            status,
            location_city: "Colombo".to_string(),
            location_district: "Colombo".to_string(),
            location_area: None,
            location_address: "12 Galle Rd".to_string(),
            lat: None,
            lng: None,
            scheduled_time: None,
            payment_by_user: None,
            payment_by_worker: None,
            payment_method: None,
            client_review_rating: None,
            client_review_comment: None,
            worker_review_rating: None,
            worker_review_comment: None,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
            paid_at: None,
            verified_at: None,
        }
    }

    fn user(id: Uuid, role: UserRole) -> User {
        User {
            id,
            name: "someone".to_string(),
            email: "someone@example.com".to_string(),
            phone: None,
            password: "hashed".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_verification_gate_accepts_completed_and_paid() {
        use BookingStatus::*;

        assert!(verification_allowed(Completed, Verified));
        assert!(verification_allowed(Paid, Verified));
    }

    #[test]
    fn test_verification_gate_rejects_everything_else() {
        use BookingStatus::*;

        let all = [
            Requested, Assigned, Inspecting, Approved, InProgress, Completed, Cancelled, Paid,
            Verified, Denied,
        ];

        for from in all {
            for to in all {
                if to != Verified || !matches!(from, Completed | Paid) {
                    assert!(!verification_allowed(from, to), "{:?} -> {:?}", from, to);
                }
            }
        }
    }

    #[test]
    fn test_strangers_cannot_act_on_a_booking() {
        let customer_id = Uuid::new_v4();
        let worker_user_id = Uuid::new_v4();
        let booking = booking(customer_id, Some(Uuid::new_v4()), BookingStatus::Assigned);

        let stranger = user(Uuid::new_v4(), UserRole::Customer);
        assert!(!may_act_on(&booking, Some(worker_user_id), &stranger));

        let other_worker = user(Uuid::new_v4(), UserRole::Worker);
        assert!(!may_act_on(&booking, Some(worker_user_id), &other_worker));
    }

    #[test]
    fn test_participants_and_admins_may_act() {
        let customer_id = Uuid::new_v4();
        let worker_user_id = Uuid::new_v4();
        let booking = booking(customer_id, Some(Uuid::new_v4()), BookingStatus::Assigned);

        assert!(may_act_on(
            &booking,
            Some(worker_user_id),
            &user(customer_id, UserRole::Customer)
        ));
        assert!(may_act_on(
            &booking,
            Some(worker_user_id),
            &user(worker_user_id, UserRole::Worker)
        ));
        assert!(may_act_on(
            &booking,
            Some(worker_user_id),
            &user(Uuid::new_v4(), UserRole::Admin)
        ));
    }

    #[test]
    fn test_unassigned_booking_only_answers_to_customer_and_admin() {
        let customer_id = Uuid::new_v4();
        let booking = booking(customer_id, None, BookingStatus::Requested);

        assert!(may_act_on(&booking, None, &user(customer_id, UserRole::Customer)));
        assert!(!may_act_on(&booking, None, &user(Uuid::new_v4(), UserRole::Worker)));
    }

    #[test]
    fn test_review_sides_are_bound_to_their_participants() {
        let customer_id = Uuid::new_v4();
        let worker_user_id = Uuid::new_v4();
        let booking = booking(customer_id, Some(Uuid::new_v4()), BookingStatus::Completed);

        let customer = user(customer_id, UserRole::Customer);
        let worker = user(worker_user_id, UserRole::Worker);
        let stranger = user(Uuid::new_v4(), UserRole::Customer);

        assert!(review_side_allowed(
            &booking,
            Some(worker_user_id),
            ReviewSide::Client,
            &customer
        ));
        assert!(review_side_allowed(
            &booking,
            Some(worker_user_id),
            ReviewSide::Worker,
            &worker
        ));

        // The customer cannot write the worker's review or vice versa, and
        // an unrelated session writes neither.
        assert!(!review_side_allowed(
            &booking,
            Some(worker_user_id),
            ReviewSide::Worker,
            &customer
        ));
        assert!(!review_side_allowed(
            &booking,
            Some(worker_user_id),
            ReviewSide::Client,
            &worker
        ));
        assert!(!review_side_allowed(
            &booking,
            Some(worker_user_id),
            ReviewSide::Client,
            &stranger
        ));
        assert!(!review_side_allowed(&booking, None, ReviewSide::Worker, &stranger));
    }

    #[test]
    fn test_progress_follows_lifecycle_order() {
        use BookingStatus::*;

        assert!(progress_allowed(Assigned, Inspecting));
        assert!(progress_allowed(Inspecting, Approved));
        assert!(progress_allowed(Approved, InProgress));
        assert!(progress_allowed(InProgress, Completed));

        assert!(!progress_allowed(Assigned, Completed));
        assert!(!progress_allowed(Requested, InProgress));
        assert!(!progress_allowed(Completed, InProgress));
    }

    #[test]
    fn test_progress_never_reaches_paid_or_verified() {
        use BookingStatus::*;

        let all = [
            Requested, Assigned, Inspecting, Approved, InProgress, Completed, Cancelled, Paid,
            Verified, Denied,
        ];

        for from in all {
            assert!(!progress_allowed(from, Paid));
            assert!(!progress_allowed(from, Verified));
        }
    }

    #[test]
    fn test_cancellation_only_before_work_completes() {
        use BookingStatus::*;

        assert!(progress_allowed(Requested, Cancelled));
        assert!(progress_allowed(Assigned, Cancelled));
        assert!(progress_allowed(Approved, Cancelled));

        assert!(!progress_allowed(InProgress, Cancelled));
        assert!(!progress_allowed(Completed, Cancelled));
        assert!(!progress_allowed(Verified, Cancelled));
    }

    #[test]
    fn test_denial_comes_out_of_inspection() {
        use BookingStatus::*;

        assert!(progress_allowed(Inspecting, Denied));
        assert!(!progress_allowed(Requested, Denied));
        assert!(!progress_allowed(InProgress, Denied));
    }
}
