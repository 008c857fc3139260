//! Commission and revenue derivation.
//!
//! The platform cut is always 10% of what the worker recorded as collected,
//! computed at read time and never persisted. Every dashboard and report
//! goes through this module so the rate lives in exactly one place.

use bigdecimal::{BigDecimal, RoundingMode};

use crate::models::bookingmodel::Booking;

const COMMISSION_PERCENT: i64 = 10;

/// Which recorded amount a revenue figure is based on.
///
/// The Payments screen reports on what the worker collected; the Revenue
/// screen reports on what the customer paid. The two amounts are recorded
/// independently and do not have to match, so the basis is an explicit
/// argument rather than something a call site can get implicitly wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueBasis {
    WorkerCollected,
    CustomerPaid,
}

/// 10% of the worker-collected amount, rounded half-up to cents.
pub fn commission(payment_by_worker: &BigDecimal) -> BigDecimal {
    (payment_by_worker * BigDecimal::from(COMMISSION_PERCENT) / BigDecimal::from(100))
        .with_scale_round(2, RoundingMode::HalfUp)
}

pub fn booking_commission(booking: &Booking) -> Option<BigDecimal> {
    booking.payment_by_worker.as_ref().map(commission)
}

/// Sum of the chosen payment amount over bookings that carry a payment.
pub fn revenue_total<'a, I>(bookings: I, basis: RevenueBasis) -> BigDecimal
where
    I: IntoIterator<Item = &'a Booking>,
{
    bookings
        .into_iter()
        .filter_map(|booking| match basis {
            RevenueBasis::WorkerCollected => booking.payment_by_worker.as_ref(),
            RevenueBasis::CustomerPaid => booking.payment_by_user.as_ref(),
        })
        .sum::<BigDecimal>()
        .with_scale(2)
}

pub fn commission_total<'a, I>(bookings: I) -> BigDecimal
where
    I: IntoIterator<Item = &'a Booking>,
{
    bookings
        .into_iter()
        .filter_map(booking_commission)
        .sum::<BigDecimal>()
        .with_scale(2)
}

/// What is left for professionals after the platform cut.
pub fn professional_earnings(revenue_total: &BigDecimal, commission_total: &BigDecimal) -> BigDecimal {
    (revenue_total - commission_total).with_scale(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_commission_is_ten_percent() {
        assert_eq!(commission(&dec("1000")), dec("100.00"));
        assert_eq!(commission(&dec("2500.50")), dec("250.05"));
    }

    #[test]
    fn test_commission_rounds_half_up_to_cents() {
        // 10% of 10.05 = 1.005 -> 1.01
        assert_eq!(commission(&dec("10.05")), dec("1.01"));
        // 10% of 10.04 = 1.004 -> 1.00
        assert_eq!(commission(&dec("10.04")), dec("1.00"));
    }

    #[test]
    fn test_revenue_basis_selects_amount() {
        use crate::models::bookingmodel::{Booking, BookingStatus, PaymentMethod};
        use chrono::Utc;
        use uuid::Uuid;

        let make = |by_user: &str, by_worker: &str| Booking {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            professional_id: Some(Uuid::new_v4()),
            service_id: Uuid::new_v4(),
            issue_type: "wiring".to_string(),
            description: String::new(),
            status: BookingStatus::Verified,
            location_city: "Kandy".to_string(),
            location_district: "Kandy".to_string(),
            location_area: None,
            location_address: "1 Hill St".to_string(),
            lat: None,
            lng: None,
            scheduled_time: None,
            payment_by_user: Some(dec(by_user)),
            payment_by_worker: Some(dec(by_worker)),
            payment_method: Some(PaymentMethod::Cash),
            client_review_rating: None,
            client_review_comment: None,
            worker_review_rating: None,
            worker_review_comment: None,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
            paid_at: Some(Utc::now()),
            verified_at: Some(Utc::now()),
        };

        let bookings = vec![make("1200", "1000"), make("600", "500")];

        assert_eq!(
            revenue_total(&bookings, RevenueBasis::WorkerCollected),
            dec("1500.00")
        );
        assert_eq!(
            revenue_total(&bookings, RevenueBasis::CustomerPaid),
            dec("1800.00")
        );

        let commission = commission_total(&bookings);
        assert_eq!(commission, dec("150.00"));
        assert_eq!(
            professional_earnings(&dec("1500.00"), &commission),
            dec("1350.00")
        );
    }
}
