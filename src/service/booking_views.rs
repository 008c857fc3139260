use chrono::{DateTime, Duration, Utc};
use chrono_tz::Asia::Colombo;
use chrono_tz::Tz;

use crate::models::bookingmodel::BookingStatus;

/// A booking counts as overdue for the notification feed once it has been
/// sitting in `requested` longer than this.
pub const OVERDUE_THRESHOLD_MINUTES: i64 = 30;

/// The admin screens over the shared booking collection. Each view is an
/// allow-list over `BookingStatus`; this enum is the only place those
/// allow-lists exist, so the views cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminView {
    /// Live work queue.
    ActiveBookings,
    /// Finished bookings (history tab).
    History,
    /// Bookings whose payment has been admin-verified.
    Payments,
    /// Revenue reporting, before and after verification.
    Revenue,
}

impl AdminView {
    pub fn allowed_statuses(&self) -> &'static [BookingStatus] {
        match self {
            AdminView::ActiveBookings => &[BookingStatus::Requested, BookingStatus::Assigned],
            AdminView::History => &[
                BookingStatus::Completed,
                BookingStatus::Paid,
                BookingStatus::Verified,
            ],
            AdminView::Payments => &[BookingStatus::Verified],
            AdminView::Revenue => &[
                BookingStatus::Paid,
                BookingStatus::Completed,
                BookingStatus::Verified,
            ],
        }
    }

    pub fn includes(&self, status: BookingStatus) -> bool {
        self.allowed_statuses().contains(&status)
    }

    /// Path segment used by `GET /api/bookings/view/:view`.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "active" => Some(AdminView::ActiveBookings),
            "history" => Some(AdminView::History),
            "payments" => Some(AdminView::Payments),
            "revenue" => Some(AdminView::Revenue),
            _ => None,
        }
    }

    pub fn to_slug(&self) -> &str {
        match self {
            AdminView::ActiveBookings => "active",
            AdminView::History => "history",
            AdminView::Payments => "payments",
            AdminView::Revenue => "revenue",
        }
    }
}

/// Overdue check on UTC instants. The 30-minute age of a booking does not
/// depend on which wall clock you read it from.
pub fn is_overdue(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - created_at > Duration::minutes(OVERDUE_THRESHOLD_MINUTES)
}

/// Platform wall-clock time. Sri Lanka has no DST, but going through the
/// IANA zone keeps year/date-range boundaries correct if that ever changes.
pub fn now_colombo() -> DateTime<Tz> {
    Utc::now().with_timezone(&Colombo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_statuses() -> Vec<BookingStatus> {
        vec![
            BookingStatus::Requested,
            BookingStatus::Assigned,
            BookingStatus::Inspecting,
            BookingStatus::Approved,
            BookingStatus::InProgress,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
            BookingStatus::Paid,
            BookingStatus::Verified,
            BookingStatus::Denied,
        ]
    }

    #[test]
    fn test_active_view_statuses() {
        for status in all_statuses() {
            let expected = matches!(
                status,
                BookingStatus::Requested | BookingStatus::Assigned
            );
            assert_eq!(AdminView::ActiveBookings.includes(status), expected);
        }
    }

    #[test]
    fn test_payments_view_is_verified_only() {
        for status in all_statuses() {
            assert_eq!(
                AdminView::Payments.includes(status),
                status == BookingStatus::Verified
            );
        }
    }

    #[test]
    fn test_no_single_view_covers_all_statuses() {
        // inspecting/approved/inProgress/cancelled/denied are invisible to
        // every admin view. That gap is intentional.
        let views = [
            AdminView::ActiveBookings,
            AdminView::History,
            AdminView::Payments,
            AdminView::Revenue,
        ];

        for view in views {
            assert!(view.allowed_statuses().len() < all_statuses().len());
        }

        let hidden = [
            BookingStatus::Inspecting,
            BookingStatus::Approved,
            BookingStatus::InProgress,
            BookingStatus::Cancelled,
            BookingStatus::Denied,
        ];
        for status in hidden {
            assert!(views.iter().all(|view| !view.includes(status)));
        }
    }

    #[test]
    fn test_overdue_boundary() {
        let now = Utc::now();
        assert!(is_overdue(now - Duration::minutes(31), now));
        assert!(!is_overdue(now - Duration::minutes(29), now));
        // Exactly 30 minutes is not yet overdue
        assert!(!is_overdue(now - Duration::minutes(30), now));
    }

    #[test]
    fn test_view_slugs_roundtrip() {
        for view in [
            AdminView::ActiveBookings,
            AdminView::History,
            AdminView::Payments,
            AdminView::Revenue,
        ] {
            assert_eq!(AdminView::from_slug(view.to_slug()), Some(view));
        }
        assert_eq!(AdminView::from_slug("nope"), None);
    }
}
