pub mod booking_service;
pub mod booking_views;
pub mod commission;
pub mod error;
pub mod professional_service;
