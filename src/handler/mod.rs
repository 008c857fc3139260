pub mod admin;
pub mod auth;
pub mod bookings;
pub mod professionals;
pub mod services;
