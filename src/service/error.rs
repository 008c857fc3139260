use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::HttpError,
    models::{bookingmodel::BookingStatus, professionalmodel::ProfessionalStatus},
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Booking {0} not found")]
    BookingNotFound(Uuid),

    #[error("Booking {id} cannot move from {from:?} to {to:?}")]
    InvalidBookingTransition {
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Professional {0} not found")]
    ProfessionalNotFound(Uuid),

    #[error("Professional {id} cannot move from {from:?} to {to:?}")]
    InvalidProfessionalTransition {
        id: Uuid,
        from: ProfessionalStatus,
        to: ProfessionalStatus,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    PermissionDenied(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::BookingNotFound(_) | ServiceError::ProfessionalNotFound(_) => {
                HttpError::not_found(error.to_string())
            }

            ServiceError::InvalidBookingTransition { .. }
            | ServiceError::InvalidProfessionalTransition { .. }
            | ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::PermissionDenied(_) => {
                HttpError::new(error.to_string(), StatusCode::FORBIDDEN)
            }

            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}
