pub mod bookingmodel;
pub mod professionalmodel;
pub mod servicemodel;
pub mod usermodel;
