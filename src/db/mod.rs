pub mod bookingdb;
pub mod db;
pub mod professionaldb;
pub mod servicedb;
pub mod userdb;
