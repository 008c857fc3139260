pub mod admindtos;
pub mod bookingdtos;
pub mod professionaldtos;
pub mod servicedtos;
pub mod userdtos;
