pub mod login;
pub mod review;
