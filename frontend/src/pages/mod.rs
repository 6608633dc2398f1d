pub mod login;
pub mod organization;
