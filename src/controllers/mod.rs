pub mod hub;
pub mod status;
