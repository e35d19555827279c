pub mod intake;
pub mod quiz;
pub mod registration;
