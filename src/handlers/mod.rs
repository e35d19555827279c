pub mod admin;
pub mod done;
pub mod homepage;
