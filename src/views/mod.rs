pub mod admin;
pub mod done;
pub mod layout;
pub mod register;

// Re-export commonly used functions from layout
pub use layout::{page, render, titled};
