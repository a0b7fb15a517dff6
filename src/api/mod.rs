pub mod api;
pub mod errors;
