pub mod cors;
pub mod errors;
pub mod hold_handler;
pub mod schema;
