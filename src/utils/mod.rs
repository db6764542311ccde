pub mod errors;
pub mod time;
