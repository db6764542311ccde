pub mod route;
pub mod station;
