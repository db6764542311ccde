pub mod connection;

pub use connection::{create_graph, init_schema};
