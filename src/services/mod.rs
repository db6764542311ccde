pub mod station_resolver;
