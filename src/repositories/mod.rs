pub mod route_repository;
