//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use neo4rs::Graph;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::station_resolver::{self, StationResolver};

#[derive(Clone)]
pub struct AppState {
    pub graph: Graph,
    pub config: EnvironmentConfig,
    pub resolver: Arc<dyn StationResolver>,
}

impl AppState {
    pub fn new(graph: Graph, config: EnvironmentConfig) -> Self {
        let resolver = station_resolver::from_config(graph.clone(), &config);
        Self {
            graph,
            config,
            resolver,
        }
    }
}
