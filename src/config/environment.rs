//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    /// URL base del servicio remoto de estaciones. Si está presente, las
    /// rutas referencian estaciones por id remoto en lugar de por nombre.
    pub stations_service_url: Option<String>,
    pub stations_timeout_secs: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            neo4j_uri: env::var("NEO4J_URI").unwrap_or_else(|_| "127.0.0.1:7687".to_string()),
            neo4j_user: env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string()),
            neo4j_password: env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "neo4j".to_string()),
            stations_service_url: env::var("STATIONS_SERVICE_URL").ok().filter(|u| !u.is_empty()),
            stations_timeout_secs: env::var("STATIONS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("STATIONS_TIMEOUT_SECS must be a valid number"),
        }
    }
}
