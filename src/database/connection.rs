//! Conexión a Neo4j
//!
//! Este módulo maneja la conexión Bolt al grafo y la inicialización del
//! esquema (constraints e índices).

use anyhow::Result;
use neo4rs::{query, Graph};

use crate::config::environment::EnvironmentConfig;

/// Crear la conexión al grafo. `Graph` mantiene su propio pool interno
/// y es barato de clonar.
pub async fn create_graph(config: &EnvironmentConfig) -> Result<Graph> {
    let graph = Graph::new(
        &config.neo4j_uri,
        &config.neo4j_user,
        &config.neo4j_password,
    )
    .await?;

    Ok(graph)
}

/// Inicializar constraints e índices del esquema.
///
/// La unicidad de `Route.id` queda garantizada por el store; la unicidad
/// de rutas activas idénticas se verifica en la aplicación y es una
/// garantía relajada bajo concurrencia.
pub async fn init_schema(graph: &Graph) {
    let statements = [
        "CREATE CONSTRAINT route_id IF NOT EXISTS FOR (r:Route) REQUIRE r.id IS UNIQUE",
        "CREATE INDEX station_name IF NOT EXISTS FOR (s:Station) ON (s.name)",
        "CREATE INDEX route_active IF NOT EXISTS FOR (r:Route) ON (r.isActive)",
    ];

    for statement in statements {
        if let Err(e) = graph.run(query(statement)).await {
            tracing::warn!("Constraint o índice ya existente: {}", e);
        }
    }
}
