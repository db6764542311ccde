mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚌 Route Service - rutas de transporte sobre Neo4j");
    info!("==================================================");

    let config = EnvironmentConfig::default();

    // Conectar al grafo
    let graph = match database::create_graph(&config).await {
        Ok(graph) => graph,
        Err(e) => {
            error!("❌ Error conectando a Neo4j: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    info!("✅ Neo4j conectado exitosamente");

    // Constraints e índices
    database::init_schema(&graph).await;

    match &config.stations_service_url {
        Some(url) => info!("🛰️ Resolución de estaciones remota: {}", url),
        None => info!("📍 Resolución de estaciones local (por nombre)"),
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app_state = AppState::new(graph, config);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/routes", routes::route_routes::create_route_router())
        .layer(cors_middleware())
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   POST   /api/routes - Crear ruta");
    info!("   GET    /api/routes - Listar rutas activas");
    info!("   GET    /api/routes/:id - Obtener ruta");
    info!("   PUT    /api/routes/:id - Actualizar ruta");
    info!("   PATCH  /api/routes/:id - Actualizar ruta (parcial)");
    info!("   DELETE /api/routes/:id - Eliminar ruta (soft delete)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "route-service",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
