//! Resolución de estaciones
//!
//! Dos variantes, elegidas por configuración de despliegue y nunca ambas
//! en el mismo camino de ejecución:
//!
//! - **Local**: la referencia es el nombre de la estación; se asegura el
//!   nodo con merge-on-write y nunca falla para un nombre bien formado.
//! - **Remota**: la referencia es el id de un servicio externo de
//!   estaciones; un fallo de transporte o un 404 se trata como "no
//!   resuelta" (`None`) sin propagar el detalle. Una resolución exitosa
//!   además materializa el nodo local para que las consultas de grafo no
//!   vuelvan a contactar el servicio.

use async_trait::async_trait;
use neo4rs::{query, Graph};
use std::sync::Arc;
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;
use crate::models::station::{RemoteStation, StationRole};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait StationResolver: Send + Sync {
    /// Resuelve una referencia de estación a su nombre canónico, o `None`
    /// si la estación no existe.
    async fn resolve(&self, reference: &str, role: StationRole) -> AppResult<Option<String>>;

    /// `true` cuando las rutas referencian estaciones por id remoto
    fn uses_remote_ids(&self) -> bool;
}

/// Construir el resolver según la configuración del despliegue
pub fn from_config(graph: Graph, config: &EnvironmentConfig) -> Arc<dyn StationResolver> {
    match &config.stations_service_url {
        Some(base_url) => Arc::new(RemoteStationResolver::new(
            graph,
            base_url.clone(),
            config.stations_timeout_secs,
        )),
        None => Arc::new(LocalStationResolver::new(graph)),
    }
}

/// Variante local: estaciones identificadas por nombre en el propio grafo
pub struct LocalStationResolver {
    graph: Graph,
}

impl LocalStationResolver {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl StationResolver for LocalStationResolver {
    async fn resolve(&self, reference: &str, role: StationRole) -> AppResult<Option<String>> {
        let name = reference.trim();
        if name.is_empty() {
            return Ok(None);
        }

        // Merge-on-write: el type solo se asigna en la primera creación
        let q = query(
            r#"
            MERGE (s:Station {name: $name})
            ON CREATE SET s.type = $type
            "#,
        )
        .param("name", name)
        .param("type", role.type_label());

        self.graph.run(q).await?;

        Ok(Some(name.to_string()))
    }

    fn uses_remote_ids(&self) -> bool {
        false
    }
}

/// Variante remota: consulta el servicio de estaciones por id
pub struct RemoteStationResolver {
    graph: Graph,
    base_url: String,
    client: reqwest::Client,
}

impl RemoteStationResolver {
    pub fn new(graph: Graph, base_url: String, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            graph,
            base_url,
            client,
        }
    }

    fn lookup_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), id)
    }
}

#[async_trait]
impl StationResolver for RemoteStationResolver {
    async fn resolve(&self, reference: &str, role: StationRole) -> AppResult<Option<String>> {
        let id = reference.trim();
        if id.is_empty() {
            return Ok(None);
        }

        let url = self.lookup_url(id);

        // Cualquier fallo de transporte, timeout o respuesta no exitosa
        // cuenta como estación inexistente; el detalle solo se loguea.
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Fallo consultando el servicio de estaciones ({}): {}", url, e);
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "Estación '{}' no encontrada en el servicio remoto (status {})",
                id,
                response.status()
            );
            return Ok(None);
        }

        let station: RemoteStation = match response.json().await {
            Ok(station) => station,
            Err(e) => {
                tracing::warn!("Respuesta inválida del servicio de estaciones: {}", e);
                return Ok(None);
            }
        };

        // Materializar el nodo local para las consultas de grafo
        // posteriores; name y type solo se asignan en la creación.
        let q = query(
            r#"
            MERGE (s:Station {id: $id})
            ON CREATE SET s.name = $name, s.type = $type
            "#,
        )
        .param("id", station.id.as_str())
        .param("name", station.name.as_str())
        .param("type", role.type_label());

        self.graph.run(q).await?;

        Ok(Some(station.name))
    }

    fn uses_remote_ids(&self) -> bool {
        true
    }
}
