//! Repositorio de rutas
//!
//! Todas las mutaciones y consultas de grafo sobre Route viven aquí:
//! validación, chequeo de duplicados, creación, listado, búsqueda,
//! actualización (reemplazo de relaciones) y borrado lógico.
//!
//! Cada escritura multi-relación es una única sentencia Cypher, de modo
//! que la transaccionalidad del store garantiza que nunca se observe un
//! grafo parcial (un nodo Route sin su STARTS_AT). El chequeo de
//! duplicados seguido del insert no está serializado entre operaciones
//! concurrentes; la unicidad de rutas activas idénticas es una garantía
//! relajada.

use neo4rs::{query, Graph, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::route::{same_stop_set, DeletedRoute, NewRoute, Route, UpdateRoute};
use crate::models::station::StationRole;
use crate::services::station_resolver::StationResolver;
use crate::utils::errors::{bad_request_error, AppError, AppResult};
use crate::utils::time::is_valid_time;

/// Valida la ventana horaria de una ruta: formato HH:mm en ambos extremos
/// y comienzo estrictamente anterior al fin. La comparación lexicográfica
/// es válida porque el formato es de ancho fijo con ceros a la izquierda.
pub fn validate_schedule(start_time: &str, end_time: &str) -> AppResult<()> {
    if !is_valid_time(start_time) {
        return Err(bad_request_error(
            "startTime inválido: se espera formato HH:mm (24 horas)",
        ));
    }

    if !is_valid_time(end_time) {
        return Err(bad_request_error(
            "endTime inválido: se espera formato HH:mm (24 horas)",
        ));
    }

    if start_time >= end_time {
        return Err(bad_request_error(
            "startTime debe ser estrictamente menor que endTime",
        ));
    }

    Ok(())
}

/// Valida que el origen y el destino sean estaciones distintas
pub fn validate_endpoints(origin: &str, destination: &str) -> AppResult<()> {
    if origin == destination {
        return Err(bad_request_error(
            "El origen y el destino no pueden ser la misma estación",
        ));
    }

    Ok(())
}

pub struct RouteRepository {
    graph: Graph,
    resolver: Arc<dyn StationResolver>,
}

impl RouteRepository {
    pub fn new(graph: Graph, resolver: Arc<dyn StationResolver>) -> Self {
        Self { graph, resolver }
    }

    /// Crea una ruta nueva con sus tres tipos de relación en una única
    /// sentencia atómica. Si la validación, la resolución de estaciones o
    /// el chequeo de duplicados no pasan, no se escribe ningún nodo Route
    /// ni arista; la resolución previa puede haber hecho merge de nodos
    /// Station, que son idempotentes y compartidos entre rutas.
    pub async fn create(&self, spec: NewRoute) -> AppResult<Route> {
        validate_schedule(&spec.start_time, &spec.end_time)?;
        validate_endpoints(&spec.origin, &spec.destination)?;

        if !spec.is_active {
            return Err(bad_request_error("No se puede crear una ruta inactiva"));
        }

        let origin = self
            .resolve_station(&spec.origin, StationRole::Origin)
            .await?;
        let destination = self
            .resolve_station(&spec.destination, StationRole::Destination)
            .await?;

        let mut stops = Vec::with_capacity(spec.stops.len());
        for stop in &spec.stops {
            stops.push(self.resolve_station(stop, StationRole::Stop).await?);
        }

        // Dos ids remotos distintos pueden resolver al mismo nombre
        validate_endpoints(&origin, &destination)?;

        if self
            .duplicate_exists(&origin, &destination, &spec.start_time, &spec.end_time, &stops, None)
            .await?
        {
            return Err(AppError::Conflict(
                "Ya existe una ruta activa idéntica".to_string(),
            ));
        }

        let route_id = Uuid::new_v4().to_string();

        let q = query(
            r#"
            CREATE (r:Route {
                id: $route_id,
                startTime: $start_time,
                endTime: $end_time,
                isActive: $is_active
            })
            MERGE (o:Station {name: $origin})
            ON CREATE SET o.type = 'origen'
            MERGE (d:Station {name: $destination})
            ON CREATE SET d.type = 'destino'
            CREATE (r)-[:STARTS_AT]->(o)
            CREATE (r)-[:ENDS_AT]->(d)
            FOREACH (stop_name IN $stops |
                MERGE (s:Station {name: stop_name})
                ON CREATE SET s.type = 'intermedia'
                CREATE (r)-[:STOPS_AT]->(s)
            )
            "#,
        )
        .param("route_id", route_id.as_str())
        .param("start_time", spec.start_time.as_str())
        .param("end_time", spec.end_time.as_str())
        .param("is_active", spec.is_active)
        .param("origin", origin.as_str())
        .param("destination", destination.as_str())
        .param("stops", stops.clone());

        self.graph.run(q).await?;

        tracing::info!("Ruta creada: {} ({} -> {})", route_id, origin, destination);

        Ok(Route {
            id: route_id,
            origin,
            destination,
            stops,
            start_time: spec.start_time,
            end_time: spec.end_time,
            is_active: spec.is_active,
        })
    }

    /// Lista todas las rutas activas expandidas con sus estaciones, en una
    /// única consulta de lectura.
    pub async fn list(&self) -> AppResult<Vec<Route>> {
        let q = query(
            r#"
            MATCH (r:Route {isActive: true})
            OPTIONAL MATCH (r)-[:STARTS_AT]->(o:Station)
            OPTIONAL MATCH (r)-[:ENDS_AT]->(d:Station)
            OPTIONAL MATCH (r)-[:STOPS_AT]->(s:Station)
            RETURN r.id AS id,
                   r.startTime AS startTime,
                   r.endTime AS endTime,
                   r.isActive AS isActive,
                   o.name AS origin,
                   d.name AS destination,
                   collect(s.name) AS stops
            "#,
        );

        let mut result = self.graph.execute(q).await?;
        let mut routes = Vec::new();

        while let Some(row) = result.next().await? {
            routes.push(row_to_route(&row)?);
        }

        Ok(routes)
    }

    /// Busca una ruta activa por id. La ausencia no es un error: devuelve
    /// `None` tanto para ids desconocidos como para rutas desactivadas.
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Route>> {
        let q = query(
            r#"
            MATCH (r:Route {id: $id, isActive: true})
            OPTIONAL MATCH (r)-[:STARTS_AT]->(o:Station)
            OPTIONAL MATCH (r)-[:ENDS_AT]->(d:Station)
            OPTIONAL MATCH (r)-[:STOPS_AT]->(s:Station)
            RETURN r.id AS id,
                   r.startTime AS startTime,
                   r.endTime AS endTime,
                   r.isActive AS isActive,
                   o.name AS origin,
                   d.name AS destination,
                   collect(s.name) AS stops
            "#,
        )
        .param("id", id);

        let mut result = self.graph.execute(q).await?;

        match result.next().await? {
            Some(row) => Ok(Some(row_to_route(&row)?)),
            None => Ok(None),
        }
    }

    /// Actualización parcial: los campos omitidos conservan el valor
    /// actual. Re-ejecuta las mismas validaciones que `create` (con el
    /// chequeo de duplicados excluyendo la propia ruta) y reemplaza las
    /// tres clases de relación de forma atómica, sin acumular aristas.
    ///
    /// A diferencia de `get_by_id`, busca la ruta sin filtrar por
    /// `isActive`: una ruta desactivada puede revivirse con
    /// `{isActive: true}`.
    pub async fn update(&self, id: &str, spec: UpdateRoute) -> AppResult<Option<Route>> {
        let current = match self.find_any_by_id(id).await? {
            Some(route) => route,
            None => return Ok(None),
        };

        let (start_time, end_time, is_active) = spec.merged_schedule(&current);
        validate_schedule(&start_time, &end_time)?;

        // Solo se resuelven las referencias provistas; los valores
        // heredados de la ruta ya son nombres canónicos.
        let origin = match &spec.origin {
            Some(reference) => self.resolve_station(reference, StationRole::Origin).await?,
            None => current.origin.clone(),
        };
        let destination = match &spec.destination {
            Some(reference) => {
                self.resolve_station(reference, StationRole::Destination)
                    .await?
            }
            None => current.destination.clone(),
        };
        let stops = match &spec.stops {
            Some(references) => {
                let mut resolved = Vec::with_capacity(references.len());
                for reference in references {
                    resolved.push(self.resolve_station(reference, StationRole::Stop).await?);
                }
                resolved
            }
            None => current.stops.clone(),
        };

        validate_endpoints(&origin, &destination)?;

        if self
            .duplicate_exists(&origin, &destination, &start_time, &end_time, &stops, Some(id))
            .await?
        {
            return Err(AppError::Conflict(
                "Ya existe una ruta activa idéntica".to_string(),
            ));
        }

        // Borrar y recrear las tres clases de arista en la misma
        // sentencia: nunca queda visible una ruta sin origen o destino.
        let q = query(
            r#"
            MATCH (r:Route {id: $id})
            SET r.startTime = $start_time,
                r.endTime = $end_time,
                r.isActive = $is_active
            WITH r
            OPTIONAL MATCH (r)-[rel:STARTS_AT|ENDS_AT|STOPS_AT]->()
            DELETE rel
            WITH DISTINCT r
            MERGE (o:Station {name: $origin})
            ON CREATE SET o.type = 'origen'
            MERGE (d:Station {name: $destination})
            ON CREATE SET d.type = 'destino'
            CREATE (r)-[:STARTS_AT]->(o)
            CREATE (r)-[:ENDS_AT]->(d)
            FOREACH (stop_name IN $stops |
                MERGE (s:Station {name: stop_name})
                ON CREATE SET s.type = 'intermedia'
                CREATE (r)-[:STOPS_AT]->(s)
            )
            "#,
        )
        .param("id", id)
        .param("start_time", start_time.as_str())
        .param("end_time", end_time.as_str())
        .param("is_active", is_active)
        .param("origin", origin.as_str())
        .param("destination", destination.as_str())
        .param("stops", stops.clone());

        self.graph.run(q).await?;

        tracing::info!("Ruta actualizada: {}", id);

        Ok(Some(Route {
            id: id.to_string(),
            origin,
            destination,
            stops,
            start_time,
            end_time,
            is_active,
        }))
    }

    /// Borrado lógico: marca la ruta como inactiva sin tocar aristas ni
    /// estaciones. Idempotente sobre rutas ya inactivas.
    pub async fn soft_delete(&self, id: &str) -> AppResult<Option<DeletedRoute>> {
        let q = query(
            r#"
            MATCH (r:Route {id: $id})
            SET r.isActive = false
            RETURN r.id AS id, r.isActive AS isActive
            "#,
        )
        .param("id", id);

        let mut result = self.graph.execute(q).await?;

        match result.next().await? {
            Some(row) => {
                tracing::info!("Ruta desactivada: {}", id);
                Ok(Some(DeletedRoute {
                    id: row.get("id")?,
                    is_active: row.get("isActive")?,
                }))
            }
            None => Ok(None),
        }
    }

    /// Busca la ruta por id sin filtrar por estado, para el paso
    /// read-then-merge de la actualización parcial.
    async fn find_any_by_id(&self, id: &str) -> AppResult<Option<Route>> {
        let q = query(
            r#"
            MATCH (r:Route {id: $id})
            OPTIONAL MATCH (r)-[:STARTS_AT]->(o:Station)
            OPTIONAL MATCH (r)-[:ENDS_AT]->(d:Station)
            OPTIONAL MATCH (r)-[:STOPS_AT]->(s:Station)
            RETURN r.id AS id,
                   r.startTime AS startTime,
                   r.endTime AS endTime,
                   r.isActive AS isActive,
                   o.name AS origin,
                   d.name AS destination,
                   collect(s.name) AS stops
            "#,
        )
        .param("id", id);

        let mut result = self.graph.execute(q).await?;

        match result.next().await? {
            Some(row) => Ok(Some(row_to_route(&row)?)),
            None => Ok(None),
        }
    }

    /// Resuelve una referencia de estación o falla con NotFound
    async fn resolve_station(&self, reference: &str, role: StationRole) -> AppResult<String> {
        match self.resolver.resolve(reference, role).await? {
            Some(name) => Ok(name),
            None => Err(AppError::NotFound(format!(
                "La estación '{}' no existe",
                reference
            ))),
        }
    }

    /// Busca rutas activas con el mismo origen, destino y ventana horaria
    /// y compara sus paradas como conjunto, insensible al orden. El id
    /// excluido permite que una actualización no choque consigo misma.
    async fn duplicate_exists(
        &self,
        origin: &str,
        destination: &str,
        start_time: &str,
        end_time: &str,
        stops: &[String],
        exclude_id: Option<&str>,
    ) -> AppResult<bool> {
        let q = query(
            r#"
            MATCH (r:Route {isActive: true, startTime: $start_time, endTime: $end_time})
            WHERE r.id <> $exclude_id
            MATCH (r)-[:STARTS_AT]->(:Station {name: $origin})
            MATCH (r)-[:ENDS_AT]->(:Station {name: $destination})
            OPTIONAL MATCH (r)-[:STOPS_AT]->(s:Station)
            RETURN r.id AS id, collect(s.name) AS stops
            "#,
        )
        .param("start_time", start_time)
        .param("end_time", end_time)
        .param("origin", origin)
        .param("destination", destination)
        .param("exclude_id", exclude_id.unwrap_or(""));

        let mut result = self.graph.execute(q).await?;

        while let Some(row) = result.next().await? {
            let existing_stops: Vec<String> = row.get("stops")?;
            if same_stop_set(&existing_stops, stops) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

/// Convierte una fila expandida (ruta + estaciones) al modelo Route
fn row_to_route(row: &Row) -> AppResult<Route> {
    Ok(Route {
        id: row.get("id")?,
        origin: row.get("origin")?,
        destination: row.get("destination")?,
        stops: row.get("stops")?,
        start_time: row.get("startTime")?,
        end_time: row.get("endTime")?,
        is_active: row.get("isActive")?,
    })
}
