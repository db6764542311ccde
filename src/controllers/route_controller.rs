//! Controlador de rutas
//!
//! Capa delgada de orquestación: traduce DTOs a especificaciones del
//! repositorio y el resultado de vuelta a DTOs. Toda la lógica de
//! validación de dominio vive en el repositorio.

use neo4rs::Graph;
use std::sync::Arc;
use validator::Validate;

use crate::dto::route_dto::{
    CreateRouteRequest, DeleteRouteResponse, DeletedRouteResponse, RouteResponse,
    UpdateRouteRequest,
};
use crate::models::route::{NewRoute, UpdateRoute};
use crate::repositories::route_repository::RouteRepository;
use crate::services::station_resolver::StationResolver;
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};

pub struct RouteController {
    repository: RouteRepository,
    uses_remote_ids: bool,
}

impl RouteController {
    pub fn new(graph: Graph, resolver: Arc<dyn StationResolver>) -> Self {
        let uses_remote_ids = resolver.uses_remote_ids();
        Self {
            repository: RouteRepository::new(graph, resolver),
            uses_remote_ids,
        }
    }

    pub async fn create(&self, request: CreateRouteRequest) -> AppResult<RouteResponse> {
        request.validate()?;
        let spec = new_route_spec(request, self.uses_remote_ids)?;
        let route = self.repository.create(spec).await?;
        Ok(route.into())
    }

    pub async fn list(&self) -> AppResult<Vec<RouteResponse>> {
        let routes = self.repository.list().await?;
        Ok(routes.into_iter().map(RouteResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<RouteResponse> {
        let route = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Ruta", id))?;
        Ok(route.into())
    }

    pub async fn update(&self, id: &str, request: UpdateRouteRequest) -> AppResult<RouteResponse> {
        request.validate()?;
        let spec = update_route_spec(request, self.uses_remote_ids);
        let route = self
            .repository
            .update(id, spec)
            .await?
            .ok_or_else(|| not_found_error("Ruta", id))?;
        Ok(route.into())
    }

    pub async fn delete(&self, id: &str) -> AppResult<DeleteRouteResponse> {
        let deleted = self
            .repository
            .soft_delete(id)
            .await?
            .ok_or_else(|| not_found_error("Ruta", id))?;

        Ok(DeleteRouteResponse {
            message: "Ruta eliminada (soft delete)".to_string(),
            route: DeletedRouteResponse {
                id: deleted.id,
                is_active: deleted.is_active,
            },
        })
    }
}

/// Selecciona la variante de referencia (nombre local o id remoto) según
/// el resolver configurado y arma la especificación de creación.
fn new_route_spec(request: CreateRouteRequest, uses_remote_ids: bool) -> AppResult<NewRoute> {
    let (origin, destination, stops) = if uses_remote_ids {
        (
            request
                .origin_id
                .ok_or_else(|| bad_request_error("originId es requerido"))?,
            request
                .destination_id
                .ok_or_else(|| bad_request_error("destinationId es requerido"))?,
            request.stops_ids,
        )
    } else {
        (
            request
                .origin
                .ok_or_else(|| bad_request_error("origin es requerido"))?,
            request
                .destination
                .ok_or_else(|| bad_request_error("destination es requerido"))?,
            request.stops,
        )
    };

    Ok(NewRoute {
        origin,
        destination,
        stops,
        start_time: request.start_time,
        end_time: request.end_time,
        is_active: request.is_active,
    })
}

/// Igual que `new_route_spec` pero para la actualización parcial: los
/// campos ausentes quedan en `None` y el repositorio hereda los actuales.
fn update_route_spec(request: UpdateRouteRequest, uses_remote_ids: bool) -> UpdateRoute {
    let (origin, destination, stops) = if uses_remote_ids {
        (request.origin_id, request.destination_id, request.stops_ids)
    } else {
        (request.origin, request.destination, request.stops)
    };

    UpdateRoute {
        origin,
        destination,
        stops,
        start_time: request.start_time,
        end_time: request.end_time,
        is_active: request.is_active,
    }
}
