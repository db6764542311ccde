use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::route::Route;

fn default_is_active() -> bool {
    true
}

// Request para crear una ruta. Las estaciones llegan por nombre (resolución
// local) o por id (servicio remoto de estaciones), nunca ambas variantes
// en el mismo despliegue.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, message = "origin no puede estar vacío"))]
    pub origin: Option<String>,
    #[validate(length(min = 1, message = "originId no puede estar vacío"))]
    pub origin_id: Option<String>,
    #[validate(length(min = 1, message = "destination no puede estar vacío"))]
    pub destination: Option<String>,
    #[validate(length(min = 1, message = "destinationId no puede estar vacío"))]
    pub destination_id: Option<String>,
    #[serde(default)]
    pub stops: Vec<String>,
    #[serde(default)]
    pub stops_ids: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

// Request de actualización parcial: cualquier campo omitido conserva el
// valor actual de la ruta.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRouteRequest {
    #[validate(length(min = 1, message = "origin no puede estar vacío"))]
    pub origin: Option<String>,
    #[validate(length(min = 1, message = "originId no puede estar vacío"))]
    pub origin_id: Option<String>,
    #[validate(length(min = 1, message = "destination no puede estar vacío"))]
    pub destination: Option<String>,
    #[validate(length(min = 1, message = "destinationId no puede estar vacío"))]
    pub destination_id: Option<String>,
    pub stops: Option<Vec<String>>,
    pub stops_ids: Option<Vec<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_active: Option<bool>,
}

// Response de ruta expandida con sus estaciones
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub start_time: String,
    pub end_time: String,
    pub stops: Vec<String>,
    pub is_active: bool,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            origin: route.origin,
            destination: route.destination,
            start_time: route.start_time,
            end_time: route.end_time,
            stops: route.stops,
            is_active: route.is_active,
        }
    }
}

// Response del soft delete: solo id y estado
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedRouteResponse {
    pub id: String,
    pub is_active: bool,
}

// Envoltura del DELETE con mensaje, como la API original
#[derive(Debug, Serialize)]
pub struct DeleteRouteResponse {
    pub message: String,
    pub route: DeletedRouteResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let json = r#"{
            "origin": "A",
            "destination": "B",
            "startTime": "08:00",
            "endTime": "09:00"
        }"#;
        let request: CreateRouteRequest = serde_json::from_str(json).unwrap();
        assert!(request.is_active);
        assert!(request.stops.is_empty());
        assert!(request.origin_id.is_none());
    }

    #[test]
    fn test_create_request_camel_case() {
        let json = r#"{
            "originId": "st-1",
            "destinationId": "st-2",
            "stopsIds": ["st-3"],
            "startTime": "08:00",
            "endTime": "09:00",
            "isActive": false
        }"#;
        let request: CreateRouteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.origin_id.as_deref(), Some("st-1"));
        assert_eq!(request.stops_ids, vec!["st-3".to_string()]);
        assert!(!request.is_active);
    }

    #[test]
    fn test_update_request_partial() {
        let json = r#"{ "stops": ["X", "Y"] }"#;
        let request: UpdateRouteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.stops,
            Some(vec!["X".to_string(), "Y".to_string()])
        );
        assert!(request.origin.is_none());
        assert!(request.start_time.is_none());
        assert!(request.is_active.is_none());
    }

    #[test]
    fn test_route_response_serializes_camel_case() {
        let response = RouteResponse {
            id: "r-1".to_string(),
            origin: "A".to_string(),
            destination: "B".to_string(),
            start_time: "08:00".to_string(),
            end_time: "09:00".to_string(),
            stops: vec![],
            is_active: true,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["startTime"], "08:00");
        assert_eq!(value["isActive"], true);
    }
}
