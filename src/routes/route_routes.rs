use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{
    CreateRouteRequest, DeleteRouteResponse, RouteResponse, UpdateRouteRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route(
            "/:id",
            get(get_by_id).put(update).patch(update).delete(delete),
        )
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<RouteResponse>), AppError> {
    let controller = RouteController::new(state.graph.clone(), state.resolver.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.graph.clone(), state.resolver.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RouteResponse>, AppError> {
    let controller = RouteController::new(state.graph.clone(), state.resolver.clone());
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let controller = RouteController::new(state.graph.clone(), state.resolver.clone());
    let response = controller.update(&id, request).await?;
    Ok(Json(response))
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteRouteResponse>, AppError> {
    let controller = RouteController::new(state.graph.clone(), state.resolver.clone());
    let response = controller.delete(&id).await?;
    Ok(Json(response))
}
