//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{ClusterId, ClusterInfo, Constraint, DomainError};
use crate::planner::{
    Itinerary, Origin, RankOptions, filter_region, rank_destinations, regions_present,
};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/clusters/:id", get(cluster_info))
        .route("/api/reachable", post(reachable))
        .route("/api/route", get(route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Display details of one cluster.
async fn cluster_info(
    State(state): State<AppState>,
    Path(id): Path<ClusterId>,
) -> Result<Json<ClusterInfo>, AppError> {
    state
        .planner
        .graph()
        .cluster(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown cluster: {id}"),
        })
}

/// Destinations reachable from every origin, ranked.
async fn reachable(
    State(state): State<AppState>,
    Json(req): Json<ReachableRequest>,
) -> Result<Json<ReachableResponse>, AppError> {
    if req.origins.is_empty() {
        return Err(AppError::BadRequest {
            message: "At least one origin is required".to_string(),
        });
    }

    let origins = req
        .origins
        .iter()
        .map(|o| {
            let constraint = bounded(o.max_transfers, o.max_minutes)?;
            ensure_known(&state, o.cluster_id)?;
            Ok(Origin::new(o.cluster_id, constraint))
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let options = RankOptions {
        key: req.sort,
        direction: req.direction,
        focus_origin: req.focus_origin,
    };
    let region = req.region;
    let planner = Arc::clone(&state.planner);

    // Searches are CPU-bound; keep them off the async workers.
    let response = tokio::task::spawn_blocking(move || {
        let graph = planner.graph();
        let common = planner.common_destinations(&origins);

        let regions = regions_present(&common, graph)
            .into_iter()
            .map(|code| RegionResult {
                code,
                name: graph.region_name(code).map(str::to_string),
            })
            .collect();

        let common = match region {
            Some(region) => filter_region(common, region, graph),
            None => common,
        };
        let destinations = rank_destinations(common, &options, graph)
            .into_iter()
            .filter_map(|d| DestinationResult::describe(d, graph))
            .collect();

        ReachableResponse {
            destinations,
            regions,
        }
    })
    .await?;

    Ok(Json(response))
}

/// Best route between two clusters.
async fn route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<Itinerary>, AppError> {
    let constraint = bounded(query.max_transfers, query.max_minutes)?;
    ensure_known(&state, query.from)?;
    ensure_known(&state, query.to)?;

    let planner = Arc::clone(&state.planner);
    let (from, to) = (query.from, query.to);
    let itinerary =
        tokio::task::spawn_blocking(move || planner.route(from, to, &constraint)).await?;

    itinerary.map(Json).ok_or_else(|| AppError::NotFound {
        message: format!("No route from {from} to {to} within the given limits"),
    })
}

/// Build a constraint that bounds at least one dimension.
fn bounded(max_transfers: Option<u32>, max_minutes: Option<f64>) -> Result<Constraint, AppError> {
    let constraint = Constraint::new(max_transfers, max_minutes)?;
    if constraint.is_unconstrained() {
        return Err(AppError::BadRequest {
            message: "Either maxTransfers or maxMinutes is required".to_string(),
        });
    }
    Ok(constraint)
}

fn ensure_known(state: &AppState, cluster: ClusterId) -> Result<(), AppError> {
    if state.planner.graph().cluster(cluster).is_none() {
        return Err(AppError::NotFound {
            message: format!("Unknown cluster: {cluster}"),
        });
    }
    Ok(())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal {
            message: format!("search task failed: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, Response};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::cache::{CacheConfig, CachedPlanner};
    use crate::network::{NetworkData, NetworkGraph};
    use crate::planner::SearchConfig;

    /// Two lines meeting at Shinjuku (cluster 20): line 1 runs 1-2-3,
    /// line 2 runs 4-5. Station 6 is on no line.
    const DATASET: &str = r#"{
        "lines": [
            [1, "Chuo", "f15a22", [1, 2, 3], 2.0],
            [2, "Oedo", "b6007a", [4, 5], 3.0]
        ],
        "stations": [
            [1, "Tokyo", "とうきょう", 10, 13, 35.68, 139.76],
            [2, "Shinjuku", "しんじゅく", 20, 13, 35.69, 139.70],
            [3, "Mitaka", "みたか", 30, 13, 35.70, 139.56],
            [4, "Shinjuku", "しんじゅく", 20, 13, 35.69, 139.70],
            [5, "Yokohama", "よこはま", 50, 14, 35.46, 139.62],
            [6, "Nowhere", "", 60, 13]
        ],
        "regionNames": { "13": "Tokyo", "14": "Kanagawa" }
    }"#;

    fn app() -> Router {
        let data = NetworkData::from_json_str(DATASET).unwrap();
        let planner = CachedPlanner::new(
            Arc::new(NetworkGraph::build(data)),
            Arc::new(SearchConfig::default()),
            &CacheConfig::default(),
        );
        create_router(AppState::new(planner))
    }

    async fn send(request: Request<Body>) -> Response<Body> {
        app().oneshot(request).await.unwrap()
    }

    async fn get(uri: &str) -> Response<Body> {
        send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(uri: &str, body: Value) -> Response<Body> {
        send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cluster_lookup() {
        let response = get("/api/clusters/20").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["name"], "Shinjuku");
        assert_eq!(body["stations"], json!([2, 4]));
        assert_eq!(body["lines"][0]["name"], "Chuo");
        assert_eq!(body["lines"][1]["name"], "Oedo");
    }

    #[tokio::test]
    async fn unknown_cluster_is_not_found() {
        let response = get("/api/clusters/999").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn reachable_ranks_and_lists_regions() {
        let response = post_json(
            "/api/reachable",
            json!({ "origins": [{ "clusterId": 10, "maxTransfers": 1 }] }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let names: Vec<&str> = body["destinations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Shinjuku", "Mitaka", "Yokohama"]);
        assert_eq!(body["destinations"][2]["minMinutes"], 10.0);
        assert_eq!(body["destinations"][2]["access"][0]["transfers"], 1);
        assert_eq!(body["regions"][1]["name"], "Kanagawa");
    }

    #[tokio::test]
    async fn reachable_filters_by_region() {
        let response = post_json(
            "/api/reachable",
            json!({
                "origins": [{ "clusterId": 10, "maxTransfers": 1 }],
                "region": 14
            }),
        )
        .await;

        let body = json_body(response).await;
        assert_eq!(body["destinations"].as_array().unwrap().len(), 1);
        assert_eq!(body["destinations"][0]["cluster"], 50);
        assert_eq!(body["regions"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn reachable_rejects_bad_origins() {
        let empty = post_json("/api/reachable", json!({ "origins": [] })).await;
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

        let unbounded = post_json("/api/reachable", json!({ "origins": [{ "clusterId": 10 }] })).await;
        assert_eq!(unbounded.status(), StatusCode::BAD_REQUEST);

        let negative = post_json(
            "/api/reachable",
            json!({ "origins": [{ "clusterId": 10, "maxMinutes": -1.0 }] }),
        )
        .await;
        assert_eq!(negative.status(), StatusCode::BAD_REQUEST);

        let unknown = post_json(
            "/api/reachable",
            json!({ "origins": [{ "clusterId": 77, "maxTransfers": 0 }] }),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn route_returns_segments() {
        let response = get("/api/route?from=10&to=50&maxTransfers=1").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["totalMinutes"], 10.0);
        assert_eq!(body["totalTransfers"], 1);
        assert_eq!(body["segments"][0]["lineName"], "Chuo");
        assert_eq!(body["segments"][1]["lineColor"], "b6007a");
        assert_eq!(body["segments"][1]["stations"][1]["name"], "Yokohama");
    }

    #[tokio::test]
    async fn route_outside_caps_is_not_found() {
        let response = get("/api/route?from=10&to=50&maxTransfers=0").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn route_requires_a_cap() {
        let response = get("/api/route?from=10&to=50").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
