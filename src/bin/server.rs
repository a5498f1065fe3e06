//! Grid model HTTP server

use axum::{
    extract::{rejection::JsonRejection, Json},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use ijk_grid::prelude::*;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct GridResponse {
    success: bool,
    error: Option<String>,
    results: Option<GridData>,
}

#[derive(Debug, Serialize)]
struct GridData {
    points: Vec<PointResult>,
    lines: Vec<LineResult>,
    surfaces: Vec<SurfaceResult>,
    summary: MeshSummary,
}

#[derive(Debug, Serialize)]
struct PointResult {
    tag: usize,
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Serialize)]
struct LineResult {
    tag: usize,
    label: LineKey,
    ndiv: usize,
}

#[derive(Debug, Serialize)]
struct SurfaceResult {
    tag: usize,
    label: SurfaceKey,
    points: [usize; 4],
    elements: usize,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn failure(status: StatusCode, error: String) -> (StatusCode, Json<GridResponse>) {
    log::warn!("Grid build failed: {}", error);
    (
        status,
        Json(GridResponse {
            success: false,
            error: Some(error),
            results: None,
        }),
    )
}

async fn build_grid(
    payload: Result<Json<GridConfig>, JsonRejection>,
) -> (StatusCode, Json<GridResponse>) {
    let Json(config) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return failure(rejection.status(), rejection.body_text()),
    };
    match run_build(&config) {
        Ok(results) => (
            StatusCode::OK,
            Json(GridResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(e) => failure(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

fn run_build(config: &GridConfig) -> GridResult<GridData> {
    let built = config.build()?;
    let model = &built.model;

    let points = model
        .points()
        .map(|p| PointResult {
            tag: p.tag,
            x: p.pos.x,
            y: p.pos.y,
            z: p.pos.z,
        })
        .collect();

    let mut lines = built
        .lines
        .iter()
        .map(|(key, tag)| {
            Ok(LineResult {
                tag: *tag,
                label: *key,
                ndiv: model.line(*tag)?.ndiv,
            })
        })
        .collect::<GridResult<Vec<_>>>()?;
    lines.sort_by_key(|l| l.tag);

    let mut surfaces = built
        .surfaces
        .iter()
        .map(|(key, tag)| {
            Ok(SurfaceResult {
                tag: *tag,
                label: *key,
                points: key.0,
                elements: model.surface(*tag)?.elements().len(),
            })
        })
        .collect::<GridResult<Vec<_>>>()?;
    surfaces.sort_by_key(|s| s.tag);

    Ok(GridData {
        points,
        lines,
        surfaces,
        summary: model.summary(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/grid", post(build_grid))
        .layer(cors);

    let port = std::env::var("GRID_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(8087);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("Grid Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Build grid:   POST /api/v1/grid");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::FromRequest, http::Request};

    async fn post_body(body: &'static str) -> (StatusCode, Json<GridResponse>) {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        build_grid(Json::<GridConfig>::from_request(request, &()).await).await
    }

    #[tokio::test]
    async fn test_malformed_body_uses_envelope() {
        let (status, Json(response)) = post_body("{\"x\": [0.0,").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!response.success);
        assert!(response.error.is_some());
        assert!(response.results.is_none());
    }

    #[tokio::test]
    async fn test_invalid_grid_reported() {
        let (status, Json(response)) = post_body(r#"{"x":[],"y":[0.0],"z":[0.0]}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response.error.unwrap().contains("Axis X"));
    }

    #[tokio::test]
    async fn test_valid_grid_built() {
        let (status, Json(response)) = post_body(
            r#"{"x":[0.0,1.0],"y":[0.0,1.0],"z":[0.0],"surfaces":[{"min":[0,0,0],"max":[1,1,0]}]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let results = response.results.unwrap();
        assert_eq!(results.points.len(), 4);
        assert_eq!(results.surfaces.len(), 1);
    }
}
