use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::app_state::AppState;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    let api_v1 = Router::new().nest(
        "/organizations/{organization_id}/dashboard",
        crate::api::routes::dashboard_routes::dashboard_routes(),
    );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1)
        .fallback(handler_404)
        .layer(CorsLayer::very_permissive())
}

async fn root() -> &'static str {
    "Server is running!"
}

async fn health_check() -> &'static str {
    "OK"
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "The requested resource was not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::Value;
    use tokio::net::TcpListener;

    use crate::core::cache::ttl_cache::InMemoryTtlCache;
    use crate::core::persistence::cluster::cluster_entity::ClusterStatus;
    use crate::domain::dashboard::model::stack::TOTAL_CPU_QUERY;
    use crate::domain::dashboard::service::dashboard_service::DashboardService;
    use crate::domain::dashboard::service::endpoint_resolver::PRIMARY_SERVICE;
    use crate::domain::dashboard::service::test_support::{
        cluster, instant, load_balancer, MockAlerts, MockBackend, MockBackendFactory, MockClusters,
        MockControlPlane, MockOrganizations,
    };

    fn state() -> AppState {
        let cache = InMemoryTtlCache::new(Duration::from_secs(300)).shared();
        let backend = Arc::new(
            MockBackend::default().with_instant(TOTAL_CPU_QUERY, vec![instant("c1", None, "8")]),
        );
        let organizations = MockOrganizations::with("org-1", Some("c1"));
        let service = DashboardService::new(
            Arc::new(organizations),
            Arc::new(MockClusters::new(vec![cluster(
                "c1",
                "org-1",
                "alpha",
                ClusterStatus::Running,
            )])),
            Arc::new(MockAlerts::default()),
            Arc::new(MockControlPlane::default().with_service("c1", PRIMARY_SERVICE, load_balancer())),
            Arc::new(MockBackendFactory::new(backend)),
            cache.clone(),
            "lma",
        );

        AppState {
            dashboard_service: Arc::new(service),
            cache,
        }
    }

    async fn serve() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = app_router().with_state(state());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn health_and_fallback() {
        let addr = serve().await;

        let health = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(health.text().await.unwrap(), "OK");

        let missing = reqwest::get(format!("http://{}/nope", addr)).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn resources_are_wrapped_in_envelope() {
        let addr = serve().await;

        let resp = reqwest::get(format!(
            "http://{}/api/v1/organizations/org-1/dashboard/resources",
            addr
        ))
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["is_successful"], true);
        assert_eq!(body["data"]["stackCount"], 1);
        assert_eq!(body["data"]["cpuCores"], 8);
    }

    #[tokio::test]
    async fn errors_carry_code_and_status() {
        let addr = serve().await;

        let resp = reqwest::get(format!(
            "http://{}/api/v1/organizations/org-1/dashboard/charts?chartType=pod_calendar&year=2024&month=13",
            addr
        ))
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["code"], "D_INVALID_REQUEST");

        let resp = reqwest::get(format!(
            "http://{}/api/v1/organizations/org-1/dashboard/charts?chartType=disk",
            addr
        ))
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["code"], "D_NO_DATA");

        let resp = reqwest::get(format!(
            "http://{}/api/v1/organizations/org-9/dashboard/stacks",
            addr
        ))
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
