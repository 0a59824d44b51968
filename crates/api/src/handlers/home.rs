//! Service landing document at `/`.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub links: HomeLinks,
}

#[derive(Debug, Serialize)]
pub struct HomeLinks {
    pub health: &'static str,
    pub register: &'static str,
    pub login: &'static str,
    pub dashboard: &'static str,
}

/// GET /
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        service: "vetrecords",
        version: env!("CARGO_PKG_VERSION"),
        links: HomeLinks {
            health: "/health",
            register: "/api/v1/auth/register",
            login: "/api/v1/auth/login",
            dashboard: "/api/v1/dashboard",
        },
    })
}
