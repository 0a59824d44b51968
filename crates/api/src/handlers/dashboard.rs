//! Handler for the owner dashboard.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use vetrecords_db::models::animal::Animal;
use vetrecords_db::repositories::{AnimalRepo, VisitRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// The caller's animals and record counts.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub animals: Vec<Animal>,
    pub animal_count: i64,
    pub visit_count: i64,
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Dashboard>>> {
    let animals = AnimalRepo::list_for_owner(&state.pool, auth.user_id).await?;
    let animal_count = AnimalRepo::count_for_owner(&state.pool, auth.user_id).await?;
    let visit_count = VisitRepo::count_for_owner(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: Dashboard {
            animals,
            animal_count,
            visit_count,
        },
    }))
}
