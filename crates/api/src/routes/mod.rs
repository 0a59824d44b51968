pub mod animal;
pub mod auth;
pub mod dashboard;
pub mod doctor;
pub mod health;
pub mod home;
pub mod visit;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/refresh                  refresh (public)
/// /auth/logout                   logout (requires auth)
///
/// /dashboard                     own animals + counts
///
/// /animals                       list, create
/// /animals/{id}                  get, update, delete
/// /animals/{id}/pdf              visit-history PDF
///
/// /doctors                       list, create
/// /doctors/{id}                  get
///
/// /visits                        list (?animal_id&limit&offset), create
/// /visits/{id}                   get
/// ```
///
/// Everything except register, login and refresh requires a Bearer access
/// token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes.
        .nest("/auth", auth::router())
        // Owner dashboard.
        .nest("/dashboard", dashboard::router())
        // Owner-scoped animals, including the PDF export.
        .nest("/animals", animal::router())
        // Shared doctor directory.
        .nest("/doctors", doctor::router())
        // Owner-scoped visits.
        .nest("/visits", visit::router())
}
