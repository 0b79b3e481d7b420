//! # Route table
//!
//! Three rings: public reads, authenticated mutations, and the
//! superadmin-only admin management surface. Guards are attached with
//! `route_layer` so an unmatched path is still a plain 404.

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::auth::middleware::{auth, require_superadmin};
use crate::handlers;
use crate::server::AppState;

pub fn create_routes(state: AppState) -> Router {
    // Superadmin ring: admin account management and the audit log.
    let superadmin = Router::new()
        .route(
            "/admin",
            post(handlers::admins::create).get(handlers::admins::list),
        )
        .route("/admin/logs", get(handlers::admins::logs))
        .route(
            "/admin/{id}",
            get(handlers::admins::get)
                .patch(handlers::admins::update)
                .delete(handlers::admins::remove),
        )
        .route_layer(from_fn(require_superadmin));

    // Authenticated ring: every catalog mutation plus self password change.
    let authed = Router::new()
        .route(
            "/admin/change-password",
            patch(handlers::admins::change_password),
        )
        .route("/categories", post(handlers::categories::create))
        .route(
            "/categories/{id}",
            patch(handlers::categories::update).delete(handlers::categories::remove),
        )
        .route("/subcategories", post(handlers::subcategories::create))
        .route(
            "/subcategories/{id}",
            patch(handlers::subcategories::update).delete(handlers::subcategories::remove),
        )
        .route("/products", post(handlers::products::create))
        .route(
            "/products/{id}",
            patch(handlers::products::update).delete(handlers::products::remove),
        )
        .route("/products/{id}/files", post(handlers::products::add_file))
        .route(
            "/products/{id}/files/order",
            patch(handlers::products::reorder_files),
        )
        .route(
            "/products/{id}/files/{file_id}",
            delete(handlers::products::remove_file),
        )
        .route("/countries", post(handlers::countries::create))
        .route(
            "/countries/{id}",
            patch(handlers::countries::update).delete(handlers::countries::remove),
        )
        .route("/units", post(handlers::units::create))
        .route(
            "/units/{id}",
            patch(handlers::units::update).delete(handlers::units::remove),
        )
        .route("/carousel", post(handlers::carousel::create))
        .route("/carousel/{id}", delete(handlers::carousel::remove))
        .merge(superadmin)
        .route_layer(from_fn_with_state(state.clone(), auth));

    // Public ring: login and the storefront reads.
    let public = Router::new()
        .route("/admin/login", post(handlers::auth::login))
        .route("/categories", get(handlers::categories::list))
        .route("/categories/{id}", get(handlers::categories::get))
        .route("/subcategories", get(handlers::subcategories::list))
        .route("/subcategories/{id}", get(handlers::subcategories::get))
        .route("/products", get(handlers::products::list))
        .route("/products/{id}", get(handlers::products::get))
        .route("/countries", get(handlers::countries::list))
        .route("/countries/{id}", get(handlers::countries::get))
        .route("/units", get(handlers::units::list))
        .route("/units/{id}", get(handlers::units::get))
        .route("/carousel", get(handlers::carousel::list))
        .route("/carousel/{id}", get(handlers::carousel::get))
        .route("/currency", get(handlers::currency::usd_rates))
        .route("/dashboard/summary", get(handlers::dashboard::summary));

    public.merge(authed).with_state(state)
}
