//! HTTP surface: routes under `/api`, the bearer gate, static frontend and CORS.

pub mod error;
mod middleware;
mod products;
mod users;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::auth::AuthService;
use crate::clients::ProductClient;
use crate::settings::Frontend;

#[derive(Clone)]
pub struct AppState {
    pub products: ProductClient,
    pub auth: Arc<AuthService>,
}

pub fn router(state: AppState, frontend: &Frontend) -> Router {
    let protected = Router::new()
        .route("/product", get(products::list_all).post(products::create))
        .route(
            "/product/:id",
            get(products::get_by_id)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/product/type/:type", get(products::list_by_type))
        .route("/product/name/:name", get(products::list_by_name))
        .route("/users", get(users::list))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_bearer));

    let api = Router::new()
        .route("/users/authenticate", post(users::authenticate))
        .merge(protected);

    let entry = format!("/frontend/{}", frontend.entry);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .route(
            "/",
            get(move || {
                let entry = entry.clone();
                async move { Redirect::temporary(&entry) }
            }),
        )
        .nest_service("/frontend", ServeDir::new(&frontend.dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
