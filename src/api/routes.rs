use axum::http::HeaderValue;
use axum::routing::{get, patch, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::state::AppState;
use crate::auth;
use crate::config::Config;

pub fn create_router(state: AppState, config: &Config) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origin
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let board_routes = Router::new()
        .route(
            "/",
            get(handlers::boards::list_boards).post(handlers::boards::create_board),
        )
        .route(
            "/{id}",
            put(handlers::boards::update_board).delete(handlers::boards::delete_board),
        )
        .route("/{id}/lists", get(handlers::boards::get_board_lists));

    let list_routes = Router::new()
        .route("/", post(handlers::lists::create_list))
        .route(
            "/{id}",
            put(handlers::lists::update_list).delete(handlers::lists::delete_list),
        )
        .route("/{id}/cards", get(handlers::lists::get_list_cards));

    let card_routes = Router::new()
        .route("/", post(handlers::cards::create_card))
        .route("/reorder", patch(handlers::cards::reorder_cards))
        .route("/move", patch(handlers::cards::move_card))
        .route(
            "/{id}",
            put(handlers::cards::update_card).delete(handlers::cards::delete_card),
        );

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::liveness));

    let protected_routes = Router::new()
        .nest("/api/boards", board_routes)
        .nest("/api/lists", list_routes)
        .nest("/api/cards", card_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
