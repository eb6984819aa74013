use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers::{
    convert_currency, create_plan_line, delete_plan, get_rate, list_plan, list_rates, plan_summary,
    update_plan, update_rate,
};

pub fn create_router() -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route("/rates", get(list_rates))
        .route("/rates/{code}", get(get_rate).put(update_rate))
        .route("/convert", post(convert_currency))
        .route("/trips/{trip_id}/plan", get(list_plan).post(create_plan_line))
        .route("/trips/{trip_id}/plan/summary", get(plan_summary))
        .route("/plan/{id}", put(update_plan).delete(delete_plan));

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let router = Router::new()
        .nest("/api", api_routes)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .fallback_service(ServeDir::new("./dist").precompressed_gzip());
    Ok(router)
}
