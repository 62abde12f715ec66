pub mod routes;

use axum::{
    response::Redirect,
    routing::{delete, get, get_service, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::store::ActivityStore;
use routes::{activities, activity};

/// Assembles the full application router around a store handle. Shared by
/// `main` and the integration tests.
pub fn app(store: ActivityStore) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/static/index.html") }))
        .route("/activities", get(activities::list_activities_handler))
        .route(
            "/activities/:activity_name/signup",
            post(activity::signup_handler),
        )
        .route(
            "/activities/:activity_name/unregister",
            delete(activity::unregister_handler),
        )
        .nest_service("/static", get_service(ServeDir::new("static")))
        // Rosters change on every signup; never let clients cache them.
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(store)
}
