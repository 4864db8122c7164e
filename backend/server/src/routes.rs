use std::{any::Any, sync::Arc};

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Response},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::error;

use crate::{
    error::AppError, rate_limit::rate_limit, security::security_headers, state::AppState,
};

/// Static site behind the hardening layers.
pub fn router(state: Arc<AppState>) -> Router {
    harden(site(&state), state)
}

/// `/` is the root document. Unknown paths get the root document with a 404 status.
fn site(state: &AppState) -> Router {
    let index = state.config.index_file();
    let assets =
        ServeDir::new(&state.config.public_dir).not_found_service(ServeFile::new(&index));

    Router::new()
        .route_service("/", ServeFile::new(&index))
        .fallback_service(assets)
}

// Outermost last: tracing, security headers, rate limit, compression, panic guard.
fn harden(site: Router, state: Arc<AppState>) -> Router {
    site.layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(from_fn_with_state(state, rate_limit))
        .layer(from_fn(security_headers))
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    error!(detail, "Request handler panicked");

    AppError::InternalError(detail.into()).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    async fn boom() -> &'static str {
        panic!("secret detail")
    }

    #[tokio::test]
    async fn panicking_handler_becomes_generic_500() {
        let state = AppState::new(Config::from_source(|_| None).unwrap());
        let app = harden(Router::new().route("/boom", get(boom)), state);

        let response = app
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Internal Server Error");
    }
}
