rust_i18n::i18n!("locales", fallback = "tr");

pub mod db;
pub mod extractors;
pub mod flow;
pub mod handlers;
pub mod intake;
pub mod models;
pub mod names;
pub mod rejections;
pub mod scoring;
pub mod services;
pub mod statics;
pub mod summary;
pub mod utils;
pub mod views;

use axum::{middleware, Router};

use services::{intake::IntakeService, quiz::QuizService, registration::RegistrationService};

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub registration: RegistrationService,
    pub intake: IntakeService,
    pub quiz: QuizService,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(db: db::Db, secure_cookies: bool) -> Self {
        Self {
            registration: RegistrationService::new(db.clone()),
            intake: IntakeService::new(db.clone()),
            quiz: QuizService::new(db.clone()),
            db,
            secure_cookies,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::homepage::routes())
        .merge(handlers::admin::routes())
        .merge(handlers::test::routes())
        .merge(handlers::done::routes())
        .layer(middleware::from_fn(csrf_check))
        .nest("/static", statics::routes())
        .fallback(rejections::not_found)
        .with_state(state)
}

// State-changing requests must come from htmx; plain cross-site form posts are refused.
async fn csrf_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{Method, StatusCode};
    use axum::response::IntoResponse;

    let state_changing =
        [Method::POST, Method::PUT, Method::PATCH, Method::DELETE].contains(req.method());

    if state_changing && !extractors::is_htmx(req.headers()) {
        tracing::warn!("rejected {} {} without HX-Request", req.method(), req.uri());
        return (StatusCode::FORBIDDEN, "CSRF check failed").into_response();
    }

    next.run(req).await
}
