use axum::{
    extract::{Form, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    extractors::{match_supported_locale, IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    services::registration::RegisterOutcome,
    utils, views,
    views::register::{RegisterForm, RegisterState},
    AppState,
};

use crate::views::register as register_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route(names::REGISTER_URL, get(register_page).post(register_post))
        .route(names::SET_LOCALE_URL, post(set_locale))
}

async fn homepage() -> Redirect {
    Redirect::to(names::REGISTER_URL)
}

async fn register_page(IsHtmx(is_htmx): IsHtmx, Locale(locale): Locale) -> maud::Markup {
    views::render(
        is_htmx,
        &t!("register.title", locale = &locale),
        register_views::register(&RegisterForm::default(), RegisterState::NoError, &locale),
        &locale,
    )
}

#[derive(Deserialize)]
struct RegisterPost {
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    birthdate: String,
    #[serde(default)]
    role: String,
}

async fn register_post(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(body): Form<RegisterPost>,
) -> Result<Response, AppError> {
    let outcome = state
        .registration
        .register(&body.full_name, &body.birthdate, &body.role)
        .await;

    let form_state = match outcome {
        Ok(RegisterOutcome::Registered(user)) => {
            tracing::info!("registered user={} as {}", user.id, user.role.as_str());
            state.quiz.forget(user.id);
            let location = HeaderValue::from_str(&names::test_url(user.id, &user.full_name))
                .reject("could not build redirect")?;
            return Ok(([("HX-Redirect", location)], "").into_response());
        }
        Ok(RegisterOutcome::MissingName) => RegisterState::MissingName,
        Ok(RegisterOutcome::MissingBirthdate) => RegisterState::MissingBirthdate,
        Ok(RegisterOutcome::MissingRole) => RegisterState::MissingRole,
        Err(e) => {
            tracing::error!("registration failed: {e:?}");
            RegisterState::StoreError(utils::error_chain(&e))
        }
    };

    let form = RegisterForm {
        full_name: body.full_name,
        birthdate: body.birthdate,
        role: body.role,
    };
    Ok(views::titled(
        &t!("register.title", locale = &locale),
        register_views::register(&form, form_state, &locale),
    )
    .into_response())
}

#[derive(Deserialize)]
struct SetLocaleBody {
    lang: String,
}

async fn set_locale(
    State(state): State<AppState>,
    Form(body): Form<SetLocaleBody>,
) -> Result<impl IntoResponse, AppError> {
    let locale = match_supported_locale(&body.lang).unwrap_or(names::DEFAULT_LOCALE);
    let cookie = utils::cookie(names::LOCALE_COOKIE_NAME, locale, state.secure_cookies)
        .reject("could not build locale cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert("HX-Refresh", HeaderValue::from_static("true"));

    Ok((headers, ""))
}
