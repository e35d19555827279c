use axum::{
    extract::{Form, State},
    routing::get,
    Router,
};
use maud::Markup;
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    extractors::{IsHtmx, Locale},
    models::Pool,
    names,
    services::intake::{IntakeOutcome, PoolSizes},
    utils, views,
    views::admin::{AdminMessage, IntakeForm},
    AppState,
};

use crate::views::admin as admin_views;

pub fn routes() -> Router<AppState> {
    Router::new().route(names::ADMIN_URL, get(admin_page).post(admin_post))
}

// Counts are informational; a failure only hides them.
async fn pool_sizes(state: &AppState) -> Option<PoolSizes> {
    match state.intake.pool_sizes().await {
        Ok(sizes) => Some(sizes),
        Err(e) => {
            tracing::warn!("could not count questions: {e:?}");
            None
        }
    }
}

async fn admin_page(
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
    Locale(locale): Locale,
) -> Markup {
    let sizes = pool_sizes(&state).await;
    views::render(
        is_htmx,
        &t!("admin.title", locale = &locale),
        admin_views::intake(&IntakeForm::default(), AdminMessage::None, sizes, &locale),
        &locale,
    )
}

#[derive(Deserialize)]
struct AdminPost {
    #[serde(default)]
    question: String,
    #[serde(default)]
    raw_options: String,
    #[serde(default)]
    pool: Pool,
}

async fn admin_post(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(body): Form<AdminPost>,
) -> Markup {
    let outcome = state
        .intake
        .submit(body.pool, &body.question, &body.raw_options)
        .await;

    let message = match outcome {
        Ok(IntakeOutcome::Saved(id)) => {
            tracing::info!("saved question id={id} into {:?}", body.pool);
            AdminMessage::Saved
        }
        Ok(IntakeOutcome::MissingQuestion) => AdminMessage::MissingQuestion,
        Ok(IntakeOutcome::MissingOption(letter)) => AdminMessage::MissingOption(letter),
        Err(e) => {
            tracing::error!("could not save question: {e:?}");
            AdminMessage::StoreError(utils::error_chain(&e))
        }
    };

    // keep the chosen pool, drop the saved text
    let form = if matches!(message, AdminMessage::Saved) {
        IntakeForm {
            pool: body.pool,
            ..IntakeForm::default()
        }
    } else {
        IntakeForm {
            question: body.question,
            raw_options: body.raw_options,
            pool: body.pool,
        }
    };

    let sizes = pool_sizes(&state).await;
    views::titled(
        &t!("admin.title", locale = &locale),
        admin_views::intake(&form, message, sizes, &locale),
    )
}
