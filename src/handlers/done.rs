use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use maud::Markup;
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    extractors::{IsHtmx, Locale},
    names, views,
    views::done::Tab,
    AppState,
};

use crate::views::done as done_views;

pub fn routes() -> Router<AppState> {
    Router::new().route(names::DONE_URL, get(done_page))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DoneQuery {
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    tab: Tab,
}

// Missing results render as placeholders rather than failing the page.
async fn done_page(
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Query(query): Query<DoneQuery>,
) -> Markup {
    let classic = state
        .db
        .latest_classic_result(&query.full_name)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("could not load classic result: {e:?}");
            None
        });
    let traits = state
        .db
        .latest_trait_result(&query.full_name)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("could not load trait result: {e:?}");
            None
        });

    views::render(
        is_htmx,
        &t!("done.title", locale = &locale),
        done_views::results(
            &query.full_name,
            classic.as_ref(),
            traits.as_ref(),
            query.tab,
            &locale,
        ),
        &locale,
    )
}
