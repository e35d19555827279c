use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;

use crate::names;

/// Whether the request was issued by htmx (`HX-Request: true`).
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

pub struct IsHtmx(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for IsHtmx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(IsHtmx(is_htmx(&parts.headers)))
    }
}

/// UI language: the `lang` cookie, then `Accept-Language`, then Turkish.
pub struct Locale(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Locale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Locale(resolve_locale(&parts.headers).to_string()))
    }
}

pub fn resolve_locale(headers: &HeaderMap) -> &'static str {
    let from_cookie = CookieJar::from_headers(headers)
        .get(names::LOCALE_COOKIE_NAME)
        .and_then(|cookie| match_supported_locale(cookie.value()));

    from_cookie
        .or_else(|| {
            headers
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok())
                .and_then(locale_from_accept_language)
        })
        .unwrap_or(names::DEFAULT_LOCALE)
}

/// Map a language tag such as `tr-TR` onto a supported locale by its primary subtag.
pub fn match_supported_locale(tag: &str) -> Option<&'static str> {
    let primary = tag.trim().split('-').next()?;
    names::SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|supported| primary.eq_ignore_ascii_case(supported))
}

// Highest quality wins; among equal qualities the earlier entry wins.
fn locale_from_accept_language(value: &str) -> Option<&'static str> {
    let mut best: Option<(&'static str, f32)> = None;

    for entry in value.split(',') {
        let mut parts = entry.split(';');
        let Some(locale) = parts.next().and_then(match_supported_locale) else {
            continue;
        };
        let quality = parts
            .find_map(|param| param.trim().strip_prefix("q="))
            .and_then(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        match best {
            Some((_, top)) if quality <= top => {}
            _ => best = Some((locale, quality)),
        }
    }

    best.map(|(locale, _)| locale)
}
