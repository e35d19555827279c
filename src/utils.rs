use axum::http::{header::InvalidHeaderValue, HeaderValue};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const ONE_YEAR_SECS: u32 = 60 * 60 * 24 * 365;

pub fn cookie(name: &str, value: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = if secure { "; Secure" } else { "" };
    HeaderValue::from_str(&format!(
        "{name}={value}; Max-Age={ONE_YEAR_SECS}; Path=/; SameSite=Lax{secure}"
    ))
}

/// Render an error together with its causes, outermost first.
pub fn error_chain(err: &color_eyre::Report) -> String {
    err.chain()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
