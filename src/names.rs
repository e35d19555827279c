pub const REGISTER_URL: &str = "/register";
pub const ADMIN_URL: &str = "/admin";
pub const TEST_URL: &str = "/test";
pub const ANSWER_URL: &str = "/test/answer";
pub const BACK_URL: &str = "/test/back";
pub const START_TRAIT_URL: &str = "/test/start-trait";
pub const DONE_URL: &str = "/done";
pub const SET_LOCALE_URL: &str = "/set-locale";

/// Query string carrying the user between pages, `fullName` percent-encoded.
pub fn identity_query(user_id: i64, full_name: &str) -> String {
    format!(
        "userId={user_id}&fullName={}",
        urlencoding::encode(full_name)
    )
}

pub fn test_url(user_id: i64, full_name: &str) -> String {
    format!("{TEST_URL}?{}", identity_query(user_id, full_name))
}

pub fn done_url(user_id: i64, full_name: &str) -> String {
    format!("{DONE_URL}?{}", identity_query(user_id, full_name))
}

/// Results page for a name, showing the given trait tab.
pub fn results_tab_url(full_name: &str, tab: &str) -> String {
    format!(
        "{DONE_URL}?fullName={}&tab={tab}",
        urlencoding::encode(full_name)
    )
}

// Trait test layout
pub const STRONG_TRAIT_COUNT: usize = 20;
pub const TRAIT_POOL_SIZE: usize = 40;

// i18n
pub const LOCALE_COOKIE_NAME: &str = "lang";
pub const DEFAULT_LOCALE: &str = "tr";
pub const SUPPORTED_LOCALES: &[&str] = &["tr", "en"];
