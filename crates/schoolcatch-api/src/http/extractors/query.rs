//! Query parameter extractors.

use serde::Deserialize;

use schoolcatch_types::faq::Locale;

/// `?locale=ko|en`, defaulting to Korean.
#[derive(Debug, Deserialize, Default)]
pub struct LocaleQuery {
    #[serde(default)]
    pub locale: Locale,
}

/// Query parameters for the recommended-notices endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct NoticeQuery {
    /// The signed-in user's department; blank or absent means not signed in.
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub locale: Locale,
}
