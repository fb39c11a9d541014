//! Connection settings for the hosted data API.

/// Base URL and API key of a Supabase project.
///
/// Built once at startup and handed by reference to `SupabaseRepository`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`. `/rest/v1` is appended.
    pub url: String,
    pub api_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}
