//! Function and client configuration.
//!
//! Values come from Spin variables inside a component, from environment
//! variables on a native host, or from a TOML file:
//!
//! ```toml
//! [functions]
//! stripe_secret_key = "sk_test_..."
//! supabase_url = "https://project.supabase.co"
//! supabase_anon_key = "eyJ..."
//! match_threshold = 0.5
//! match_count = 10
//!
//! [client]
//! functions_url = "https://project.supabase.co/functions/v1"
//! anon_key = "eyJ..."
//! stripe_publishable_key = "pk_test_..."
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FunctionError;

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.5;
pub const DEFAULT_MATCH_COUNT: u32 = 10;

fn default_stripe_api_base() -> String {
    DEFAULT_STRIPE_API_BASE.to_string()
}

fn default_match_threshold() -> f32 {
    DEFAULT_MATCH_THRESHOLD
}

fn default_match_count() -> u32 {
    DEFAULT_MATCH_COUNT
}

/// Server-side configuration for both functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionConfig {
    /// Stripe secret key (payment intent function).
    #[serde(default)]
    pub stripe_secret_key: Option<String>,
    #[serde(default = "default_stripe_api_base")]
    pub stripe_api_base: String,
    /// Supabase project URL (search function).
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_anon_key: Option<String>,
    /// Minimum similarity for a product to be returned.
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f32,
    /// Maximum number of products returned.
    #[serde(default = "default_match_count")]
    pub match_count: u32,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: None,
            stripe_api_base: default_stripe_api_base(),
            supabase_url: None,
            supabase_anon_key: None,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            match_count: DEFAULT_MATCH_COUNT,
        }
    }
}

impl FunctionConfig {
    /// Build from a key lookup. Keys are the upper-case environment names
    /// (`STRIPE_SECRET_KEY`, `STRIPE_API_BASE`, `SUPABASE_URL`,
    /// `SUPABASE_ANON_KEY`, `SEARCH_MATCH_THRESHOLD`, `SEARCH_MATCH_COUNT`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FunctionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self {
            stripe_secret_key: get("STRIPE_SECRET_KEY"),
            supabase_url: get("SUPABASE_URL"),
            supabase_anon_key: get("SUPABASE_ANON_KEY"),
            ..Self::default()
        };
        if let Some(base) = get("STRIPE_API_BASE") {
            config.stripe_api_base = base;
        }
        if let Some(raw) = get("SEARCH_MATCH_THRESHOLD") {
            config.match_threshold = raw.trim().parse().map_err(|_| {
                FunctionError::Config(format!("SEARCH_MATCH_THRESHOLD is not a number: {raw}"))
            })?;
        }
        if let Some(raw) = get("SEARCH_MATCH_COUNT") {
            config.match_count = raw.trim().parse().map_err(|_| {
                FunctionError::Config(format!("SEARCH_MATCH_COUNT is not a count: {raw}"))
            })?;
        }
        Ok(config)
    }

    /// Read from the process environment.
    pub fn from_env() -> Result<Self, FunctionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read from the component's Spin variables (lower-case names).
    #[cfg(target_arch = "wasm32")]
    pub fn from_spin_variables() -> Result<Self, FunctionError> {
        Self::from_lookup(|key| spin_sdk::variables::get(&key.to_ascii_lowercase()).ok())
    }

    pub fn stripe_secret_key(&self) -> Result<&str, FunctionError> {
        required(&self.stripe_secret_key, "stripe_secret_key")
    }

    pub fn supabase_url(&self) -> Result<&str, FunctionError> {
        required(&self.supabase_url, "supabase_url")
    }

    pub fn supabase_anon_key(&self) -> Result<&str, FunctionError> {
        required(&self.supabase_anon_key, "supabase_anon_key")
    }

    /// All problems with this configuration, empty when valid.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (name, value) in [
            ("stripe_secret_key", &self.stripe_secret_key),
            ("supabase_url", &self.supabase_url),
            ("supabase_anon_key", &self.supabase_anon_key),
        ] {
            if value.is_none() {
                problems.push(format!("{name} is not set"));
            }
        }
        if let Some(url) = &self.supabase_url {
            if !is_http_url(url) {
                problems.push(format!("supabase_url is not an http(s) URL: {url}"));
            }
        }
        if !is_http_url(&self.stripe_api_base) {
            problems.push(format!(
                "stripe_api_base is not an http(s) URL: {}",
                self.stripe_api_base
            ));
        }
        if !(0.0..=1.0).contains(&self.match_threshold) {
            problems.push(format!(
                "match_threshold must be between 0 and 1, got {}",
                self.match_threshold
            ));
        }
        if self.match_count == 0 {
            problems.push("match_count must be at least 1".to_string());
        }
        problems
    }

    pub fn validate(&self) -> Result<(), FunctionError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(FunctionError::Config(problems.join("; ")))
        }
    }
}

/// Storefront-side configuration for calling the functions and confirming
/// payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL the functions are served under, e.g.
    /// `https://project.supabase.co/functions/v1`.
    pub functions_url: String,
    /// Public key sent as the bearer token.
    pub anon_key: String,
    /// Stripe publishable key used to confirm payments.
    pub stripe_publishable_key: String,
    #[serde(default = "default_stripe_api_base")]
    pub stripe_api_base: String,
}

impl ClientConfig {
    pub fn new(
        functions_url: impl Into<String>,
        anon_key: impl Into<String>,
        stripe_publishable_key: impl Into<String>,
    ) -> Self {
        Self {
            functions_url: functions_url.into(),
            anon_key: anon_key.into(),
            stripe_publishable_key: stripe_publishable_key.into(),
            stripe_api_base: default_stripe_api_base(),
        }
    }

    pub fn with_stripe_api_base(mut self, base: impl Into<String>) -> Self {
        self.stripe_api_base = base.into();
        self
    }

    /// Build from a key lookup. `SHOPFRONT_FUNCTIONS_URL` wins over
    /// `SUPABASE_URL` + `/functions/v1`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FunctionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let missing = |key: &str| FunctionError::Config(format!("{key} is not set"));

        let functions_url = match get("SHOPFRONT_FUNCTIONS_URL") {
            Some(url) => url,
            None => {
                let base = get("SUPABASE_URL").ok_or_else(|| missing("SUPABASE_URL"))?;
                format!("{}/functions/v1", base.trim_end_matches('/'))
            }
        };
        let anon_key = get("SUPABASE_ANON_KEY").ok_or_else(|| missing("SUPABASE_ANON_KEY"))?;
        let publishable =
            get("STRIPE_PUBLISHABLE_KEY").ok_or_else(|| missing("STRIPE_PUBLISHABLE_KEY"))?;

        let mut config = Self::new(functions_url, anon_key, publishable);
        if let Some(base) = get("STRIPE_API_BASE") {
            config.stripe_api_base = base;
        }
        Ok(config)
    }

    pub fn from_env() -> Result<Self, FunctionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !is_http_url(&self.functions_url) {
            problems.push(format!(
                "functions_url is not an http(s) URL: {}",
                self.functions_url
            ));
        }
        if self.anon_key.trim().is_empty() {
            problems.push("anon_key is empty".to_string());
        }
        if !self.stripe_publishable_key.starts_with("pk_") {
            problems.push("stripe_publishable_key should start with pk_".to_string());
        }
        problems
    }
}

/// The on-disk configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopfrontConfig {
    #[serde(default)]
    pub functions: FunctionConfig,
    #[serde(default)]
    pub client: Option<ClientConfig>,
}

impl ShopfrontConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, FunctionError> {
        toml::from_str(s).map_err(|e| FunctionError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FunctionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FunctionError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Problems across both sections, prefixed with the section name.
    pub fn problems(&self) -> Vec<String> {
        let functions = self
            .functions
            .problems()
            .into_iter()
            .map(|p| format!("functions: {p}"));
        let client = self
            .client
            .iter()
            .flat_map(ClientConfig::problems)
            .map(|p| format!("client: {p}"));
        functions.chain(client).collect()
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, FunctionError> {
    value
        .as_deref()
        .ok_or_else(|| FunctionError::Config(format!("{name} is not set")))
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}
