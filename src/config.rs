use crate::selector::SelectionPolicy;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where and how vendor listings and menus are fetched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    pub listing_url: String,
    /// Vendor detail endpoint; the vendor code is appended as a path segment.
    pub vendor_url: String,
    pub country: String,
    pub language_id: u32,
    pub client_id: String,
    pub listing_limit: u32,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://disco.deliveryhero.io/listing/api/v1/pandora/vendors".into(),
            vendor_url: "https://tw.fd-api.com/api/v5/vendors".into(),
            country: "tw".into(),
            language_id: 6,
            client_id: "web".into(),
            listing_limit: 999_999,
            timeout_seconds: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) WhatToEat/0.1".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub policy: SelectionPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Menus fetched for the ranking oracle per suggestion request.
    pub max_menus: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self { max_menus: 10 }
    }
}

/// Generative model used as the ranking oracle.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub api_endpoint: String,
    pub project_id: String,
    pub location: String,
    pub model_id: String,
    pub access_token: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_p: f64,
    pub timeout_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "us-central1-aiplatform.googleapis.com".into(),
            project_id: String::new(),
            location: "us-central1".into(),
            model_id: "gemini-1.5-flash-002".into(),
            access_token: String::new(),
            temperature: 0.1,
            max_output_tokens: 8192,
            top_p: 0.95,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub listen_addr: String,
    pub allowed_origins: Vec<String>,
    pub marketplace: MarketplaceConfig,
    pub selection: SelectionConfig,
    pub suggestion: SuggestionConfig,
    pub ai: Option<AiConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".into(),
            allowed_origins: vec!["http://localhost:5173".into()],
            marketplace: MarketplaceConfig::default(),
            selection: SelectionConfig::default(),
            suggestion: SuggestionConfig::default(),
            ai: None,
        }
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.marketplace.country, "tw");
        assert_eq!(config.marketplace.listing_limit, 999_999);
        assert_eq!(config.selection.policy, SelectionPolicy::Uniform);
        assert_eq!(config.suggestion.max_menus, 10);
        assert!(config.ai.is_none());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "marketplace": {"country": "sg"},
                "selection": {"policy": "weighted"},
                "ai": {"project_id": "picker-1", "access_token": "token"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.marketplace.country, "sg");
        assert_eq!(config.marketplace.language_id, 6);
        assert_eq!(config.selection.policy, SelectionPolicy::Weighted);
        let ai = config.ai.unwrap();
        assert_eq!(ai.project_id, "picker-1");
        assert_eq!(ai.model_id, "gemini-1.5-flash-002");
    }

    #[test]
    fn example_config_keeps_ai_disabled() {
        let config = load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json")).unwrap();
        assert!(config.ai.is_none());
        assert_eq!(config.allowed_origins, vec!["http://localhost:5173".to_string()]);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_config("/nonexistent/what-to-eat.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
