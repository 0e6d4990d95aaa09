use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::similarity::SimilarityBackend;
use crate::models::MatchingConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub similarity: SimilaritySettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    #[serde(default = "default_json_limit")]
    pub json_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            json_limit_bytes: default_json_limit(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_json_limit() -> usize { 4 * 1024 * 1024 }

#[derive(Debug, Clone, Deserialize)]
pub struct SimilaritySettings {
    #[serde(default)]
    pub backend: SimilarityBackend,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for SimilaritySettings {
    fn default() -> Self {
        Self {
            backend: SimilarityBackend::default(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

fn default_parallel_threshold() -> usize { crate::core::matcher::DEFAULT_PARALLEL_THRESHOLD }

/// Defaults for options a ranking request leaves out
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_matching_model")]
    pub matching_model: String,
    #[serde(default = "default_skills_weight")]
    pub weight_skills: f64,
    #[serde(default = "default_experience_weight")]
    pub weight_experience: f64,
    #[serde(default = "default_education_weight")]
    pub weight_education: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub min_match_score: f64,
    #[serde(default = "default_true")]
    pub use_semantic_matching: bool,
    #[serde(default = "default_true")]
    pub use_skill_based_filtering: bool,
    #[serde(default = "default_top_n")]
    pub top_n: Option<i64>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            matching_model: default_matching_model(),
            weight_skills: default_skills_weight(),
            weight_experience: default_experience_weight(),
            weight_education: default_education_weight(),
            threshold: default_threshold(),
            min_match_score: 0.0,
            use_semantic_matching: true,
            use_skill_based_filtering: true,
            top_n: default_top_n(),
        }
    }
}

impl MatchingSettings {
    /// Matching options used when a request sends none
    pub fn to_config(&self) -> MatchingConfig {
        MatchingConfig {
            matching_model: self.matching_model.clone(),
            weight_skills: self.weight_skills,
            weight_experience: self.weight_experience,
            weight_education: self.weight_education,
            threshold: self.threshold,
            min_match_score: self.min_match_score,
            use_semantic_matching: self.use_semantic_matching,
            use_skill_based_filtering: self.use_skill_based_filtering,
            top_n: self.top_n,
            ..MatchingConfig::default()
        }
    }
}

fn default_matching_model() -> String { "hybrid".to_string() }
fn default_skills_weight() -> f64 { 0.5 }
fn default_experience_weight() -> f64 { 0.3 }
fn default_education_weight() -> f64 { 0.2 }
fn default_threshold() -> f64 { 0.6 }
fn default_true() -> bool { true }
fn default_top_n() -> Option<i64> { Some(10) }

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    #[serde(default = "default_embedding_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            base_url: default_embedding_url(),
            api_key: None,
            model: default_embedding_model(),
            chat_model: default_chat_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_embedding_url() -> String { "https://api.openai.com/v1".to_string() }
fn default_embedding_model() -> String { "text-embedding-ada-002".to_string() }
fn default_chat_model() -> String { "gpt-3.5-turbo".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_capacity() -> u64 { 10_000 }
fn default_cache_ttl() -> u64 { 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TALENT__)
    /// 5. OPENAI_API_KEY for the embedding API key
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TALENT__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        with_api_key(settings, std::env::var("OPENAI_API_KEY").ok())?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("TALENT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Override `embedding.api_key` with a key from outside the TALENT__ scheme
fn with_api_key(settings: Config, api_key: Option<String>) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("embedding.api_key", api_key)?;
    }

    builder.build()
}
