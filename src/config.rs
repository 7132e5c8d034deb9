//! Configuration for adapter generation

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Directory generated adapters are written into
    pub output_dir: PathBuf,

    /// Language the generated adapter is written in
    pub language: TargetLanguage,

    /// Logging settings
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key (falls back to `api_key_env` and auth.json)
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Base URL for the API (for OpenAI-compatible endpoints)
    pub base_url: Option<String>,

    /// Model name/ID
    pub model: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Directory for JSON log files; no file logging when unset
    pub log_dir: Option<PathBuf>,

    /// Enable verbose logging
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    #[default]
    Python,
    Rust,
}

impl TargetLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::Python => "python",
            TargetLanguage::Rust => "rust",
        }
    }

    /// File extension of generated adapter source
    pub fn extension(&self) -> &'static str {
        match self {
            TargetLanguage::Python => "py",
            TargetLanguage::Rust => "rs",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::Python => "Python 3.11",
            TargetLanguage::Rust => "Rust (2021 edition)",
        }
    }

    /// What the adapter is declared as ("class", "struct")
    pub fn type_kind(&self) -> &'static str {
        match self {
            TargetLanguage::Python => "a class",
            TargetLanguage::Rust => "a struct",
        }
    }

    pub fn create_customer_signature(&self) -> &'static str {
        match self {
            TargetLanguage::Python => "create_customer(data: Customer) -> str",
            TargetLanguage::Rust => {
                "fn create_customer(&self, data: &Customer) -> Result<String, Box<dyn std::error::Error>>"
            }
        }
    }

    pub fn get_invoice_signature(&self) -> &'static str {
        match self {
            TargetLanguage::Python => "get_invoice(inv_id: str) -> Invoice",
            TargetLanguage::Rust => {
                "fn get_invoice(&self, inv_id: &str) -> Result<Invoice, Box<dyn std::error::Error>>"
            }
        }
    }
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(TargetLanguage::Python),
            "rust" | "rs" => Ok(TargetLanguage::Rust),
            other => Err(format!("Unknown language '{}' (expected python or rust)", other)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            output_dir: PathBuf::from("adapters"),
            language: TargetLanguage::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: None,
            model: "gpt-4o-mini".to_string(),
        }
    }
}

impl Config {
    /// Load config from a YAML file. Missing keys keep their defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Set verbose logging
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.telemetry.verbose = verbose;
        self
    }

    /// Set log directory
    pub fn with_log_dir(mut self, log_dir: PathBuf) -> Self {
        self.telemetry.log_dir = Some(log_dir);
        self
    }

    /// Set API key
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.llm.api_key = Some(api_key);
        self
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }
}
