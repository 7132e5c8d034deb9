//! Adapter generator
//!
//! One shot per run: load spec → render prompt → JSON-mode model call →
//! validate `{mapping, code}` → write the adapter and its mapping side by side.
//! Nothing touches the filesystem until the response has been validated.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::canonical::{canonical_model, is_field_path};
use crate::config::{Config, TargetLanguage};
use crate::provider::{CompletionBackend, ProviderError};
use crate::reporter::Reporter;
use crate::spec_loader::{self, LoadError};
use crate::templates::{AdapterPromptTemplate, Templates};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Failed to render prompt: {0}")]
    Prompt(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Empty response from LLM")]
    EmptyResponse,
    #[error("Malformed response from LLM: {0}")]
    MalformedResponse(String),
    #[error("Failed to write {path}: {source}")]
    Filesystem {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The model's answer: a field mapping plus opaque adapter source
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationResult {
    /// Canonical field path → provider field path
    pub mapping: Map<String, Value>,
    /// Adapter source, stored and emitted verbatim
    pub code: String,
}

/// Where one provider's artifacts live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub adapter: PathBuf,
    pub mapping: PathBuf,
}

impl OutputPaths {
    /// `{dir}/{provider_lower}_adapter.{ext}` and its `.map.json` sibling
    pub fn for_provider(dir: &Path, provider: &str, language: TargetLanguage) -> Self {
        let adapter = dir.join(format!(
            "{}_adapter.{}",
            provider.to_lowercase(),
            language.extension()
        ));
        let mapping = adapter.with_extension("map.json");
        Self { adapter, mapping }
    }
}

/// Parse the raw model content into a [`GenerationResult`]
pub fn parse_response(content: Option<&str>) -> Result<GenerationResult, GenerateError> {
    let content = match content {
        Some(c) if !c.trim().is_empty() => c,
        _ => return Err(GenerateError::EmptyResponse),
    };

    serde_json::from_str(content).map_err(|e| GenerateError::MalformedResponse(e.to_string()))
}

/// Best-effort textual checks on a result. Never fatal.
///
/// The code is not compiled or executed, only searched for the names the
/// prompt asked for.
pub fn inspect(result: &GenerationResult, provider: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let class_name = format!("{}Adapter", provider);
    if !result.code.contains(&class_name) {
        warnings.push(format!("code does not mention {}", class_name));
    }
    for method in ["create_customer", "get_invoice"] {
        if !result.code.contains(method) {
            warnings.push(format!("code does not define {}", method));
        }
    }

    for (key, value) in &result.mapping {
        if !is_field_path(key) {
            warnings.push(format!("mapping key {} is not a canonical field", key));
        }
        if !value.is_string() {
            warnings.push(format!("mapping value for {} is not a string", key));
        }
    }

    warnings
}

/// Write the adapter source and the pretty-printed mapping.
///
/// The pair is not written atomically; a failure on the second write leaves
/// the first in place.
pub fn write_artifacts(result: &GenerationResult, paths: &OutputPaths) -> Result<(), GenerateError> {
    if let Some(dir) = paths.adapter.parent() {
        std::fs::create_dir_all(dir).map_err(|e| fs_error(dir, e))?;
    }

    std::fs::write(&paths.adapter, &result.code).map_err(|e| fs_error(&paths.adapter, e))?;

    let mapping = serde_json::to_string_pretty(&result.mapping)
        .map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;
    std::fs::write(&paths.mapping, mapping).map_err(|e| fs_error(&paths.mapping, e))?;

    Ok(())
}

fn fs_error(path: &Path, source: std::io::Error) -> GenerateError {
    GenerateError::Filesystem {
        path: path.display().to_string(),
        source,
    }
}

/// Generates adapters through a [`CompletionBackend`]
pub struct AdapterGenerator<B> {
    backend: B,
    templates: Templates,
    output_dir: PathBuf,
    language: TargetLanguage,
    reporter: Reporter,
}

impl<B: CompletionBackend> AdapterGenerator<B> {
    pub fn new(backend: B, output_dir: impl Into<PathBuf>) -> Result<Self, GenerateError> {
        let templates = Templates::new().map_err(|e| GenerateError::Prompt(e.to_string()))?;

        Ok(Self {
            backend,
            templates,
            output_dir: output_dir.into(),
            language: TargetLanguage::default(),
            reporter: Reporter::quiet(),
        })
    }

    pub fn from_config(backend: B, config: &Config) -> Result<Self, GenerateError> {
        Ok(Self::new(backend, &config.output_dir)?.with_language(config.language))
    }

    pub fn with_language(mut self, language: TargetLanguage) -> Self {
        self.language = language;
        self
    }

    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Build the user prompt for `provider` around an already-clipped spec
    pub fn build_prompt(&self, provider: &str, spec: &str) -> Result<String, GenerateError> {
        AdapterPromptTemplate::new(provider, self.language, canonical_model(), spec)
            .render(&self.templates)
            .map_err(|e| GenerateError::Prompt(e.to_string()))
    }

    /// Generate an adapter for `provider` from the spec at `spec_path`
    pub async fn generate(
        &self,
        spec_path: &Path,
        provider: &str,
    ) -> Result<OutputPaths, GenerateError> {
        tracing::info!(
            provider = provider,
            spec_path = %spec_path.display(),
            language = self.language.as_str(),
            "Generating adapter"
        );

        let spec = spec_loader::load(spec_path)?;
        let prompt = self.build_prompt(provider, &spec)?;
        let system = self
            .templates
            .system_prompt()
            .map_err(|e| GenerateError::Prompt(e.to_string()))?;

        self.reporter.calling_model();
        let content = self.backend.complete_json(&system, &prompt).await?;

        let result = parse_response(content.as_deref())?;

        let warnings = inspect(&result, provider);
        for warning in &warnings {
            tracing::warn!(provider = provider, "{}", warning);
        }
        self.reporter.warnings(&warnings);

        let paths = OutputPaths::for_provider(&self.output_dir, provider, self.language);
        write_artifacts(&result, &paths)?;

        tracing::info!(
            adapter = %paths.adapter.display(),
            mapping = %paths.mapping.display(),
            mapped_fields = result.mapping.len(),
            "Wrote adapter artifacts"
        );
        self.reporter.generated(&paths);

        Ok(paths)
    }
}
