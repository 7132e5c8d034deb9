//! adaptergen - billing adapter generation from OpenAPI specs
//!
//! This crate provides:
//! - A spec loader that clips JSON/YAML specs into prompt-sized JSON
//! - An LLM-backed generator producing a field mapping and an adapter stub
//! - A reference adapter showing the shape generated code should take

pub mod adapter;
pub mod auth;
pub mod canonical;
pub mod config;
pub mod generator;
pub mod provider;
pub mod reporter;
pub mod spec_loader;
pub mod telemetry;
pub mod templates;

pub use adapter::{BillingAdapter, Customer, DummyAdapter, Invoice};
pub use config::{Config, TargetLanguage};
pub use generator::{AdapterGenerator, GenerateError, GenerationResult, OutputPaths};
pub use provider::{CompletionBackend, ProviderClient, ProviderConfig};
pub use spec_loader::LoadError;
pub use telemetry::Telemetry;
