//! Handlebars templates for the generation prompts

use crate::config::TargetLanguage;
use anyhow::Result;
use handlebars::Handlebars;
use serde::Serialize;

const ADAPTER_PROMPT_TEMPLATE: &str = include_str!("templates/adapter_prompt.hbs");
const SYSTEM_PROMPT_TEMPLATE: &str = include_str!("templates/system_prompt.hbs");

/// Holds the handlebars templates
pub struct Templates {
    handlebars: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        // Prompts are plain text, the spec JSON must survive untouched
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_template_string("adapter_prompt.hbs", ADAPTER_PROMPT_TEMPLATE)?;
        handlebars.register_template_string("system_prompt.hbs", SYSTEM_PROMPT_TEMPLATE)?;

        Ok(Self { handlebars })
    }

    /// Render a template by name with the given data
    pub fn render<T: Serialize>(&self, template_name: &str, data: &T) -> Result<String> {
        Ok(self.handlebars.render(template_name, data)?)
    }

    pub fn system_prompt(&self) -> Result<String> {
        self.render("system_prompt.hbs", &serde_json::json!({}))
    }
}

/// Data for rendering the adapter generation prompt
#[derive(Serialize)]
pub struct AdapterPromptTemplate<'a> {
    pub provider: &'a str,
    pub language: &'static str,
    pub type_kind: &'static str,
    pub create_customer: &'static str,
    pub get_invoice: &'static str,
    pub canonical: &'a str,
    pub spec: &'a str,
}

impl<'a> AdapterPromptTemplate<'a> {
    pub fn new(
        provider: &'a str,
        language: TargetLanguage,
        canonical: &'a str,
        spec: &'a str,
    ) -> Self {
        Self {
            provider,
            language: language.display_name(),
            type_kind: language.type_kind(),
            create_customer: language.create_customer_signature(),
            get_invoice: language.get_invoice_signature(),
            canonical,
            spec,
        }
    }

    pub fn render(&self, templates: &Templates) -> Result<String> {
        templates.render("adapter_prompt.hbs", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonical_model;

    #[test]
    fn test_adapter_prompt_template() {
        let templates = Templates::new().unwrap();
        let spec = r#"{"openapi":"3.0.0","info":{"title":"A & B <Billing>"}}"#;
        let prompt = AdapterPromptTemplate::new("Stripe", TargetLanguage::Python, canonical_model(), spec)
            .render(&templates)
            .unwrap();

        assert!(prompt.contains(r#"two keys: "mapping" and "code""#));
        assert!(prompt.contains(r#"class "StripeAdapter""#));
        assert!(prompt.contains("Python 3.11"));
        assert!(prompt.contains("create_customer(data: Customer) -> str"));
        assert!(prompt.contains("get_invoice(inv_id: str) -> Invoice"));
        assert!(prompt.contains("you may stub network calls"));
        assert!(prompt.contains("class Invoice: id: str; customer_id: str"));
        // Spec text goes in unescaped, inside the fence
        assert!(prompt.contains(&format!("```openapi-json\n{}\n```", spec)));
    }

    #[test]
    fn test_adapter_prompt_for_rust() {
        let templates = Templates::new().unwrap();
        let prompt = AdapterPromptTemplate::new("Chargebee", TargetLanguage::Rust, canonical_model(), "{}")
            .render(&templates)
            .unwrap();

        assert!(prompt.contains(r#"struct "ChargebeeAdapter""#));
        assert!(prompt.contains("Rust (2021 edition)"));
        assert!(prompt.contains("fn get_invoice(&self, inv_id: &str)"));
    }

    #[test]
    fn test_system_prompt() {
        let templates = Templates::new().unwrap();
        assert_eq!(
            templates.system_prompt().unwrap(),
            "You are precise and output JSON only."
        );
    }
}
