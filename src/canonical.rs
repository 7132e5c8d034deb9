//! Canonical billing model
//!
//! The fixed target shapes every generated adapter maps into. Rendered once
//! and embedded verbatim into each prompt.

use std::sync::OnceLock;

/// A canonical entity and its typed fields
#[derive(Debug, Clone, Copy)]
pub struct Entity {
    pub name: &'static str,
    pub fields: &'static [(&'static str, &'static str)],
}

pub const CUSTOMER: Entity = Entity {
    name: "Customer",
    fields: &[("id", "str"), ("name", "str"), ("email", "str")],
};

pub const INVOICE: Entity = Entity {
    name: "Invoice",
    fields: &[
        ("id", "str"),
        ("customer_id", "str"),
        ("amount", "float"),
        ("currency", "str"),
    ],
};

pub const ENTITIES: &[Entity] = &[CUSTOMER, INVOICE];

static CANONICAL_MODEL: OnceLock<String> = OnceLock::new();

/// Text description of the canonical model, as embedded in prompts
pub fn canonical_model() -> &'static str {
    CANONICAL_MODEL.get_or_init(|| {
        let mut text = String::from("# Canonical entities (pseudo-code)");
        for entity in ENTITIES {
            let fields = entity
                .fields
                .iter()
                .map(|(name, ty)| format!("{}: {}", name, ty))
                .collect::<Vec<_>>()
                .join("; ");
            text.push_str(&format!("\nclass {}: {}", entity.name, fields));
        }
        text
    })
}

/// All `Entity.field` paths, e.g. `Customer.id`
pub fn field_paths() -> impl Iterator<Item = String> {
    ENTITIES.iter().flat_map(|entity| {
        entity
            .fields
            .iter()
            .map(move |(field, _)| format!("{}.{}", entity.name, field))
    })
}

pub fn is_field_path(path: &str) -> bool {
    field_paths().any(|p| p == path)
}
