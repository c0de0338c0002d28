// THEORY:
// The `override_builder` produces the companion selector document: a
// fallback model reference plus an ordered list of cases, where the primary
// case binds the user's label to the generated model and carries the full
// per-group tint table. The tint index space is shared with the model
// document: downstream tooling correlates the two documents by index, so
// entry i here must describe the same group as tintindex i there.
//
// The second, literal "test" case is a diagnostic placeholder that maps to a
// well-known marker model, useful for checking that the selector itself is
// wired up before the real model is.

use crate::core_modules::color_group::ColorGroup;
use serde::Serialize;

/// Fallback applied when the caller supplies an empty model name.
pub const DEFAULT_MODEL_NAME: &str = "custom_item";
/// Fallback applied when the caller supplies an empty case label.
pub const DEFAULT_CASE_LABEL: &str = "custom";
/// Fallback applied when the caller supplies an empty fallback reference.
pub const DEFAULT_FALLBACK_MODEL: &str = "item/iron_sword";
/// Label of the literal diagnostic case.
pub const DIAGNOSTIC_CASE_LABEL: &str = "test";
/// Marker model the diagnostic case resolves to.
pub const DIAGNOSTIC_MODEL: &str = "item/barrier";

const SELECTOR_KIND: &str = "select";
const SELECTOR_PROPERTY: &str = "custom_model_data";
const MODEL_KIND: &str = "model";
const TINT_SOURCE: &str = "minecraft:custom_model_data";

/// One tint-table entry: the group's rank index and its normalized base
/// color as the default tint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TintEntry {
    #[serde(rename = "type")]
    pub source: String,
    pub index: usize,
    pub default: [f64; 3],
}

/// A reference to a concrete model, optionally carrying a tint table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReference {
    #[serde(rename = "type")]
    pub kind: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tints: Option<Vec<TintEntry>>,
}

impl ModelReference {
    fn plain(model: impl Into<String>) -> Self {
        Self {
            kind: MODEL_KIND.to_string(),
            model: model.into(),
            tints: None,
        }
    }
}

/// One labeled case of the selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorCase {
    pub when: String,
    pub model: ModelReference,
}

/// The selector body: property to switch on, fallback, and ordered cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selector {
    #[serde(rename = "type")]
    pub kind: String,
    pub property: String,
    pub fallback: ModelReference,
    pub cases: Vec<SelectorCase>,
}

/// The complete override document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverrideDocument {
    pub model: Selector,
}

/// Builds the override document. The tint table always has exactly one
/// entry per group, indexed by rank, with the base color normalized to
/// [0, 1] per channel. Callers pass already-resolved (non-empty) names.
pub fn build_override(
    groups: &[ColorGroup],
    model_name: &str,
    case_label: &str,
    fallback_model: &str,
) -> OverrideDocument {
    let tints: Vec<TintEntry> = groups
        .iter()
        .enumerate()
        .map(|(index, group)| TintEntry {
            source: TINT_SOURCE.to_string(),
            index,
            default: group.base_color.normalized(),
        })
        .collect();

    let primary = SelectorCase {
        when: case_label.to_string(),
        model: ModelReference {
            kind: MODEL_KIND.to_string(),
            model: format!("item/{model_name}"),
            tints: Some(tints),
        },
    };
    let diagnostic = SelectorCase {
        when: DIAGNOSTIC_CASE_LABEL.to_string(),
        model: ModelReference::plain(DIAGNOSTIC_MODEL),
    };

    OverrideDocument {
        model: Selector {
            kind: SELECTOR_KIND.to_string(),
            property: SELECTOR_PROPERTY.to_string(),
            fallback: ModelReference::plain(fallback_model),
            cases: vec![primary, diagnostic],
        },
    }
}
