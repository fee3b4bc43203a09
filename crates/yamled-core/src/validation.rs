//! # Structural Validation
//!
//! Recognises two document kinds by marker key and checks that their
//! required fields are present.
//!
//! ## Validation Layers
//!
//! 1. **Syntax**: the text parses (see [`crate::document`]).
//! 2. **Structure**: only for the [`ValidationProfile::Domain`] profile,
//!    which is chosen from the *filename*, not the content. The document
//!    kind is then detected from the root mapping's keys:
//!
//! | Marker key     | Kind                          | Required                                   |
//! |----------------|-------------------------------|--------------------------------------------|
//! | `pathwayInfo`  | [`DocumentKind::PathwayConfig`] | `pathwayInfo.{id,version,name,type}`, `requirements` |
//! | `ruleset`      | [`DocumentKind::Ruleset`]       | `ruleset`, `version`, `rules`; each rule `{name,conditions,action}` |
//! | neither        | [`DocumentKind::Generic`]       | nothing                                    |
//!
//! `pathwayInfo` wins when both markers are present. All checks are
//! additive; only the root-type check stops the pass early.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::document::parse_and_preview;

/// Fields required inside the `pathwayInfo` mapping.
const PATHWAY_INFO_FIELDS: [&str; 4] = ["id", "version", "name", "type"];

/// Top-level fields required in a ruleset document.
const RULESET_FIELDS: [&str; 3] = ["ruleset", "version", "rules"];

/// Fields required in every element of `rules`.
const RULE_FIELDS: [&str; 3] = ["name", "conditions", "action"];

/// Filename substring that switches on the domain rules.
const DOMAIN_FILENAME_MARKER: &str = "nursing";

/// Error emitted when the document root is not a mapping.
pub const ROOT_NOT_OBJECT: &str = "Root element must be an object";

/// Which rule set a validation pass applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationProfile {
    /// Syntax only.
    Plain,
    /// Syntax plus the pathway/ruleset structural rules.
    Domain,
}

impl ValidationProfile {
    /// Domain rules apply when the filename contains `nursing`,
    /// compared case-insensitively.
    pub fn for_filename(filename: &str) -> Self {
        if filename.to_lowercase().contains(DOMAIN_FILENAME_MARKER) {
            Self::Domain
        } else {
            Self::Plain
        }
    }
}

/// Document shape, detected from the root mapping's marker keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Root has `pathwayInfo`.
    PathwayConfig,
    /// Root has `ruleset` (and no `pathwayInfo`).
    Ruleset,
    /// Neither marker present.
    Generic,
}

impl DocumentKind {
    /// Detect the kind of a root mapping.
    pub fn detect(root: &Map<String, Value>) -> Self {
        if root.contains_key("pathwayInfo") {
            Self::PathwayConfig
        } else if root.contains_key("ruleset") {
            Self::Ruleset
        } else {
            Self::Generic
        }
    }
}

/// Validate a parsed document under `profile`.
///
/// Returns the error messages in the order they were found; an empty list
/// means the document is structurally acceptable.
pub fn validate(doc: &Value, profile: ValidationProfile) -> Vec<String> {
    match profile {
        ValidationProfile::Plain => Vec::new(),
        ValidationProfile::Domain => validate_structure(doc),
    }
}

fn validate_structure(doc: &Value) -> Vec<String> {
    let Some(root) = doc.as_object() else {
        return vec![ROOT_NOT_OBJECT.to_string()];
    };

    let mut errors = Vec::new();
    match DocumentKind::detect(root) {
        DocumentKind::PathwayConfig => check_pathway_config(root, &mut errors),
        DocumentKind::Ruleset => check_ruleset(root, &mut errors),
        DocumentKind::Generic => {}
    }
    errors
}

fn check_pathway_config(root: &Map<String, Value>, errors: &mut Vec<String>) {
    // A non-mapping pathwayInfo has none of the required fields.
    let info = root.get("pathwayInfo").and_then(Value::as_object);
    for field in PATHWAY_INFO_FIELDS {
        if !info.is_some_and(|m| m.contains_key(field)) {
            errors.push(format!("Missing required field: pathwayInfo.{field}"));
        }
    }

    if !root.contains_key("requirements") {
        errors.push("Missing required field: requirements".to_string());
    }
}

fn check_ruleset(root: &Map<String, Value>, errors: &mut Vec<String>) {
    for field in RULESET_FIELDS {
        if !root.contains_key(field) {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    let Some(rules) = root.get("rules").and_then(Value::as_array) else {
        return;
    };
    for (i, rule) in rules.iter().enumerate() {
        let Some(rule) = rule.as_object() else {
            errors.push(format!("Rule {i} must be an object"));
            continue;
        };
        for field in RULE_FIELDS {
            if !rule.contains_key(field) {
                errors.push(format!("Rule {i} missing required field: {field}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Validation Report
// ---------------------------------------------------------------------------

/// Outcome of validating one piece of content.
///
/// Built per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// True iff `errors` is empty.
    pub valid: bool,
    /// Syntax or structural errors, in discovery order.
    pub errors: Vec<String>,
    /// The parsed document, when parsing succeeded.
    pub parsed_data: Option<Value>,
    /// Indented JSON rendering of the document, when it is not empty.
    pub json_preview: Option<String>,
}

impl ValidationReport {
    /// A report for content that could not be parsed.
    pub fn failed(error: String) -> Self {
        Self {
            valid: false,
            errors: vec![error],
            parsed_data: None,
            json_preview: None,
        }
    }
}

/// Parse `content` and validate it with the profile implied by `filename`.
///
/// Never fails: parse problems are reported inside the returned report.
pub fn validate_content(content: &str, filename: &str) -> ValidationReport {
    let (doc, json_preview) = match parse_and_preview(content) {
        Ok(parsed) => parsed,
        Err(err) => return ValidationReport::failed(err.to_string()),
    };

    let errors = validate(&doc, ValidationProfile::for_filename(filename));
    ValidationReport {
        valid: errors.is_empty(),
        errors,
        parsed_data: Some(doc),
        json_preview,
    }
}
