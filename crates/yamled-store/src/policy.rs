//! # Name Policy
//!
//! Checks applied to logical names before they touch the filesystem.
//!
//! A logical name is a relative path such as `pathway.yaml` or
//! `nursing/rules/intake.yml`. It is accepted when every component is a
//! plain name (or `.`), at least one plain name is present, and it ends in
//! one of [`ALLOWED_EXTENSIONS`].

use std::path::{Component, Path};

use crate::error::{StoreError, StoreResult};

/// Suffixes accepted for stored documents. Matched case-sensitively.
pub const ALLOWED_EXTENSIONS: [&str; 2] = [".yaml", ".yml"];

/// Whether `name` ends in `.yaml` or `.yml`.
pub fn has_allowed_extension(name: &str) -> bool {
    ALLOWED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Reject names without an allowed extension.
pub fn check_extension(name: &str) -> StoreResult<()> {
    if has_allowed_extension(name) {
        Ok(())
    } else {
        Err(StoreError::InvalidExtension(name.to_string()))
    }
}

/// Reject names that are empty or contain parent, root or prefix
/// components.
pub fn check_logical_name(name: &str) -> StoreResult<&Path> {
    let path = Path::new(name);
    let mut has_normal = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(StoreError::InvalidPath(name.to_string()));
            }
        }
    }
    if !has_normal {
        return Err(StoreError::InvalidPath(name.to_string()));
    }
    Ok(path)
}

/// The JSON sibling of a YAML name: the trailing `.yaml`/`.yml` becomes
/// `.json`. Other names get `.json` appended.
pub fn json_sibling_name(name: &str) -> String {
    let stem = ALLOWED_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name);
    format!("{stem}.json")
}
