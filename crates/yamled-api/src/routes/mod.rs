//! # API Route Modules
//!
//! - `files` — listing, reading, saving, converting and uploading YAML
//!   files under the managed root.
//! - `validate` — stateless syntax and structure checks for YAML text.

pub mod files;
pub mod validate;
