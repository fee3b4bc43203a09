//! # yamled-store — File Store
//!
//! Owns every filesystem effect of yamled. A [`FileStore`] is an immutable
//! value built from a [`StoreConfig`]; it can be shared freely behind an
//! `Arc` and all operations take `&self`.
//!
//! ## Operations
//!
//! | Operation                         | Module        | Writes        |
//! |-----------------------------------|---------------|---------------|
//! | [`FileStore::list_files`]         | [`listing`]   | no            |
//! | [`FileStore::resolve_for_read`]   | [`store`]     | no            |
//! | [`FileStore::read`]               | [`store`]     | no            |
//! | [`FileStore::save`]               | [`persist`]   | backup + file |
//! | [`FileStore::upload`]             | [`persist`]   | backup + file |
//! | [`FileStore::convert`]            | [`convert`]   | JSON copy     |
//!
//! ## Path Policy
//!
//! Logical names are relative paths under the root. Names with parent,
//! root or drive-prefix components are rejected before any path is joined
//! (see [`policy`]). Only `.yaml` and `.yml` names are accepted.
//!
//! ## Crate Policy
//!
//! - Synchronous `std::fs` I/O only.
//! - Existing files are renamed to a timestamped backup before an
//!   overwrite. Backups are never deleted.

pub mod config;
pub mod convert;
pub mod error;
pub mod listing;
pub mod persist;
pub mod policy;
pub mod store;

pub use config::StoreConfig;
pub use convert::{Converted, GENERATED_BY};
pub use error::{StoreError, StoreResult};
pub use listing::FileRecord;
pub use persist::SavedFile;
pub use store::{FileStore, StoredContent};
