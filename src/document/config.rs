//! Document store configuration
//!
//! Deserializable from the JSON construction options:
//!
//! ```json
//! {
//!   "key": "id",
//!   "fastupdate": true,
//!   "store": ["title", "meta:author"],
//!   "tag": "tags",
//!   "cache": 500,
//!   "doc": {"title": {"tokenize": "forward"}, "body": true},
//!   "index": {"case_sensitive": false}
//! }
//! ```
//!
//! Capabilities are resolved once, at construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::{IndexOptions, TokenMode};
use crate::path::CompiledPath;

use super::errors::{DocumentError, DocumentResult};

/// Default key path
pub const DEFAULT_KEY: &str = "id";

/// Cache capacity used when the cache is enabled with `true`
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// The `store` option: `false`, `true`, one path or a list of paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreOption {
    Flag(bool),
    Path(String),
    Paths(Vec<String>),
}

impl Default for StoreOption {
    fn default() -> Self {
        StoreOption::Flag(false)
    }
}

/// Resolved storage behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreMode {
    /// No records are kept
    Disabled,
    /// The full record is kept
    Full,
    /// Only the listed paths are kept
    Paths(Vec<String>),
}

impl StoreOption {
    /// Normalize into a `StoreMode`
    pub fn mode(&self) -> StoreMode {
        match self {
            StoreOption::Flag(false) => StoreMode::Disabled,
            StoreOption::Flag(true) => StoreMode::Full,
            StoreOption::Path(path) => StoreMode::Paths(vec![path.clone()]),
            StoreOption::Paths(paths) => StoreMode::Paths(paths.clone()),
        }
    }
}

/// The `cache` option: `false`, `true` or a capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheOption {
    Flag(bool),
    Capacity(usize),
}

impl Default for CacheOption {
    fn default() -> Self {
        CacheOption::Flag(false)
    }
}

impl CacheOption {
    /// Capacity of the cache, `None` when disabled
    pub fn capacity(&self) -> Option<usize> {
        match self {
            CacheOption::Flag(true) => Some(DEFAULT_CACHE_CAPACITY),
            CacheOption::Flag(false) | CacheOption::Capacity(0) => None,
            CacheOption::Capacity(n) => Some(*n),
        }
    }
}

/// Per-field overrides of the base index options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenize: Option<TokenMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
}

impl FieldOptions {
    /// Apply these overrides on top of `base`
    pub fn resolve(&self, base: IndexOptions) -> IndexOptions {
        IndexOptions {
            tokenize: self.tokenize.unwrap_or(base.tokenize),
            case_sensitive: self.case_sensitive.unwrap_or(base.case_sensitive),
        }
    }
}

/// Value of a field in the mapping form of `doc`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSetting {
    /// `true` inherits the base options, `false` leaves the field out
    Inherit(bool),
    /// Override some base options
    Options(FieldOptions),
}

/// The `doc` option: one field, a list of fields, or a mapping of field name
/// to per-field options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDescriptor {
    Single(String),
    List(Vec<String>),
    Map(BTreeMap<String, FieldSetting>),
}

impl Default for FieldDescriptor {
    fn default() -> Self {
        FieldDescriptor::List(Vec::new())
    }
}

impl FieldDescriptor {
    /// Declared fields with their resolved index options, in declaration
    /// order (sorted by name for the mapping form)
    pub fn resolve(&self, base: IndexOptions) -> Vec<(String, IndexOptions)> {
        match self {
            FieldDescriptor::Single(name) => vec![(name.clone(), base)],
            FieldDescriptor::List(names) => names.iter().map(|n| (n.clone(), base)).collect(),
            FieldDescriptor::Map(map) => map
                .iter()
                .filter_map(|(name, setting)| {
                    let options = match setting {
                        FieldSetting::Inherit(false) => return None,
                        FieldSetting::Inherit(true) => base,
                        FieldSetting::Options(overrides) => overrides.resolve(base),
                    };
                    Some((name.clone(), options))
                })
                .collect(),
        }
    }
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

fn default_fastupdate() -> bool {
    true
}

/// Construction options of a document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Path of the id inside a record
    #[serde(default = "default_key")]
    pub key: String,

    /// Keep back-references for O(k) removal
    #[serde(default = "default_fastupdate")]
    pub fastupdate: bool,

    /// Record storage
    #[serde(default)]
    pub store: StoreOption,

    /// Path of the tag values inside a record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Search result cache
    #[serde(default)]
    pub cache: CacheOption,

    /// Declared fields
    #[serde(rename = "doc", default)]
    pub fields: FieldDescriptor,

    /// Options inherited by every field index
    #[serde(default)]
    pub index: IndexOptions,
}

impl DocumentConfig {
    /// Configuration indexing the given fields with all defaults
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            key: default_key(),
            fastupdate: default_fastupdate(),
            store: StoreOption::default(),
            tag: None,
            cache: CacheOption::default(),
            fields: FieldDescriptor::List(fields.into_iter().map(Into::into).collect()),
            index: IndexOptions::default(),
        }
    }

    /// Parse from a JSON options value
    pub fn from_json(value: &Value) -> DocumentResult<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| DocumentError::config_invalid(format!("Malformed options: {}", e)))
    }

    /// Parse from a JSON options string
    pub fn from_json_str(text: &str) -> DocumentResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| DocumentError::config_invalid(format!("Malformed options: {}", e)))
    }

    /// Set the key path
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Enable or disable fastupdate
    pub fn with_fastupdate(mut self, enabled: bool) -> Self {
        self.fastupdate = enabled;
        self
    }

    /// Set the tag path
    pub fn with_tag(mut self, path: impl Into<String>) -> Self {
        self.tag = Some(path.into());
        self
    }

    /// Store full records
    pub fn with_full_store(mut self) -> Self {
        self.store = StoreOption::Flag(true);
        self
    }

    /// Store only the given paths of each record
    pub fn with_store_paths<S: Into<String>>(mut self, paths: impl IntoIterator<Item = S>) -> Self {
        self.store = StoreOption::Paths(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Enable the search cache with a capacity
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = CacheOption::Capacity(capacity);
        self
    }

    /// Set the base index options
    pub fn with_index_options(mut self, options: IndexOptions) -> Self {
        self.index = options;
        self
    }

    /// Capabilities this configuration enables
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            store: self.store.mode() != StoreMode::Disabled,
            tag: self.tag.is_some(),
            cache: self.cache.capacity().is_some(),
        }
    }

    /// Check the configuration.
    ///
    /// Rejects: no declared field, duplicate field names, any path (field,
    /// key, tag, store) that compiles to no segment, an empty store path list.
    pub fn validate(&self) -> DocumentResult<()> {
        let fields = self.fields.resolve(self.index);

        if fields.is_empty() {
            return Err(DocumentError::config_invalid("At least one field must be declared"));
        }

        let mut seen = std::collections::HashSet::new();
        for (name, _) in &fields {
            if !seen.insert(name.as_str()) {
                return Err(DocumentError::config_invalid(format!(
                    "Field '{}' is declared twice",
                    name
                )));
            }
            check_path("field", name)?;
        }

        check_path("key", &self.key)?;

        if let Some(tag) = &self.tag {
            check_path("tag", tag)?;
        }

        if let StoreMode::Paths(paths) = self.store.mode() {
            if paths.is_empty() {
                return Err(DocumentError::config_invalid("Store path list is empty"));
            }
            for path in &paths {
                check_path("store", path)?;
            }
        }

        Ok(())
    }
}

fn check_path(kind: &str, path: &str) -> DocumentResult<()> {
    if CompiledPath::compile(path).is_empty() {
        return Err(DocumentError::config_invalid(format!(
            "The {} path '{}' has no segment",
            kind, path
        )));
    }
    Ok(())
}

/// Optional features of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Store,
    Tag,
    Cache,
}

impl Capability {
    /// Returns the configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Store => "store",
            Capability::Tag => "tag",
            Capability::Cache => "cache",
        }
    }
}

/// Capability set resolved at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub store: bool,
    pub tag: bool,
    pub cache: bool,
}

impl Capabilities {
    /// True if `capability` is enabled
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Store => self.store,
            Capability::Tag => self.tag,
            Capability::Cache => self.cache,
        }
    }
}
