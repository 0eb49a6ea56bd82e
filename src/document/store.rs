//! Document store: the orchestrator
//!
//! Owns one field index per declared field, the register, the tag facets,
//! the record store and the search cache. Every write touches field indexes,
//! tag buckets, stored records and the register as one logical unit.
//!
//! # Lifecycle
//!
//! - `add` creates an entry, or replaces it when the id is already present
//! - `append` extends an entry without removing earlier memberships
//! - `update` is `remove` followed by `add`
//! - `remove` reverses every mutation performed by `add`

use serde_json::Value;

use crate::cache::SearchCache;
use crate::facet::{Register, TagFacets};
use crate::field::{FieldIndex, IndexOptions, TokenIndex};
use crate::observability::{log_event_with_fields, Event, MetricsSnapshot, StoreMetrics};
use crate::path::CompiledPath;
use crate::projector::{project_into_index, resolve};
use crate::query::SearchResponse;

use super::config::{Capabilities, Capability, DocumentConfig, StoreMode};
use super::errors::{DocumentError, DocumentResult};
use super::id::DocId;
use super::records::RecordStore;

/// How an accepted write relates to the existing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteKind {
    /// Fresh entry
    Add,
    /// Extend the entry, keeping earlier memberships
    Append,
    /// Second half of an update; counted by the update itself
    Replace,
}

/// A declared field and its index
#[derive(Debug)]
pub(crate) struct FieldEntry<I> {
    pub(crate) name: String,
    pub(crate) path: CompiledPath,
    pub(crate) index: I,
}

/// Multi-field document store over single-field indexes
#[derive(Debug)]
pub struct DocumentStore<I = TokenIndex> {
    pub(crate) key: CompiledPath,
    pub(crate) fastupdate: bool,
    pub(crate) capabilities: Capabilities,
    pub(crate) fields: Vec<FieldEntry<I>>,
    pub(crate) register: Register,
    pub(crate) tags: Option<TagFacets>,
    pub(crate) records: Option<RecordStore>,
    pub(crate) cache: Option<SearchCache<SearchResponse>>,
    pub(crate) metrics: StoreMetrics,
}

impl DocumentStore<TokenIndex> {
    /// Build a store backed by the built-in token index
    pub fn new(config: DocumentConfig) -> DocumentResult<Self> {
        let fastupdate = config.fastupdate;
        Self::with_indexes(config, |_, options| TokenIndex::new(options, fastupdate))
    }
}

impl<I: FieldIndex> DocumentStore<I> {
    /// Build a store whose field indexes come from `factory`.
    ///
    /// The factory is called once per declared field with the field name and
    /// its resolved index options.
    pub fn with_indexes<F>(config: DocumentConfig, mut factory: F) -> DocumentResult<Self>
    where
        F: FnMut(&str, IndexOptions) -> I,
    {
        if let Err(err) = config.validate() {
            log_event_with_fields(Event::ConfigRejected, &[("reason", err.message())]);
            return Err(err);
        }

        let fields = config
            .fields
            .resolve(config.index)
            .into_iter()
            .map(|(name, options)| FieldEntry {
                path: CompiledPath::compile(&name),
                index: factory(&name, options),
                name,
            })
            .collect::<Vec<_>>();

        let tags = config
            .tag
            .as_deref()
            .map(|path| TagFacets::new(CompiledPath::compile(path), config.fastupdate));

        let records = match config.store.mode() {
            StoreMode::Disabled => None,
            StoreMode::Full => Some(RecordStore::full()),
            StoreMode::Paths(paths) => Some(RecordStore::projected(
                paths.iter().map(|p| CompiledPath::compile(p)).collect(),
            )),
        };

        let cache = config.cache.capacity().map(SearchCache::new);
        let capabilities = config.capabilities();

        let field_count = fields.len().to_string();
        log_event_with_fields(
            Event::StoreCreated,
            &[
                ("cache", bool_str(capabilities.cache)),
                ("fastupdate", bool_str(config.fastupdate)),
                ("fields", &field_count),
                ("store", bool_str(capabilities.store)),
                ("tag", bool_str(capabilities.tag)),
            ],
        );

        Ok(Self {
            key: CompiledPath::compile(&config.key),
            fastupdate: config.fastupdate,
            capabilities,
            fields,
            register: Register::new(),
            tags,
            records,
            cache,
            metrics: StoreMetrics::new(),
        })
    }

    /// Capabilities resolved at construction
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// True if removal uses back-references
    pub fn fastupdate(&self) -> bool {
        self.fastupdate
    }

    /// Declared field names in order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Index of a declared field
    pub fn field_index(&self, name: &str) -> Option<&I> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.index)
    }

    /// Tag facets, when tagging is configured
    pub fn tag_facets(&self) -> Option<&TagFacets> {
        self.tags.as_ref()
    }

    /// Members of a tag bucket
    pub fn tag_bucket(&self, tag: &str) -> DocumentResult<Option<&[DocId]>> {
        self.require(Capability::Tag, "tag_bucket")?;
        Ok(self.tags.as_ref().and_then(|tags| tags.bucket(tag)))
    }

    /// Current operation counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Number of present ids
    pub fn len(&self) -> usize {
        self.register.len()
    }

    /// True if no id is present
    pub fn is_empty(&self) -> bool {
        self.register.is_empty()
    }

    /// Id of `record` according to the key path
    pub fn derive_id(&self, record: &Value) -> Option<DocId> {
        resolve(record, &self.key).and_then(DocId::from_value)
    }

    /// Add `content` under `id`. An already present id is replaced.
    pub fn add(&mut self, id: impl Into<DocId>, content: &Value) -> DocumentResult<()> {
        let id = id.into();

        if !accepts(&id, content) {
            log_event_with_fields(Event::AddSkipped, &[("id", &id.to_string())]);
            return Ok(());
        }

        if self.register.contains(&id) {
            return self.update(id, content);
        }

        self.insert(id, content, WriteKind::Add)
    }

    /// Add a record, taking its id from the key path.
    ///
    /// Returns the id, or `None` when the record has no usable id.
    pub fn add_record(&mut self, record: &Value) -> DocumentResult<Option<DocId>> {
        let Some(id) = self.derive_id(record) else {
            log_event_with_fields(Event::AddSkipped, &[("reason", "no id")]);
            return Ok(None);
        };

        self.add(id.clone(), record)?;
        Ok(Some(id))
    }

    /// Extend the entry of `id` with `content`, keeping earlier memberships
    pub fn append(&mut self, id: impl Into<DocId>, content: &Value) -> DocumentResult<()> {
        let id = id.into();

        if !accepts(&id, content) {
            log_event_with_fields(Event::AddSkipped, &[("id", &id.to_string())]);
            return Ok(());
        }

        self.insert(id, content, WriteKind::Append)
    }

    /// Append a record, taking its id from the key path
    pub fn append_record(&mut self, record: &Value) -> DocumentResult<Option<DocId>> {
        let Some(id) = self.derive_id(record) else {
            log_event_with_fields(Event::AddSkipped, &[("reason", "no id")]);
            return Ok(None);
        };

        self.append(id.clone(), record)?;
        Ok(Some(id))
    }

    /// Replace the entry of `id`: `remove` then `add`.
    ///
    /// Not atomic for observers between the two steps.
    pub fn update(&mut self, id: impl Into<DocId>, content: &Value) -> DocumentResult<()> {
        let id = id.into();

        self.remove_entry(&id)?;
        self.insert(id.clone(), content, WriteKind::Replace)?;

        self.metrics.increment_updates();
        log_event_with_fields(Event::DocumentUpdated, &[("id", &id.to_string())]);
        Ok(())
    }

    /// Remove the entry of `id`. Returns false if the id was not present.
    pub fn remove(&mut self, id: impl Into<DocId>) -> DocumentResult<bool> {
        let id = id.into();
        let removed = self.remove_entry(&id)?;

        if removed {
            self.metrics.increment_removes();
            log_event_with_fields(Event::DocumentRemoved, &[("id", &id.to_string())]);
        } else {
            log_event_with_fields(Event::RemoveSkipped, &[("id", &id.to_string())]);
        }

        Ok(removed)
    }

    /// Remove the entry of a record, taking its id from the key path
    pub fn remove_record(&mut self, record: &Value) -> DocumentResult<bool> {
        match self.derive_id(record) {
            Some(id) => self.remove(id),
            None => Ok(false),
        }
    }

    /// True if `id` is present
    pub fn contain(&self, id: impl Into<DocId>) -> bool {
        self.register.contains(&id.into())
    }

    /// Stored record of `id`
    pub fn get(&self, id: impl Into<DocId>) -> DocumentResult<Option<&Value>> {
        self.require(Capability::Store, "get")?;
        let id = id.into();
        Ok(self.records.as_ref().and_then(|records| records.get(&id)))
    }

    /// Overwrite the stored record of `id` without touching any index
    pub fn set(&mut self, id: impl Into<DocId>, data: Value) -> DocumentResult<()> {
        self.require(Capability::Store, "set")?;

        if let Some(records) = self.records.as_mut() {
            records.set(id.into(), data);
        }

        self.invalidate_cache();
        Ok(())
    }

    pub(crate) fn require(&self, capability: Capability, operation: &str) -> DocumentResult<()> {
        if self.capabilities.has(capability) {
            return Ok(());
        }

        log_event_with_fields(
            Event::CapabilityMissing,
            &[("capability", capability.as_str()), ("operation", operation)],
        );
        Err(DocumentError::capability_missing(capability, operation))
    }

    fn insert(&mut self, id: DocId, content: &Value, kind: WriteKind) -> DocumentResult<()> {
        if !accepts(&id, content) {
            log_event_with_fields(Event::AddSkipped, &[("id", &id.to_string())]);
            return Ok(());
        }

        let existed = self.register.contains(&id);
        let append = kind == WriteKind::Append;

        for pos in 0..self.fields.len() {
            let field = &mut self.fields[pos];

            if let Err(err) = project_into_index(content, &field.path, &mut field.index, &id, append) {
                let err = DocumentError::field_index(&field.name, err);
                if !existed {
                    self.rollback(&id, pos);
                }
                return Err(err);
            }
        }

        self.register.ensure(&id);

        if let Some(tags) = self.tags.as_mut() {
            tags.add_tags(&id, content, &mut self.register, append);
        }

        if let Some(records) = self.records.as_mut() {
            records.put(id.clone(), content);
        }

        self.invalidate_cache();

        match kind {
            WriteKind::Replace => {}
            WriteKind::Append if existed => {
                self.metrics.increment_appends();
                log_event_with_fields(Event::DocumentAppended, &[("id", &id.to_string())]);
            }
            WriteKind::Add | WriteKind::Append => {
                self.metrics.increment_adds();
                log_event_with_fields(Event::DocumentAdded, &[("id", &id.to_string())]);
            }
        }

        Ok(())
    }

    /// Undo a partial add of a new id across fields `0..=last`
    fn rollback(&mut self, id: &DocId, last: usize) {
        for field in self.fields.iter_mut().take(last + 1) {
            // The add already failed; a second failure has nothing left to undo
            let _ = field.index.remove(id, true);
        }

        log_event_with_fields(Event::AddRolledBack, &[("id", &id.to_string())]);
    }

    fn remove_entry(&mut self, id: &DocId) -> DocumentResult<bool> {
        if !self.register.contains(id) {
            return Ok(false);
        }

        // Every structure drops the id even if an index fails; the first
        // failure is reported afterwards.
        let mut first_error = None;
        for field in self.fields.iter_mut() {
            if let Err(err) = field.index.remove(id, true) {
                first_error.get_or_insert_with(|| DocumentError::field_index(&field.name, err));
            }
        }

        let refs = self.register.take(id).unwrap_or_default();

        if let Some(tags) = self.tags.as_mut() {
            tags.remove_tags(id, &refs);
        }

        if let Some(records) = self.records.as_mut() {
            records.remove(id);
        }

        self.invalidate_cache();

        match first_error {
            Some(err) => Err(err),
            None => Ok(true),
        }
    }

    fn invalidate_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}

/// An id and content an add can accept: a valid id and non-null content
fn accepts(id: &DocId, content: &Value) -> bool {
    id.is_valid() && !content.is_null()
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
