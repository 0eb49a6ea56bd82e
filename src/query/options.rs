//! Search options
//!
//! Deserializable from the JSON option names `pluck`, `field`, `tag`,
//! `enrich`, `bool`, `limit`, `suggest`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldQuery;

/// Result size used when no limit is given
pub const DEFAULT_LIMIT: usize = 100;

/// How results of several fields or tags combine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    /// Every searched field must match; ids must carry every tag
    And,
    /// Fields are answered independently; ids must carry any tag
    #[default]
    Or,
}

/// One name or a list of names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// The names as a list
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            OneOrMany::One(name) => vec![name.clone()],
            OneOrMany::Many(names) => names.clone(),
        }
    }
}

/// Fields to search: a name, a list, or a mapping of name to field options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSelection {
    Names(OneOrMany),
    WithOptions(BTreeMap<String, FieldQuery>),
}

/// Options of one search call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Search a single field and return its bare result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pluck: Option<String>,

    /// Fields to search, all declared fields when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldSelection>,

    /// Tags results must carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<OneOrMany>,

    /// Replace ids with `{key, doc}` pairs from the record store
    #[serde(default)]
    pub enrich: bool,

    /// Join mode across fields and tags
    #[serde(rename = "bool", default)]
    pub join: JoinMode,

    /// Maximum result size per field or tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Allow partial term matches in field indexes
    #[serde(default)]
    pub suggest: bool,
}

impl SearchOptions {
    /// Options with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Search only `field` and return its bare result
    pub fn with_pluck(mut self, field: impl Into<String>) -> Self {
        self.pluck = Some(field.into());
        self
    }

    /// Search a single field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(FieldSelection::Names(OneOrMany::One(field.into())));
        self
    }

    /// Search the listed fields
    pub fn with_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        let names = fields.into_iter().map(Into::into).collect();
        self.field = Some(FieldSelection::Names(OneOrMany::Many(names)));
        self
    }

    /// Search fields with their own options
    pub fn with_field_options(mut self, fields: BTreeMap<String, FieldQuery>) -> Self {
        self.field = Some(FieldSelection::WithOptions(fields));
        self
    }

    /// Filter by one tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(OneOrMany::One(tag.into()));
        self
    }

    /// Filter by several tags
    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tag = Some(OneOrMany::Many(tags.into_iter().map(Into::into).collect()));
        self
    }

    /// Request enrichment
    pub fn with_enrich(mut self) -> Self {
        self.enrich = true;
        self
    }

    /// Set the join mode
    pub fn with_join(mut self, join: JoinMode) -> Self {
        self.join = join;
        self
    }

    /// Set the result limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Allow partial term matches
    pub fn with_suggest(mut self) -> Self {
        self.suggest = true;
        self
    }

    /// Effective result limit
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Requested tags, empty when no tag filter is set
    pub fn tag_names(&self) -> Vec<String> {
        self.tag.as_ref().map(OneOrMany::to_vec).unwrap_or_default()
    }

    /// Field options used when a field has none of its own
    pub fn default_field_query(&self) -> FieldQuery {
        FieldQuery {
            limit: None,
            suggest: self.suggest,
        }
    }

    /// Requested fields with their options. `None` means every declared
    /// field. `pluck` takes precedence over `field`.
    pub fn field_targets(&self) -> Option<Vec<(String, FieldQuery)>> {
        if let Some(pluck) = &self.pluck {
            return Some(vec![(pluck.clone(), self.default_field_query())]);
        }

        match self.field.as_ref()? {
            FieldSelection::Names(names) => Some(
                names
                    .to_vec()
                    .into_iter()
                    .map(|name| (name, self.default_field_query()))
                    .collect(),
            ),
            FieldSelection::WithOptions(map) => Some(
                map.iter()
                    .map(|(name, query)| (name.clone(), query.clone()))
                    .collect(),
            ),
        }
    }
}
