//! Search response types
//!
//! Responses serialize to the same JSON shapes for every variant family:
//! a bare list for plucked results, `{field, result, tag?}` packets for
//! field searches and `{tag, result}` packets for tag-only searches.

use serde::Serialize;
use serde_json::Value;

use crate::document::DocId;

/// An id paired with its stored record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedDoc {
    pub key: DocId,
    pub doc: Option<Value>,
}

/// Ordered hits, bare or enriched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Hits {
    Ids(Vec<DocId>),
    Docs(Vec<EnrichedDoc>),
}

impl Hits {
    /// Number of hits
    pub fn len(&self) -> usize {
        match self {
            Hits::Ids(ids) => ids.len(),
            Hits::Docs(docs) => docs.len(),
        }
    }

    /// True if there is no hit
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit ids in order
    pub fn ids(&self) -> Vec<&DocId> {
        match self {
            Hits::Ids(ids) => ids.iter().collect(),
            Hits::Docs(docs) => docs.iter().map(|d| &d.key).collect(),
        }
    }
}

/// Result of one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldResult {
    pub field: String,
    pub result: Hits,
    /// Tags that filtered this field, present when a tag filter was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<String>>,
}

/// Members of one tag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagResult {
    pub tag: String,
    pub result: Hits,
}

/// Answer of a search call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    /// Bare result of a plucked field
    Plucked(Hits),
    /// One packet per field with hits
    Fields(Vec<FieldResult>),
    /// One packet per tag with members (tag-only search)
    Tags(Vec<TagResult>),
}

impl SearchResponse {
    /// The empty answer for a request
    pub fn empty(plucked: bool) -> Self {
        if plucked {
            SearchResponse::Plucked(Hits::Ids(Vec::new()))
        } else {
            SearchResponse::Fields(Vec::new())
        }
    }

    /// True if nothing matched
    pub fn is_empty(&self) -> bool {
        match self {
            SearchResponse::Plucked(hits) => hits.is_empty(),
            SearchResponse::Fields(fields) => fields.is_empty(),
            SearchResponse::Tags(tags) => tags.is_empty(),
        }
    }

    /// Field packets, if this is a field response
    pub fn fields(&self) -> Option<&[FieldResult]> {
        match self {
            SearchResponse::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    /// Tag packets, if this is a tag-only response
    pub fn tags(&self) -> Option<&[TagResult]> {
        match self {
            SearchResponse::Tags(tags) => Some(tags),
            _ => None,
        }
    }

    /// Plucked hits, if this is a plucked response
    pub fn plucked(&self) -> Option<&Hits> {
        match self {
            SearchResponse::Plucked(hits) => Some(hits),
            _ => None,
        }
    }

    /// Total number of hits across packets
    pub fn hit_count(&self) -> usize {
        match self {
            SearchResponse::Plucked(hits) => hits.len(),
            SearchResponse::Fields(fields) => fields.iter().map(|f| f.result.len()).sum(),
            SearchResponse::Tags(tags) => tags.iter().map(|t| t.result.len()).sum(),
        }
    }
}
