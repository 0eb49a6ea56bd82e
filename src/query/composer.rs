//! Query composition across fields and tags
//!
//! Runs each requested field's index, filters the hits through the requested
//! tag buckets, joins fields in AND or OR mode, then projects the hits into
//! the response shape asked for.

use crate::cache::SearchCache;
use crate::document::{Capability, DocId, DocumentError, DocumentResult, DocumentStore};
use crate::field::{intersect, intersect_union, FieldIndex, FieldQuery};
use crate::observability::{log_event_with_fields, Event};

use super::options::{JoinMode, SearchOptions};
use super::result::{EnrichedDoc, FieldResult, Hits, SearchResponse, TagResult};

impl<I: FieldIndex> DocumentStore<I> {
    /// Search the declared fields and tags.
    ///
    /// Data conditions never fail: no match, an empty AND operand and tag
    /// filtering that removes every hit all yield an empty response. Asking
    /// for a capability the store was not built with, or for an undeclared
    /// field, is an error.
    pub fn search(&self, query: &str, options: &SearchOptions) -> DocumentResult<SearchResponse> {
        self.metrics.increment_searches();

        if options.enrich {
            self.require(Capability::Store, "search(enrich)")?;
        }

        let tags = options.tag_names();
        if !tags.is_empty() {
            self.require(Capability::Tag, "search(tag)")?;

            if query.trim().is_empty() {
                return Ok(self.search_tags(&tags, options));
            }
        }

        let targets = self.resolve_targets(options)?;
        let plucked = options.pluck.is_some();
        let limit = options.limit();
        let and = options.join == JoinMode::And && (targets.len() > 1 || tags.len() > 1);

        let mut found: Vec<(usize, Vec<DocId>, Option<Vec<String>>)> = Vec::new();

        for (pos, field_query) in targets {
            let field = &self.fields[pos];
            let mut hits = field
                .index
                .search(query, limit, &field_query)
                .map_err(|err| DocumentError::field_index(&field.name, err))?;
            let mut matched_tags = None;

            if !tags.is_empty() && !hits.is_empty() {
                let (names, buckets) = self.tag_buckets(&tags);

                if !buckets.is_empty() {
                    hits = if and {
                        let mut lists: Vec<&[DocId]> = Vec::with_capacity(buckets.len() + 1);
                        lists.push(&hits);
                        lists.extend(buckets.iter().copied());
                        intersect(&lists, limit)
                    } else {
                        intersect_union(&hits, &buckets)
                    };
                }

                matched_tags = Some(names);
            }

            if hits.is_empty() {
                if and {
                    self.metrics.increment_and_short_circuits();
                    log_event_with_fields(Event::AndShortCircuit, &[("field", &field.name)]);
                    return Ok(SearchResponse::empty(plucked));
                }
                continue;
            }

            found.push((pos, hits, matched_tags));
        }

        let response = if found.is_empty() {
            SearchResponse::empty(plucked)
        } else if plucked {
            let (_, hits, _) = found.swap_remove(0);
            SearchResponse::Plucked(self.project_hits(hits, options.enrich))
        } else {
            SearchResponse::Fields(
                found
                    .into_iter()
                    .map(|(pos, hits, tag)| FieldResult {
                        field: self.fields[pos].name.clone(),
                        result: self.project_hits(hits, options.enrich),
                        tag,
                    })
                    .collect(),
            )
        };

        let hit_count = response.hit_count().to_string();
        log_event_with_fields(
            Event::SearchExecuted,
            &[("hits", &hit_count), ("query", query)],
        );

        Ok(response)
    }

    /// Like `search`, answering repeated requests from the cache
    pub fn search_cached(
        &mut self,
        query: &str,
        options: &SearchOptions,
    ) -> DocumentResult<SearchResponse> {
        self.require(Capability::Cache, "search_cached")?;

        let Ok(serialized) = serde_json::to_string(options) else {
            return self.search(query, options);
        };
        let key = SearchCache::<SearchResponse>::key(query, &serialized);

        if let Some(hit) = self.cache.as_mut().and_then(|cache| cache.get(&key)) {
            self.metrics.increment_cache_hits();
            log_event_with_fields(Event::CacheHit, &[("query", query)]);
            return Ok(hit);
        }

        self.metrics.increment_cache_misses();
        log_event_with_fields(Event::CacheMiss, &[("query", query)]);

        let response = self.search(query, options)?;
        if let Some(cache) = self.cache.as_mut() {
            cache.put(key, response.clone());
        }

        Ok(response)
    }

    /// Tag-only path: one packet per non-empty requested bucket
    fn search_tags(&self, tags: &[String], options: &SearchOptions) -> SearchResponse {
        let limit = options.limit();
        let mut packets = Vec::new();

        if let Some(facets) = self.tags.as_ref() {
            for tag in tags {
                let Some(members) = facets.bucket(tag).filter(|m| !m.is_empty()) else {
                    continue;
                };

                let hits = members.iter().take(limit).cloned().collect();
                packets.push(TagResult {
                    tag: tag.clone(),
                    result: self.project_hits(hits, options.enrich),
                });
            }
        }

        log_event_with_fields(Event::TagFastPath, &[("packets", &packets.len().to_string())]);
        SearchResponse::Tags(packets)
    }

    /// Non-empty buckets of the requested tags with their names
    fn tag_buckets(&self, tags: &[String]) -> (Vec<String>, Vec<&[DocId]>) {
        let mut names = Vec::new();
        let mut buckets = Vec::new();

        if let Some(facets) = self.tags.as_ref() {
            for tag in tags {
                if let Some(members) = facets.bucket(tag).filter(|m| !m.is_empty()) {
                    names.push(tag.clone());
                    buckets.push(members);
                }
            }
        }

        (names, buckets)
    }

    /// Positions of the requested fields with their query options
    fn resolve_targets(&self, options: &SearchOptions) -> DocumentResult<Vec<(usize, FieldQuery)>> {
        let Some(requested) = options.field_targets() else {
            let query = options.default_field_query();
            return Ok((0..self.fields.len()).map(|pos| (pos, query.clone())).collect());
        };

        requested
            .into_iter()
            .map(|(name, query)| {
                self.fields
                    .iter()
                    .position(|f| f.name == name)
                    .map(|pos| (pos, query))
                    .ok_or_else(|| DocumentError::unknown_field(&name))
            })
            .collect()
    }

    fn project_hits(&self, hits: Vec<DocId>, enrich: bool) -> Hits {
        if !enrich {
            return Hits::Ids(hits);
        }

        Hits::Docs(
            hits.into_iter()
                .map(|key| {
                    let doc = self
                        .records
                        .as_ref()
                        .and_then(|records| records.get(&key))
                        .cloned();
                    EnrichedDoc { key, doc }
                })
                .collect(),
        )
    }
}
