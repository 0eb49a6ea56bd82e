//! Path compiler
//!
//! Splits a path string on `:` and records, per depth, whether the segment
//! requested array flattening.

use std::fmt;

/// Delimiter between nested segments of a path
pub const SEGMENT_DELIMITER: char = ':';

/// Suffix marking a segment whose array value is indexed element by element
pub const FLATTEN_SUFFIX: &str = "[]";

/// A single named step of a compiled path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    name: String,
    array_flatten: bool,
}

impl Segment {
    /// Returns the key looked up at this depth
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the segment ended with the flatten suffix
    pub fn array_flatten(&self) -> bool {
        self.array_flatten
    }
}

/// Structural representation of a declarative path.
///
/// Single-segment paths are kept as a one-element sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPath {
    source: String,
    segments: Vec<Segment>,
}

impl CompiledPath {
    /// Compile a path string.
    ///
    /// Pure function of the input. Segments ending in `[]` are trimmed of the
    /// suffix and marked for flattening; empty segments are dropped.
    pub fn compile(path: &str) -> Self {
        let segments = path
            .split(SEGMENT_DELIMITER)
            .filter_map(|raw| {
                let (name, array_flatten) = match raw.strip_suffix(FLATTEN_SUFFIX) {
                    Some(stripped) => (stripped, true),
                    None => (raw, false),
                };

                if name.is_empty() {
                    return None;
                }

                Some(Segment {
                    name: name.to_string(),
                    array_flatten,
                })
            })
            .collect();

        Self {
            source: path.to_string(),
            segments,
        }
    }

    /// Returns the path string as written
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the retained segments in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the segment at `pos`, if any
    pub fn segment(&self, pos: usize) -> Option<&Segment> {
        self.segments.get(pos)
    }

    /// Returns the first segment name
    pub fn root(&self) -> Option<&str> {
        self.segments.first().map(Segment::name)
    }

    /// Number of depth levels
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if no segment survived compilation
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if the path has exactly one segment
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }

    /// True if `pos` is the final depth
    pub fn is_last(&self, pos: usize) -> bool {
        pos + 1 == self.segments.len()
    }

    /// Returns the flatten marker at `pos` (false when out of range)
    pub fn flattens_at(&self, pos: usize) -> bool {
        self.segments
            .get(pos)
            .map(Segment::array_flatten)
            .unwrap_or(false)
    }
}

impl fmt::Display for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(path: &CompiledPath) -> Vec<&str> {
        path.segments().iter().map(Segment::name).collect()
    }

    #[test]
    fn test_simple_path() {
        let path = CompiledPath::compile("title");
        assert!(path.is_simple());
        assert_eq!(path.root(), Some("title"));
        assert!(!path.flattens_at(0));
    }

    #[test]
    fn test_nested_path() {
        let path = CompiledPath::compile("meta:author:name");
        assert_eq!(names(&path), vec!["meta", "author", "name"]);
        assert!(path.is_last(2));
        assert!(!path.is_last(1));
    }

    #[test]
    fn test_flatten_marker_per_depth() {
        let path = CompiledPath::compile("contents[]:tags[]");
        assert_eq!(names(&path), vec!["contents", "tags"]);
        assert!(path.flattens_at(0));
        assert!(path.flattens_at(1));

        let path = CompiledPath::compile("contents:tags[]");
        assert!(!path.flattens_at(0));
        assert!(path.flattens_at(1));
    }

    #[test]
    fn test_suffix_only_segment_dropped() {
        let path = CompiledPath::compile("contents:[]:body");
        assert_eq!(names(&path), vec!["contents", "body"]);
        assert!(!path.flattens_at(0));
        assert!(!path.flattens_at(1));
    }

    #[test]
    fn test_empty_segments_dropped() {
        let path = CompiledPath::compile(":title::");
        assert_eq!(names(&path), vec!["title"]);

        assert!(CompiledPath::compile("").is_empty());
        assert!(CompiledPath::compile("[]").is_empty());
    }

    #[test]
    fn test_flattens_out_of_range() {
        let path = CompiledPath::compile("tags[]");
        assert!(path.flattens_at(0));
        assert!(!path.flattens_at(5));
    }

    #[test]
    fn test_display_keeps_source() {
        let path = CompiledPath::compile("a[]:b");
        assert_eq!(path.to_string(), "a[]:b");
    }
}
