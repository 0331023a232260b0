//! # Path Normalizer
//!
//! Turns a location string produced by a validator (for example
//! `/ns:naturalPersonTaxData/ns:person/ns:name`) into the ordered list of bare
//! segment names the resolver walks.
//!
//! Rules, applied in order:
//!
//! 1. Trim; reject unless the result starts with `/`.
//! 2. Split on `/`, trim every piece, drop empty pieces (`//` and a trailing
//!    `/` collapse).
//! 3. Reject if nothing is left.
//! 4. Keep only the part after the **last** `:` of each piece, trimmed.
//! 5. Drop pieces that became empty.
//! 6. Reject if nothing is left.
//!
//! Normalization is pure and independent of any loaded tree.

use std::fmt;

use crate::error::PathRejection;

/// A non-empty, ordered list of bare segment names.
///
/// The only ways to obtain one are [`normalize`] and
/// [`NormalizedPath::from_segments`], both of which refuse empty input, so the
/// resolver never sees an empty segment list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath(Vec<String>);

impl NormalizedPath {
    /// Build from pre-split segments, refusing an empty list or empty names.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathRejection>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(PathRejection::NoSegments(format!("/{}", segments.join("/"))));
        }
        Ok(Self(segments))
    }

    /// The segments in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The first segment.
    pub fn first(&self) -> &str {
        // Non-empty by construction.
        &self.0[0]
    }

    /// The last segment.
    pub fn last(&self) -> &str {
        &self.0[self.0.len() - 1]
    }

    /// Number of segments (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Consume into the underlying segment list.
    pub fn into_segments(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Normalize a raw location string into bare segment names.
pub fn normalize(raw: &str) -> Result<NormalizedPath, PathRejection> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('/') {
        return Err(PathRejection::NotAbsolute(raw.to_string()));
    }

    let pieces: Vec<&str> = trimmed
        .split('/')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect();
    if pieces.is_empty() {
        return Err(PathRejection::NoSegments(raw.to_string()));
    }

    let segments: Vec<String> = pieces
        .into_iter()
        .map(strip_prefix)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();
    if segments.is_empty() {
        return Err(PathRejection::EmptyAfterPrefixStrip(raw.to_string()));
    }

    Ok(NormalizedPath(segments))
}

/// Drop everything up to and including the last `:`.
fn strip_prefix(piece: &str) -> &str {
    match piece.rfind(':') {
        Some(idx) => piece[idx + 1..].trim(),
        None => piece,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(raw: &str) -> Vec<String> {
        normalize(raw).unwrap().into_segments()
    }

    #[test]
    fn splits_absolute_path() {
        assert_eq!(segs("/a/b/c"), ["a", "b", "c"]);
    }

    #[test]
    fn rejects_relative_path() {
        assert_eq!(
            normalize("not-absolute"),
            Err(PathRejection::NotAbsolute("not-absolute".into()))
        );
    }

    #[test]
    fn strips_namespace_prefix() {
        assert_eq!(segs("/ns:Foo/bar"), ["Foo", "bar"]);
    }

    #[test]
    fn keeps_text_after_last_colon() {
        assert_eq!(segs("/a:b:Leaf"), ["Leaf"]);
    }

    #[test]
    fn collapses_empty_pieces() {
        assert_eq!(segs("//a//"), ["a"]);
    }

    #[test]
    fn rejects_prefix_only_segment() {
        assert_eq!(
            normalize("/ns:"),
            Err(PathRejection::EmptyAfterPrefixStrip("/ns:".into()))
        );
    }

    #[test]
    fn rejects_bare_slashes() {
        assert!(matches!(normalize(" // "), Err(PathRejection::NoSegments(_))));
        assert!(matches!(normalize("/"), Err(PathRejection::NoSegments(_))));
    }

    #[test]
    fn trims_outer_and_inner_whitespace() {
        assert_eq!(segs("  / ns: Foo / bar  "), ["Foo", "bar"]);
    }

    #[test]
    fn drops_prefix_only_pieces_among_others() {
        assert_eq!(segs("/a/ns:/b"), ["a", "b"]);
    }

    #[test]
    fn display_reassembles_bare_path() {
        assert_eq!(normalize("/ns:A/ns:B").unwrap().to_string(), "/A/B");
    }

    #[test]
    fn from_segments_refuses_empty_list() {
        assert!(NormalizedPath::from_segments(Vec::<String>::new()).is_err());
        assert!(NormalizedPath::from_segments(["a", ""]).is_err());
        let path = NormalizedPath::from_segments(["a", "b"]).unwrap();
        assert_eq!(path.first(), "a");
        assert_eq!(path.last(), "b");
        assert_eq!(path.len(), 2);
    }
}
