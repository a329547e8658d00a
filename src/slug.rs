//! Deterministic, collision-resistant slugs for documentation pages.

use ahash::AHashSet;
use regex::Regex;
use std::sync::LazyLock;

/// Slug of a package root.
pub const ROOT_SLUG: &str = "index";

/// Separator between sanitized path segments.
pub const SEGMENT_SEPARATOR: char = '.';

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"));

/// Lowercase a segment and collapse every run of non-alphanumeric characters to `-`.
///
/// A segment with no alphanumeric characters becomes `_` so paths keep their depth.
pub fn sanitize(segment: &str) -> String {
    let lower = segment.to_lowercase();
    let collapsed = NON_ALPHANUMERIC.replace_all(&lower, "-");
    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Per-package slug allocator.
///
/// The first claimant of a slug keeps the bare form; later claimants get the first free
/// `-2`, `-3`, ... suffix. Feeding the same paths in the same order yields the same slugs.
#[derive(Debug, Default)]
pub struct Slugger {
    taken: AHashSet<String>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a slug for the given root-to-leaf name segments.
    pub fn slug<S: AsRef<str>>(&mut self, path: &[S]) -> String {
        let base = if path.is_empty() {
            ROOT_SLUG.to_string()
        } else {
            let segments: Vec<String> = path.iter().map(|s| sanitize(s.as_ref())).collect();
            segments.join(&SEGMENT_SEPARATOR.to_string())
        };
        self.claim(base)
    }

    /// Allocate `base` or the first free numbered variant of it.
    pub fn claim(&mut self, base: String) -> String {
        if self.taken.insert(base.clone()) {
            return base;
        }

        let mut n = 2usize;
        loop {
            let candidate = format!("{base}-{n}");
            if self.taken.insert(candidate.clone()) {
                tracing::trace!("Slug '{}' taken, using '{}'", base, candidate);
                return candidate;
            }
            n += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
