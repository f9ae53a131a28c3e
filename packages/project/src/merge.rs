//! Name-based pairing of records from the two source documents.
//!
//! Names are compared after lower-casing and removing all whitespace, and
//! a pair matches on equality or on containment in either direction, so
//! `"Sera"` pairs with `"Sera Conservancy"`. The first primary record that
//! matches wins; there is no global assignment.

use carbon_map_project_models::Conservancy;

/// A record that can be paired with its counterpart by name.
pub trait NamedRecord {
    /// The name used for matching, or an empty string.
    fn match_name(&self) -> &str;
}

impl NamedRecord for Conservancy {
    fn match_name(&self) -> &str {
        non_empty(self.short_name.as_deref())
            .or_else(|| non_empty(self.name.as_deref()))
            .unwrap_or_default()
    }
}

/// Lower-cases `name` and strips every whitespace character.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether two names refer to the same area.
///
/// An empty normalized name never matches.
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    let a = normalize_name(a);
    let b = normalize_name(b);
    // Every name contains the empty string, so it would pair with the first record.
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.contains(&b) || b.contains(&a)
}

/// Finds the first primary record whose name matches `comprehensive`.
#[must_use]
pub fn find_match<'a, T: NamedRecord>(primary: &'a [T], comprehensive: &T) -> Option<&'a T> {
    let key = comprehensive.match_name();
    primary.iter().find(|p| names_match(p.match_name(), key))
}

/// Returns the primary record matching `comprehensive`, or `comprehensive`
/// itself when nothing matches.
#[must_use]
pub fn merge_record<'a, T: NamedRecord>(primary: &'a [T], comprehensive: &'a T) -> &'a T {
    let Some(matched) = find_match(primary, comprehensive) else {
        log::debug!(
            "No primary record matches '{}', using comprehensive record",
            comprehensive.match_name()
        );
        return comprehensive;
    };
    matched
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
