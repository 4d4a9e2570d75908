//! Table of contents: alphabetic buckets of listable entries

use crate::entry::Entry;
use crate::utils::CollationKey;
use serde::Serialize;
use std::ops::RangeInclusive;

/// Fixed table-of-contents buckets, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKind {
    NotLetters,
    AToE,
    FToL,
    MToS,
    TToZ,
}

impl BucketKind {
    pub const ALL: [BucketKind; 5] = [
        BucketKind::NotLetters,
        BucketKind::AToE,
        BucketKind::FToL,
        BucketKind::MToS,
        BucketKind::TToZ,
    ];

    pub fn title(self) -> &'static str {
        match self {
            BucketKind::NotLetters => "#",
            BucketKind::AToE => "A–E",
            BucketKind::FToL => "F–L",
            BucketKind::MToS => "M–S",
            BucketKind::TToZ => "T–Z",
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

/// First matching predicate wins; anything unmatched lands in `#`
const LETTER_RANGES: [(RangeInclusive<char>, BucketKind); 4] = [
    ('a'..='e', BucketKind::AToE),
    ('f'..='l', BucketKind::FToL),
    ('m'..='s', BucketKind::MToS),
    ('t'..='z', BucketKind::TToZ),
];

/// A titled group of entries
#[derive(Debug, Clone, Serialize)]
pub struct Bucket<'a> {
    pub title: &'static str,
    pub definitions: Vec<&'a Entry>,
}

/// Bucket for a title, after stripping a single leading hyphen
///
/// Only ASCII letters are bucketed; accented and non-Latin initials go to `#`.
pub fn bucket_for(title: &str) -> BucketKind {
    let sortable = title.strip_prefix('-').unwrap_or(title);
    let Some(first) = sortable.chars().next() else {
        return BucketKind::NotLetters;
    };
    let first = first.to_ascii_lowercase();

    LETTER_RANGES
        .iter()
        .find(|(range, _)| range.contains(&first))
        .map(|(_, kind)| *kind)
        .unwrap_or(BucketKind::NotLetters)
}

/// Group entries into the five table-of-contents buckets
///
/// Entries flagged `skip_in_table_of_content` are left out. Within a bucket
/// entries are ordered by their hyphen-stripped title; equal titles keep
/// their input order.
pub fn categorize(entries: &[Entry]) -> Vec<Bucket<'_>> {
    let mut listed: Vec<&Entry> = entries
        .iter()
        .filter(|entry| !entry.skip_in_table_of_content)
        .collect();
    listed.sort_by_cached_key(|entry| CollationKey::new(entry.sortable_title()));

    let mut buckets: Vec<Bucket> = BucketKind::ALL
        .iter()
        .map(|kind| Bucket {
            title: kind.title(),
            definitions: Vec::new(),
        })
        .collect();

    for entry in listed {
        buckets[bucket_for(&entry.title).position()]
            .definitions
            .push(entry);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Metadata;
    use std::path::PathBuf;

    fn entry(title: &str, skip: bool) -> Entry {
        Entry {
            title: title.to_string(),
            slug: title.to_lowercase(),
            defined: true,
            skip_in_table_of_content: skip,
            metadata: Metadata::new(),
            content: String::new(),
            source: PathBuf::new(),
        }
    }

    fn titles<'a>(bucket: &Bucket<'a>) -> Vec<&'a str> {
        bucket.definitions.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_empty_input_yields_five_buckets() {
        let buckets = categorize(&[]);
        let names: Vec<_> = buckets.iter().map(|b| b.title).collect();
        assert_eq!(names, vec!["#", "A–E", "F–L", "M–S", "T–Z"]);
        assert!(buckets.iter().all(|b| b.definitions.is_empty()));
    }

    #[test]
    fn test_bucket_for() {
        assert_eq!(bucket_for("Ally"), BucketKind::AToE);
        assert_eq!(bucket_for("elder"), BucketKind::AToE);
        assert_eq!(bucket_for("Folx"), BucketKind::FToL);
        assert_eq!(bucket_for("lame"), BucketKind::FToL);
        assert_eq!(bucket_for("Mx"), BucketKind::MToS);
        assert_eq!(bucket_for("survivor"), BucketKind::MToS);
        assert_eq!(bucket_for("Tribe"), BucketKind::TToZ);
        assert_eq!(bucket_for("Zero"), BucketKind::TToZ);
        assert_eq!(bucket_for("-ish"), BucketKind::FToL);
        assert_eq!(bucket_for("2SLGBTQ+"), BucketKind::NotLetters);
        assert_eq!(bucket_for("Übermensch"), BucketKind::NotLetters);
        assert_eq!(bucket_for("Ökonomie"), BucketKind::NotLetters);
        assert_eq!(bucket_for("🙂 emoji"), BucketKind::NotLetters);
        assert_eq!(bucket_for("--double"), BucketKind::NotLetters);
        assert_eq!(bucket_for(""), BucketKind::NotLetters);
    }

    #[test]
    fn test_categorize_sorts_and_skips() {
        let entries = vec![
            entry("crazy", false),
            entry("Addict", false),
            entry("-ish", false),
            entry("hidden", true),
            entry("blind", false),
            entry("Illegal", false),
            entry("9/11", false),
        ];

        let buckets = categorize(&entries);
        assert_eq!(titles(&buckets[0]), vec!["9/11"]);
        assert_eq!(titles(&buckets[1]), vec!["Addict", "blind", "crazy"]);
        assert_eq!(titles(&buckets[2]), vec!["Illegal", "-ish"]);
        assert!(buckets[3].definitions.is_empty());
        assert!(buckets[4].definitions.is_empty());

        let listed: usize = buckets.iter().map(|b| b.definitions.len()).sum();
        assert_eq!(listed, 6);
    }

    #[test]
    fn test_equal_titles_keep_input_order() {
        let mut first = entry("Spaz", false);
        first.slug = "first".into();
        let mut second = entry("spaz", false);
        second.slug = "second".into();
        let mut third = entry("Spaz", false);
        third.slug = "third".into();

        let entries = vec![first, second, third];
        let buckets = categorize(&entries);
        let slugs: Vec<_> = buckets[3]
            .definitions
            .iter()
            .map(|e| e.slug.as_str())
            .collect();

        // "spaz" differs from "Spaz" only by case, which the key ignores
        assert_eq!(slugs, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_bucket_serializes_as_title_and_definitions() {
        let entries = vec![entry("Ally", false)];
        let buckets = categorize(&entries);
        let json = serde_json::to_value(&buckets[1]).unwrap();
        assert_eq!(json["title"], "A–E");
        assert_eq!(json["definitions"][0]["slug"], "ally");
    }
}
