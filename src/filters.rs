//! Template helpers for linking words to their definitions
//!
//! These produce small HTML fragments for the page templates. Interpolated
//! text is HTML-escaped.

use crate::entry::Entry;
use crate::error::{Error, Result};
use serde::Deserialize;

/// A sub term of a multi-word definition, as listed in front matter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubTerm {
    /// Title of the definition the sub term may link to
    pub full_title: String,
    /// Text shown on the page
    pub text: String,
}

/// A definition flag, as listed in front matter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Flag {
    pub level: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Known flag levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagLevel {
    Avoid,
    BetterAlternative,
    Tool,
}

impl FlagLevel {
    /// Parse a level name, ignoring case
    pub fn parse(level: &str) -> Result<Self> {
        match level.to_lowercase().as_str() {
            "avoid" => Ok(FlagLevel::Avoid),
            "better-alternative" => Ok(FlagLevel::BetterAlternative),
            "tool" => Ok(FlagLevel::Tool),
            _ => Err(Error::UnknownFlagLevel(level.to_string())),
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            FlagLevel::Avoid => "avoid",
            FlagLevel::BetterAlternative => "better",
            FlagLevel::Tool => "tool",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlagLevel::Avoid => "Avoid",
            FlagLevel::BetterAlternative => "Better alternate",
            FlagLevel::Tool => "",
        }
    }
}

/// In-page anchor for a slug
pub fn link_target(slug: &str) -> String {
    format!("#{}", slug)
}

fn find_definition<'a>(title: &str, entries: &'a [Entry]) -> Option<&'a Entry> {
    entries.iter().find(|entry| entry.title == title)
}

/// Link `word` to its definition if an entry has exactly that title
pub fn link_if_exists_in_collection(word: &str, entries: &[Entry]) -> String {
    match find_definition(word, entries) {
        Some(entry) => format!(
            r#"<a href="{}">{}</a>"#,
            escape_html(&link_target(&entry.slug)),
            escape_html(word)
        ),
        None => escape_html(word),
    }
}

/// Link a sub term to its full definition, or wrap it in a labelled span
pub fn link_sub_term_if_defined(sub_term: &SubTerm, entries: &[Entry]) -> String {
    let label = escape_html(&sub_term.full_title);
    let text = escape_html(&sub_term.text);

    match find_definition(&sub_term.full_title, entries) {
        Some(entry) => format!(
            r#"<a href="{}" aria-label="{}">{}</a>"#,
            escape_html(&link_target(&entry.slug)),
            label,
            text
        ),
        None => format!(r#"<span aria-label="{}">{}</span>"#, label, text),
    }
}

/// Notice paragraph for a definition flag
pub fn definition_flag(flag: Option<&Flag>) -> Result<String> {
    let Some(flag) = flag else {
        return Ok(r#"<p class="word__signal"></p>"#.to_string());
    };

    let level = FlagLevel::parse(&flag.level)?;
    let text = match flag.text.as_deref().filter(|t| !t.is_empty()) {
        Some(extra) if !level.label().is_empty() => format!("{}—{}", level.label(), extra),
        Some(extra) => extra.to_string(),
        None => level.label().to_string(),
    };

    Ok(format!(
        r#"<p class="word__signal word__signal--{}">{}</p>"#,
        level.class(),
        escape_html(&text)
    ))
}

/// Escape text for HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String never fails
    let _ = pulldown_cmark_escape::escape_html(&mut out, text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Metadata;
    use std::path::PathBuf;

    fn entries() -> Vec<Entry> {
        ["Ally", "Person with a disability"]
            .iter()
            .map(|title| Entry {
                title: title.to_string(),
                slug: title.to_lowercase().replace(' ', "-"),
                defined: true,
                skip_in_table_of_content: false,
                metadata: Metadata::new(),
                content: String::new(),
                source: PathBuf::new(),
            })
            .collect()
    }

    #[test]
    fn test_link_target() {
        assert_eq!(link_target("ally"), "#ally");
    }

    #[test]
    fn test_link_if_exists() {
        let entries = entries();
        assert_eq!(
            link_if_exists_in_collection("Ally", &entries),
            r##"<a href="#ally">Ally</a>"##
        );
        // match is exact, including case
        assert_eq!(link_if_exists_in_collection("ally", &entries), "ally");
        assert_eq!(
            link_if_exists_in_collection("<script>", &entries),
            "&lt;script&gt;"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"Tom & "Jerry's" <b>"#),
            "Tom &amp; &quot;Jerry&#39;s&quot; &lt;b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_link_sub_term() {
        let entries = entries();
        let defined = SubTerm {
            full_title: "Person with a disability".into(),
            text: "disability".into(),
        };
        assert_eq!(
            link_sub_term_if_defined(&defined, &entries),
            r##"<a href="#person-with-a-disability" aria-label="Person with a disability">disability</a>"##
        );

        let undefined = SubTerm {
            full_title: "Differently abled".into(),
            text: "abled".into(),
        };
        assert_eq!(
            link_sub_term_if_defined(&undefined, &entries),
            r#"<span aria-label="Differently abled">abled</span>"#
        );
    }

    #[test]
    fn test_definition_flag() {
        assert_eq!(definition_flag(None).unwrap(), r#"<p class="word__signal"></p>"#);

        let avoid = Flag {
            level: "Avoid".into(),
            text: Some("outdated".into()),
        };
        assert_eq!(
            definition_flag(Some(&avoid)).unwrap(),
            r#"<p class="word__signal word__signal--avoid">Avoid—outdated</p>"#
        );

        let better = Flag {
            level: "better-alternative".into(),
            text: None,
        };
        assert_eq!(
            definition_flag(Some(&better)).unwrap(),
            r#"<p class="word__signal word__signal--better">Better alternate</p>"#
        );

        let tool = Flag {
            level: "tool".into(),
            text: Some("use with care".into()),
        };
        assert_eq!(
            definition_flag(Some(&tool)).unwrap(),
            r#"<p class="word__signal word__signal--tool">use with care</p>"#
        );
    }

    #[test]
    fn test_unknown_flag_level() {
        let flag = Flag {
            level: "mystery".into(),
            text: None,
        };
        let err = definition_flag(Some(&flag)).unwrap_err();
        assert!(matches!(err, Error::UnknownFlagLevel(level) if level == "mystery"));
    }

    #[test]
    fn test_flag_from_front_matter() {
        let flag: Flag = serde_yaml::from_str("level: avoid\n").unwrap();
        assert_eq!(flag.text, None);
        assert_eq!(FlagLevel::parse(&flag.level).unwrap(), FlagLevel::Avoid);
    }
}
