//! Front matter splitting
//!
//! A definition file starts with a `---` line, carries YAML up to the next
//! `---` line, and continues with the markdown body.

const FENCE: &str = "---";

/// Split a document into (front matter, body)
///
/// Returns `None` for the front matter when the document has no opening
/// fence or the fence is never closed; the whole text is then the body.
pub fn split(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(rest) = strip_fence_line(text) else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, text)
}

/// Strip the opening `---` line, including its line ending
fn strip_fence_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(FENCE)?;
    let (line, tail) = match rest.find('\n') {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => (rest, ""),
    };
    line.trim().is_empty().then_some(tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_front_matter() {
        let doc = "---\ntitle: Ally\nslug: ally\n---\n\nSomeone who supports.\n";
        let (yaml, body) = split(doc);
        assert_eq!(yaml, Some("title: Ally\nslug: ally\n"));
        assert_eq!(body, "\nSomeone who supports.\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = "---\r\ntitle: Ally\r\n---\r\nBody\r\n";
        let (yaml, body) = split(doc);
        assert_eq!(yaml, Some("title: Ally\r\n"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_no_front_matter() {
        let doc = "# Just markdown\n";
        assert_eq!(split(doc), (None, doc));
    }

    #[test]
    fn test_unclosed_fence() {
        let doc = "---\ntitle: Ally\nno closing fence";
        assert_eq!(split(doc), (None, doc));
    }

    #[test]
    fn test_thematic_break_is_not_a_fence() {
        let doc = "----\ntitle: x\n---\n";
        assert_eq!(split(doc).0, None);
    }

    #[test]
    fn test_empty_front_matter() {
        let (yaml, body) = split("---\n---\nBody");
        assert_eq!(yaml, Some(""));
        assert_eq!(body, "Body");
    }
}
