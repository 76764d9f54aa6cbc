use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder body for messages with neither body nor snippet
pub const NO_BODY_PLACEHOLDER: &str = "No body content.";

/// Longest URL shown in full; anything longer gets a shortened label
const MAX_LABEL_CHARS: usize = 60;

/// Characters of the URL kept when the label is shortened
const SHORTENED_LABEL_CHARS: usize = 57;

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid URL regex"));

/// One span of rendered body text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BodySegment {
    /// Plain text between links
    Text { value: String },
    /// A clickable link. Renderers must open the href in a new browsing
    /// context with no back-reference to the opener. The label may be
    /// shortened; the href never is.
    Link { href: String, label: String },
}

/// Split body text into plain-text and link segments
pub fn linkify(text: &str) -> Vec<BodySegment> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut cursor = 0;

    for found in URL_REGEX.find_iter(text) {
        if found.start() > cursor {
            segments.push(BodySegment::Text {
                value: text[cursor..found.start()].to_string(),
            });
        }
        segments.push(link_segment(found.as_str()));
        cursor = found.end();
    }

    if cursor < text.len() {
        segments.push(BodySegment::Text {
            value: text[cursor..].to_string(),
        });
    }

    segments
}

fn link_segment(url: &str) -> BodySegment {
    let label = if url.chars().count() > MAX_LABEL_CHARS {
        let kept: String = url.chars().take(SHORTENED_LABEL_CHARS).collect();
        format!("{}...", kept)
    } else {
        url.to_string()
    };

    BodySegment::Link {
        href: url.to_string(),
        label,
    }
}

/// Pick the text to render for a message body
///
/// Falls back from body to snippet to the fixed placeholder. Empty strings
/// count as absent.
pub fn body_text<'a>(body: Option<&'a str>, snippet: Option<&'a str>) -> &'a str {
    body.filter(|b| !b.is_empty())
        .or_else(|| snippet.filter(|s| !s.is_empty()))
        .unwrap_or(NO_BODY_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_one_segment() {
        let segments = linkify("no links in here");
        assert_eq!(
            segments,
            vec![BodySegment::Text {
                value: "no links in here".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_text_has_no_segments() {
        assert!(linkify("").is_empty());
    }

    #[test]
    fn test_single_url_round_trips() {
        let segments = linkify("see https://example.com/page for details");
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[1],
            BodySegment::Link {
                href: "https://example.com/page".to_string(),
                label: "https://example.com/page".to_string(),
            }
        );
        match &segments[1] {
            BodySegment::Link { label, .. } => assert!(!label.ends_with("...")),
            other => panic!("expected a link, got {:?}", other),
        }
    }

    #[test]
    fn test_url_at_start_has_no_leading_text() {
        let segments = linkify("http://example.com then text");
        assert!(matches!(segments[0], BodySegment::Link { .. }));
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_two_urls_split_into_five_segments() {
        let segments = linkify("a https://one.example b https://two.example c");
        assert_eq!(segments.len(), 5);
        let links = segments
            .iter()
            .filter(|s| matches!(s, BodySegment::Link { .. }))
            .count();
        assert_eq!(links, 2);
    }

    #[test]
    fn test_long_url_label_is_shortened() {
        let url = format!("https://example.com/{}", "a".repeat(50));
        assert_eq!(url.len(), 70);

        let segments = linkify(&url);
        assert_eq!(segments.len(), 1);
        match &segments[0] {
            BodySegment::Link { href, label } => {
                assert_eq!(href, &url);
                assert_eq!(label.chars().count(), SHORTENED_LABEL_CHARS + 3);
                assert!(label.ends_with("..."));
                assert_eq!(&label[..SHORTENED_LABEL_CHARS], &url[..SHORTENED_LABEL_CHARS]);
            }
            other => panic!("expected a link, got {:?}", other),
        }
    }

    #[test]
    fn test_sixty_char_url_is_not_shortened() {
        let url = format!("https://example.com/{}", "b".repeat(40));
        assert_eq!(url.len(), 60);

        match &linkify(&url)[0] {
            BodySegment::Link { href, label } => {
                assert_eq!(href, label);
                assert_eq!(label, &url);
            }
            other => panic!("expected a link, got {:?}", other),
        }
    }

    #[test]
    fn test_segment_serializes_with_kind_tag() {
        let segment = BodySegment::Link {
            href: "https://example.com".to_string(),
            label: "https://example.com".to_string(),
        };
        let value = serde_json::to_value(&segment).unwrap();
        assert_eq!(value["kind"], "link");
        assert_eq!(value["href"], "https://example.com");
    }

    #[test]
    fn test_body_text_placeholder() {
        assert_eq!(body_text(None, None), NO_BODY_PLACEHOLDER);
        assert_eq!(body_text(Some(""), Some("snip")), "snip");
        assert_eq!(body_text(Some("body"), Some("snip")), "body");
    }
}
