//! Lexical URL extraction from task text.
//!
//! Recognises scheme-prefixed URLs and bare domains with a known TLD,
//! tolerating one level of nested parentheses. Purely lexical, no network
//! validation; duplicates are preserved in discovery order.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::task::Task;

/// TLDs accepted for bare (scheme-less) domain tokens.
const TLDS: &str = "com|net|org|edu|gov|mil|int|info|biz|name|pro|io|dev|app|\
me|co|us|uk|de|fr|nl|gr|es|it|se|no|fi|dk|pl|cz|ru|jp|cn|in|au|nz|ca|ch|at|be|pt|br|mx|ar|ie|il|tv";

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    // One body "chunk" is either a parenthesised group (one nesting level)
    // or a run of characters that cannot terminate a URL token.
    let chunk = r"(?:\([^\s()]*(?:\([^\s()]+\)[^\s()]*)*\)|[^\s()<>{}\[\]])";
    let pattern = format!(
        r"(?i)\b(?:https?://{chunk}+|[a-z0-9]+(?:[.-][a-z0-9]+)*\.(?:{TLDS})\b(?:/{chunk}*)?)"
    );
    Regex::new(&pattern).expect("url pattern compiles")
});

/// Extract every URL-shaped token from `text`, in order of appearance.
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    for m in URL_RE.find_iter(text) {
        // Domains glued to an '@' are email parts, not URLs.
        if text[..m.start()].ends_with('@') || text[m.end()..].starts_with('@') {
            continue;
        }
        let tidied = trim_trailing(m.as_str());
        if !tidied.is_empty() {
            found.push(tidied.to_string());
        }
    }
    found
}

/// URLs for a task: description first, then all annotations joined with
/// single spaces, results concatenated in that order.
pub fn task_urls(task: &Task) -> Vec<String> {
    let mut urls = extract_urls(&task.description);
    urls.extend(extract_urls(&task.annotation_text()));
    urls
}

/// Strip sentence punctuation the pattern may have swallowed. A trailing
/// `)` is only dropped while the token holds more closers than openers.
fn trim_trailing(raw: &str) -> &str {
    let mut s = raw;
    while let Some(last) = s.chars().last() {
        let drop = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '"' | '`' | '«' | '»' | '“' | '”'
            | '‘' | '’' => true,
            ')' => s.matches('(').count() < s.matches(')').count(),
            _ => false,
        };
        if !drop {
            break;
        }
        s = &s[..s.len() - last.len_utf8()];
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Annotation, TaskStatus};

    fn task_with(description: &str, annotations: &[&str]) -> Task {
        Task {
            uuid: "u".into(),
            description: description.into(),
            status: TaskStatus::Pending,
            tags: Vec::new(),
            due: None,
            urgency: None,
            annotations: annotations
                .iter()
                .map(|a| Annotation {
                    entry: None,
                    description: (*a).into(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_discovery_order_and_duplicates() {
        let urls = extract_urls("see http://a.com and http://b.com and http://a.com");
        assert_eq!(urls, vec!["http://a.com", "http://b.com", "http://a.com"]);
    }

    #[test]
    fn test_bare_domain() {
        assert_eq!(extract_urls("docs at taskwarrior.org/docs"), vec!["taskwarrior.org/docs"]);
        assert_eq!(extract_urls("ping example.com."), vec!["example.com"]);
    }

    #[test]
    fn test_email_is_not_a_url() {
        assert!(extract_urls("mail me at foo@example.com").is_empty());
    }

    #[test]
    fn test_trailing_punctuation_trimmed() {
        assert_eq!(extract_urls("visit http://a.com, then rest."), vec!["http://a.com"]);
    }

    #[test]
    fn test_nested_parentheses() {
        let urls = extract_urls("wiki (https://en.org/foo_(bar)) entry");
        assert_eq!(urls, vec!["https://en.org/foo_(bar)"]);
    }

    #[test]
    fn test_description_before_annotations() {
        let task = task_with(
            "read http://desc.com",
            &["first http://one.com", "second http://two.com"],
        );
        assert_eq!(
            task_urls(&task),
            vec!["http://desc.com", "http://one.com", "http://two.com"]
        );
    }
}
