//! Keyword-driven reply resolution.
//!
//! A [`ReplyResolver`] holds an ordered list of [`ReplyRule`]s. The incoming
//! message is lowercased once and tested against each rule in order; the
//! first rule whose keyword occurs anywhere in the text wins. Matching is
//! plain substring containment, so "password" hits the `word` rule and
//! "goodbye" hits the `bye` rule.

use preschool_shared::constants::{FILES_MOUNT, VIDEOS_MOUNT};

/// Reply sent when no rule matches.
pub const FALLBACK_REPLY: &str = "Sorry, I didn’t understand that. Try again.";

/// A single `(keyword, reply)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRule {
    keyword: String,
    reply: String,
}

impl ReplyRule {
    /// The keyword is stored lowercased so it can be compared against the
    /// lowercased message directly.
    pub fn new(keyword: impl AsRef<str>, reply: impl Into<String>) -> Self {
        Self {
            keyword: keyword.as_ref().to_lowercase(),
            reply: reply.into(),
        }
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    /// `normalized` must already be lowercase.
    pub fn matches(&self, normalized: &str) -> bool {
        normalized.contains(self.keyword.as_str())
    }
}

/// First-match-wins rule table with a fixed fallback.
#[derive(Debug, Clone)]
pub struct ReplyResolver {
    rules: Vec<ReplyRule>,
    fallback: String,
}

impl ReplyResolver {
    pub fn new(rules: Vec<ReplyRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// The built-in lesson assistant rules. Links to videos and documents
    /// are rooted at `base_url`, which must not end with a slash.
    pub fn canned(base_url: &str) -> Self {
        let rules = vec![
            ReplyRule::new("hello", "Hello! How can I help you today?"),
            ReplyRule::new("math", "Great choice! Do you want to watch a video lesson?"),
            ReplyRule::new(
                "video",
                format!("Here’s your lesson video: {base_url}{VIDEOS_MOUNT}/lesson1.mp4"),
            ),
            ReplyRule::new(
                "pdf",
                format!("Here’s your PDF: {base_url}{FILES_MOUNT}/sample.pdf"),
            ),
            ReplyRule::new(
                "word",
                format!("Here’s your Word file: {base_url}{FILES_MOUNT}/sample.docx"),
            ),
            ReplyRule::new("bye", "Goodbye! Have a nice day!"),
        ];
        Self::new(rules, FALLBACK_REPLY)
    }

    pub fn rules(&self) -> &[ReplyRule] {
        &self.rules
    }

    /// Resolve a message to exactly one reply. An absent message behaves
    /// like an empty one and falls through to the fallback.
    pub fn resolve(&self, message: Option<&str>) -> &str {
        let normalized = message.unwrap_or("").to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(ReplyRule::reply)
            .unwrap_or(self.fallback.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://10.0.2.2:5000";

    fn resolver() -> ReplyResolver {
        ReplyResolver::canned(BASE)
    }

    #[test]
    fn test_hello_is_case_insensitive() {
        let r = resolver();
        assert_eq!(r.resolve(Some("HeLLo there")), "Hello! How can I help you today?");
        assert_eq!(r.resolve(Some("say hello")), "Hello! How can I help you today?");
    }

    #[test]
    fn test_hello_wins_over_lower_priority_rules() {
        assert_eq!(
            resolver().resolve(Some("hello, send me the math video and bye")),
            "Hello! How can I help you today?"
        );
    }

    #[test]
    fn test_pdf_request() {
        assert_eq!(
            resolver().resolve(Some("Can I get the PDF?")),
            "Here’s your PDF: http://10.0.2.2:5000/files/sample.pdf"
        );
    }

    #[test]
    fn test_video_reply_points_at_mount() {
        assert_eq!(
            resolver().resolve(Some("Show me a VIDEO")),
            "Here’s your lesson video: http://10.0.2.2:5000/videos/lesson1.mp4"
        );
    }

    #[test]
    fn test_math_before_video() {
        assert_eq!(
            resolver().resolve(Some("math video please")),
            "Great choice! Do you want to watch a video lesson?"
        );
    }

    #[test]
    fn test_each_rule_beats_the_next() {
        let r = resolver();
        let cases = [
            ("hello, any math?", "Hello! How can I help you today?"),
            ("math video", "Great choice! Do you want to watch a video lesson?"),
            (
                "video pdf",
                "Here’s your lesson video: http://10.0.2.2:5000/videos/lesson1.mp4",
            ),
            ("pdf or word", "Here’s your PDF: http://10.0.2.2:5000/files/sample.pdf"),
            (
                "word, bye",
                "Here’s your Word file: http://10.0.2.2:5000/files/sample.docx",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(r.resolve(Some(input)), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_substring_matching() {
        let r = resolver();
        assert_eq!(r.resolve(Some("goodbye")), "Goodbye! Have a nice day!");
        assert_eq!(
            r.resolve(Some("I forgot my password")),
            "Here’s your Word file: http://10.0.2.2:5000/files/sample.docx"
        );
    }

    #[test]
    fn test_fallback() {
        let r = resolver();
        assert_eq!(r.resolve(Some("")), FALLBACK_REPLY);
        assert_eq!(r.resolve(None), FALLBACK_REPLY);
        assert_eq!(r.resolve(Some("what is science?")), FALLBACK_REPLY);
    }

    #[test]
    fn test_custom_rules_keep_order() {
        let r = ReplyResolver::new(
            vec![ReplyRule::new("Cat", "meow"), ReplyRule::new("at", "at!")],
            "?",
        );
        assert!(r.rules()[0].matches("cat"));
        assert_eq!(r.resolve(Some("CATS")), "meow");
        assert_eq!(r.resolve(Some("hat")), "at!");
        assert_eq!(r.resolve(Some("dog")), "?");
    }
}
