//! Splitting message text into inert runs and actionable link tokens.
//!
//! Text is cut into alternating whitespace and non-whitespace runs. Only
//! non-whitespace runs can become links, and only when the active
//! [`LinkClassifier`] accepts them. Segments borrow from the source text and
//! concatenate back to it byte-for-byte.

use preschool_shared::types::Message;

use crate::links::LinkTarget;

/// Decides whether a non-whitespace run should be rendered as a link.
pub trait LinkClassifier {
    fn is_link_token(&self, token: &str) -> bool;
}

/// Accepts any run with a `.` that has at least one character on each side
/// ("lesson1.mp4", "http://host/a.pdf", and also "e.g.").
#[derive(Debug, Clone, Copy, Default)]
pub struct DottedTokenClassifier;

impl LinkClassifier for DottedTokenClassifier {
    fn is_link_token(&self, token: &str) -> bool {
        token
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < token.len())
    }
}

impl<F> LinkClassifier for F
where
    F: Fn(&str) -> bool,
{
    fn is_link_token(&self, token: &str) -> bool {
        self(token)
    }
}

/// A link-shaped run of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkToken<'a>(&'a str);

impl<'a> LinkToken<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Where activating this token leads.
    pub fn target(&self) -> LinkTarget {
        LinkTarget::from_token(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link(LinkToken<'a>),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Text(s) => *s,
            Segment::Link(token) => token.as_str(),
        }
    }

    pub fn as_link(&self) -> Option<&LinkToken<'a>> {
        match self {
            Segment::Link(token) => Some(token),
            Segment::Text(_) => None,
        }
    }
}

/// Separator set of message text: Unicode `White_Space` plus U+FEFF, minus
/// U+0085 (NEL), the same set JavaScript's `\s` uses.
pub fn is_separator(c: char) -> bool {
    c == '\u{FEFF}' || (c != '\u{0085}' && c.is_whitespace())
}

/// Iterate maximal runs of separator / non-separator characters.
/// Yields `(is_separator, run)`.
pub fn runs(text: &str) -> impl Iterator<Item = (bool, &str)> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let ws = is_separator(first);
        let end = rest
            .char_indices()
            .find(|(_, c)| is_separator(*c) != ws)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some((ws, run))
    })
}

pub fn segment_with<'a>(text: &'a str, classifier: &impl LinkClassifier) -> Vec<Segment<'a>> {
    runs(text)
        .map(|(ws, run)| {
            if !ws && classifier.is_link_token(run) {
                Segment::Link(LinkToken(run))
            } else {
                Segment::Text(run)
            }
        })
        .collect()
}

pub fn segment(text: &str) -> Vec<Segment<'_>> {
    segment_with(text, &DottedTokenClassifier)
}

/// A message paired with its display segments.
#[derive(Debug, Clone)]
pub struct RenderedMessage<'a> {
    pub message: &'a Message,
    pub segments: Vec<Segment<'a>>,
}

impl<'a> RenderedMessage<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self::with_classifier(message, &DottedTokenClassifier)
    }

    pub fn with_classifier(message: &'a Message, classifier: &impl LinkClassifier) -> Self {
        Self {
            message,
            segments: segment_with(&message.text, classifier),
        }
    }

    /// Link tokens in display order.
    pub fn links(&self) -> impl Iterator<Item = &LinkToken<'a>> + '_ {
        self.segments.iter().filter_map(Segment::as_link)
    }
}
