//! Document token representation consumed and produced by the annotator.
//!
//! The core does not parse Markdown itself; it operates on a typed token
//! sequence produced by an upstream tokenizer (see
//! [`markdown`](crate::markdown) for the pulldown-cmark adapter). Output
//! sequences have the same shape as input, except that some `Text` tokens
//! are replaced by runs of `[Text, Annotation, Text, ...]`.

/// One tagged token in a document pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Plain prose text, eligible for annotation outside protected regions.
    Text(String),
    /// An inline code span. Never annotated; content passes through
    /// character-for-character.
    CodeInline(String),
    /// An indented or fenced code block. Never annotated.
    CodeBlock(String),
    /// Raw markup (e.g. an HTML comment). Never annotated, but its content
    /// is scanned for ignore directives.
    RawMarkup(String),
    /// Start of a link. Text until the matching [`Token::LinkClose`] is not
    /// eligible for annotation.
    LinkOpen,
    /// End of a link.
    LinkClose,
    /// A term annotation emitted in place of a matched span.
    Annotation(TermAnnotation),
}

/// The payload of an annotation token. The consumer renders these four
/// fields into whatever markup its UI layer uses; the core treats them as
/// opaque output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermAnnotation {
    /// Localized display form of the term.
    pub display: String,
    /// Original-language source form, as written in the glossary (not the
    /// matched slice, which may differ in case).
    pub source: String,
    /// Human-readable definition.
    pub definition: String,
    /// True for the first occurrence of this term id within the current
    /// tracker scope (always false when first-occurrence marking is off).
    pub is_first: bool,
}
