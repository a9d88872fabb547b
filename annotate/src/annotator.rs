//! The annotation orchestrator: one pass over a document token sequence.

use std::collections::HashSet;

use glossa_terms::TermDictionary;

use crate::classify::{IgnoreDirectives, ScanState};
use crate::pattern::TermPattern;
use crate::token::{TermAnnotation, Token};

/// Configuration recognized by the annotator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateOptions {
    /// When true (the default), the first occurrence of each term id within
    /// a tracker scope carries `is_first = true`; when false, `is_first` is
    /// always false.
    pub mark_first_occurrence: bool,
    /// The directive pair delimiting ignored regions in raw markup.
    pub ignore_directives: IgnoreDirectives,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            mark_first_occurrence: true,
            ignore_directives: IgnoreDirectives::default(),
        }
    }
}

/// Which term ids have already been annotated within one scope.
///
/// The scope boundary is the caller's choice: create a fresh tracker per
/// document for per-page "first occurrence" semantics, or reuse one across
/// documents for build-wide semantics. Never shared between concurrent
/// passes.
#[derive(Debug, Default)]
pub struct OccurrenceTracker {
    seen: HashSet<String>,
}

impl OccurrenceTracker {
    /// A tracker with no terms seen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the id as seen and returns true if this was its first use in
    /// this scope.
    pub fn first_use(&mut self, id: &str) -> bool {
        self.seen.insert(id.to_string())
    }

    /// True if the id has already been annotated in this scope.
    #[must_use]
    pub fn has_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }
}

/// One resolved term occurrence within a text token. Ephemeral: lives only
/// for the duration of a single [`TermAnnotator::annotate_text`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    /// Byte offset of the match start within the text token.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    /// The canonical term id the matched slice resolved to.
    pub id: String,
    /// Whether this is the first occurrence of the id in the tracker scope.
    pub is_first: bool,
}

/// The assembled pipeline: validated dictionary, compiled pattern, and
/// options. Immutable after construction; one instance serves any number
/// of concurrent document passes.
#[derive(Debug)]
pub struct TermAnnotator {
    dict: TermDictionary,
    pattern: TermPattern,
    options: AnnotateOptions,
}

impl TermAnnotator {
    /// Builds the pipeline from a validated dictionary.
    ///
    /// # Errors
    ///
    /// Returns a [`regex::Error`] if the term pattern fails to compile.
    pub fn new(dict: TermDictionary, options: AnnotateOptions) -> Result<Self, regex::Error> {
        let pattern = TermPattern::compile(&dict)?;
        Ok(Self {
            dict,
            pattern,
            options,
        })
    }

    /// The dictionary this annotator was built from.
    #[must_use]
    pub fn dictionary(&self) -> &TermDictionary {
        &self.dict
    }

    /// The compiled term pattern.
    #[must_use]
    pub fn pattern(&self) -> &TermPattern {
        &self.pattern
    }

    /// The configuration in effect.
    #[must_use]
    pub fn options(&self) -> &AnnotateOptions {
        &self.options
    }

    /// Annotates one document token sequence.
    ///
    /// Code tokens pass through verbatim regardless of state. Raw markup is
    /// scanned for ignore directives, then passed through. Link open/close
    /// tokens adjust the link depth and pass through. Text tokens are
    /// annotated only when the classifier reports them eligible; a text
    /// token with zero matches is returned as the identical value, not a
    /// rebuilt equivalent.
    #[must_use]
    pub fn annotate_tokens(
        &self,
        tokens: Vec<Token>,
        tracker: &mut OccurrenceTracker,
    ) -> Vec<Token> {
        let mut state = ScanState::new();
        let mut out = Vec::with_capacity(tokens.len());

        for token in tokens {
            match token {
                Token::RawMarkup(content) => {
                    state.observe_raw_markup(&content, &self.options.ignore_directives);
                    out.push(Token::RawMarkup(content));
                }
                Token::LinkOpen => {
                    state.enter_link();
                    out.push(Token::LinkOpen);
                }
                Token::LinkClose => {
                    state.leave_link();
                    out.push(Token::LinkClose);
                }
                Token::Text(content) => {
                    if state.eligible() {
                        match self.annotate_text(&content, tracker) {
                            Some(run) => out.extend(run),
                            None => out.push(Token::Text(content)),
                        }
                    } else {
                        out.push(Token::Text(content));
                    }
                }
                // Code and pre-existing annotation tokens pass through
                // untouched.
                other => out.push(other),
            }
        }

        out
    }

    /// Annotates one text token's content.
    ///
    /// Returns `None` when the text contains no term occurrences, so the
    /// caller can keep the original token. Otherwise returns the
    /// replacement run: unmatched text before each match, an annotation
    /// token per match, and any trailing unmatched text.
    #[must_use]
    pub fn annotate_text(
        &self,
        content: &str,
        tracker: &mut OccurrenceTracker,
    ) -> Option<Vec<Token>> {
        let spans = self.match_spans(content, tracker);
        if spans.is_empty() {
            return None;
        }

        let mut out = Vec::with_capacity(spans.len() * 2 + 1);
        let mut consumed = 0;
        for span in spans {
            // The pattern and the lookup are derived from the same
            // dictionary, so a miss here indicates a logic defect; degrade
            // to plain text rather than fail the pass.
            let record = match self.dict.get(&span.id) {
                Some(record) => record,
                None => continue,
            };
            if span.start > consumed {
                out.push(Token::Text(content[consumed..span.start].to_string()));
            }
            out.push(Token::Annotation(TermAnnotation {
                display: record.display.clone(),
                source: record.source.clone(),
                definition: record.definition.clone(),
                is_first: span.is_first,
            }));
            consumed = span.end;
        }

        if out.is_empty() {
            return None;
        }
        if consumed < content.len() {
            out.push(Token::Text(content[consumed..].to_string()));
        }
        Some(out)
    }

    /// Resolves raw pattern matches into [`MatchSpan`]s, deciding the
    /// first-occurrence flag per match in document order. Matches that
    /// cannot be resolved to a dictionary id are dropped; their text stays
    /// plain.
    fn match_spans(&self, content: &str, tracker: &mut OccurrenceTracker) -> Vec<MatchSpan> {
        let mut spans = Vec::new();
        for range in self.pattern.match_ranges(content) {
            let id = match self.pattern.resolve(&content[range.clone()]) {
                Some(id) => id.to_string(),
                None => continue,
            };
            let is_first = if self.options.mark_first_occurrence {
                tracker.first_use(&id)
            } else {
                false
            };
            spans.push(MatchSpan {
                start: range.start,
                end: range.end,
                id,
                is_first,
            });
        }
        spans
    }
}
