//! Region classification: which spans of a document pass are eligible for
//! term annotation.
//!
//! Two small saturating counters decide eligibility. `ignore_depth` tracks
//! nested ignore-directive regions found in raw markup; `link_depth`
//! tracks link nesting so no annotation is ever injected inside a link's
//! visible label. Code tokens are excluded unconditionally by the
//! annotator and never reach this state machine.

/// The pair of raw-markup directives delimiting an ignored region.
///
/// An open directive (not yet closed) increments the ignore depth; a close
/// directive decrements it, floored at zero. Open and close may live in
/// different raw-markup tokens; depth persists across tokens within one
/// document pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreDirectives {
    /// Directive string that opens an ignored region.
    pub start: String,
    /// Directive string that closes an ignored region.
    pub end: String,
}

impl Default for IgnoreDirectives {
    fn default() -> Self {
        Self {
            start: "<!-- glossa:ignore-start -->".to_string(),
            end: "<!-- glossa:ignore-end -->".to_string(),
        }
    }
}

/// Mutable classifier state for one document pass.
///
/// Created fresh at the start of a pass and discarded at its end; never
/// shared between passes.
#[derive(Debug, Default)]
pub struct ScanState {
    ignore_depth: usize,
    link_depth: usize,
}

impl ScanState {
    /// Fresh state: no open ignore regions, no open links.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans one raw-markup token's content for ignore directives, left to
    /// right, updating the ignore depth for every occurrence found.
    pub fn observe_raw_markup(&mut self, content: &str, directives: &IgnoreDirectives) {
        if directives.start.is_empty() || directives.end.is_empty() {
            return;
        }

        let mut cursor = 0;
        while cursor < content.len() {
            let rest = &content[cursor..];
            let start_idx = rest.find(&directives.start).map(|i| i + cursor);
            let end_idx = rest.find(&directives.end).map(|i| i + cursor);

            match (start_idx, end_idx) {
                (Some(s), Some(e)) if s < e => {
                    self.ignore_depth += 1;
                    cursor = s + directives.start.len();
                }
                (Some(s), None) => {
                    self.ignore_depth += 1;
                    cursor = s + directives.start.len();
                }
                (_, Some(e)) => {
                    self.ignore_depth = self.ignore_depth.saturating_sub(1);
                    cursor = e + directives.end.len();
                }
                (None, None) => break,
            }
        }
    }

    /// Records entry into a link.
    pub fn enter_link(&mut self) {
        self.link_depth += 1;
    }

    /// Records leaving a link, floored at zero for unbalanced input.
    pub fn leave_link(&mut self) {
        self.link_depth = self.link_depth.saturating_sub(1);
    }

    /// True when plain text at this point may be annotated: no open ignore
    /// region and no enclosing link.
    #[must_use]
    pub fn eligible(&self) -> bool {
        self.ignore_depth == 0 && self.link_depth == 0
    }

    /// Current ignore-directive nesting depth.
    #[must_use]
    pub fn ignore_depth(&self) -> usize {
        self.ignore_depth
    }

    /// Current link nesting depth.
    #[must_use]
    pub fn link_depth(&self) -> usize {
        self.link_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_eligible() {
        assert!(ScanState::new().eligible());
    }

    #[test]
    fn directive_pair_opens_and_closes() {
        let directives = IgnoreDirectives::default();
        let mut state = ScanState::new();
        state.observe_raw_markup("<!-- glossa:ignore-start -->", &directives);
        assert_eq!(state.ignore_depth(), 1);
        assert!(!state.eligible());
        state.observe_raw_markup("<!-- glossa:ignore-end -->", &directives);
        assert!(state.eligible());
    }

    #[test]
    fn multiple_directives_in_one_token() {
        let directives = IgnoreDirectives::default();
        let mut state = ScanState::new();
        state.observe_raw_markup(
            "<!-- glossa:ignore-start --><p>x</p><!-- glossa:ignore-start -->",
            &directives,
        );
        assert_eq!(state.ignore_depth(), 2);
        state.observe_raw_markup(
            "<!-- glossa:ignore-end --><!-- glossa:ignore-end -->",
            &directives,
        );
        assert_eq!(state.ignore_depth(), 0);
    }

    #[test]
    fn close_before_open_in_same_token() {
        let directives = IgnoreDirectives::default();
        let mut state = ScanState::new();
        state.observe_raw_markup("<!-- glossa:ignore-start -->", &directives);
        state.observe_raw_markup(
            "<!-- glossa:ignore-end -->text<!-- glossa:ignore-start -->",
            &directives,
        );
        assert_eq!(state.ignore_depth(), 1);
    }

    #[test]
    fn unmatched_close_saturates_at_zero() {
        let directives = IgnoreDirectives::default();
        let mut state = ScanState::new();
        state.observe_raw_markup("<!-- glossa:ignore-end -->", &directives);
        assert_eq!(state.ignore_depth(), 0);
        assert!(state.eligible());
    }

    #[test]
    fn empty_directive_strings_are_ignored() {
        let directives = IgnoreDirectives {
            start: String::new(),
            end: "<!-- glossa:ignore-end -->".to_string(),
        };
        let mut state = ScanState::new();
        state.observe_raw_markup("<!-- glossa:ignore-end -->", &directives);
        assert_eq!(state.ignore_depth(), 0);
    }

    #[test]
    fn link_depth_gates_eligibility_and_saturates() {
        let mut state = ScanState::new();
        state.enter_link();
        state.enter_link();
        assert!(!state.eligible());
        state.leave_link();
        assert!(!state.eligible());
        state.leave_link();
        assert!(state.eligible());
        state.leave_link();
        assert_eq!(state.link_depth(), 0);
    }
}
