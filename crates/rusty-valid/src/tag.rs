//! Rule annotation parsing
//!
//! An annotation is a compact rule list attached to a field:
//!
//! ```text
//! annotation := rule (';' rule)*
//! rule       := name | name '~' argument
//! ```
//!
//! e.g. `required;range~1:50;enum~5,10,15`. There is no escaping: a `;` inside an
//! argument ends it, and the annotation `-` marks a field that is never validated.
//! Parsing is pure and does not check rule names against any registry.

use std::fmt;

/// Annotation that switches validation off for a field
pub const SKIP: &str = "-";

/// A single parsed rule, borrowing from the annotation it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule<'a> {
    pub name: &'a str,
    /// Zero or one raw argument; composite arguments are split by the evaluator
    pub args: Vec<&'a str>,
}

impl<'a> Rule<'a> {
    /// Rule without an argument (`required`)
    pub fn bare(name: &'a str) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    /// Rule with one argument (`range~1:50`)
    pub fn with_arg(name: &'a str, arg: &'a str) -> Self {
        Self {
            name,
            args: vec![arg],
        }
    }
}

impl fmt::Display for Rule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        for arg in &self.args {
            write!(f, "~{}", arg)?;
        }
        Ok(())
    }
}

/// Scan state accumulated while walking the annotation once, left to right
struct ScanState<'a> {
    source: &'a str,
    /// Offset where the current name or argument starts
    start: usize,
    /// Name captured by a `~`, waiting for its argument
    pending: Option<&'a str>,
    rules: Vec<Rule<'a>>,
}

impl<'a> ScanState<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            pending: None,
            rules: Vec::new(),
        }
    }

    /// Handles a `;` at byte offset `at`
    fn close_rule(&mut self, at: usize) {
        let source = self.source;
        let text = &source[self.start..at];
        let rule = match self.pending.take() {
            Some(name) => Rule::with_arg(name, text),
            None => Rule::bare(text),
        };
        self.rules.push(rule);
        self.start = at + 1;
    }

    /// Handles a `~` at byte offset `at`; inside an argument it is plain text
    fn open_argument(&mut self, at: usize) {
        if self.pending.is_none() {
            let source = self.source;
            self.pending = Some(&source[self.start..at]);
            self.start = at + 1;
        }
    }

    /// Finalizes the segment after the last `;`
    fn finish(mut self) -> Vec<Rule<'a>> {
        let source = self.source;
        let tail = &source[self.start..];
        match self.pending.take() {
            Some(name) => self.rules.push(Rule::with_arg(name, tail)),
            // A trailing ';' leaves nothing behind
            None if !tail.is_empty() => self.rules.push(Rule::bare(tail)),
            None => {}
        }
        self.rules
    }
}

/// Parses an annotation into its ordered rule list
///
/// An empty annotation yields no rules. Unknown names are kept; they are resolved
/// (or skipped) only when the engine dispatches them.
pub fn parse(annotation: &str) -> Vec<Rule<'_>> {
    if annotation.is_empty() {
        return Vec::new();
    }

    // ';' and '~' are ASCII, so byte offsets are always char boundaries
    annotation
        .bytes()
        .enumerate()
        .fold(ScanState::new(annotation), |mut state, (at, byte)| {
            match byte {
                b';' => state.close_rule(at),
                b'~' => state.open_argument(at),
                _ => {}
            }
            state
        })
        .finish()
}

/// Whether the annotation is the skip sentinel
pub fn is_skip(annotation: &str) -> bool {
    annotation == SKIP
}

/// Renders rules back into annotation syntax
pub fn render(rules: &[Rule<'_>]) -> String {
    rules
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_empty_annotation() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_bare_rule() {
        assert_eq!(parse("required"), vec![Rule::bare("required")]);
    }

    #[test]
    fn test_rule_with_argument() {
        assert_eq!(parse("range~1:50"), vec![Rule::with_arg("range", "1:50")]);
    }

    #[test]
    fn test_mixed_rules() {
        assert_eq!(
            parse("a;b~x;c"),
            vec![Rule::bare("a"), Rule::with_arg("b", "x"), Rule::bare("c")]
        );
    }

    #[rstest]
    #[case("required;")]
    #[case("required")]
    fn test_trailing_separator_is_ignored(#[case] annotation: &str) {
        assert_eq!(parse(annotation), vec![Rule::bare("required")]);
    }

    #[test]
    fn test_trailing_separator_after_argument() {
        assert_eq!(
            parse("min~5;max~10;"),
            vec![Rule::with_arg("min", "5"), Rule::with_arg("max", "10")]
        );
    }

    #[test]
    fn test_tilde_inside_argument_is_text() {
        assert_eq!(parse("rx~a~b"), vec![Rule::with_arg("rx", "a~b")]);
    }

    #[test]
    fn test_semicolon_inside_argument_splits_it() {
        // No escaping exists, so the regex is cut short and "b" becomes a rule name
        assert_eq!(
            parse("rx~a;b"),
            vec![Rule::with_arg("rx", "a"), Rule::bare("b")]
        );
    }

    #[test]
    fn test_empty_argument() {
        assert_eq!(parse("digit~"), vec![Rule::with_arg("digit", "")]);
        assert_eq!(
            parse("digit~;required"),
            vec![Rule::with_arg("digit", ""), Rule::bare("required")]
        );
    }

    #[test]
    fn test_repeated_rules_stay_separate() {
        assert_eq!(
            parse(r"rx~^\d+$;rx~[0-8]+"),
            vec![Rule::with_arg("rx", r"^\d+$"), Rule::with_arg("rx", "[0-8]+")]
        );
    }

    #[test]
    fn test_unicode_arguments() {
        assert_eq!(
            parse("enum~été,hiver;required"),
            vec![Rule::with_arg("enum", "été,hiver"), Rule::bare("required")]
        );
    }

    #[test]
    fn test_many_rules_grow_the_buffer() {
        let annotation = (0..20).map(|i| format!("r{}~{}", i, i)).collect::<Vec<_>>().join(";");
        let rules = parse(&annotation);
        assert_eq!(rules.len(), 20);
        assert_eq!(rules[19], Rule::with_arg("r19", "19"));
    }

    #[test]
    fn test_skip_sentinel() {
        assert!(is_skip("-"));
        assert!(!is_skip("-;required"));
        assert!(!is_skip(""));
    }

    #[rstest]
    #[case("required")]
    #[case("range~1:50")]
    #[case("required;enum~5,10,15;rx~^[a-z]+$")]
    #[case("a;b~x;c")]
    fn test_render_round_trip(#[case] annotation: &str) {
        let rules = parse(annotation);
        let rendered = render(&rules);
        assert_eq!(rendered, annotation);
        assert_eq!(parse(&rendered), rules);
    }
}
