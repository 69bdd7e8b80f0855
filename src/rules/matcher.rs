//! Match evaluation: testing a record against a rule's assertion list.

use crate::config::CompiledRule;
use crate::record::Record;

/// Result of evaluating one rule against one record.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// True when every assertion was satisfied.
    pub matched: bool,
    /// One `"field:matched-text"` entry per satisfied assertion, in
    /// assertion order.
    pub summary: Vec<String>,
}

/// Evaluate a rule's assertions against a record.
///
/// Each assertion scans its fields in order and stops at the first field
/// present in the record whose value matches the pattern; that field
/// contributes a `"field:matched-text"` summary entry. A field that is
/// present but does not match does not stop the scan. An assertion with no
/// matching field contributes nothing, which makes the whole rule fail.
///
/// A rule with zero assertions is trivially matched with an empty summary.
pub fn evaluate(record: &Record, rule: &CompiledRule) -> MatchOutcome {
    let mut summary = Vec::new();

    for assertion in &rule.assertions {
        for field in &assertion.fields {
            if let Some(value) = record.get(field) {
                if let Some(found) = assertion.regex.find(value) {
                    summary.push(format!("{}:{}", field, found.as_str()));
                    break;
                }
            }
        }
    }

    MatchOutcome {
        matched: summary.len() >= rule.assertions.len(),
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompiledRule, Rule, RuleAction};

    fn compile(rule: Rule) -> CompiledRule {
        CompiledRule::compile(&rule).unwrap()
    }

    #[test]
    fn test_single_assertion_match() {
        let record = Record::from_pairs([("msg", "ERROR: disk full")]);
        let rule = compile(Rule::new("r", RuleAction::Pipe).with_assertion(&["msg"], "ERROR"));

        let outcome = evaluate(&record, &rule);
        assert!(outcome.matched);
        assert_eq!(outcome.summary, vec!["msg:ERROR"]);
    }

    #[test]
    fn test_all_assertions_required() {
        let record = Record::from_pairs([("msg", "ERROR"), ("level", "info")]);
        let rule = compile(
            Rule::new("r", RuleAction::Pipe)
                .with_assertion(&["msg"], "ERROR")
                .with_assertion(&["level"], "warn"),
        );

        let outcome = evaluate(&record, &rule);
        assert!(!outcome.matched);
        assert_eq!(outcome.summary, vec!["msg:ERROR"]);
    }

    #[test]
    fn test_first_matching_field_wins() {
        let record = Record::from_pairs([("a", "ERROR one"), ("b", "ERROR two")]);
        let rule = compile(Rule::new("r", RuleAction::Pipe).with_assertion(&["a", "b"], "ERROR"));

        let outcome = evaluate(&record, &rule);
        assert_eq!(outcome.summary, vec!["a:ERROR"]);
    }

    #[test]
    fn test_non_matching_field_does_not_stop_scan() {
        let record = Record::from_pairs([("a", "clean"), ("b", "ERROR here")]);
        let rule = compile(Rule::new("r", RuleAction::Pipe).with_assertion(&["a", "b"], "ERROR"));

        let outcome = evaluate(&record, &rule);
        assert!(outcome.matched);
        assert_eq!(outcome.summary, vec!["b:ERROR"]);
    }

    #[test]
    fn test_absent_field_skipped() {
        let record = Record::from_pairs([("b", "ERROR")]);
        let rule = compile(Rule::new("r", RuleAction::Pipe).with_assertion(&["a", "b"], "ERROR"));

        let outcome = evaluate(&record, &rule);
        assert!(outcome.matched);
        assert_eq!(outcome.summary, vec!["b:ERROR"]);
    }

    #[test]
    fn test_zero_assertions_trivially_matched() {
        let record = Record::from_pairs([("msg", "anything")]);
        let rule = compile(Rule::new("r", RuleAction::Pipe));

        let outcome = evaluate(&record, &rule);
        assert!(outcome.matched);
        assert!(outcome.summary.is_empty());
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let record = Record::from_pairs([("msg", "error: oops")]);
        let rule = compile(Rule::new("r", RuleAction::Pipe).with_assertion(&["msg"], "ERROR"));

        let outcome = evaluate(&record, &rule);
        assert!(outcome.matched);
        // Summary carries the text as it appears in the record.
        assert_eq!(outcome.summary, vec!["msg:error"]);
    }

    #[test]
    fn test_summary_preserves_assertion_order() {
        let record = Record::from_pairs([("a", "one"), ("b", "two")]);
        let rule = compile(
            Rule::new("r", RuleAction::Pipe)
                .with_assertion(&["b"], "two")
                .with_assertion(&["a"], "one"),
        );

        let outcome = evaluate(&record, &rule);
        assert_eq!(outcome.summary, vec!["b:two", "a:one"]);
    }
}
