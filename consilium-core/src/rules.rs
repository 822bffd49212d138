//! Generic keyword rule table shared by all expert domains.
//!
//! A table is an ordered list of `(category, pattern, answer)` rules plus a
//! `general` fallback answer. Classification walks the rules in order and the
//! first pattern that matches the (already lower-cased) query wins. There is
//! no scoring: order is the only tie-breaker, so a query mentioning both a bug
//! and a refactor lands on whichever rule is listed first.

use regex::Regex;
use tracing::warn;

use crate::types::{Confidence, Priority};

/// Category name used when no rule matches.
pub const GENERAL_CATEGORY: &str = "general";

/// A canned answer: the only "knowledge" an expert has.
#[derive(Debug, Clone, Copy)]
pub struct CannedAnswer {
    pub priority: Priority,
    pub confidence: Confidence,
    pub insight: &'static str,
    pub actions: &'static [&'static str],
    pub risks: &'static [&'static str],
}

/// One entry of a rule table, as written in the per-domain data modules.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: &'static str,
    pub pattern: &'static str,
    pub answer: CannedAnswer,
}

/// The answer a table produced for a query, together with the category that fired.
#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub category: &'static str,
    pub answer: &'static CannedAnswer,
}

/// A compiled rule table.
pub struct RuleTable {
    rules: Vec<(Regex, &'static Rule)>,
    general: &'static CannedAnswer,
}

impl RuleTable {
    /// Compile a table. Rules whose pattern does not compile are skipped.
    pub fn compile(rules: &'static [Rule], general: &'static CannedAnswer) -> Self {
        let rules = rules
            .iter()
            .filter_map(|rule| match Regex::new(rule.pattern) {
                Ok(re) => Some((re, rule)),
                Err(e) => {
                    warn!(category = rule.category, error = %e, "Skipping rule with invalid pattern");
                    None
                }
            })
            .collect();
        Self { rules, general }
    }

    /// Classify a lower-cased query. Always returns an answer.
    pub fn classify(&self, query: &str) -> Classification {
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(query))
            .map(|&(_, rule)| Classification {
                category: rule.category,
                answer: &rule.answer,
            })
            .unwrap_or(Classification {
                category: GENERAL_CATEGORY,
                answer: self.general,
            })
    }

    /// Category names in evaluation order, `general` last.
    pub fn categories(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .map(|&(_, rule)| rule.category)
            .chain(std::iter::once(GENERAL_CATEGORY))
            .collect()
    }

    /// Number of compiled rules, not counting the fallback.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static GENERAL: CannedAnswer = CannedAnswer {
        priority: Priority::Low,
        confidence: Confidence::Low,
        insight: "general",
        actions: &["Clarify the request"],
        risks: &["Misunderstood requirements"],
    };

    static RULES: &[Rule] = &[
        Rule {
            category: "bug",
            pattern: r"bug|broken",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::High,
                insight: "bug",
                actions: &["Reproduce the bug"],
                risks: &["Regression"],
            },
        },
        Rule {
            category: "invalid",
            pattern: r"(unclosed",
            answer: CannedAnswer {
                priority: Priority::Low,
                confidence: Confidence::Low,
                insight: "never compiled",
                actions: &["n/a"],
                risks: &["n/a"],
            },
        },
        Rule {
            category: "refactor",
            pattern: r"refactor",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::Medium,
                insight: "refactor",
                actions: &["Add characterization tests"],
                risks: &["Behavior drift"],
            },
        },
    ];

    #[test]
    fn test_first_matching_rule_wins() {
        let table = RuleTable::compile(RULES, &GENERAL);
        let hit = table.classify("refactor the module that has a bug");
        assert_eq!(hit.category, "bug");
        assert_eq!(hit.answer.priority, Priority::High);
    }

    #[test]
    fn test_no_match_falls_back_to_general() {
        let table = RuleTable::compile(RULES, &GENERAL);
        let hit = table.classify("hello there");
        assert_eq!(hit.category, GENERAL_CATEGORY);
        assert_eq!(hit.answer.insight, "general");
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let table = RuleTable::compile(RULES, &GENERAL);
        assert_eq!(table.len(), 2);
        assert_eq!(table.categories(), vec!["bug", "refactor", "general"]);
    }
}
