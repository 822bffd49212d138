//! Deterministic string scoring used to rank actions and risks.
//!
//! A [`Scorer`] holds an ordered list of `(pattern, score)` rules; the first
//! matching pattern decides an item's score and unmatched items get
//! [`DEFAULT_SCORE`]. Ranking deduplicates by exact string equality, keeps the
//! first occurrence, and stable-sorts by descending score so ties keep their
//! encounter order.

use regex::Regex;
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::warn;

/// Score given to items no rule matches.
pub const DEFAULT_SCORE: u32 = 1;

/// Scores for plan actions.
pub const ACTION_RULES: &[(&str, u32)] = &[
    ("security|fix|patch", 10),
    ("test|verify", 9),
    ("backup|monitor|log", 8),
    ("implement|build", 7),
    ("optimize|improve", 6),
    ("document|plan|design", 5),
];

/// Scores for risks.
pub const RISK_RULES: &[(&str, u32)] = &[
    ("security|breach", 10),
    (r"data[\s_-]?loss|crash", 9),
    ("production|downtime", 8),
    ("compliance|legal", 8),
    ("performance|slow", 7),
    ("user|experience", 6),
];

/// Maximum number of actions kept in a unified plan.
pub const MAX_PLAN_ACTIONS: usize = 6;
/// Maximum number of risks kept in a synthesized response.
pub const MAX_CRITICAL_RISKS: usize = 3;

/// A compiled, case-insensitive scoring table.
pub struct Scorer {
    rules: Vec<(Regex, u32)>,
}

impl Scorer {
    pub fn compile(rules: &[(&str, u32)]) -> Self {
        let rules = rules
            .iter()
            .filter_map(|(pattern, score)| match Regex::new(&format!("(?i){pattern}")) {
                Ok(re) => Some((re, *score)),
                Err(e) => {
                    warn!(pattern, error = %e, "Skipping scoring rule with invalid pattern");
                    None
                }
            })
            .collect();
        Self { rules }
    }

    pub fn for_actions() -> Self {
        Self::compile(ACTION_RULES)
    }

    pub fn for_risks() -> Self {
        Self::compile(RISK_RULES)
    }

    /// Score of a single item: the first matching rule, else [`DEFAULT_SCORE`].
    pub fn score(&self, item: &str) -> u32 {
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(item))
            .map(|(_, score)| *score)
            .unwrap_or(DEFAULT_SCORE)
    }

    /// Deduplicate, stable-sort by descending score and keep at most `limit` items.
    pub fn rank<I>(&self, items: I, limit: usize) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut scored: Vec<(u32, String)> = dedup(items)
            .into_iter()
            .map(|item| (self.score(&item), item))
            .collect();
        scored.sort_by_key(|(score, _)| Reverse(*score));
        scored.into_iter().take(limit).map(|(_, item)| item).collect()
    }
}

/// Remove repeated strings, keeping the first occurrence of each.
pub fn dedup<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
