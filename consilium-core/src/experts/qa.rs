//! QA engineering: test strategy, flaky tests, regression and coverage.

use super::{DomainProfile, QuestionRule};
use crate::rules::{CannedAnswer, Rule};
use crate::types::{Confidence, Priority};

pub(super) static PROFILE: DomainProfile = DomainProfile {
    title: "QA Engineer",
    description: "Quality engineer: test strategy, flaky tests, regression prevention and coverage gaps.",
    rules: &[
        Rule {
            category: "flaky",
            pattern: r"flak\w*|intermittent\w*|random(ly)? fail\w*|non-?deterministic|sometimes fails",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::Medium,
                insight: "A flaky test is either a test bug or a real race; quarantine it, then find out which.",
                actions: &[
                    "Run the test in a loop to measure the failure rate",
                    "Log timing and ordering around the failing assertion",
                    "Fix shared state and time dependencies in the test",
                ],
                risks: &[
                    "Real race conditions dismissed as test noise",
                    "Team stops trusting the test suite",
                ],
            },
        },
        Rule {
            category: "regression",
            pattern: r"regress\w*|broke again|used to work|keeps breaking",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::High,
                insight: "Every escaped regression deserves a test that would have caught it.",
                actions: &[
                    "Write a regression test for each escaped defect",
                    "Verify the test fails on the broken version",
                    "Monitor escaped defects per release",
                ],
                risks: &[
                    "Same defect reaches production repeatedly",
                ],
            },
        },
        Rule {
            category: "coverage",
            pattern: r"coverage|untested|no tests|unit tests?|integration tests?|e2e|end[- ]to[- ]end",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::High,
                insight: "Cover the code that changes most and breaks worst first; a coverage percentage is a by-product.",
                actions: &[
                    "Test the highest-risk modules first",
                    "Build a thin end-to-end smoke suite for critical flows",
                    "Document the testing pyramid the team agrees on",
                ],
                risks: &[
                    "False confidence from high coverage of trivial code",
                ],
            },
        },
    ],
    general: CannedAnswer {
        priority: Priority::Medium,
        confidence: Confidence::Medium,
        insight: "Decide what must never break, and make sure a test guards it.",
        actions: &[
            "Plan test cases for the change before implementing",
            "Verify behavior at boundaries and failure paths",
        ],
        risks: &[
            "Defects found late are expensive to fix",
        ],
    },
    questions: QuestionRule {
        hint_field: "testFramework",
        hint_description: "Test framework and tooling in use",
        with_hint: "With {hint}, which layer (unit, integration, end-to-end) is thinnest today?",
        without_hint: &[
            "Which test framework does the project use?",
            "Which flows are most critical to protect from regressions?",
        ],
    },
};
