//! Software engineering: bugs, refactors, architecture and feature work.

use super::{DomainProfile, QuestionRule};
use crate::rules::{CannedAnswer, Rule};
use crate::types::{Confidence, Priority};

pub(super) static PROFILE: DomainProfile = DomainProfile {
    title: "Software Engineer",
    description: "Senior software engineer: debugging strategy, refactoring, architecture and implementation planning.",
    rules: &[
        Rule {
            category: "bug",
            pattern: r"\b(bugs?|errors?|exceptions?|crash\w*|broken|fix|not working|fails?|failing)\b",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::High,
                insight: "Reproduce the defect deterministically before changing code; a fix without a failing test is a guess.",
                actions: &[
                    "Write a failing test that reproduces the bug",
                    "Check logs and stack traces around the failure",
                    "Fix the root cause rather than the symptom",
                    "Verify the fix against the original reproduction steps",
                ],
                risks: &[
                    "Regression in adjacent code paths",
                    "Fixing the symptom leaves the root cause in production",
                ],
            },
        },
        Rule {
            category: "refactor",
            pattern: r"refactor\w*|clean ?up|tech(nical)? debt|legacy|spaghetti|duplicat\w*",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::High,
                insight: "Refactor behind a safety net: lock current behavior with characterization tests, then move in small steps.",
                actions: &[
                    "Add characterization tests for current behavior",
                    "Refactor in small, reviewable commits",
                    "Document the target structure before starting",
                ],
                risks: &[
                    "Behavior drift hidden by missing test coverage",
                    "Long-lived refactor branch diverges from main",
                ],
            },
        },
        Rule {
            category: "architecture",
            pattern: r"architect\w*|design pattern|microservices?|monolith|system design|coupling",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::Medium,
                insight: "Architecture decisions are expensive to reverse; make the boundaries explicit and write the trade-offs down.",
                actions: &[
                    "Plan module boundaries and data ownership",
                    "Document the decision in an architecture decision record",
                    "Build a thin vertical slice to validate the design",
                ],
                risks: &[
                    "Premature abstraction increases maintenance cost",
                    "Distributed components add operational complexity",
                ],
            },
        },
        Rule {
            category: "api",
            pattern: r"\bapi\b|endpoints?|\brest\b|graphql|grpc|webhook",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::High,
                insight: "Treat the API contract as a product: version it, validate inputs at the edge and keep errors consistent.",
                actions: &[
                    "Design the request and response schema first",
                    "Implement input validation at the boundary",
                    "Test error responses as thoroughly as success paths",
                ],
                risks: &[
                    "Breaking changes for existing API consumers",
                    "Inconsistent error handling across endpoints",
                ],
            },
        },
        Rule {
            category: "feature",
            pattern: r"implement\w*|new feature|add (a |an )?feature|\bbuild\w*|\bcreate\b",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::Medium,
                insight: "Ship the smallest version that proves the feature works end to end, then iterate.",
                actions: &[
                    "Plan the minimal end-to-end slice",
                    "Implement behind a feature flag",
                    "Test the happy path and the main failure modes",
                ],
                risks: &[
                    "Scope creep delays delivery",
                    "Feature interacts badly with existing flows",
                ],
            },
        },
    ],
    general: CannedAnswer {
        priority: Priority::Medium,
        confidence: Confidence::Medium,
        insight: "Clarify the problem and the definition of done before writing code.",
        actions: &[
            "Plan the change and identify affected modules",
            "Review existing code and tests in the area",
            "Implement incrementally with tests",
        ],
        risks: &[
            "Misunderstood requirements lead to rework",
            "Untested changes introduce regressions",
        ],
    },
    questions: QuestionRule {
        hint_field: "codeContext",
        hint_description: "Relevant code, file names or stack traces",
        with_hint: "Given the code context ({hint}), which module owns the behavior you want to change?",
        without_hint: &[
            "Which language and framework does the codebase use?",
            "Is there an existing test suite covering this area?",
        ],
    },
};
