//! Edge-case hunting: boundaries, invalid input, concurrency and failure modes.

use super::{DomainProfile, QuestionRule};
use crate::rules::{CannedAnswer, Rule};
use crate::types::{Confidence, Priority};

pub(super) static PROFILE: DomainProfile = DomainProfile {
    title: "Edge Case Hunter",
    description: "Adversarial reviewer: boundary values, invalid input, concurrency and partial failures.",
    rules: &[
        Rule {
            category: "concurrency",
            pattern: r"race condition|concurren\w*|parallel|simultaneous\w*|deadlock|double[- ]submit",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::Medium,
                insight: "Assume every request can arrive twice and out of order; make operations idempotent.",
                actions: &[
                    "Test concurrent requests against the same resource",
                    "Implement idempotency keys for state-changing operations",
                    "Log conflicting writes with enough context to replay them",
                ],
                risks: &[
                    "Data loss from lost updates",
                    "Duplicate charges or records from double submission",
                ],
            },
        },
        Rule {
            category: "input",
            pattern: r"\bnull\b|\bempty\b|invalid|malformed|unicode|special characters|overflow|too (long|large)",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::High,
                insight: "Inputs are hostile until validated: empty, huge, malformed and unicode values all arrive eventually.",
                actions: &[
                    "Test empty, maximum-length and unicode inputs",
                    "Verify validation errors are clear and non-leaky",
                    "Fix unchecked arithmetic on user-supplied numbers",
                ],
                risks: &[
                    "Crash on unexpected input",
                    "Security bypass through unvalidated fields",
                ],
            },
        },
        Rule {
            category: "failure",
            pattern: r"\bfail\w*|timeouts?|network|offline|retr(y|ies)|partial|crash\w*|unexpected",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::Medium,
                insight: "Design for partial failure: every dependency will be slow or unavailable at the worst moment.",
                actions: &[
                    "Test behavior when each dependency times out",
                    "Implement bounded retries with backoff",
                    "Verify partial failures leave data consistent",
                ],
                risks: &[
                    "Cascading failure across services",
                    "Inconsistent data after a partial write",
                ],
            },
        },
        Rule {
            category: "boundary",
            pattern: r"edge cases?|corner cases?|boundar\w*|limits?\b|what if|time ?zones?|leap|dst\b",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::Medium,
                insight: "Bugs cluster at boundaries: zero, one, the maximum and the transitions between them.",
                actions: &[
                    "Test zero, one, many and maximum values",
                    "Verify date handling across time zones and DST changes",
                    "Document the limits the system guarantees",
                ],
                risks: &[
                    "Off-by-one errors at pagination and range limits",
                    "Time zone bugs corrupt scheduled work",
                ],
            },
        },
    ],
    general: CannedAnswer {
        priority: Priority::Medium,
        confidence: Confidence::Low,
        insight: "List what can go wrong before deciding what to guard against.",
        actions: &[
            "Test empty, invalid and boundary inputs",
            "Verify behavior when dependencies fail",
            "Document known limitations",
        ],
        risks: &[
            "Unhandled edge cases crash the system in production",
        ],
    },
    questions: QuestionRule {
        hint_field: "context",
        hint_description: "Free-form context about the feature under review",
        with_hint: "In this context ({hint}), what input would a malicious or careless user send first?",
        without_hint: &[
            "What happens when the input is empty or extremely large?",
            "What happens if two users perform this action at the same time?",
            "What happens when a downstream dependency is unavailable?",
        ],
    },
};
