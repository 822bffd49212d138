//! Performance: latency, database load, memory pressure and scaling.

use super::{DomainProfile, QuestionRule};
use crate::rules::{CannedAnswer, Rule};
use crate::types::{Confidence, Priority};

pub(super) static PROFILE: DomainProfile = DomainProfile {
    title: "Performance Expert",
    description: "Performance engineer: profiling, latency, database tuning, memory and scalability.",
    rules: &[
        Rule {
            category: "database",
            pattern: r"database|\bdb\b|\bsql\b|quer(y|ies)|\bindex(es)?\b|n\+1|\borm\b",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::High,
                insight: "Most application latency hides in the data layer; measure query plans before touching code.",
                actions: &[
                    "Log slow queries and capture their execution plans",
                    "Add indexes for the hottest filter and sort columns",
                    "Eliminate N+1 query patterns",
                    "Verify improvements with before/after benchmarks",
                ],
                risks: &[
                    "Production slowdown under peak load",
                    "New indexes slow down write-heavy tables",
                ],
            },
        },
        Rule {
            category: "latency",
            pattern: r"\bslow\w*|latency|response time|lag\w*|\bspeed\b|timeouts?|takes (too )?long",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::Medium,
                insight: "Profile first: optimizing without a measured bottleneck usually speeds up the wrong thing.",
                actions: &[
                    "Monitor p50/p95/p99 latency for the affected path",
                    "Profile the request to find the dominant cost",
                    "Optimize the single largest bottleneck first",
                ],
                risks: &[
                    "Slow responses degrade user experience and conversion",
                    "Timeouts cascade into upstream services",
                ],
            },
        },
        Rule {
            category: "memory",
            pattern: r"memory|\bleak\w*|\boom\b|heap|garbage collect\w*|\bgc\b",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::Medium,
                insight: "Memory growth that never plateaus is a leak until proven otherwise; take heap snapshots over time.",
                actions: &[
                    "Monitor memory usage over a full traffic cycle",
                    "Compare heap snapshots to find retained objects",
                    "Fix unbounded caches and listeners",
                ],
                risks: &[
                    "Process crash from out-of-memory kills",
                    "Gradual slowdown from garbage collection pressure",
                ],
            },
        },
        Rule {
            category: "scaling",
            pattern: r"scal\w*|load|traffic|throughput|concurren\w*|bottleneck",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::Medium,
                insight: "Find the first resource to saturate under load; scaling anything else buys nothing.",
                actions: &[
                    "Build a load test that mirrors production traffic",
                    "Monitor CPU, memory, I/O and connection pools under load",
                    "Implement caching for read-heavy hot paths",
                ],
                risks: &[
                    "Downtime during traffic spikes",
                    "Cache invalidation bugs serve stale data",
                ],
            },
        },
    ],
    general: CannedAnswer {
        priority: Priority::Medium,
        confidence: Confidence::Low,
        insight: "Establish a performance baseline so improvements and regressions are measurable.",
        actions: &[
            "Monitor key latency and throughput metrics",
            "Profile the most frequently used code paths",
            "Document performance budgets for critical flows",
        ],
        risks: &[
            "Performance regressions go unnoticed without a baseline",
        ],
    },
    questions: QuestionRule {
        hint_field: "metrics",
        hint_description: "Current measurements such as latency percentiles or resource usage",
        with_hint: "The current metrics are {hint}; what target would count as fixed?",
        without_hint: &[
            "What are the current response times (p50/p95/p99)?",
            "When did the slowdown start, and what changed around then?",
        ],
    },
};
