//! DevOps: deployment, CI/CD, infrastructure and observability.

use super::{DomainProfile, QuestionRule};
use crate::rules::{CannedAnswer, Rule};
use crate::types::{Confidence, Priority};

pub(super) static PROFILE: DomainProfile = DomainProfile {
    title: "DevOps Engineer",
    description: "DevOps engineer: deployments, CI/CD pipelines, infrastructure, monitoring and incident response.",
    rules: &[
        Rule {
            category: "outage",
            pattern: r"\bdown\b|outage|downtime|incident|rollback|\b5\d\d\b|unavailable",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::High,
                insight: "Restore service first: roll back to the last known good version, then debug at leisure.",
                actions: &[
                    "Roll back to the last known good deployment",
                    "Monitor error rates until they return to baseline",
                    "Log a timeline of the incident for the postmortem",
                ],
                risks: &[
                    "Extended production downtime",
                    "Data loss if rollback skips migration reversal",
                ],
            },
        },
        Rule {
            category: "deployment",
            pattern: r"deploy\w*|release\w*|\bci\b|\bcd\b|pipeline|github actions|jenkins",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::High,
                insight: "Deployments should be boring: automated, repeatable and reversible.",
                actions: &[
                    "Automate the deployment in the CI pipeline",
                    "Implement a one-command rollback",
                    "Test the release in a staging environment first",
                ],
                risks: &[
                    "Manual steps cause inconsistent production releases",
                    "Failed deploy without rollback causes downtime",
                ],
            },
        },
        Rule {
            category: "infrastructure",
            pattern: r"docker|kubernetes|\bk8s\b|terraform|infrastructure|\baws\b|\bgcp\b|azure|cloud|server",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::Medium,
                insight: "Infrastructure that is not in code drifts; declare it and review changes like application code.",
                actions: &[
                    "Document current infrastructure as code",
                    "Backup stateful services before changes",
                    "Plan capacity for expected growth",
                ],
                risks: &[
                    "Configuration drift between environments",
                    "Cost overruns from oversized resources",
                ],
            },
        },
        Rule {
            category: "observability",
            pattern: r"monitor\w*|alert\w*|\blogs?\b|logging|metrics|tracing|observab\w*|dashboard",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::High,
                insight: "Alert on symptoms users feel, not on every internal metric.",
                actions: &[
                    "Monitor the golden signals: latency, traffic, errors, saturation",
                    "Implement structured logging with request identifiers",
                    "Build alerts with clear runbooks",
                ],
                risks: &[
                    "Production issues discovered by users instead of alerts",
                    "Alert fatigue hides real incidents",
                ],
            },
        },
    ],
    general: CannedAnswer {
        priority: Priority::Low,
        confidence: Confidence::Medium,
        insight: "Keep the path from commit to production short, automated and observable.",
        actions: &[
            "Review the current build and deploy process",
            "Monitor the service after every change",
            "Document operational runbooks",
        ],
        risks: &[
            "Operational knowledge concentrated in a few people",
        ],
    },
    questions: QuestionRule {
        hint_field: "environment",
        hint_description: "Target environment, platform or hosting details",
        with_hint: "In the {hint} environment, how are deployments currently triggered and rolled back?",
        without_hint: &[
            "Where does the service run (cloud, on-premise, containers)?",
            "Is there an existing CI/CD pipeline?",
        ],
    },
};
