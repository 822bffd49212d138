//! Security: authentication, injection, data protection and compliance.

use super::{DomainProfile, QuestionRule};
use crate::rules::{CannedAnswer, Rule};
use crate::types::{Confidence, Priority};

pub(super) static PROFILE: DomainProfile = DomainProfile {
    title: "Security Expert",
    description: "Application security engineer: authentication, injection flaws, data protection and compliance.",
    rules: &[
        Rule {
            category: "breach",
            pattern: r"breach\w*|\bhack\w*|compromis\w*|leak\w*|incident|exfiltrat\w*",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::High,
                insight: "Contain first, investigate second: rotate credentials and preserve evidence before cleaning up.",
                actions: &[
                    "Rotate exposed credentials and revoke active sessions",
                    "Preserve logs and evidence for the investigation",
                    "Patch the exploited vulnerability",
                    "Monitor for renewed access attempts",
                ],
                risks: &[
                    "Ongoing security breach while the entry point stays open",
                    "Legal and compliance exposure from delayed disclosure",
                ],
            },
        },
        Rule {
            category: "authentication",
            pattern: r"\bauth\w*|login|log in|sign ?in|password\w*|session|\bjwt\b|oauth|\bmfa\b|2fa",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::High,
                insight: "Authentication flaws are the shortest path to account takeover; rely on proven libraries, never custom crypto.",
                actions: &[
                    "Audit the authentication flow for security gaps",
                    "Implement rate limiting on login endpoints",
                    "Verify passwords are hashed with a modern algorithm",
                    "Test session expiry and token revocation",
                ],
                risks: &[
                    "Security vulnerability enables account takeover",
                    "Credential stuffing against unthrottled endpoints",
                ],
            },
        },
        Rule {
            category: "injection",
            pattern: r"inject\w*|\bxss\b|\bcsrf\b|sanitiz\w*|escap\w*|user input",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::High,
                insight: "Every injection class has the same cure: keep data and code separate with parameterization and output encoding.",
                actions: &[
                    "Fix queries to use parameterized statements",
                    "Implement output encoding for all rendered user input",
                    "Test inputs with a security scanner",
                ],
                risks: &[
                    "Data breach through SQL injection",
                    "Session hijacking through cross-site scripting",
                ],
            },
        },
        Rule {
            category: "data_protection",
            pattern: r"encrypt\w*|\bpii\b|personal data|gdpr|hipaa|complian\w*|secrets?\b|api keys?",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::Medium,
                insight: "Know where sensitive data lives before deciding how to protect it.",
                actions: &[
                    "Document where sensitive data is stored and processed",
                    "Implement encryption at rest and in transit",
                    "Move secrets into a managed secret store",
                ],
                risks: &[
                    "Compliance violation and legal penalties",
                    "Secrets leaked through logs or source control",
                ],
            },
        },
    ],
    general: CannedAnswer {
        priority: Priority::Medium,
        confidence: Confidence::Medium,
        insight: "Apply least privilege and defense in depth; assume any single control can fail.",
        actions: &[
            "Review the change for security implications",
            "Verify dependencies have no known vulnerabilities",
            "Log security-relevant events",
        ],
        risks: &[
            "Unreviewed changes introduce security weaknesses",
        ],
    },
    questions: QuestionRule {
        hint_field: "threatModel",
        hint_description: "Known attackers, assets or threat model notes",
        with_hint: "Against the threat model ({hint}), which asset would hurt most if compromised?",
        without_hint: &[
            "What sensitive data does this system handle?",
            "Are there compliance requirements such as GDPR, HIPAA or SOC 2?",
        ],
    },
};
