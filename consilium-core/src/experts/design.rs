//! UX design: usability, accessibility, onboarding and visual consistency.

use super::{DomainProfile, QuestionRule};
use crate::rules::{CannedAnswer, Rule};
use crate::types::{Confidence, Priority};

pub(super) static PROFILE: DomainProfile = DomainProfile {
    title: "UX Designer",
    description: "User experience designer: usability, accessibility, onboarding flows and interface consistency.",
    rules: &[
        Rule {
            category: "accessibility",
            pattern: r"accessib\w*|\ba11y\b|screen reader|contrast|keyboard nav\w*|wcag",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::High,
                insight: "Accessibility problems exclude users outright; they are defects, not polish.",
                actions: &[
                    "Test every flow with keyboard-only navigation",
                    "Fix color contrast below WCAG AA",
                    "Verify screen reader labels on interactive elements",
                ],
                risks: &[
                    "Users with disabilities cannot complete core tasks",
                    "Legal exposure under accessibility regulations",
                ],
            },
        },
        Rule {
            category: "usability",
            pattern: r"confus\w*|complain\w*|frustrat\w*|hard to use|usability|intuitive|friction",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::Medium,
                insight: "User complaints point at a symptom; watch real users attempt the task to find the cause.",
                actions: &[
                    "Run five quick usability sessions on the problem flow",
                    "Monitor drop-off between steps of the flow",
                    "Design a simplified version of the confusing step",
                ],
                risks: &[
                    "Poor user experience drives churn",
                    "Support load grows with every confused user",
                ],
            },
        },
        Rule {
            category: "onboarding",
            pattern: r"onboard\w*|sign ?up|first[- ]time|new users?|tutorial|empty state",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::Medium,
                insight: "The first session decides retention; get new users to their first success as fast as possible.",
                actions: &[
                    "Plan the shortest path to the first successful outcome",
                    "Design helpful empty states",
                    "Monitor activation rate for new signups",
                ],
                risks: &[
                    "New users abandon before reaching value",
                ],
            },
        },
        Rule {
            category: "visual",
            pattern: r"\bui\b|interface|layout|visual|styl\w*|design system|responsive|mobile",
            answer: CannedAnswer {
                priority: Priority::Low,
                confidence: Confidence::Medium,
                insight: "Consistency beats novelty: reuse design-system components before inventing new ones.",
                actions: &[
                    "Document the components and tokens the screen should use",
                    "Test the layout on small and large viewports",
                    "Improve visual hierarchy of primary actions",
                ],
                risks: &[
                    "Inconsistent interface erodes user trust",
                    "Layout breaks on mobile devices",
                ],
            },
        },
    ],
    general: CannedAnswer {
        priority: Priority::Medium,
        confidence: Confidence::Low,
        insight: "Start from the user's goal, not the screen; every element should serve that goal.",
        actions: &[
            "Plan the user journey for the affected flow",
            "Design low-fidelity options before building",
            "Test the design with real users",
        ],
        risks: &[
            "Building the wrong thing for the user",
        ],
    },
    questions: QuestionRule {
        hint_field: "targetUsers",
        hint_description: "Who the users are (personas, segments, skill level)",
        with_hint: "For {hint}, what is the single task they most need to finish?",
        without_hint: &[
            "Who are the primary users and what are they trying to achieve?",
            "Do you have analytics or user feedback for this flow?",
        ],
    },
};
