//! Product management: prioritization, scope, stakeholders and delivery.

use super::{DomainProfile, QuestionRule};
use crate::rules::{CannedAnswer, Rule};
use crate::types::{Confidence, Priority};

pub(super) static PROFILE: DomainProfile = DomainProfile {
    title: "Product Manager",
    description: "Product manager: prioritization, scope control, stakeholder alignment and delivery planning.",
    rules: &[
        Rule {
            category: "deadline",
            pattern: r"deadline|\blaunch\w*|ship\w*|due date|\burgent\b|\basap\b",
            answer: CannedAnswer {
                priority: Priority::High,
                confidence: Confidence::Medium,
                insight: "With a fixed date, scope is the only honest lever; cut features, not quality.",
                actions: &[
                    "Plan a must-have versus nice-to-have scope cut",
                    "Verify the critical path with the engineering team",
                    "Document what is explicitly out of scope",
                ],
                risks: &[
                    "Quality shortcuts create production incidents after launch",
                    "Stakeholders expect the full scope on the original date",
                ],
            },
        },
        Rule {
            category: "prioritization",
            pattern: r"priorit\w*|backlog|roadmap|trade-?offs?|what (should|to) (we )?(build|do) first",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::Medium,
                insight: "Prioritize by impact over effort, and make the ranking visible so trade-offs are explicit.",
                actions: &[
                    "Plan a scoring pass over the backlog by impact and effort",
                    "Document the top three priorities and why",
                    "Review the roadmap with stakeholders",
                ],
                risks: &[
                    "Team effort spread across too many initiatives",
                ],
            },
        },
        Rule {
            category: "requirements",
            pattern: r"requirements?|\bspecs?\b|user stor\w*|acceptance criteria|\bmvp\b|scope",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::High,
                insight: "Ambiguous requirements are the most expensive bug; write acceptance criteria before estimates.",
                actions: &[
                    "Document acceptance criteria for each user story",
                    "Verify requirements with a real user or stakeholder",
                    "Plan the MVP around one measurable outcome",
                ],
                risks: &[
                    "Rework from misunderstood requirements",
                    "Scope creep without a clear definition of done",
                ],
            },
        },
        Rule {
            category: "stakeholders",
            pattern: r"stakeholders?|customers?|business|revenue|\bkpis?\b|okrs?",
            answer: CannedAnswer {
                priority: Priority::Medium,
                confidence: Confidence::Medium,
                insight: "Tie the work to a business metric so success is measurable and priorities are defensible.",
                actions: &[
                    "Document the business metric this work should move",
                    "Plan a regular update cadence for stakeholders",
                ],
                risks: &[
                    "Misaligned expectations between business and engineering",
                ],
            },
        },
    ],
    general: CannedAnswer {
        priority: Priority::Medium,
        confidence: Confidence::Low,
        insight: "Define the problem, the user and the success metric before committing to a solution.",
        actions: &[
            "Document the problem statement and success metric",
            "Plan the smallest deliverable that tests the idea",
        ],
        risks: &[
            "Effort spent on a problem users do not have",
        ],
    },
    questions: QuestionRule {
        hint_field: "timeline",
        hint_description: "Deadline, milestones or delivery expectations",
        with_hint: "Given the timeline ({hint}), which part of the scope is non-negotiable?",
        without_hint: &[
            "What business outcome should this work achieve?",
            "Is there a fixed deadline or external commitment?",
        ],
    },
};
