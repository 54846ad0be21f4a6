use crate::resolver::{EvalContext, Rule};
use crate::types::{OnboardingStep, RoutingDecision};

// ---------------------------------------------------------------------------
// Condition helpers
// ---------------------------------------------------------------------------

fn picked(ctx: &EvalContext) -> bool {
    ctx.progress.has_picked_skill()
}

fn skill_name(ctx: &EvalContext) -> String {
    ctx.progress.picked_skill().unwrap_or_default().to_string()
}

// ---------------------------------------------------------------------------
// Default rules (priority-ordered)
// ---------------------------------------------------------------------------

pub fn default_rules() -> Vec<Rule> {
    vec![
        // 1. Unverified email blocks everything else
        Rule {
            id: "verify_email",
            summary: "verification code pending",
            condition: |ctx| ctx.progress.awaiting_verification(),
            decision: RoutingDecision::VerifyEmail,
            message: |_| "Email address is not verified yet".to_string(),
        },
        // 2. Skill chosen directly (e.g. from search), quizzes skipped
        Rule {
            id: "skill_picked_directly",
            summary: "skill picked, no onboarding data",
            condition: |ctx| picked(ctx) && ctx.progress.onboarding_untouched(),
            decision: RoutingDecision::Roadmap,
            message: |ctx| {
                format!(
                    "Skill '{}' was picked without onboarding; show its roadmap",
                    skill_name(ctx)
                )
            },
        },
        // 3. Brand-new learner
        Rule {
            id: "new_user",
            summary: "no skill, no skills or career assessment",
            condition: |ctx| {
                !picked(ctx)
                    && !ctx.progress.has_skills_assessment()
                    && !ctx.progress.has_career_assessment()
            },
            decision: RoutingDecision::onboarding(OnboardingStep::One),
            message: |_| "New learner; start the skills assessment".to_string(),
        },
        // 4. Quiz answered, skill not yet chosen
        Rule {
            id: "skills_assessed",
            summary: "no skill, skills assessment present",
            condition: |ctx| !picked(ctx) && ctx.progress.has_skills_assessment(),
            decision: RoutingDecision::onboarding(OnboardingStep::Two),
            message: |_| "Skills assessment done; choose a skill from the matches".to_string(),
        },
        // 5. Skill picked but never selected through onboarding
        Rule {
            id: "skill_not_selected",
            summary: "skill picked, no selected skills",
            condition: |ctx| picked(ctx) && !ctx.progress.has_selected_skills(),
            decision: RoutingDecision::Roadmap,
            message: |ctx| format!("Skill '{}' picked; show its roadmap", skill_name(ctx)),
        },
        // 6. Career quiz outstanding
        Rule {
            id: "needs_career_assessment",
            summary: "skill selected, no career assessment",
            condition: |ctx| {
                picked(ctx)
                    && ctx.progress.has_selected_skills()
                    && !ctx.progress.has_career_assessment()
            },
            decision: RoutingDecision::onboarding(OnboardingStep::Three),
            message: |ctx| {
                format!(
                    "Skill '{}' selected; take the career assessment",
                    skill_name(ctx)
                )
            },
        },
        // 7. Learning path not generated yet
        Rule {
            id: "needs_learning_path",
            summary: "career assessment done, no learning path",
            condition: |ctx| {
                picked(ctx)
                    && ctx.progress.has_selected_skills()
                    && ctx.progress.has_career_assessment()
                    && !ctx.progress.has_learning_path()
            },
            decision: RoutingDecision::onboarding(OnboardingStep::Four),
            message: |_| "Career assessment done; generate the learning path".to_string(),
        },
        // 8. Everything in place
        Rule {
            id: "onboarding_complete",
            summary: "skill, selection, career assessment and learning path present",
            condition: |ctx| {
                picked(ctx)
                    && ctx.progress.has_selected_skills()
                    && ctx.progress.has_career_assessment()
                    && ctx.progress.has_learning_path()
            },
            decision: RoutingDecision::Dashboard,
            message: |_| "Onboarding complete; continue learning".to_string(),
        },
    ]
}
