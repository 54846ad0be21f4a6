use crate::progress::UserProgress;
use crate::rules::default_rules;
use crate::types::{ResolveContext, RoutingDecision};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EvalContext
// ---------------------------------------------------------------------------

pub struct EvalContext<'a> {
    pub progress: &'a UserProgress,
    pub context: ResolveContext,
}

// ---------------------------------------------------------------------------
// Resolution (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Id of the rule that matched, or `fallback`.
    pub rule: String,
    pub decision: RoutingDecision,
    pub context: ResolveContext,
    pub message: String,
}

pub const FALLBACK_RULE: &str = "fallback";

/// Listing row for one rule.
#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    pub priority: usize,
    pub id: &'static str,
    pub when: &'static str,
    pub decision: RoutingDecision,
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A fn-pointer rule. Rules are evaluated in table order; the first whose
/// condition holds decides.
pub struct Rule {
    pub id: &'static str,
    pub summary: &'static str,
    pub condition: fn(&EvalContext) -> bool,
    pub decision: RoutingDecision,
    pub message: fn(&EvalContext) -> String,
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

pub struct Resolver {
    rules: Vec<Rule>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Resolver {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The table in priority order, with the implicit fallback appended.
    pub fn describe(&self) -> Vec<RuleInfo> {
        let mut out: Vec<RuleInfo> = self
            .rules
            .iter()
            .enumerate()
            .map(|(i, r)| RuleInfo {
                priority: i + 1,
                id: r.id,
                when: r.summary,
                decision: r.decision,
            })
            .collect();
        out.push(RuleInfo {
            priority: out.len() + 1,
            id: FALLBACK_RULE,
            when: "no rule matched",
            decision: RoutingDecision::Stay,
        });
        out
    }

    pub fn resolve(&self, ctx: &EvalContext) -> Resolution {
        for rule in &self.rules {
            if (rule.condition)(ctx) {
                tracing::debug!(rule = rule.id, context = %ctx.context, decision = %rule.decision, "resolved");
                return Resolution {
                    rule: rule.id.to_string(),
                    decision: rule.decision,
                    context: ctx.context,
                    message: (rule.message)(ctx),
                };
            }
        }

        tracing::debug!(context = %ctx.context, "no rule matched; staying put");
        Resolution {
            rule: FALLBACK_RULE.to_string(),
            decision: RoutingDecision::Stay,
            context: ctx.context,
            message: "No onboarding rule applies; remain on the current page".to_string(),
        }
    }
}

/// Resolve a snapshot against the default rule table.
pub fn resolve(progress: &UserProgress, context: ResolveContext) -> RoutingDecision {
    resolve_detailed(progress, context).decision
}

/// Like [`resolve`] but keeps the matched rule id and message.
pub fn resolve_detailed(progress: &UserProgress, context: ResolveContext) -> Resolution {
    let ctx = EvalContext { progress, context };
    Resolver::default().resolve(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OnboardingStep;

    fn never(_: &EvalContext) -> bool {
        false
    }

    fn always(_: &EvalContext) -> bool {
        true
    }

    #[test]
    fn describe_appends_fallback() {
        let rows = Resolver::new(vec![]).describe();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, FALLBACK_RULE);
        assert_eq!(rows[0].priority, 1);

        let rows = Resolver::default().describe();
        assert_eq!(rows.len(), Resolver::default().rules().len() + 1);
        assert_eq!(rows[0].id, "verify_email");
        assert_eq!(rows.last().map(|r| r.decision), Some(RoutingDecision::Stay));
    }

    #[test]
    fn empty_table_falls_back_to_stay() {
        let resolver = Resolver::new(vec![]);
        let progress = UserProgress::new();
        let ctx = EvalContext {
            progress: &progress,
            context: ResolveContext::Login,
        };
        let r = resolver.resolve(&ctx);
        assert_eq!(r.decision, RoutingDecision::Stay);
        assert_eq!(r.rule, FALLBACK_RULE);
        assert_eq!(r.context, ResolveContext::Login);
    }

    #[test]
    fn first_matching_rule_wins() {
        let resolver = Resolver::new(vec![
            Rule {
                id: "skipped",
                summary: "",
                condition: never,
                decision: RoutingDecision::Dashboard,
                message: |_| String::new(),
            },
            Rule {
                id: "first",
                summary: "",
                condition: always,
                decision: RoutingDecision::Roadmap,
                message: |_| "first".to_string(),
            },
            Rule {
                id: "second",
                summary: "",
                condition: always,
                decision: RoutingDecision::onboarding(OnboardingStep::One),
                message: |_| "second".to_string(),
            },
        ]);
        let progress = UserProgress::new();
        let ctx = EvalContext {
            progress: &progress,
            context: ResolveContext::Onboarding,
        };
        let r = resolver.resolve(&ctx);
        assert_eq!(r.rule, "first");
        assert_eq!(r.decision, RoutingDecision::Roadmap);
        assert_eq!(r.message, "first");
    }

    #[test]
    fn resolution_serializes_for_api_consumers() {
        let r = resolve_detailed(&UserProgress::new(), ResolveContext::Signup);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["rule"], "new_user");
        assert_eq!(json["context"], "signup");
        assert_eq!(json["decision"]["kind"], "onboarding");
        assert_eq!(json["decision"]["step"], "one");
    }
}
