use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// OnboardingStep
// ---------------------------------------------------------------------------

/// The four onboarding wizard steps, carried in the `?step=` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    /// Interest/skills quiz.
    One,
    /// Pick a skill from the matches.
    Two,
    /// Career-fit quiz.
    Three,
    /// Learning-path generation.
    Four,
}

impl OnboardingStep {
    pub fn all() -> &'static [OnboardingStep] {
        &[
            OnboardingStep::One,
            OnboardingStep::Two,
            OnboardingStep::Three,
            OnboardingStep::Four,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<OnboardingStep> {
        Self::all().get(self.index() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OnboardingStep::One => "one",
            OnboardingStep::Two => "two",
            OnboardingStep::Three => "three",
            OnboardingStep::Four => "four",
        }
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OnboardingStep {
    type Err = crate::error::PathwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one" => Ok(OnboardingStep::One),
            "two" => Ok(OnboardingStep::Two),
            "three" => Ok(OnboardingStep::Three),
            "four" => Ok(OnboardingStep::Four),
            _ => Err(crate::error::PathwiseError::InvalidStep(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RoutingDecision
// ---------------------------------------------------------------------------

/// Where a learner should land. `Stay` means no rule matched and the caller
/// keeps the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoutingDecision {
    Onboarding { step: OnboardingStep },
    Roadmap,
    VerifyEmail,
    Dashboard,
    Stay,
}

impl RoutingDecision {
    pub fn onboarding(step: OnboardingStep) -> Self {
        RoutingDecision::Onboarding { step }
    }

    pub fn is_stay(self) -> bool {
        matches!(self, RoutingDecision::Stay)
    }

    pub fn step(self) -> Option<OnboardingStep> {
        match self {
            RoutingDecision::Onboarding { step } => Some(step),
            _ => None,
        }
    }
}

impl fmt::Display for RoutingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingDecision::Onboarding { step } => write!(f, "onboarding step {step}"),
            RoutingDecision::Roadmap => f.write_str("roadmap"),
            RoutingDecision::VerifyEmail => f.write_str("verify-email"),
            RoutingDecision::Dashboard => f.write_str("my-learning"),
            RoutingDecision::Stay => f.write_str("stay"),
        }
    }
}

// ---------------------------------------------------------------------------
// ResolveContext
// ---------------------------------------------------------------------------

/// The page asking for a resolution. The rule table is the same for every
/// call site; the context only selects post-resolution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveContext {
    #[default]
    Onboarding,
    Login,
    Signup,
    Roadmap,
}

impl ResolveContext {
    pub fn all() -> &'static [ResolveContext] {
        &[
            ResolveContext::Onboarding,
            ResolveContext::Login,
            ResolveContext::Signup,
            ResolveContext::Roadmap,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResolveContext::Onboarding => "onboarding",
            ResolveContext::Login => "login",
            ResolveContext::Signup => "signup",
            ResolveContext::Roadmap => "roadmap",
        }
    }

    /// Post-auth entry points land the user somewhere right after a session
    /// starts.
    pub fn is_post_auth(self) -> bool {
        matches!(self, ResolveContext::Login | ResolveContext::Signup)
    }
}

impl fmt::Display for ResolveContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResolveContext {
    type Err = crate::error::PathwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onboarding" => Ok(ResolveContext::Onboarding),
            "login" => Ok(ResolveContext::Login),
            "signup" => Ok(ResolveContext::Signup),
            "roadmap" => Ok(ResolveContext::Roadmap),
            _ => Err(crate::error::PathwiseError::InvalidContext(s.to_string())),
        }
    }
}
