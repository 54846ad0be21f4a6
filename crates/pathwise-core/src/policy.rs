use crate::config::RouteConfig;
use crate::progress::UserProgress;
use crate::resolver::{resolve_detailed, Resolution};
use crate::route;
use crate::types::ResolveContext;
use serde::{Deserialize, Serialize};

/// Rule id whose login-page outcome opens the skill chooser instead of
/// redirecting.
pub const NEW_USER_RULE: &str = "new_user";

/// What the calling page should do with a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Push the given client route.
    Navigate { route: String },
    /// Show the "take assessment / search skills" dialog.
    OpenSkillChooser,
    /// Nothing to do.
    None,
}

impl Effect {
    pub fn route(&self) -> Option<&str> {
        match self {
            Effect::Navigate { route } => Some(route),
            _ => None,
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Navigate { route } => write!(f, "navigate to {route}"),
            Effect::OpenSkillChooser => f.write_str("open skill chooser"),
            Effect::None => f.write_str("none"),
        }
    }
}

/// Apply call-site policy to a resolution.
///
/// The rule table is shared by every page; what differs per page is only
/// what happens with the answer:
/// - on the login page a brand-new learner gets the skill chooser dialog,
/// - `Stay` does nothing,
/// - a target the learner is already looking at does nothing, so guarded
///   pages never redirect to themselves.
pub fn plan(
    resolution: &Resolution,
    context: ResolveContext,
    current: Option<&str>,
    routes: &RouteConfig,
) -> Effect {
    if context == ResolveContext::Login && resolution.rule == NEW_USER_RULE {
        return Effect::OpenSkillChooser;
    }

    let Some(target) = route::route_for(resolution.decision, routes) else {
        return Effect::None;
    };

    if let Some(current) = current {
        if route::is_at(current, resolution.decision, routes) {
            return Effect::None;
        }
    }

    Effect::Navigate { route: target }
}

/// Resolution plus the route and effect derived from it; what the CLI and
/// HTTP surfaces report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub resolution: Resolution,
    pub route: Option<String>,
    pub effect: Effect,
}

impl Report {
    pub fn build(
        progress: &UserProgress,
        context: ResolveContext,
        current: Option<&str>,
        routes: &RouteConfig,
    ) -> Self {
        let resolution = resolve_detailed(progress, context);
        let route = route::route_for(resolution.decision, routes);
        let effect = plan(&resolution, context, current, routes);
        Self {
            resolution,
            route,
            effect,
        }
    }
}
