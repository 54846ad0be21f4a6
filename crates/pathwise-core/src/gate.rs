use crate::client::ProgressSource;
use crate::config::RouteConfig;
use crate::error::Result;
use crate::navigation::{NavigationGuard, Navigator};
use crate::policy::{plan, Effect};
use crate::progress::UserProgress;
use crate::resolver::{EvalContext, Resolution, Resolver};
use crate::types::ResolveContext;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of running a gated page's entry check.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub resolution: Resolution,
    pub effect: Effect,
    /// False when the effect was a navigation the guard suppressed as a
    /// repeat, or when there was nothing to perform.
    pub navigated: bool,
}

// ---------------------------------------------------------------------------
// GateController
// ---------------------------------------------------------------------------

/// Drives one gated page: fetch the snapshot, resolve it, apply call-site
/// policy, and perform the navigation.
///
/// A fetch failure is returned to the caller before the resolver runs; a
/// partial snapshot is never resolved.
pub struct GateController<S, N> {
    source: S,
    guard: NavigationGuard<N>,
    resolver: Resolver,
    routes: RouteConfig,
}

impl<S: ProgressSource, N: Navigator> GateController<S, N> {
    pub fn new(source: S, navigator: N, routes: RouteConfig) -> Self {
        Self {
            source,
            guard: NavigationGuard::new(navigator),
            resolver: Resolver::default(),
            routes,
        }
    }

    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn navigator(&self) -> &N {
        self.guard.inner()
    }

    /// Entry check for a page mount.
    pub fn enter(&mut self, context: ResolveContext, current: Option<&str>) -> Result<Outcome> {
        let progress = self.source.fetch_progress()?;
        Ok(self.apply(&progress, context, current))
    }

    /// Resolve an already-fetched snapshot and perform its effect.
    pub fn apply(
        &mut self,
        progress: &UserProgress,
        context: ResolveContext,
        current: Option<&str>,
    ) -> Outcome {
        let ctx = EvalContext { progress, context };
        let resolution = self.resolver.resolve(&ctx);
        let effect = plan(&resolution, context, current, &self.routes);
        let navigated = match &effect {
            Effect::Navigate { route } => self.guard.navigate(route),
            Effect::OpenSkillChooser | Effect::None => false,
        };
        tracing::info!(
            %context,
            rule = %resolution.rule,
            %effect,
            navigated,
            "gate resolved"
        );
        Outcome {
            resolution,
            effect,
            navigated,
        }
    }

    /// Clear the learner's skills on the backend, then re-resolve from a
    /// fresh snapshot.
    pub fn clear_skills(&mut self, context: ResolveContext, current: Option<&str>) -> Result<Outcome> {
        self.source.clear_skills()?;
        self.guard.reset();
        self.enter(context, current)
    }

    /// Commit a skill on the backend, then re-resolve from a fresh snapshot.
    pub fn pick_skill(
        &mut self,
        skill: &str,
        context: ResolveContext,
        current: Option<&str>,
    ) -> Result<Outcome> {
        self.source.pick_skill(skill)?;
        self.guard.reset();
        self.enter(context, current)
    }
}
