use crate::config::RouteConfig;
use crate::types::{OnboardingStep, RoutingDecision};

/// Concrete client route for a decision. `Stay` has no route.
pub fn route_for(decision: RoutingDecision, routes: &RouteConfig) -> Option<String> {
    match decision {
        RoutingDecision::Onboarding { step } => Some(format!("{}?step={step}", routes.onboarding)),
        RoutingDecision::Roadmap => Some(routes.roadmap.clone()),
        RoutingDecision::VerifyEmail => Some(routes.verify_email.clone()),
        RoutingDecision::Dashboard => Some(routes.dashboard.clone()),
        RoutingDecision::Stay => None,
    }
}

/// Map a current location (`/onboarding?step=two`, `/roadmap/`, ...) back to
/// the decision that would have produced it. Locations outside the gated
/// pages return `None`.
///
/// An onboarding location with a missing or unknown `step` reads as step one,
/// the same page the wizard renders by default.
pub fn parse_location(location: &str, routes: &RouteConfig) -> Option<RoutingDecision> {
    let location = location.split('#').next().unwrap_or_default();
    let (path, query) = match location.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (location, None),
    };
    let path = normalize(path);

    if path == normalize(&routes.onboarding) {
        let step = query
            .and_then(|q| query_param(q, "step"))
            .and_then(|s| s.parse::<OnboardingStep>().ok())
            .unwrap_or(OnboardingStep::One);
        return Some(RoutingDecision::onboarding(step));
    }
    if path == normalize(&routes.roadmap) {
        return Some(RoutingDecision::Roadmap);
    }
    if path == normalize(&routes.verify_email) {
        return Some(RoutingDecision::VerifyEmail);
    }
    if path == normalize(&routes.dashboard) {
        return Some(RoutingDecision::Dashboard);
    }
    None
}

/// True when `location` already shows what `decision` points to.
pub fn is_at(location: &str, decision: RoutingDecision, routes: &RouteConfig) -> bool {
    parse_location(location, routes) == Some(decision)
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim();
    if trimmed.len() > 1 {
        trimmed.trim_end_matches('/')
    } else {
        trimmed
    }
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> RouteConfig {
        RouteConfig::default()
    }

    #[test]
    fn decisions_map_to_default_routes() {
        let r = routes();
        assert_eq!(
            route_for(RoutingDecision::onboarding(OnboardingStep::One), &r).as_deref(),
            Some("/onboarding?step=one")
        );
        assert_eq!(
            route_for(RoutingDecision::Roadmap, &r).as_deref(),
            Some("/roadmap")
        );
        assert_eq!(
            route_for(RoutingDecision::VerifyEmail, &r).as_deref(),
            Some("/verify-email")
        );
        assert_eq!(
            route_for(RoutingDecision::Dashboard, &r).as_deref(),
            Some("/my-learning")
        );
        assert_eq!(route_for(RoutingDecision::Stay, &r), None);
    }

    #[test]
    fn custom_base_paths_are_used() {
        let r = RouteConfig {
            onboarding: "/welcome".to_string(),
            ..RouteConfig::default()
        };
        assert_eq!(
            route_for(RoutingDecision::onboarding(OnboardingStep::Three), &r).as_deref(),
            Some("/welcome?step=three")
        );
        assert_eq!(
            parse_location("/welcome?step=three", &r),
            Some(RoutingDecision::onboarding(OnboardingStep::Three))
        );
    }

    #[test]
    fn every_route_parses_back() {
        let r = routes();
        let mut decisions: Vec<RoutingDecision> = OnboardingStep::all()
            .iter()
            .map(|s| RoutingDecision::onboarding(*s))
            .collect();
        decisions.extend([
            RoutingDecision::Roadmap,
            RoutingDecision::VerifyEmail,
            RoutingDecision::Dashboard,
        ]);
        for d in decisions {
            let route = route_for(d, &r).unwrap();
            assert_eq!(parse_location(&route, &r), Some(d), "route {route}");
        }
    }

    #[test]
    fn onboarding_without_step_is_step_one() {
        let r = routes();
        let one = Some(RoutingDecision::onboarding(OnboardingStep::One));
        assert_eq!(parse_location("/onboarding", &r), one);
        assert_eq!(parse_location("/onboarding?step=seven", &r), one);
        assert_eq!(parse_location("/onboarding?ref=mail", &r), one);
    }

    #[test]
    fn tolerates_trailing_slash_fragment_and_extra_params() {
        let r = routes();
        assert_eq!(
            parse_location("/roadmap/", &r),
            Some(RoutingDecision::Roadmap)
        );
        assert_eq!(
            parse_location("/onboarding/?utm=x&step=four#top", &r),
            Some(RoutingDecision::onboarding(OnboardingStep::Four))
        );
    }

    #[test]
    fn unrelated_location_is_none() {
        let r = routes();
        assert_eq!(parse_location("/courses/rust", &r), None);
        assert_eq!(parse_location("/", &r), None);
        assert_eq!(parse_location("", &r), None);
    }

    #[test]
    fn is_at_compares_steps() {
        let r = routes();
        assert!(is_at(
            "/onboarding?step=two",
            RoutingDecision::onboarding(OnboardingStep::Two),
            &r
        ));
        assert!(!is_at(
            "/onboarding?step=two",
            RoutingDecision::onboarding(OnboardingStep::Three),
            &r
        ));
    }
}
