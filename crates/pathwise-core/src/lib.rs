pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod io;
pub mod navigation;
pub mod paths;
pub mod policy;
pub mod progress;
pub mod resolver;
pub mod route;
pub mod rules;
pub mod store;
pub mod streak;
pub mod types;

pub use error::{PathwiseError, Result};
pub use progress::UserProgress;
pub use resolver::{resolve, resolve_detailed, Resolution};
pub use types::{OnboardingStep, ResolveContext, RoutingDecision};
