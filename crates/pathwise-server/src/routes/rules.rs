use axum::Json;
use pathwise_core::resolver::{Resolver, RuleInfo};

/// GET /api/rules: the resolution rules in priority order.
pub async fn list_rules() -> Json<Vec<RuleInfo>> {
    Json(Resolver::default().describe())
}
