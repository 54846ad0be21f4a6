use crate::cmd::resolve::print_report;
use anyhow::Context;
use pathwise_core::client::{BackendClient, ProgressSource};
use pathwise_core::config::Config;
use pathwise_core::policy::Report;
use pathwise_core::ResolveContext;
use std::path::Path;

pub fn run(
    root: &Path,
    context: ResolveContext,
    current: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let client = BackendClient::from_config(&config.backend).context("failed to build client")?;
    let progress = client
        .fetch_progress()
        .with_context(|| format!("failed to fetch progress from {}", client.base_url()))?;

    print_report(&Report::build(&progress, context, current, &config.routes), json)
}
