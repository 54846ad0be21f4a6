use crate::output::print_json;
use anyhow::Context;
use pathwise_core::config::Config;
use pathwise_core::policy::Report;
use pathwise_core::{ResolveContext, UserProgress};
use std::io::Read;
use std::path::Path;

pub fn print_report(report: &Report, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(report);
    }
    println!("Context:   {}", report.resolution.context);
    println!("Rule:      {}", report.resolution.rule);
    println!("Decision:  {}", report.resolution.decision);
    if let Some(ref route) = report.route {
        println!("Route:     {route}");
    }
    println!("Effect:    {}", report.effect);
    println!("Message:   {}", report.resolution.message);
    Ok(())
}

pub fn run(
    root: &Path,
    file: Option<&Path>,
    context: ResolveContext,
    current: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;

    let body = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read snapshot from stdin")?;
            buf
        }
    };
    let progress = UserProgress::from_json(&body).context("invalid progress snapshot")?;

    print_report(&Report::build(&progress, context, current, &config.routes), json)
}
