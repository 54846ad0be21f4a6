use crate::output::print_json;
use anyhow::Context;
use pathwise_core::{config::Config, io, paths};
use std::path::Path;

pub fn run(root: &Path, backend_url: Option<&str>, json: bool) -> anyhow::Result<()> {
    let dir = paths::pathwise_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let config_path = paths::config_path(root);
    let created = if config_path.exists() {
        if let Some(url) = backend_url {
            let cfg = Config::load(root)
                .context("failed to load config")?
                .with_backend_url(url);
            cfg.save(root).context("failed to write config.yaml")?;
        }
        false
    } else {
        let mut cfg = Config::new();
        if let Some(url) = backend_url {
            cfg = cfg.with_backend_url(url);
        }
        cfg.save(root).context("failed to write config.yaml")?;
        true
    };

    if json {
        return print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "config": paths::CONFIG_FILE,
            "created": created,
        }));
    }

    println!("Initializing pathwise in: {}", root.display());
    if created {
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }
    Ok(())
}
