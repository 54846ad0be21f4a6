use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use pathwise_core::config::Config;
use pathwise_core::store::FileStore;
use pathwise_core::streak::{parse_date, StreakStatus, StreakTracker};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum StreakSubcommand {
    /// Record learning activity for a day
    CheckIn {
        /// Day to record (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the current and longest streak
    Show {
        /// Day to evaluate against (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Forget the streak
    Reset,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: StreakSubcommand, json: bool) -> anyhow::Result<()> {
    let mut tracker = StreakTracker::new(open_store(root)?);
    match subcmd {
        StreakSubcommand::CheckIn { date } => {
            let status = tracker.check_in(day_or_today(date.as_deref())?)?;
            print_status(&status, json)
        }
        StreakSubcommand::Show { date } => {
            let status = tracker.status(day_or_today(date.as_deref())?)?;
            print_status(&status, json)
        }
        StreakSubcommand::Reset => {
            tracker.reset().context("failed to reset streak")?;
            if json {
                print_json(&serde_json::json!({ "reset": true }))
            } else {
                println!("Streak reset.");
                Ok(())
            }
        }
    }
}

pub fn open_store(root: &Path) -> anyhow::Result<FileStore> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let path = config.store_path(root);
    FileStore::open(&path).with_context(|| format!("failed to open store {}", path.display()))
}

pub fn day_or_today(date: Option<&str>) -> anyhow::Result<chrono::NaiveDate> {
    match date {
        Some(d) => Ok(parse_date(d)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn print_status(status: &StreakStatus, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(status);
    }
    println!("Current streak: {} day(s)", status.current);
    println!("Longest streak: {} day(s)", status.longest);
    match status.last_active {
        Some(d) => println!("Last active:    {d}"),
        None => println!("Last active:    never"),
    }
    Ok(())
}
