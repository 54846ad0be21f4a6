use crate::cmd::streak::{day_or_today, open_store};
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use pathwise_core::streak::{GoalTracker, StreakTracker};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum GoalSubcommand {
    /// Add a streak goal
    Add {
        /// Goal title
        title: String,
        /// Streak length that meets the goal
        #[arg(long)]
        days: u32,
    },

    /// List goals with their progress
    List,

    /// Mark a goal complete
    Complete {
        /// Goal id
        id: String,
    },

    /// Delete a goal
    Remove {
        /// Goal id
        id: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: GoalSubcommand, json: bool) -> anyhow::Result<()> {
    let mut store = open_store(root)?;
    let today = day_or_today(None)?;

    match subcmd {
        GoalSubcommand::Add { title, days } => {
            let goal = GoalTracker::new(&mut store)
                .add(&title, days, today)
                .context("failed to add goal")?;
            if json {
                print_json(&goal)?;
            } else {
                println!("Goal added: {} [{}] ({} day(s))", goal.title, goal.id, goal.target_days);
            }
        }
        GoalSubcommand::List => {
            let streak = StreakTracker::new(&mut store).status(today)?;
            let progress = GoalTracker::new(&mut store).progress_all(&streak)?;
            if json {
                print_json(&progress)?;
                return Ok(());
            }
            if progress.is_empty() {
                println!("No goals. Run: pathwise goal add <title> --days <n>");
                return Ok(());
            }
            let rows = progress
                .iter()
                .map(|p| {
                    vec![
                        p.goal.id.clone(),
                        p.goal.title.clone(),
                        format!("{}/{}", p.days_achieved, p.goal.target_days),
                        if p.goal.is_completed() {
                            "done".to_string()
                        } else if p.met {
                            "met".to_string()
                        } else {
                            "open".to_string()
                        },
                    ]
                })
                .collect();
            print_table(&["ID", "TITLE", "DAYS", "STATUS"], rows);
        }
        GoalSubcommand::Complete { id } => {
            let goal = GoalTracker::new(&mut store).complete(&id, today)?;
            if json {
                print_json(&goal)?;
            } else {
                println!("Goal completed: {} [{}]", goal.title, goal.id);
            }
        }
        GoalSubcommand::Remove { id } => {
            GoalTracker::new(&mut store).remove(&id)?;
            if json {
                print_json(&serde_json::json!({ "removed": id }))?;
            } else {
                println!("Goal removed: {id}");
            }
        }
    }
    Ok(())
}
