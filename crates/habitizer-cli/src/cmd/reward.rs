use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Subcommand;
use habitizer_core::{
    catalog, progression,
    progression::CompletionOutcome,
    session::{IntentOutcome, Session},
};
use std::path::Path;

#[derive(Subcommand)]
pub enum RewardSubcommand {
    /// List reward habits and whether each is done today
    List,
    /// Complete a reward habit for today
    Complete {
        #[arg(required = true)]
        name: Vec<String>,
    },
}

pub fn run(root: &Path, subcmd: RewardSubcommand, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    match subcmd {
        RewardSubcommand::List => list(root, today, json),
        RewardSubcommand::Complete { name } => complete(root, &name.join(" "), today, json),
    }
}

fn list(root: &Path, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let session = Session::open(root).context("failed to load profile")?;
    let rewards = catalog::catalog();

    if json {
        let items: Vec<serde_json::Value> = rewards
            .iter()
            .map(|h| {
                serde_json::json!({
                    "name": h.name,
                    "xp_reward": h.xp_reward,
                    "coin_reward": h.coin_reward,
                    "completed_today": progression::is_completed_today(&session.ledger, &h.name, today),
                })
            })
            .collect();
        print_json(&items)?;
        return Ok(());
    }

    let rows = rewards
        .iter()
        .map(|h| {
            let status = if progression::is_completed_today(&session.ledger, &h.name, today) {
                "Completed Today".to_string()
            } else {
                format!("+{} XP | +{} Coins", h.xp_reward, h.coin_reward)
            };
            vec![h.name.clone(), status]
        })
        .collect();
    print_table(&["HABIT", "REWARD"], rows);
    Ok(())
}

fn complete(root: &Path, name: &str, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let mut session = Session::open(root).context("failed to load profile")?;
    let outcome = session
        .complete_reward(name, today)
        .with_context(|| format!("cannot complete '{name}'"))?;

    if json {
        print_json(&outcome)?;
        return Ok(());
    }

    let IntentOutcome::HabitCompleted {
        habit,
        outcome,
        achievements,
    } = outcome
    else {
        return Ok(());
    };
    match outcome {
        CompletionOutcome::AlreadyCompleted => {
            println!("{habit}: already completed today");
        }
        CompletionOutcome::Completed {
            xp_gained,
            coins_gained,
            levels_gained,
            new_level,
        } => {
            println!("{habit}: +{xp_gained} XP | +{coins_gained} Coins");
            super::achievement::announce(&achievements);
            let p = &session.player;
            if levels_gained > 0 || p.level > new_level {
                println!("Level up! You've reached Level {}", p.level);
            }
            println!(
                "Level {}  {}/{} XP  {} coins",
                p.level, p.xp, p.xp_to_next_level, p.coins
            );
        }
    }
    Ok(())
}
