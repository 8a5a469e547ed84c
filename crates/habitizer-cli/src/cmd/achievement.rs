use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use habitizer_core::{
    achievement::{self, AchievementId},
    session::Session,
};
use std::path::Path;

#[derive(Subcommand)]
pub enum AchievementSubcommand {
    /// Show every achievement and whether it has been earned
    List,
}

pub fn run(root: &Path, subcmd: AchievementSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        AchievementSubcommand::List => list(root, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let session = Session::open(root).context("failed to load profile")?;
    let board = achievement::board(&session.player);

    if json {
        print_json(&board)?;
        return Ok(());
    }

    let rows = board
        .iter()
        .map(|e| {
            vec![
                e.achievement.name.to_string(),
                e.achievement.description.to_string(),
                format!("+{} XP", e.achievement.xp_reward),
                if e.earned { "earned" } else { "locked" }.to_string(),
            ]
        })
        .collect();
    print_table(&["ACHIEVEMENT", "GOAL", "REWARD", "STATUS"], rows);
    Ok(())
}

/// Announce achievements earned by the command that just ran.
pub fn announce(earned: &[AchievementId]) {
    for id in earned {
        let def = achievement::get(*id);
        println!("Achievement unlocked: {} (+{} XP)", def.name, def.xp_reward);
    }
}
