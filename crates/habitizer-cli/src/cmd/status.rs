use crate::output::{print_json, progress_bar};
use anyhow::Context;
use chrono::NaiveDate;
use habitizer_core::{achievement, catalog, outfit, progression, session::Session, types::format_date};
use std::path::Path;

pub fn run(root: &Path, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let session = Session::open(root).context("failed to load profile")?;
    let player = &session.player;
    let rewards = catalog::catalog();
    let rewards_done = rewards
        .iter()
        .filter(|h| progression::is_completed_today(&session.ledger, &h.name, today))
        .count();
    let stats = session.habits.stats(today);
    let current = outfit::get(player.current_outfit);

    if json {
        #[derive(serde::Serialize)]
        struct StatusOutput<'a> {
            profile: &'a str,
            today: String,
            player: &'a habitizer_core::player::PlayerState,
            xp_percentage: f64,
            rewards_completed_today: usize,
            rewards_total: usize,
            habits: habitizer_core::habit::HabitStats,
        }

        print_json(&StatusOutput {
            profile: &session.config.profile.name,
            today: format_date(today),
            player,
            xp_percentage: player.xp_percentage(),
            rewards_completed_today: rewards_done,
            rewards_total: rewards.len(),
            habits: stats,
        })?;
        return Ok(());
    }

    println!("{} {}  (level {})", current.icon, session.config.profile.name, player.level);
    println!(
        "XP:     {} {}/{}  (total {})",
        progress_bar(player.xp_percentage(), 20),
        player.xp,
        player.xp_to_next_level,
        player.total_xp
    );
    println!("Coins:  {}", player.coins);
    println!(
        "Outfit: {} ({} of {} unlocked)",
        current.display_name,
        player.unlocked_outfits.len(),
        outfit::catalog().len()
    );
    println!(
        "Badges: {} of {} achievements",
        player.achievements.len(),
        achievement::catalog().len()
    );
    println!("Today:  {}", format_date(today));
    println!("  rewards: {rewards_done}/{} completed", rewards.len());
    println!(
        "  habits:  {}/{} completed, total streak {}, average streak {}",
        stats.completed_today, stats.total_habits, stats.total_streak, stats.average_streak
    );
    Ok(())
}
