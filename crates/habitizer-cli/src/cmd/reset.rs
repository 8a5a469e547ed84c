use crate::output::print_json;
use anyhow::Context;
use habitizer_core::session::Session;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let mut session = Session::open(root).context("failed to load profile")?;
    session.reset().context("failed to reset player")?;

    if json {
        print_json(&serde_json::json!({ "reset": true, "player": session.player }))?;
    } else {
        println!(
            "Player reset: level 1, {} coins, basic outfit. Habit list kept.",
            session.player.coins
        );
    }
    Ok(())
}
