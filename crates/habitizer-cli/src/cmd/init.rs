use crate::output::print_json;
use anyhow::Context;
use habitizer_core::{paths, session::Session};
use std::path::Path;

pub fn run(root: &Path, profile: Option<&str>, samples: bool, json: bool) -> anyhow::Result<()> {
    let profile_name = profile.map(str::to_string).unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "player".to_string())
    });

    let existed = paths::is_initialized(root);
    let session = Session::init(root, &profile_name, samples)
        .with_context(|| format!("failed to initialize {}", root.display()))?;

    if json {
        print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "profile": session.config.profile.name,
            "created": !existed,
            "habits": session.habits.habits.len(),
        }))?;
        return Ok(());
    }

    if existed {
        println!("Already initialized: {}", paths::habitizer_dir(root).display());
    } else {
        println!("Initialized habitizer in: {}", paths::habitizer_dir(root).display());
        println!("  profile: {}", session.config.profile.name);
        println!("  coins:   {}", session.player.coins);
        if !session.habits.habits.is_empty() {
            println!("  habits:  {} starter habits", session.habits.habits.len());
        }
    }
    Ok(())
}
