use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Subcommand;
use habitizer_core::{
    outfit,
    session::{Intent, IntentOutcome, Session},
};
use std::path::Path;

#[derive(Subcommand)]
pub enum OutfitSubcommand {
    /// Show the shop: cost and status of every outfit
    List,
    /// Buy an outfit with coins
    Buy { outfit: String },
    /// Wear an unlocked outfit
    Equip { outfit: String },
}

pub fn run(root: &Path, subcmd: OutfitSubcommand, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    match subcmd {
        OutfitSubcommand::List => list(root, json),
        OutfitSubcommand::Buy { outfit } => buy(root, &outfit, today, json),
        OutfitSubcommand::Equip { outfit } => equip(root, &outfit, today, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let session = Session::open(root).context("failed to load profile")?;
    let shop = outfit::shop(&session.player);

    if json {
        print_json(&serde_json::json!({
            "coins": session.player.coins,
            "outfits": shop,
        }))?;
        return Ok(());
    }

    let rows = shop
        .iter()
        .map(|e| {
            let status = if e.equipped {
                "equipped"
            } else if e.unlocked {
                "owned"
            } else if e.affordable {
                "buy"
            } else {
                "locked"
            };
            vec![
                e.outfit.id.to_string(),
                format!("{} {}", e.outfit.icon, e.outfit.display_name),
                e.outfit.cost.to_string(),
                status.to_string(),
            ]
        })
        .collect();
    println!("Coins: {}", session.player.coins);
    print_table(&["ID", "OUTFIT", "COST", "STATUS"], rows);
    Ok(())
}

fn buy(root: &Path, name: &str, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let def = outfit::lookup(name)?;
    let mut session = Session::open(root).context("failed to load profile")?;
    let outcome = session
        .apply(Intent::PurchaseOutfit(def.id), today)
        .with_context(|| format!("cannot buy '{}'", def.display_name))?;

    if json {
        print_json(&outcome)?;
    } else {
        println!(
            "Unlocked {} {} for {} coins ({} left)",
            def.icon, def.display_name, def.cost, session.player.coins
        );
        if let IntentOutcome::OutfitPurchased { achievements, .. } = &outcome {
            super::achievement::announce(achievements);
        }
    }
    Ok(())
}

fn equip(root: &Path, name: &str, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let def = outfit::lookup(name)?;
    let mut session = Session::open(root).context("failed to load profile")?;
    let outcome = session
        .apply(Intent::EquipOutfit(def.id), today)
        .with_context(|| format!("cannot equip '{}'", def.display_name))?;

    if json {
        print_json(&outcome)?;
    } else {
        println!("Now wearing {} {}", def.icon, def.display_name);
    }
    Ok(())
}
