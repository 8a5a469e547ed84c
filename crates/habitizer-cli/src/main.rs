mod cmd;
mod output;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cmd::{
    achievement::AchievementSubcommand, config::ConfigSubcommand, habit::HabitSubcommand,
    outfit::OutfitSubcommand, reward::RewardSubcommand,
};
use habitizer_core::{paths, types};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "habitizer",
    about = "Track habits, earn XP and coins, level up and dress your avatar",
    version,
    propagate_version = true
)]
struct Cli {
    /// State root (default: nearest directory with .habitizer/, else $HOME)
    #[arg(long, global = true, env = "HABITIZER_ROOT")]
    root: Option<PathBuf>,

    /// Calendar day to act on, YYYY-MM-DD (default: today on the local clock)
    #[arg(long, global = true, env = "HABITIZER_TODAY")]
    today: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the .habitizer/ state directory
    Init {
        /// Profile name (default: the root directory's name)
        #[arg(long)]
        profile: Option<String>,

        /// Seed the habit list with a few starter habits
        #[arg(long)]
        samples: bool,
    },

    /// Show level, XP, coins, outfit and today's progress
    Status,

    /// Reset the player (level, XP, coins, outfits) and the completion ledger
    Reset,

    /// Daily reward habits that pay out XP and coins
    Reward {
        #[command(subcommand)]
        subcommand: RewardSubcommand,
    },

    /// Avatar outfit shop
    Outfit {
        #[command(subcommand)]
        subcommand: OutfitSubcommand,
    },

    /// Milestones that pay bonus XP
    Achievement {
        #[command(subcommand)]
        subcommand: AchievementSubcommand,
    },

    /// Manage your own habit list
    Habit {
        #[command(subcommand)]
        subcommand: HabitSubcommand,
    },

    /// Create an account with the habitizer service
    Signup {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
        /// Override the signup base URL from config.yaml
        #[arg(long, env = "HABITIZER_SIGNUP_URL")]
        url: Option<String>,
    },

    /// Inspect and validate configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn resolve_today(explicit: Option<&str>) -> anyhow::Result<NaiveDate> {
    match explicit {
        Some(s) => types::parse_date(s).context("invalid --today"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let root = paths::resolve_root(cli.root.as_deref(), &cwd)?;
    let today = resolve_today(cli.today.as_deref())?;
    tracing::debug!(root = %root.display(), %today, "resolved context");

    match cli.command {
        Commands::Init { profile, samples } => {
            cmd::init::run(&root, profile.as_deref(), samples, cli.json)
        }
        Commands::Status => cmd::status::run(&root, today, cli.json),
        Commands::Reset => cmd::reset::run(&root, cli.json),
        Commands::Reward { subcommand } => cmd::reward::run(&root, subcommand, today, cli.json),
        Commands::Outfit { subcommand } => cmd::outfit::run(&root, subcommand, today, cli.json),
        Commands::Achievement { subcommand } => {
            cmd::achievement::run(&root, subcommand, cli.json)
        }
        Commands::Habit { subcommand } => cmd::habit::run(&root, subcommand, today, cli.json),
        Commands::Signup {
            name,
            email,
            phone,
            address,
            url,
        } => cmd::signup::run(
            &root,
            habitizer_core::signup::SignupForm {
                name,
                email,
                phone,
                address,
            },
            url.as_deref(),
            cli.json,
        ),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    }
}
