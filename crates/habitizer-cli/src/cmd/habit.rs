use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Subcommand;
use habitizer_core::{
    habit::{Habit, HabitDraft, ToggleOutcome, DEFAULT_REMINDER_TIME},
    session::{Intent, IntentOutcome, Session},
    types::{format_date, Category, Frequency, HabitFilter},
};
use std::path::Path;

#[derive(Subcommand)]
pub enum HabitSubcommand {
    /// Add a habit
    Create {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// daily, weekly or monthly
        #[arg(long, default_value = "daily")]
        frequency: String,
        /// Wellness, Learning, Fitness, Finance, Productivity, Social, Creative or Health
        #[arg(long, default_value = "Wellness")]
        category: String,
        /// Enable a reminder at this time (e.g. 07:30)
        #[arg(long)]
        reminder: Option<String>,
    },
    /// Edit a habit's fields; progress is kept
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        frequency: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Enable a reminder at this time
        #[arg(long, conflicts_with = "no_reminder")]
        reminder: Option<String>,
        /// Turn the reminder off
        #[arg(long)]
        no_reminder: bool,
    },
    /// Remove a habit
    Delete { id: String },
    /// Mark a habit done today, or undo today's completion
    Toggle { id: String },
    /// List habits
    List {
        /// all, daily, weekly or monthly
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Show one habit in full
    Show { id: String },
    /// Totals across all habits
    Stats,
}

pub fn run(root: &Path, subcmd: HabitSubcommand, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    match subcmd {
        HabitSubcommand::Create {
            title,
            description,
            frequency,
            category,
            reminder,
        } => {
            let draft = HabitDraft {
                title,
                description,
                frequency: frequency.parse::<Frequency>()?,
                category: category.parse::<Category>()?,
                reminder_enabled: reminder.is_some(),
                reminder_time: reminder.unwrap_or_else(|| DEFAULT_REMINDER_TIME.to_string()),
            };
            apply(root, Intent::CreateHabit(draft), today, json)
        }
        HabitSubcommand::Update {
            id,
            title,
            description,
            frequency,
            category,
            reminder,
            no_reminder,
        } => {
            let session = Session::open(root).context("failed to load profile")?;
            let mut draft = session.habits.get(&id)?.to_draft();
            if let Some(t) = title {
                draft.title = t;
            }
            if let Some(d) = description {
                draft.description = d;
            }
            if let Some(f) = frequency {
                draft.frequency = f.parse()?;
            }
            if let Some(c) = category {
                draft.category = c.parse()?;
            }
            if let Some(r) = reminder {
                draft.reminder_enabled = true;
                draft.reminder_time = r;
            }
            if no_reminder {
                draft.reminder_enabled = false;
            }
            apply(root, Intent::UpdateHabit { id, draft }, today, json)
        }
        HabitSubcommand::Delete { id } => apply(root, Intent::DeleteHabit(id), today, json),
        HabitSubcommand::Toggle { id } => apply(root, Intent::ToggleCompletion(id), today, json),
        HabitSubcommand::List { filter } => list(root, &filter, today, json),
        HabitSubcommand::Show { id } => show(root, &id, today, json),
        HabitSubcommand::Stats => stats(root, today, json),
    }
}

fn apply(root: &Path, intent: Intent, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let mut session = Session::open(root).context("failed to load profile")?;
    let outcome = session.apply(intent, today)?;

    if json {
        print_json(&outcome)?;
        return Ok(());
    }

    match outcome {
        IntentOutcome::HabitCreated { habit } => {
            println!("Created habit [{}]: {}", short_id(&habit), habit.title)
        }
        IntentOutcome::HabitUpdated { habit } => {
            println!("Updated habit [{}]: {}", short_id(&habit), habit.title)
        }
        IntentOutcome::HabitDeleted { habit } => {
            println!("Deleted habit [{}]: {}", short_id(&habit), habit.title)
        }
        IntentOutcome::CompletionToggled {
            habit,
            toggle,
            achievements,
        } => {
            match toggle {
                ToggleOutcome::Completed => println!(
                    "Completed today: {} (streak {}, {} total)",
                    habit.title, habit.streak, habit.total_completed
                ),
                ToggleOutcome::Undone => println!(
                    "Marked not done: {} (streak {})",
                    habit.title, habit.streak
                ),
            }
            super::achievement::announce(&achievements);
        }
        _ => {}
    }
    Ok(())
}

fn short_id(habit: &Habit) -> &str {
    &habit.id[..habit.id.len().min(8)]
}

fn list(root: &Path, filter: &str, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let filter: HabitFilter = filter.parse()?;
    let session = Session::open(root).context("failed to load profile")?;
    let habits = session.habits.list(filter);

    if json {
        let items: Vec<serde_json::Value> = habits
            .iter()
            .map(|h| {
                serde_json::json!({
                    "habit": h,
                    "completed_today": h.completed_today(today),
                    "streak_tier": h.streak_tier(),
                })
            })
            .collect();
        print_json(&items)?;
        return Ok(());
    }

    if habits.is_empty() {
        println!("No habits yet. Create your first one with `habitizer habit create`.");
        return Ok(());
    }

    let rows = habits
        .iter()
        .map(|h| {
            vec![
                short_id(h).to_string(),
                h.title.clone(),
                h.frequency.to_string(),
                h.category.to_string(),
                h.streak.to_string(),
                if h.completed_today(today) { "done" } else { "pending" }.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "FREQUENCY", "CATEGORY", "STREAK", "TODAY"], rows);
    Ok(())
}

fn show(root: &Path, id: &str, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let session = Session::open(root).context("failed to load profile")?;
    let h = session.habits.get(id)?;

    if json {
        print_json(&serde_json::json!({
            "habit": h,
            "completed_today": h.completed_today(today),
            "streak_tier": h.streak_tier(),
            "streak_progress": h.streak_progress(),
        }))?;
        return Ok(());
    }

    println!("[{}] {}", h.id, h.title);
    println!("  {}", h.description);
    println!("  frequency: {}", h.frequency);
    println!("  category:  {}", h.category);
    match (&h.reminder_time, h.reminder_enabled) {
        (Some(t), true) => println!("  reminder:  {t}"),
        _ => println!("  reminder:  off"),
    }
    println!(
        "  streak:    {} ({:.0}% of 30-day goal)",
        h.streak,
        h.streak_progress()
    );
    println!("  completed: {} total", h.total_completed);
    if let Some(last) = h.last_completed {
        println!("  last done: {}", format_date(last));
    }
    println!(
        "  today:     {}",
        if h.completed_today(today) { "done" } else { "pending" }
    );
    Ok(())
}

fn stats(root: &Path, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let session = Session::open(root).context("failed to load profile")?;
    let stats = session.habits.stats(today);

    if json {
        print_json(&stats)?;
    } else {
        println!("Habits:          {}", stats.total_habits);
        println!("Completed today: {}", stats.completed_today);
        println!("Total streak:    {}", stats.total_streak);
        println!("Average streak:  {}", stats.average_streak);
    }
    Ok(())
}
