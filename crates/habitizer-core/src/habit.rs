use crate::achievement::Milestones;
use crate::error::{HabitError, Result, ValidationError};
use crate::paths;
use crate::types::{Category, Frequency, HabitFilter};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_REMINDER_TIME: &str = "09:00";

/// Streak length at which a habit's progress bar is full.
pub const STREAK_GOAL: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub frequency: Frequency,
    pub category: Category,
    pub color: String,
    pub reminder_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    pub streak: u32,
    pub total_completed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Completion resets by date comparison: yesterday's check reads as
    /// pending today without any explicit transition.
    pub fn completed_today(&self, today: NaiveDate) -> bool {
        self.last_completed == Some(today)
    }

    pub fn to_draft(&self) -> HabitDraft {
        HabitDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            frequency: self.frequency,
            category: self.category,
            reminder_enabled: self.reminder_enabled,
            reminder_time: self
                .reminder_time
                .clone()
                .unwrap_or_else(|| DEFAULT_REMINDER_TIME.to_string()),
        }
    }

    pub fn streak_tier(&self) -> StreakTier {
        StreakTier::for_streak(self.streak)
    }

    /// Share of [`STREAK_GOAL`] reached, capped at 100.
    pub fn streak_progress(&self) -> f64 {
        (f64::from(self.streak) / f64::from(STREAK_GOAL) * 100.0).min(100.0)
    }
}

// ---------------------------------------------------------------------------
// HabitDraft (create / edit form)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDraft {
    pub title: String,
    pub description: String,
    pub frequency: Frequency,
    pub category: Category,
    pub reminder_enabled: bool,
    pub reminder_time: String,
}

impl Default for HabitDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            frequency: Frequency::Daily,
            category: Category::Wellness,
            reminder_enabled: false,
            reminder_time: DEFAULT_REMINDER_TIME.to_string(),
        }
    }
}

impl HabitDraft {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut err = ValidationError::new();
        if self.title.trim().is_empty() {
            err.push("title", "Title is required");
        }
        if self.description.trim().is_empty() {
            err.push("description", "Description is required");
        }
        if self.reminder_enabled && self.reminder_time.trim().is_empty() {
            err.push(
                "reminder_time",
                "Reminder time is required when reminders are enabled",
            );
        }
        err.into_result()
    }

    fn apply_to(self, habit: &mut Habit) {
        habit.title = self.title;
        habit.description = self.description;
        habit.frequency = self.frequency;
        habit.category = self.category;
        habit.color = self.category.color().to_string();
        habit.reminder_enabled = self.reminder_enabled;
        habit.reminder_time = if self.reminder_time.trim().is_empty() {
            None
        } else {
            Some(self.reminder_time)
        };
    }
}

// ---------------------------------------------------------------------------
// StreakTier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTier {
    Base,
    /// A week or more.
    Purple,
    /// A month or more.
    Gold,
}

impl StreakTier {
    pub fn for_streak(streak: u32) -> Self {
        if streak >= 30 {
            StreakTier::Gold
        } else if streak >= 7 {
            StreakTier::Purple
        } else {
            StreakTier::Base
        }
    }
}

// ---------------------------------------------------------------------------
// Toggle outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Completed,
    Undone,
}

// ---------------------------------------------------------------------------
// HabitStats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitStats {
    pub total_habits: usize,
    pub completed_today: usize,
    pub total_streak: u32,
    pub average_streak: u32,
}

// ---------------------------------------------------------------------------
// HabitRegistry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HabitRegistry {
    #[serde(default)]
    pub habits: Vec<Habit>,
}

impl HabitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(root: &Path) -> Result<Self> {
        match crate::io::read_optional(&paths::habits_path(root))? {
            Some(data) => Ok(serde_yaml::from_str(&data)?),
            None => Ok(Self::new()),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::habits_path(root), data.as_bytes())
    }

    pub fn create(&mut self, draft: HabitDraft) -> Result<&Habit> {
        self.create_at(draft, Utc::now())
    }

    pub fn create_at(&mut self, draft: HabitDraft, now: DateTime<Utc>) -> Result<&Habit> {
        draft.validate()?;
        let mut habit = Habit {
            id: uuid::Uuid::new_v4().simple().to_string(),
            title: String::new(),
            description: String::new(),
            frequency: Frequency::Daily,
            category: Category::Wellness,
            color: String::new(),
            reminder_enabled: false,
            reminder_time: None,
            streak: 0,
            total_completed: 0,
            last_completed: None,
            created_at: now,
        };
        draft.apply_to(&mut habit);
        tracing::debug!(id = %habit.id, title = %habit.title, "habit created");
        self.habits.push(habit);
        Ok(&self.habits[self.habits.len() - 1])
    }

    /// Replace the form fields of an existing habit; progress is kept.
    pub fn update(&mut self, id: &str, draft: HabitDraft) -> Result<&Habit> {
        draft.validate()?;
        let habit = self.find_mut(id)?;
        draft.apply_to(habit);
        tracing::debug!(id = %habit.id, "habit updated");
        Ok(&*habit)
    }

    pub fn delete(&mut self, id: &str) -> Result<Habit> {
        let idx = self.position(id)?;
        let removed = self.habits.remove(idx);
        tracing::debug!(id = %removed.id, "habit deleted");
        Ok(removed)
    }

    /// Flip today's completion. Completing bumps the streak and total;
    /// undoing on the same day takes both back (floored at zero).
    pub fn toggle_completion(&mut self, id: &str, today: NaiveDate) -> Result<ToggleOutcome> {
        let habit = self.find_mut(id)?;
        let outcome = if habit.completed_today(today) {
            habit.streak = habit.streak.saturating_sub(1);
            habit.total_completed = habit.total_completed.saturating_sub(1);
            habit.last_completed = None;
            ToggleOutcome::Undone
        } else {
            habit.streak += 1;
            habit.total_completed += 1;
            habit.last_completed = Some(today);
            ToggleOutcome::Completed
        };
        tracing::debug!(id = %habit.id, streak = habit.streak, ?outcome, "habit toggled");
        Ok(outcome)
    }

    /// Habits matching `filter`, in insertion order.
    pub fn list(&self, filter: HabitFilter) -> Vec<&Habit> {
        self.habits
            .iter()
            .filter(|h| filter.matches(h.frequency))
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<&Habit> {
        let idx = self.position(id)?;
        Ok(&self.habits[idx])
    }

    pub fn stats(&self, today: NaiveDate) -> HabitStats {
        let total_streak: u32 = self.habits.iter().map(|h| h.streak).sum();
        let average_streak = if self.habits.is_empty() {
            0
        } else {
            (f64::from(total_streak) / self.habits.len() as f64).round() as u32
        };
        HabitStats {
            total_habits: self.habits.len(),
            completed_today: self
                .habits
                .iter()
                .filter(|h| h.completed_today(today))
                .count(),
            total_streak,
            average_streak,
        }
    }

    /// Habit-list progress that feeds achievements.
    pub fn milestones(&self) -> Milestones {
        Milestones {
            habit_checkoffs: self.habits.iter().map(|h| u64::from(h.total_completed)).sum(),
            best_streak: self.habits.iter().map(|h| h.streak).max().unwrap_or(0),
        }
    }

    /// Resolve an id, or a prefix of one that matches exactly one habit.
    fn position(&self, id: &str) -> Result<usize> {
        if let Some(i) = self.habits.iter().position(|h| h.id == id) {
            return Ok(i);
        }
        let mut matches = self
            .habits
            .iter()
            .enumerate()
            .filter(|(_, h)| !id.is_empty() && h.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some((i, _)), None) => Ok(i),
            _ => Err(HabitError::HabitNotFound(id.to_string())),
        }
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Habit> {
        let idx = self.position(id)?;
        Ok(&mut self.habits[idx])
    }
}

/// Starter habits offered on first run.
pub fn sample_drafts() -> Vec<HabitDraft> {
    vec![
        HabitDraft {
            title: "Morning Meditation".to_string(),
            description: "Start the day with 10 minutes of mindfulness".to_string(),
            frequency: Frequency::Daily,
            category: Category::Wellness,
            reminder_enabled: true,
            reminder_time: "07:00".to_string(),
        },
        HabitDraft {
            title: "Read for 30 minutes".to_string(),
            description: "Expand knowledge through daily reading".to_string(),
            frequency: Frequency::Daily,
            category: Category::Learning,
            reminder_enabled: true,
            reminder_time: "20:00".to_string(),
        },
        HabitDraft {
            title: "Weekly Workout Plan".to_string(),
            description: "Complete 3 gym sessions this week".to_string(),
            frequency: Frequency::Weekly,
            category: Category::Fitness,
            ..HabitDraft::default()
        },
        HabitDraft {
            title: "Budget Review".to_string(),
            description: "Review and adjust monthly budget".to_string(),
            frequency: Frequency::Monthly,
            category: Category::Finance,
            reminder_enabled: true,
            reminder_time: "1st of month".to_string(),
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
