//! A loaded profile: config, player, completion ledger and habit list.
//!
//! Files are read once on [`Session::open`]. Each [`Intent`] is applied to
//! the in-memory state and, when it changed something, written straight back
//! before returning. A failed intent leaves both memory and disk untouched.

use crate::achievement::{self, AchievementId};
use crate::catalog::{self, HabitDefinition};
use crate::config::Config;
use crate::error::{HabitError, Result};
use crate::habit::{self, Habit, HabitDraft, HabitRegistry, ToggleOutcome};
use crate::io;
use crate::ledger::CompletionLedger;
use crate::outfit;
use crate::paths;
use crate::player::PlayerState;
use crate::progression::{self, CompletionOutcome};
use crate::types::OutfitId;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything the presentation surface can ask for.
#[derive(Debug, Clone)]
pub enum Intent {
    CompleteHabit(HabitDefinition),
    PurchaseOutfit(OutfitId),
    EquipOutfit(OutfitId),
    CreateHabit(HabitDraft),
    UpdateHabit { id: String, draft: HabitDraft },
    DeleteHabit(String),
    ToggleCompletion(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum IntentOutcome {
    HabitCompleted {
        habit: String,
        #[serde(flatten)]
        outcome: CompletionOutcome,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        achievements: Vec<AchievementId>,
    },
    OutfitPurchased {
        outfit: OutfitId,
        coins: u64,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        achievements: Vec<AchievementId>,
    },
    OutfitEquipped {
        outfit: OutfitId,
    },
    HabitCreated {
        habit: Habit,
    },
    HabitUpdated {
        habit: Habit,
    },
    HabitDeleted {
        habit: Habit,
    },
    CompletionToggled {
        habit: Habit,
        toggle: ToggleOutcome,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        achievements: Vec<AchievementId>,
    },
}

/// New values for the state files one intent touches. `None` leaves a file
/// alone.
#[derive(Debug, Default)]
struct Staged {
    player: Option<PlayerState>,
    ledger: Option<CompletionLedger>,
    habits: Option<HabitRegistry>,
}

#[derive(Debug, Clone, Copy)]
enum StateFile {
    Ledger,
    Habits,
    Player,
}

#[derive(Debug)]
pub struct Session {
    root: PathBuf,
    pub config: Config,
    pub player: PlayerState,
    pub ledger: CompletionLedger,
    pub habits: HabitRegistry,
}

impl Session {
    /// Create the state directory and any missing files. Existing files are
    /// kept, so running it twice is harmless.
    pub fn init(root: &Path, profile: &str, with_samples: bool) -> Result<Self> {
        io::ensure_dir(&paths::habitizer_dir(root))?;

        let config = match Config::load(root) {
            Ok(cfg) => cfg,
            Err(HabitError::NotInitialized) => {
                let cfg = Config::new(profile);
                cfg.save(root)?;
                cfg
            }
            Err(e) => return Err(e),
        };

        if !paths::player_path(root).exists() {
            PlayerState::new(config.player.starting_coins).save(root)?;
        }

        if !paths::habits_path(root).exists() {
            let mut habits = HabitRegistry::new();
            if with_samples {
                for draft in habit::sample_drafts() {
                    habits.create(draft)?;
                }
            }
            habits.save(root)?;
        }

        if !paths::ledger_path(root).exists() {
            CompletionLedger::new().save(root)?;
        }

        tracing::info!(root = %root.display(), "profile initialized");
        Self::open(root)
    }

    pub fn open(root: &Path) -> Result<Self> {
        Ok(Self {
            root: root.to_path_buf(),
            config: Config::load(root)?,
            player: PlayerState::load(root)?,
            ledger: CompletionLedger::load(root)?,
            habits: HabitRegistry::load(root)?,
        })
    }

    /// Start over: a fresh player and an empty ledger. Config and the habit
    /// list survive.
    pub fn reset(&mut self) -> Result<()> {
        self.commit(Staged {
            player: Some(PlayerState::new(self.config.player.starting_coins)),
            ledger: Some(CompletionLedger::new()),
            habits: None,
        })?;
        tracing::info!("player state reset");
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn apply(&mut self, intent: Intent, today: NaiveDate) -> Result<IntentOutcome> {
        match intent {
            Intent::CompleteHabit(def) => {
                let done = progression::complete_habit(&self.player, &self.ledger, &def, today);
                if done.outcome == CompletionOutcome::AlreadyCompleted {
                    return Ok(IntentOutcome::HabitCompleted {
                        habit: def.name,
                        outcome: done.outcome,
                        achievements: Vec::new(),
                    });
                }
                let (player, achievements) =
                    achievement::award(&done.state, self.habits.milestones());
                self.commit(Staged {
                    player: Some(player),
                    ledger: Some(done.ledger),
                    habits: None,
                })?;
                Ok(IntentOutcome::HabitCompleted {
                    habit: def.name,
                    outcome: done.outcome,
                    achievements,
                })
            }
            Intent::PurchaseOutfit(id) => {
                let bought = outfit::purchase(&self.player, outfit::get(id))?;
                let (player, achievements) = achievement::award(&bought, self.habits.milestones());
                self.commit(Staged {
                    player: Some(player),
                    ..Staged::default()
                })?;
                Ok(IntentOutcome::OutfitPurchased {
                    outfit: id,
                    coins: self.player.coins,
                    achievements,
                })
            }
            Intent::EquipOutfit(id) => {
                let next = outfit::equip(&self.player, id)?;
                self.commit(Staged {
                    player: Some(next),
                    ..Staged::default()
                })?;
                Ok(IntentOutcome::OutfitEquipped { outfit: id })
            }
            Intent::CreateHabit(draft) => {
                let mut habits = self.habits.clone();
                let habit = habits.create(draft)?.clone();
                self.commit_habits(habits)?;
                Ok(IntentOutcome::HabitCreated { habit })
            }
            Intent::UpdateHabit { id, draft } => {
                let mut habits = self.habits.clone();
                let habit = habits.update(&id, draft)?.clone();
                self.commit_habits(habits)?;
                Ok(IntentOutcome::HabitUpdated { habit })
            }
            Intent::DeleteHabit(id) => {
                let mut habits = self.habits.clone();
                let habit = habits.delete(&id)?;
                self.commit_habits(habits)?;
                Ok(IntentOutcome::HabitDeleted { habit })
            }
            Intent::ToggleCompletion(id) => {
                let mut habits = self.habits.clone();
                let toggle = habits.toggle_completion(&id, today)?;
                let habit = habits.get(&id)?.clone();
                let (player, achievements) = achievement::award(&self.player, habits.milestones());
                self.commit(Staged {
                    player: (!achievements.is_empty()).then_some(player),
                    ledger: None,
                    habits: Some(habits),
                })?;
                Ok(IntentOutcome::CompletionToggled {
                    habit,
                    toggle,
                    achievements,
                })
            }
        }
    }

    /// Convenience for the reward list: complete a catalog habit by name.
    pub fn complete_reward(&mut self, name: &str, today: NaiveDate) -> Result<IntentOutcome> {
        let def = catalog::find(name)?;
        self.apply(Intent::CompleteHabit(def), today)
    }

    fn commit_habits(&mut self, habits: HabitRegistry) -> Result<()> {
        self.commit(Staged {
            habits: Some(habits),
            ..Staged::default()
        })
    }

    /// Write every staged file, then adopt the new values in memory. If any
    /// write fails, files already written are put back from the in-memory
    /// state, which still holds the previous values.
    fn commit(&mut self, staged: Staged) -> Result<()> {
        let mut written = Vec::new();
        if let Err(e) = self.write_staged(&staged, &mut written) {
            self.roll_back(&written);
            return Err(e);
        }

        if let Some(player) = staged.player {
            self.player = player;
        }
        if let Some(ledger) = staged.ledger {
            self.ledger = ledger;
        }
        if let Some(habits) = staged.habits {
            self.habits = habits;
        }
        Ok(())
    }

    fn write_staged(&self, staged: &Staged, written: &mut Vec<StateFile>) -> Result<()> {
        if let Some(ledger) = &staged.ledger {
            ledger.save(&self.root)?;
            written.push(StateFile::Ledger);
        }
        if let Some(habits) = &staged.habits {
            habits.save(&self.root)?;
            written.push(StateFile::Habits);
        }
        if let Some(player) = &staged.player {
            player.save(&self.root)?;
            written.push(StateFile::Player);
        }
        Ok(())
    }

    fn roll_back(&self, written: &[StateFile]) {
        for file in written.iter().rev() {
            let restored = match file {
                StateFile::Ledger => self.ledger.save(&self.root),
                StateFile::Habits => self.habits.save(&self.root),
                StateFile::Player => self.player.save(&self.root),
            };
            match restored {
                Ok(()) => tracing::warn!(?file, "rolled back partial write"),
                Err(e) => tracing::error!(?file, error = %e, "rollback failed"),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
