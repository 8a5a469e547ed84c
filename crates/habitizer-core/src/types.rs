use crate::error::HabitError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn all() -> &'static [Frequency] {
        &[Frequency::Daily, Frequency::Weekly, Frequency::Monthly]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Frequency {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(HabitError::InvalidFrequency(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// HabitFilter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HabitFilter {
    #[default]
    All,
    Only(Frequency),
}

impl HabitFilter {
    pub fn matches(self, frequency: Frequency) -> bool {
        match self {
            HabitFilter::All => true,
            HabitFilter::Only(f) => f == frequency,
        }
    }
}

impl std::str::FromStr for HabitFilter {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(HabitFilter::All);
        }
        s.parse::<Frequency>()
            .map(HabitFilter::Only)
            .map_err(|_| HabitError::InvalidFilter(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Wellness,
    Learning,
    Fitness,
    Finance,
    Productivity,
    Social,
    Creative,
    Health,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Wellness,
            Category::Learning,
            Category::Fitness,
            Category::Finance,
            Category::Productivity,
            Category::Social,
            Category::Creative,
            Category::Health,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Wellness => "Wellness",
            Category::Learning => "Learning",
            Category::Fitness => "Fitness",
            Category::Finance => "Finance",
            Category::Productivity => "Productivity",
            Category::Social => "Social",
            Category::Creative => "Creative",
            Category::Health => "Health",
        }
    }

    /// Gradient used for cards in this category.
    pub fn color(self) -> &'static str {
        match self {
            Category::Wellness => "from-purple-500 to-pink-500",
            Category::Learning => "from-cyan-500 to-blue-500",
            Category::Fitness => "from-green-500 to-emerald-500",
            Category::Finance => "from-orange-500 to-red-500",
            Category::Productivity => "from-yellow-500 to-orange-500",
            Category::Social => "from-pink-500 to-red-500",
            Category::Creative => "from-indigo-500 to-purple-500",
            Category::Health => "from-red-500 to-pink-500",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| HabitError::InvalidCategory(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// OutfitId
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutfitId {
    #[default]
    Basic,
    Ninja,
    Wizard,
    Knight,
    Superhero,
    Royal,
}

impl OutfitId {
    pub fn all() -> &'static [OutfitId] {
        &[
            OutfitId::Basic,
            OutfitId::Ninja,
            OutfitId::Wizard,
            OutfitId::Knight,
            OutfitId::Superhero,
            OutfitId::Royal,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutfitId::Basic => "basic",
            OutfitId::Ninja => "ninja",
            OutfitId::Wizard => "wizard",
            OutfitId::Knight => "knight",
            OutfitId::Superhero => "superhero",
            OutfitId::Royal => "royal",
        }
    }
}

impl fmt::Display for OutfitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutfitId {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutfitId::all()
            .iter()
            .copied()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| HabitError::UnknownOutfit(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Calendar days
// ---------------------------------------------------------------------------

/// Format used for every stored day: `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(s: &str) -> Result<NaiveDate, HabitError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| HabitError::InvalidDate(s.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_parse_and_display() {
        for f in Frequency::all() {
            assert_eq!(f.as_str().parse::<Frequency>().unwrap(), *f);
        }
        assert!("yearly".parse::<Frequency>().is_err());
    }

    #[test]
    fn filter_all_matches_everything() {
        let filter: HabitFilter = "all".parse().unwrap();
        assert!(Frequency::all().iter().all(|f| filter.matches(*f)));
    }

    #[test]
    fn filter_by_frequency() {
        let filter: HabitFilter = "weekly".parse().unwrap();
        assert!(filter.matches(Frequency::Weekly));
        assert!(!filter.matches(Frequency::Daily));
        assert!(matches!(
            "hourly".parse::<HabitFilter>(),
            Err(HabitError::InvalidFilter(_))
        ));
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!("fitness".parse::<Category>().unwrap(), Category::Fitness);
        assert_eq!(Category::Fitness.color(), "from-green-500 to-emerald-500");
        assert!("Gardening".parse::<Category>().is_err());
    }

    #[test]
    fn outfit_id_yaml_is_snake_case() {
        let yaml = serde_yaml::to_string(&OutfitId::Superhero).unwrap();
        assert_eq!(yaml.trim(), "superhero");
        assert!(matches!(
            "pirate".parse::<OutfitId>(),
            Err(HabitError::UnknownOutfit(_))
        ));
    }

    #[test]
    fn dates_use_iso_days() {
        let d = parse_date("2024-03-09").unwrap();
        assert_eq!(format_date(d), "2024-03-09");
        assert!(matches!(parse_date("09/03/2024"), Err(HabitError::InvalidDate(_))));
    }
}
