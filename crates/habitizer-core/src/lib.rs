pub mod achievement;
pub mod catalog;
pub mod config;
pub mod error;
pub mod habit;
pub mod io;
pub mod ledger;
pub mod outfit;
pub mod paths;
pub mod player;
pub mod progression;
pub mod session;
pub mod signup;
pub mod types;

pub use error::{HabitError, Result, ValidationError};
