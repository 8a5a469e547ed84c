pub mod achievement;
pub mod config;
pub mod habit;
pub mod init;
pub mod outfit;
pub mod reset;
pub mod reward;
pub mod signup;
pub mod status;
