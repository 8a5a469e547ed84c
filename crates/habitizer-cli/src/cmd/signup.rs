use crate::output::print_json;
use anyhow::Context;
use habitizer_core::{
    config::{Config, SignupConfig},
    signup::{SignupClient, SignupForm},
    HabitError,
};
use std::path::Path;

/// Signup works without `habitizer init`; the endpoint then comes from defaults.
pub fn run(root: &Path, form: SignupForm, url: Option<&str>, json: bool) -> anyhow::Result<()> {
    let mut signup = match Config::load(root) {
        Ok(cfg) => cfg.signup,
        Err(HabitError::NotInitialized) => SignupConfig::default(),
        Err(e) => return Err(e).context("failed to load config"),
    };
    if let Some(url) = url {
        signup.base_url = url.to_string();
    }

    let client = SignupClient::from_config(&signup);
    tracing::debug!(endpoint = client.endpoint(), "submitting signup");
    let response = client.submit(&form)?;

    if json {
        print_json(&serde_json::json!({
            "ok": true,
            "response": response,
        }))?;
    } else {
        println!("Account created successfully! Welcome aboard!");
    }
    Ok(())
}
