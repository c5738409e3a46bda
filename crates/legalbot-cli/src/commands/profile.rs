//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the profile command, persisting changes to `config_path`.
pub fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => {
            config.switch_profile(name.clone())?;
            config.save_to(config_path)?;
            println!("{}", formatter.success(&format!("Switched to profile '{}'", name)));
            Ok(())
        }
        ProfileAction::Set { name, url } => {
            let action = set_profile(config, name.clone(), url);
            config.save_to(config_path)?;
            println!("{}", formatter.success(&format!("{} profile '{}'", action, name)));
            Ok(())
        }
        ProfileAction::Delete { name } => {
            if delete_profile(config, &name)? {
                config.save_to(config_path)?;
                println!("{}", formatter.success(&format!("Deleted profile '{}'", name)));
            } else {
                println!(
                    "{}",
                    formatter.warning(&format!("Profile '{}' does not exist", name))
                );
            }
            Ok(())
        }
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        println!("    URL: {}", profile.backend_url);
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    println!("  URL: {}", profile.backend_url);

    Ok(())
}

/// Create or update a profile, returning the verb for the status line.
fn set_profile(config: &mut Config, name: String, url: String) -> &'static str {
    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };
    config.set_profile(name, Profile { backend_url: url });
    action
}

/// Delete a profile; `false` when it did not exist.
fn delete_profile(config: &mut Config, name: &str) -> Result<bool> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }
    Ok(config.profiles.remove(name).is_some())
}
