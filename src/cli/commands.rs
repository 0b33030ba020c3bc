//! Subcommand handlers for config actions.

use std::path::Path;

use super::args::ConfigAction;
use crate::config::{self, Config, ConfigError};

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    config: &Config,
    config_path: &Path,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Show => {
            let options = config.render_options()?;
            println!("Current configuration:");
            println!("  Mode: {}", options.mode.name());
            println!("  Background: {}", options.background);
            println!("  Chars: {}", options.ramp);
            println!("  Space: {:?}", options.space);
            println!("  Equalize: {}", yes_no(options.equalize));
            println!("  Print background: {}", yes_no(options.bgprint));
            println!("  Width: {}", auto_or(config.output.width));
            println!("  Height: {}", auto_or(config.output.height));
            println!("  Step through: {}", yes_no(config.output.stepthrough));
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            config::init(config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn auto_or(value: Option<usize>) -> String {
    match value {
        Some(n) if n > 0 => n.to_string(),
        _ => "auto".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_or() {
        assert_eq!(auto_or(None), "auto");
        assert_eq!(auto_or(Some(0)), "auto");
        assert_eq!(auto_or(Some(42)), "42");
    }

    #[test]
    fn test_init_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::default();

        handle_config_action(ConfigAction::Init, &config, &path).unwrap();
        assert!(path.exists());
        handle_config_action(ConfigAction::Show, &config, &path).unwrap();
        assert!(matches!(
            handle_config_action(ConfigAction::Init, &config, &path),
            Err(ConfigError::AlreadyExists(_))
        ));
    }
}
