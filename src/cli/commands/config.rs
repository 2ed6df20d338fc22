use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{fill_missing_keys, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        // Path del file di configurazione
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", cfg.to_yaml()?);
        }

        // ---- CHECK CONFIG ----
        if *check {
            if !path.exists() {
                warning(format!(
                    "Configuration file {} not found (defaults in use, run `init`)",
                    path.display()
                ));
            } else {
                let content = fs::read_to_string(&path)?;
                let missing = missing_keys(&content)?;
                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    warning(format!(
                        "Missing fields (defaults in use): {}",
                        missing.join(", ")
                    ));
                }
            }

            let smtp_missing = cfg.smtp.missing_fields();
            if !smtp_missing.is_empty() {
                warning(format!(
                    "Reports cannot be emailed until set: {}",
                    smtp_missing.join(", ")
                ));
            }
        }

        // ---- MIGRATE CONFIG ----
        if *migrate {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "{} not found, run `init` first",
                    path.display()
                )));
            }
            if fill_missing_keys(&path)?.is_empty() {
                success("Configuration already up to date.");
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            // Default editor basato sulla piattaforma
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            // Se l’utente ha passato --editor, usiamo quello
            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            let status = Command::new(&editor_to_use).arg(&path).status();

            match status {
                Ok(s) if s.success() => {
                    success(format!(
                        "Configuration file edited successfully using '{}'",
                        editor_to_use
                    ));
                }
                Ok(_) | Err(_) => {
                    warning(format!(
                        "Editor '{}' not available, falling back to '{}'",
                        editor_to_use, default_editor
                    ));

                    let fallback_status = Command::new(&default_editor).arg(&path).status();
                    match fallback_status {
                        Ok(s) if s.success() => {
                            success(format!(
                                "Configuration file edited successfully using fallback '{}'",
                                default_editor
                            ));
                        }
                        Ok(_) | Err(_) => {
                            return Err(AppError::Config(format!(
                                "failed to edit configuration file using fallback '{}'",
                                default_editor
                            )));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
