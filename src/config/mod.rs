use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate; // missing-key check and backfill for the YAML file

/// Environment variable overriding `smtp.password`.
pub const SMTP_PASSWORD_ENV: &str = "RATTENDANCE_SMTP_PASSWORD";

pub const DEFAULT_REPORT_INTERVAL_HOURS: u64 = 8;
pub const DEFAULT_SUBJECT: &str = "Labour Attendance Report";
pub const DEFAULT_BODY: &str = "Please find the attached attendance report.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_report_file")]
    pub report_file: String,
    #[serde(default = "default_interval")]
    pub report_interval_hours: u64,
    #[serde(default = "default_face_model")]
    pub face_model: String,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_body")]
    pub body: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_report_file() -> String {
    Config::config_dir()
        .join("attendance_report.xlsx")
        .to_string_lossy()
        .to_string()
}
fn default_interval() -> u64 {
    DEFAULT_REPORT_INTERVAL_HOURS
}
fn default_face_model() -> String {
    Config::config_dir()
        .join("det_500m.onnx")
        .to_string_lossy()
        .to_string()
}
fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_smtp_port() -> u16 {
    587
}
fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}
fn default_body() -> String {
    DEFAULT_BODY.to_string()
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            sender: String::new(),
            recipient: String::new(),
            subject: default_subject(),
            body: default_body(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            report_file: default_report_file(),
            report_interval_hours: default_interval(),
            face_model: default_face_model(),
            smtp: SmtpConfig::default(),
        }
    }
}

impl SmtpConfig {
    /// Password from the environment if set, from the file otherwise.
    pub fn effective_password(&self) -> String {
        env::var(SMTP_PASSWORD_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| self.password.clone())
    }

    /// Fields that must be filled before a report can be mailed.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.host.trim().is_empty() {
            out.push("smtp.host");
        }
        if self.sender.trim().is_empty() {
            out.push("smtp.sender");
        }
        if self.recipient.trim().is_empty() {
            out.push("smtp.recipient");
        }
        out
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rattendance")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rattendance")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    pub fn report_path(&self) -> PathBuf {
        expand_tilde(&self.report_file)
    }

    pub fn face_model_path(&self) -> PathBuf {
        expand_tilde(&self.face_model)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files.
    ///
    /// `custom_db` replaces the default database path (relative names land in
    /// the config dir). In test mode the config file is left untouched.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
