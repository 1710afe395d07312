//! Configuration management.
//!
//! Settings come from three layers, highest precedence first:
//!
//! 1. command-line flags,
//! 2. environment variables (a `.env` file in the working directory is loaded at startup),
//! 3. `config.json` in the application data directory, written by `jwlog init`.
//!
//! Values still missing after that are prompted for interactively. The
//! aggregation core never reads any of these sources itself: the report
//! command resolves them into a [`ReportOptions`](crate::libs::aggregate::ReportOptions).
//!
//! ## Environment
//!
//! | Variable        | Meaning                                   |
//! |-----------------|-------------------------------------------|
//! | `EMAIL`         | Jira account email and worklog author filter |
//! | `API_KEY`       | Jira API token                            |
//! | `TZ`            | Reference timezone for period boundaries  |
//! | `JIRA_BASE_URL` | Jira base URL                             |
//! | `MOCK_JIRA`     | `1` to use built-in sample issues         |

use super::data_storage::DataStorage;
use crate::api::jira::JiraConfig;
use crate::libs::messages::Message;
use crate::libs::period::Period;
use crate::{msg_error_anyhow, msg_print};
use anyhow::Result;
use chrono_tz::Tz;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_OUTPUT: &str = "worklog-report.xlsx";
pub const DEFAULT_TIMEZONE: &str = "UTC";

pub const ENV_EMAIL: &str = "EMAIL";
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_TIMEZONE: &str = "TZ";
pub const ENV_BASE_URL: &str = "JIRA_BASE_URL";
pub const ENV_MOCK: &str = "MOCK_JIRA";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Defaults for the `report` command.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReportConfig {
    /// IANA name of the reference timezone.
    pub timezone: String,
    /// Default output file; its extension picks the format.
    pub output: String,
    /// Period used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            timezone: DEFAULT_TIMEZONE.to_string(),
            output: DEFAULT_OUTPUT.to_string(),
            period: None,
        }
    }
}

impl ReportConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "report".to_string(),
            name: "Report".to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let default = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleReport);

        let timezone: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTimezone.to_string())
            .default(default.timezone)
            .validate_with(|input: &String| parse_timezone(input).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?;

        let output: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptOutputFile.to_string())
            .default(default.output)
            .interact_text()?;

        Ok(Self {
            timezone,
            output,
            period: default.period,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira: Option<JiraConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,
}

impl Config {
    /// Reads the configuration file, or returns the default when it does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` when there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Interactive setup wizard. Existing values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [JiraConfig::module(), ReportConfig::module()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .defaults(&[true, true])
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "jira" => config.jira = Some(JiraConfig::init(&config.jira)?),
                "report" => config.report = Some(ReportConfig::init(&config.report)?),
                _ => {}
            }
        }

        Ok(config)
    }
}

/// Parses an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim().parse::<Tz>().map_err(|_| msg_error_anyhow!(Message::UnknownTimezone(name.to_string())))
}

/// Settings taken from the process environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub email: Option<String>,
    pub api_key: Option<String>,
    pub timezone: Option<String>,
    pub base_url: Option<String>,
    pub mock: bool,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            email: non_empty_var(ENV_EMAIL),
            api_key: non_empty_var(ENV_API_KEY),
            timezone: non_empty_var(ENV_TIMEZONE),
            base_url: non_empty_var(ENV_BASE_URL),
            mock: non_empty_var(ENV_MOCK).is_some_and(|value| value == "1"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
