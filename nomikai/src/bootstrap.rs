use nomikai_application::{SettlementError, SettlementProcessor};
use nomikai_domain::MultiplierConfig;
use nomikai_infrastructure::{GreedyTransferPlanner, LoadError, load_event, load_multipliers};
use std::{env, path::PathBuf, process::ExitCode};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const EVENT_PATH_VAR: &str = "NOMIKAI_EVENT_PATH";
const MULTIPLIERS_PATH_VAR: &str = "NOMIKAI_MULTIPLIERS_PATH";
const DEFAULT_LOG_FILTER: &str = "nomikai=info";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} is not set")]
    MissingVar(&'static str),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Settlement(#[from] SettlementError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where to find the event record and the multiplier blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub event_path: PathBuf,
    pub multipliers_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let event_path = lookup(EVENT_PATH_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .ok_or(AppError::MissingVar(EVENT_PATH_VAR))?;
        let multipliers_path = lookup(MULTIPLIERS_PATH_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            event_path,
            multipliers_path,
        })
    }
}

/// Initialize logging and tracing
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads inputs, computes the settlement and renders it as JSON.
pub fn execute(config: &AppConfig) -> Result<String, AppError> {
    let event = load_event(&config.event_path)?;
    let multipliers = match &config.multipliers_path {
        Some(path) => load_multipliers(path)?,
        None => MultiplierConfig::default(),
    };

    let planner = GreedyTransferPlanner;
    let processor = SettlementProcessor::new(&planner);
    let report = processor.process(&event, &multipliers)?;

    tracing::info!(
        participant_count = report.balances.len(),
        transfer_count = report.transfers.len(),
        drift = %report.drift,
        "Settlement computed"
    );

    Ok(serde_json::to_string_pretty(&report)?)
}

/// Run the application with proper error handling
pub fn run() -> ExitCode {
    init_logging();

    let result = AppConfig::from_env().and_then(|config| execute(&config));
    match result {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Settlement failed: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[rstest]
    #[case::event_only(
        &[(EVENT_PATH_VAR, "event.json")],
        Some(AppConfig { event_path: PathBuf::from("event.json"), multipliers_path: None })
    )]
    #[case::with_multipliers(
        &[(EVENT_PATH_VAR, "event.json"), (MULTIPLIERS_PATH_VAR, "multipliers.json")],
        Some(AppConfig {
            event_path: PathBuf::from("event.json"),
            multipliers_path: Some(PathBuf::from("multipliers.json")),
        })
    )]
    #[case::empty_multipliers_ignored(
        &[(EVENT_PATH_VAR, "event.json"), (MULTIPLIERS_PATH_VAR, "")],
        Some(AppConfig { event_path: PathBuf::from("event.json"), multipliers_path: None })
    )]
    #[case::missing_event(&[(MULTIPLIERS_PATH_VAR, "multipliers.json")], None)]
    fn reads_config_from_lookup(
        #[case] vars: &[(&str, &str)],
        #[case] expected: Option<AppConfig>,
    ) {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();

        let config = AppConfig::from_lookup(|key| vars.get(key).map(|value| value.to_string()));

        match (config, expected) {
            (Ok(config), Some(expected)) => assert_eq!(config, expected),
            (Err(AppError::MissingVar(var)), None) => assert_eq!(var, EVENT_PATH_VAR),
            (other, expected) => panic!("unexpected {other:?}, expected {expected:?}"),
        }
    }

    #[test]
    fn execute_renders_report_json() {
        let dir = std::env::temp_dir().join(format!("nomikai-bootstrap-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let event_path = dir.join("event.json");
        std::fs::write(
            &event_path,
            r#"{
                "participants": [
                    {"id": 1, "nickname": "A", "attendance": [1, 0, 0]},
                    {"id": 2, "nickname": "B", "attendance": [1, 0, 0]}
                ],
                "venues": [{"id": 1, "order": 1, "total_cost": 5000, "payer": 1}]
            }"#,
        )
        .expect("write event");

        let rendered = execute(&AppConfig {
            event_path,
            multipliers_path: None,
        })
        .expect("report");
        let json: serde_json::Value = serde_json::from_str(&rendered).expect("json");

        assert_eq!(json["transfers"][0]["from"], "B");
        assert_eq!(json["transfers"][0]["to"], "A");
        assert_eq!(json["transfers"][0]["amount"], 2500);
        assert_eq!(json["drift"], 0);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
