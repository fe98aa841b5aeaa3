//! Loading of the states and departments reference lists.

use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ReferenceConfig;
use crate::error::{AppError, Result};
use crate::models::reference::{Department, ReferenceData, UsState};

const BUNDLED_STATES: &str = include_str!("../assets/states.json");
const BUNDLED_DEPARTMENTS: &str = include_str!("../assets/departments.json");

/// Where a reference list is read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSource {
    /// List compiled into the binary.
    #[default]
    Bundled,
    /// JSON file on disk.
    Path(PathBuf),
    /// JSON document over HTTP(S).
    Url(String),
}

/// Outcome of loading both reference lists.
#[derive(Debug, Default)]
pub struct ReferenceLoad {
    /// Loaded lists; a failed list is left empty.
    pub data: ReferenceData,
    /// Loads that failed.
    pub failures: Vec<AppError>,
}

impl ReferenceLoad {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetch the US states list.
pub async fn fetch_states(source: &ReferenceSource, timeout: Duration) -> Result<Vec<UsState>> {
    fetch_list(source, BUNDLED_STATES, timeout)
        .await
        .map_err(|e| AppError::reference("states", e))
}

/// Fetch the departments list.
pub async fn fetch_departments(source: &ReferenceSource, timeout: Duration) -> Result<Vec<Department>> {
    fetch_list(source, BUNDLED_DEPARTMENTS, timeout)
        .await
        .map_err(|e| AppError::reference("departments", e))
}

async fn fetch_list<T: DeserializeOwned>(
    source: &ReferenceSource,
    bundled: &'static str,
    timeout: Duration,
) -> Result<Vec<T>> {
    match source {
        ReferenceSource::Bundled => Ok(serde_json::from_str(bundled)?),
        ReferenceSource::Path(path) => {
            let bytes = tokio::fs::read(path).await?;
            Ok(serde_json::from_slice(&bytes)?)
        }
        ReferenceSource::Url(url) => {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            let list = client.get(url).send().await?.error_for_status()?.json().await?;
            Ok(list)
        }
    }
}

/// Load both lists concurrently.
///
/// Failures are logged here and leave the corresponding list empty.
pub async fn load_reference_data(config: &ReferenceConfig) -> ReferenceLoad {
    let timeout = Duration::from_secs(config.timeout_secs);
    let (states, departments) = tokio::join!(
        fetch_states(&config.states, timeout),
        fetch_departments(&config.departments, timeout)
    );

    let mut load = ReferenceLoad::default();
    match states {
        Ok(states) => load.data.states = states,
        Err(e) => load.failures.push(e),
    }
    match departments {
        Ok(departments) => load.data.departments = departments,
        Err(e) => load.failures.push(e),
    }

    for failure in &load.failures {
        warn!("{}", failure);
    }
    info!(
        "Reference data: {} states, {} departments",
        load.data.states.len(),
        load.data.departments.len()
    );

    load
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn test_bundled_lists() {
        let states = fetch_states(&ReferenceSource::Bundled, TIMEOUT).await.unwrap();
        let departments = fetch_departments(&ReferenceSource::Bundled, TIMEOUT).await.unwrap();

        assert!(states.iter().any(|s| s.abbreviation == "CO" && s.name == "Colorado"));
        let names: Vec<_> = departments.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Sales", "Marketing", "Engineering", "Human Resources", "Legal"]);
    }

    #[tokio::test]
    async fn test_path_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.json");
        std::fs::write(&path, r#"[{"name": "Alaska", "abbreviation": "AK"}]"#).unwrap();

        let states = fetch_states(&ReferenceSource::Path(path), TIMEOUT).await.unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].abbreviation, "AK");
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let source = ReferenceSource::Path(PathBuf::from("/nonexistent/departments.json"));
        let err = fetch_departments(&source, TIMEOUT).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ReferenceDataUnavailable {
                what: "departments",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_failed_list_left_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.json");
        std::fs::write(&path, "{ not a list").unwrap();

        let config = ReferenceConfig {
            states: ReferenceSource::Path(path),
            departments: ReferenceSource::Bundled,
            timeout_secs: 1,
        };
        let load = load_reference_data(&config).await;

        assert!(!load.is_complete());
        assert_eq!(load.failures.len(), 1);
        assert!(load.data.states.is_empty());
        assert_eq!(load.data.departments.len(), 5);
    }
}
