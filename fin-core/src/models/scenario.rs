use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::CalculatorTab;
use crate::workbench::WorkbenchSnapshot;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("scenario name must not be blank")]
    BlankName,
}

/// A saved working session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: i64,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub active_tab: CalculatorTab,
    /// Currency and inputs at save time. Records saved with only a tab
    /// carry `None`.
    pub snapshot: Option<WorkbenchSnapshot>,
}

/// For creating new scenarios (no id or timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScenario {
    pub name: String,
    pub active_tab: CalculatorTab,
    pub snapshot: Option<WorkbenchSnapshot>,
}

impl NewScenario {
    /// Validates and trims `name`.
    pub fn new(
        name: &str,
        active_tab: CalculatorTab,
        snapshot: Option<WorkbenchSnapshot>,
    ) -> Result<Self, ScenarioError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScenarioError::BlankName);
        }

        Ok(Self {
            name: name.to_string(),
            active_tab,
            snapshot,
        })
    }
}
