use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewScenario, Scenario};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Storage for saved scenarios.
#[async_trait]
pub trait ScenarioRepository: Send + Sync {
    async fn create_scenario(
        &self,
        scenario: NewScenario,
    ) -> Result<Scenario, RepositoryError>;

    async fn get_scenario(
        &self,
        id: i64,
    ) -> Result<Scenario, RepositoryError>;

    /// All scenarios in the order they were saved.
    async fn list_scenarios(&self) -> Result<Vec<Scenario>, RepositoryError>;

    /// Fails with [`RepositoryError::NotFound`] when `id` does not exist.
    async fn delete_scenario(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError>;
}
