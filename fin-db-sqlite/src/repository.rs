use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fin_core::{
    CalculatorTab, NewScenario, RepositoryError, Scenario, ScenarioRepository, WorkbenchSnapshot,
};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::{debug, info};

/// Connection string that selects an ephemeral in-memory database.
pub const IN_MEMORY: &str = ":memory:";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens `connection_string`, which is either a file path (created if
    /// missing) or [`IN_MEMORY`].
    pub async fn new(connection_string: &str) -> Result<Self> {
        let pool = if connection_string == IN_MEMORY {
            // Every connection to `sqlite::memory:` sees its own database.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await
                .context("Failed to open in-memory database")?
        } else {
            let options = SqliteConnectOptions::new()
                .filename(connection_string)
                .create_if_missing(true);
            SqlitePool::connect_with(options)
                .await
                .with_context(|| format!("Failed to connect to database: {}", connection_string))?
        };

        debug!(connection_string, "connected to sqlite");
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_error(error: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(error.to_string())
}

fn row_to_scenario(row: &SqliteRow) -> Result<Scenario, RepositoryError> {
    let tab: String = row.try_get("active_tab").map_err(db_error)?;
    let active_tab = CalculatorTab::from_str(&tab)
        .map_err(|e| RepositoryError::Database(format!("Invalid active_tab: {}", e)))?;

    let snapshot = row
        .try_get::<Option<String>, _>("snapshot")
        .map_err(db_error)?
        .map(|json| serde_json::from_str::<WorkbenchSnapshot>(&json))
        .transpose()
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    Ok(Scenario {
        id: row.try_get("id").map_err(db_error)?,
        name: row.try_get("name").map_err(db_error)?,
        timestamp: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        active_tab,
        snapshot,
    })
}

#[async_trait]
impl ScenarioRepository for SqliteRepository {
    async fn create_scenario(
        &self,
        scenario: NewScenario,
    ) -> Result<Scenario, RepositoryError> {
        let snapshot = scenario
            .snapshot
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO scenario (name, active_tab, snapshot, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&scenario.name)
        .bind(scenario.active_tab.as_str())
        .bind(snapshot)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        let id = result.last_insert_rowid();
        info!(id, name = %scenario.name, tab = %scenario.active_tab, "saved scenario");
        self.get_scenario(id).await
    }

    async fn get_scenario(
        &self,
        id: i64,
    ) -> Result<Scenario, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, active_tab, snapshot, created_at
             FROM scenario WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or(RepositoryError::NotFound)?;

        row_to_scenario(&row)
    }

    async fn list_scenarios(&self) -> Result<Vec<Scenario>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, name, active_tab, snapshot, created_at
             FROM scenario ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(row_to_scenario).collect()
    }

    async fn delete_scenario(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM scenario WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!(id, "deleted scenario");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use fin_core::{Currency, Workbench};
    use pretty_assertions::assert_eq;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let repo = SqliteRepository::new_with_pool(pool).await;
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    fn new_scenario(
        name: &str,
        tab: CalculatorTab,
    ) -> NewScenario {
        NewScenario::new(name, tab, None).expect("valid scenario name")
    }

    // =========================================================================
    // create / get
    // =========================================================================

    #[tokio::test]
    async fn test_create_and_get_scenario() {
        let repo = setup_test_db().await;

        let created = repo
            .create_scenario(new_scenario("Seed plan", CalculatorTab::Fundraising))
            .await
            .expect("Should create scenario");

        assert!(created.id > 0);
        assert_eq!(created.name, "Seed plan");
        assert_eq!(created.active_tab, CalculatorTab::Fundraising);
        assert_eq!(created.snapshot, None);

        let fetched = repo
            .get_scenario(created.id)
            .await
            .expect("Should fetch scenario");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_snapshot_round_trips() {
        let repo = setup_test_db().await;
        let mut workbench = Workbench::new();
        workbench.inputs_mut().npv.add_cashflow();
        workbench.set_currency(Currency::Usd);
        let scenario = NewScenario::new(
            "USD plan",
            CalculatorTab::Valuation,
            Some(workbench.snapshot()),
        )
        .expect("valid scenario name");

        let created = repo
            .create_scenario(scenario)
            .await
            .expect("Should create scenario");
        let fetched = repo
            .get_scenario(created.id)
            .await
            .expect("Should fetch scenario");

        let snapshot = fetched.snapshot.expect("snapshot should be stored");
        assert_eq!(snapshot.currency, Currency::Usd);
        assert_eq!(Workbench::from_snapshot(snapshot), workbench);
    }

    #[tokio::test]
    async fn test_get_scenario_not_found() {
        let repo = setup_test_db().await;

        let result = repo.get_scenario(404).await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_serialization_error() {
        let repo = setup_test_db().await;
        sqlx::query(
            "INSERT INTO scenario (name, active_tab, snapshot, created_at)
             VALUES ('broken', 'overview', '{not json', '2025-01-01T00:00:00Z')",
        )
        .execute(repo.pool())
        .await
        .expect("Failed to insert corrupt scenario");

        let result = repo.list_scenarios().await;

        assert!(matches!(result, Err(RepositoryError::Serialization(_))));
    }

    // =========================================================================
    // list / delete
    // =========================================================================

    #[tokio::test]
    async fn test_list_scenarios_in_insertion_order() {
        let repo = setup_test_db().await;
        for (name, tab) in [
            ("first", CalculatorTab::Overview),
            ("second", CalculatorTab::Pricing),
            ("third", CalculatorTab::Growth),
        ] {
            repo.create_scenario(new_scenario(name, tab))
                .await
                .expect("Should create scenario");
        }

        let names: Vec<String> = repo
            .list_scenarios()
            .await
            .expect("Should list scenarios")
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_delete_scenario() {
        let repo = setup_test_db().await;
        let created = repo
            .create_scenario(new_scenario("temp", CalculatorTab::Operations))
            .await
            .expect("Should create scenario");

        repo.delete_scenario(created.id)
            .await
            .expect("Should delete scenario");

        let result = repo.get_scenario(created.id).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_scenario_is_not_found() {
        let repo = setup_test_db().await;

        let result = repo.delete_scenario(7).await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }
}
