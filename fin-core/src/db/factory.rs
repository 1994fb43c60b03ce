use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::repository::{RepositoryError, ScenarioRepository};

/// Where saved scenarios live. Read from the `[database]` table of
/// `fincalc.toml`.
///
/// ```toml
/// [database]
/// backend = "sqlite"
/// connection_string = ":memory:"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    /// Name of the scenario store, currently only `sqlite`.
    pub backend: String,
    /// Store location. For sqlite a file path or `:memory:`.
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "fincalc.db".to_string(),
        }
    }
}

/// Opens a [`ScenarioRepository`] for one storage backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Value of `database.backend` that selects this factory.
    fn backend_name(&self) -> &'static str;

    /// Returns a repository with its schema in place.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn ScenarioRepository>, RepositoryError>;
}

/// Scenario stores the binary knows how to open, looked up by
/// `database.backend`.
pub struct RepositoryRegistry {
    factories: HashMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Adds `factory`. A later factory with the same name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Backend names in sorted order, for error messages.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens the scenario store named by `config.backend`.
    ///
    /// Fails with [`RepositoryError::Configuration`] when nothing is
    /// registered under that name.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn ScenarioRepository>, RepositoryError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(RepositoryError::Configuration(format!(
                "no scenario store named '{}' (known: {})",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        debug!(
            backend = %config.backend,
            location = %config.connection_string,
            "opening scenario store"
        );
        factory.create(config).await
    }
}

impl Default for RepositoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use crate::models::{NewScenario, Scenario};

    use super::{
        DbConfig, RepositoryError, RepositoryFactory, RepositoryRegistry, ScenarioRepository,
    };

    // The registry tests only route to factories; no repository method runs.
    struct StubRepository;

    #[async_trait]
    impl ScenarioRepository for StubRepository {
        async fn create_scenario(
            &self,
            _scenario: NewScenario,
        ) -> Result<Scenario, RepositoryError> {
            unimplemented!()
        }

        async fn get_scenario(
            &self,
            _id: i64,
        ) -> Result<Scenario, RepositoryError> {
            unimplemented!()
        }

        async fn list_scenarios(&self) -> Result<Vec<Scenario>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn delete_scenario(
            &self,
            _id: i64,
        ) -> Result<(), RepositoryError> {
            unimplemented!()
        }
    }

    /// Records whether `create` was reached.
    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl RepositoryFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }

        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn ScenarioRepository>, RepositoryError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubRepository))
        }
    }

    struct FailingFactory;

    #[async_trait]
    impl RepositoryFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }

        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn ScenarioRepository>, RepositoryError> {
            Err(RepositoryError::Connection("unreachable host".to_string()))
        }
    }

    fn stub_factory(name: &'static str) -> (Box<dyn RepositoryFactory>, Arc<AtomicBool>) {
        let called = Arc::new(AtomicBool::new(false));
        let factory = StubFactory {
            name,
            called: Arc::clone(&called),
        };
        (Box::new(factory), called)
    }

    fn config_for(backend: &str) -> DbConfig {
        DbConfig {
            backend: backend.to_string(),
            connection_string: ":memory:".to_string(),
        }
    }

    // =========================================================================
    // DbConfig tests
    // =========================================================================

    #[test]
    fn dbconfig_default_is_sqlite_file() {
        let config = DbConfig::default();

        assert_eq!(config.backend, "sqlite");
        assert_eq!(config.connection_string, "fincalc.db");
    }

    // =========================================================================
    // Registration tests
    // =========================================================================

    #[test]
    fn new_registry_has_no_backends() {
        assert!(RepositoryRegistry::new().available_backends().is_empty());
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut registry = RepositoryRegistry::new();
        let (sqlite, _) = stub_factory("sqlite");
        let (postgres, _) = stub_factory("postgres");

        registry.register(sqlite);
        registry.register(postgres);

        assert_eq!(registry.available_backends(), vec!["postgres", "sqlite"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut registry = RepositoryRegistry::new();
        let (first, _) = stub_factory("sqlite");
        let (second, _) = stub_factory("sqlite");

        registry.register(first);
        registry.register(second);

        assert_eq!(registry.available_backends(), vec!["sqlite"]);
    }

    // =========================================================================
    // Dispatch tests
    // =========================================================================

    #[tokio::test]
    async fn create_calls_matching_factory_only() {
        let mut registry = RepositoryRegistry::new();
        let (sqlite, sqlite_called) = stub_factory("sqlite");
        let (postgres, postgres_called) = stub_factory("postgres");
        registry.register(sqlite);
        registry.register(postgres);

        let repository = registry.create(&config_for("sqlite")).await.unwrap();

        assert!(sqlite_called.load(Ordering::SeqCst));
        assert!(!postgres_called.load(Ordering::SeqCst));
        assert_eq!(repository.list_scenarios().await.unwrap(), Vec::new());
    }

    #[tokio::test]
    async fn unknown_backend_names_requested_and_available() {
        let mut registry = RepositoryRegistry::new();
        let (sqlite, _) = stub_factory("sqlite");
        registry.register(sqlite);

        let result = registry.create(&config_for("postgres")).await;

        match result {
            Err(RepositoryError::Configuration(message)) => {
                assert!(message.contains("postgres"));
                assert!(message.contains("sqlite"));
            }
            Err(other) => panic!("expected Configuration error, got {other:?}"),
            Ok(_) => panic!("expected Configuration error, got a repository"),
        }
    }

    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut registry = RepositoryRegistry::new();
        registry.register(Box::new(FailingFactory));

        let result = registry.create(&config_for("failing")).await;

        assert!(matches!(
            result,
            Err(RepositoryError::Connection(message)) if message == "unreachable host"
        ));
    }
}
