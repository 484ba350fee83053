//! Configuration store - per-environment connection settings

use crate::error::{ConnFactoryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::ConnectionConfig;

/// Connection settings keyed by environment, then by connection type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationStore {
    environments: BTreeMap<String, BTreeMap<String, ConnectionConfig>>,
}

impl ConfigurationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the development and production settings
    pub fn builtin() -> Self {
        let mut store = Self::new();

        store.insert("development", "mysql", ConnectionConfig::new()
            .with("host", "localhost")
            .with("port", 3306)
            .with("username", "dev_user")
            .with("password", "dev_pass")
            .with("ssl_enabled", false)
            .with("pool_size", 2));
        store.insert("development", "postgresql", ConnectionConfig::new()
            .with("host", "localhost")
            .with("port", 5432)
            .with("username", "dev_user")
            .with("password", "dev_pass")
            .with("database", "dev_db")
            .with("ssl_mode", "disable")
            .with("pool_size", 5));
        store.insert("development", "mongodb", ConnectionConfig::new()
            .with("host", "localhost")
            .with("port", 27017)
            .with("username", "dev_user")
            .with("password", "dev_pass")
            .with("auth_source", "admin")
            .with("read_preference", "primary"));
        store.insert("development", "redis", ConnectionConfig::new()
            .with("host", "localhost")
            .with("port", 6379)
            .with("db", 0));

        store.insert("production", "mysql", ConnectionConfig::new()
            .with("host", "prod-mysql.company.com")
            .with("port", 3306)
            .with("username", "prod_user")
            .with("password", "strong_prod_password_123!")
            .with("ssl_enabled", true)
            .with("pool_size", 20));
        store.insert("production", "postgresql", ConnectionConfig::new()
            .with("host", "prod-postgres.company.com")
            .with("port", 5432)
            .with("username", "prod_user")
            .with("password", "strong_prod_password_456!")
            .with("database", "prod_db")
            .with("ssl_mode", "require")
            .with("pool_size", 25));
        store.insert("production", "mongodb", ConnectionConfig::new()
            .with("host", "prod-mongo.company.com")
            .with("port", 27017)
            .with("username", "prod_user")
            .with("password", "strong_prod_password_789!")
            .with("auth_source", "admin")
            .with("replica_set", "prod-replica-set")
            .with("read_preference", "secondaryPreferred"));
        store.insert("production", "redis", ConnectionConfig::new()
            .with("host", "prod-redis.company.com")
            .with("port", 6379)
            .with("password", "redis_prod_password")
            .with("db", 0));

        store
    }

    /// Get configuration for an environment and connection type
    ///
    /// Returns an owned copy; changes to it never reach the store.
    pub fn get_config(&self, environment: &str, type_id: &str) -> Result<ConnectionConfig> {
        let configs = self
            .environments
            .get(environment)
            .ok_or_else(|| ConnFactoryError::UnknownEnvironment(environment.to_string()))?;

        configs
            .get(type_id)
            .cloned()
            .ok_or_else(|| ConnFactoryError::UnknownConfiguration {
                environment: environment.to_string(),
                type_id: type_id.to_string(),
            })
    }

    /// Insert or replace the configuration for an environment and type
    pub fn insert(
        &mut self,
        environment: impl Into<String>,
        type_id: impl Into<String>,
        config: ConnectionConfig,
    ) -> Option<ConnectionConfig> {
        self.environments
            .entry(environment.into())
            .or_default()
            .insert(type_id.into(), config)
    }

    /// Overlay another store; its entries replace same-keyed ones
    pub fn merge(&mut self, other: ConfigurationStore) {
        for (environment, configs) in other.environments {
            let target = self.environments.entry(environment).or_default();
            for (type_id, config) in configs {
                target.insert(type_id, config);
            }
        }
    }

    pub fn contains_environment(&self, environment: &str) -> bool {
        self.environments.contains_key(environment)
    }

    /// Known environment names, sorted
    pub fn environments(&self) -> Vec<String> {
        self.environments.keys().cloned().collect()
    }

    /// Connection types configured under an environment, sorted
    pub fn backend_types(&self, environment: &str) -> Result<Vec<String>> {
        self.environments
            .get(environment)
            .map(|configs| configs.keys().cloned().collect())
            .ok_or_else(|| ConnFactoryError::UnknownEnvironment(environment.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    /// Parse a store from YAML (`environment -> type -> options`)
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| ConnFactoryError::YamlError(format!("Failed to parse configuration store: {}", e)))
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::OptionValue;

    /// Expected seed, one row per (environment, type) pair
    fn expected_seed() -> Vec<(&'static str, &'static str, Vec<(&'static str, OptionValue)>)> {
        use OptionValue::{Bool, Int};
        let s = |v: &str| OptionValue::Str(v.to_string());
        vec![
            ("development", "mysql", vec![
                ("host", s("localhost")), ("port", Int(3306)),
                ("username", s("dev_user")), ("password", s("dev_pass")),
                ("ssl_enabled", Bool(false)), ("pool_size", Int(2)),
            ]),
            ("development", "postgresql", vec![
                ("host", s("localhost")), ("port", Int(5432)),
                ("username", s("dev_user")), ("password", s("dev_pass")),
                ("database", s("dev_db")), ("ssl_mode", s("disable")), ("pool_size", Int(5)),
            ]),
            ("development", "mongodb", vec![
                ("host", s("localhost")), ("port", Int(27017)),
                ("username", s("dev_user")), ("password", s("dev_pass")),
                ("auth_source", s("admin")), ("read_preference", s("primary")),
            ]),
            ("development", "redis", vec![
                ("host", s("localhost")), ("port", Int(6379)), ("db", Int(0)),
            ]),
            ("production", "mysql", vec![
                ("host", s("prod-mysql.company.com")), ("port", Int(3306)),
                ("username", s("prod_user")), ("password", s("strong_prod_password_123!")),
                ("ssl_enabled", Bool(true)), ("pool_size", Int(20)),
            ]),
            ("production", "postgresql", vec![
                ("host", s("prod-postgres.company.com")), ("port", Int(5432)),
                ("username", s("prod_user")), ("password", s("strong_prod_password_456!")),
                ("database", s("prod_db")), ("ssl_mode", s("require")), ("pool_size", Int(25)),
            ]),
            ("production", "mongodb", vec![
                ("host", s("prod-mongo.company.com")), ("port", Int(27017)),
                ("username", s("prod_user")), ("password", s("strong_prod_password_789!")),
                ("auth_source", s("admin")), ("replica_set", s("prod-replica-set")),
                ("read_preference", s("secondaryPreferred")),
            ]),
            ("production", "redis", vec![
                ("host", s("prod-redis.company.com")), ("port", Int(6379)),
                ("password", s("redis_prod_password")), ("db", Int(0)),
            ]),
        ]
    }

    #[test]
    fn test_builtin_seed() {
        let store = ConfigurationStore::builtin();
        assert_eq!(store.environments(), vec!["development", "production"]);
        for env in ["development", "production"] {
            assert_eq!(
                store.backend_types(env).unwrap(),
                vec!["mongodb", "mysql", "postgresql", "redis"]
            );
        }

        let expected = expected_seed();
        assert_eq!(expected.len(), 8);
        for (env, type_id, options) in expected {
            let config = store.get_config(env, type_id).unwrap();
            let wanted: ConnectionConfig = options.into_iter().collect();
            assert_eq!(config, wanted, "seed mismatch for {}/{}", env, type_id);
        }
    }

    #[test]
    fn test_returned_config_is_a_copy() {
        let store = ConfigurationStore::builtin();
        let mut first = store.get_config("production", "redis").unwrap();
        let second = store.get_config("production", "redis").unwrap();
        assert_eq!(first, second);

        first.insert("host", "elsewhere");
        first.remove("password");
        assert_ne!(first, second);
        assert_eq!(store.get_config("production", "redis").unwrap(), second);
    }

    #[test]
    fn test_unknown_environment() {
        let store = ConfigurationStore::builtin();
        assert!(matches!(
            store.get_config("staging", "mysql"),
            Err(ConnFactoryError::UnknownEnvironment(env)) if env == "staging"
        ));
        assert!(store.backend_types("staging").is_err());
    }

    #[test]
    fn test_unknown_configuration() {
        let store = ConfigurationStore::builtin();
        match store.get_config("development", "cassandra") {
            Err(ConnFactoryError::UnknownConfiguration { environment, type_id }) => {
                assert_eq!(environment, "development");
                assert_eq!(type_id, "cassandra");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_merge_overrides() {
        let mut store = ConfigurationStore::builtin();
        let overrides = ConfigurationStore::from_yaml_str(
            "staging:\n  redis:\n    host: staging-redis\n    port: 6380\n\
             development:\n  mysql:\n    host: devbox\n    port: 3307\n    username: u\n    password: p\n",
        )
        .unwrap();
        store.merge(overrides);

        assert!(store.contains_environment("staging"));
        let mysql = store.get_config("development", "mysql").unwrap();
        assert_eq!(mysql.get("host"), Some(&OptionValue::Str("devbox".into())));
        assert!(!mysql.contains_key("pool_size"));
        // untouched entries survive
        assert!(store.get_config("development", "redis").is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let store = ConfigurationStore::builtin();
        let yaml = store.to_yaml_string().unwrap();
        assert!(yaml.contains("prod-mysql.company.com"));
        assert_eq!(ConfigurationStore::from_yaml_str(&yaml).unwrap(), store);
    }
}
