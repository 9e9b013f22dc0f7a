mod client;
mod error;
mod types;
mod virtual_machine_data_source;
mod virtual_machine_resource;
mod virtual_machines_data_source;

pub use client::{FakecloudApi, FakecloudClient};
pub use error::FakecloudError;
pub use types::VirtualMachine;
pub use virtual_machine_data_source::{
    VirtualMachineDataSource, VirtualMachineDataSourceModel, new_virtual_machine_data_source,
};
pub use virtual_machine_resource::{
    VirtualMachineResource, VirtualMachineResourceModel, new_virtual_machine_resource,
};
pub use virtual_machines_data_source::{
    VirtualMachineModel, VirtualMachinesDataSource, VirtualMachinesDataSourceModel,
    new_virtual_machines_data_source,
};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{DataSourceFactory, Provider, ProviderData, ProviderMetadata, ResourceFactory};
use crate::terraform::{Attribute, AttributePath, Diagnostics, Schema, State, Value};

pub const PROVIDER_TYPE_NAME: &str = "fakecloud";

pub const HOST_ENV: &str = "FAKECLOUD_HOST";
pub const USERNAME_ENV: &str = "FAKECLOUD_USERNAME";
pub const PASSWORD_ENV: &str = "FAKECLOUD_PASSWORD";

/// Client handed from the provider to every resource and data source.
pub type SharedClient = Arc<dyn FakecloudApi>;

pub(crate) fn unconfigured_client(diags: &mut Diagnostics) {
    diags.add_error(
        "Unconfigured Fakecloud Client",
        "Expected a configured Fakecloud API client. The provider must be configured before \
         resources and data sources are used. Please report this issue to the provider developers.",
    );
}

/// Provider configuration block as written by the practitioner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FakecloudProviderModel {
    #[serde(default)]
    pub host: Value<String>,
    #[serde(default)]
    pub username: Value<String>,
    #[serde(default)]
    pub password: Value<String>,
}

/// Connection settings after environment fallbacks have been applied.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ProviderConfig {
    pub host: String,
    pub username: String,
    pub password: String,
}

impl ProviderConfig {
    /// Environment values are defaults; any non-null configuration value wins.
    /// An unknown value is not null, so it resolves to the empty string.
    pub fn resolve<F>(model: &FakecloudProviderModel, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |value: &Value<String>, key: &str| match value {
            Value::Known(v) => v.clone(),
            Value::Unknown => String::new(),
            Value::Null => env(key).unwrap_or_default(),
        };

        Self {
            host: pick(&model.host, HOST_ENV),
            username: pick(&model.username, USERNAME_ENV),
            password: pick(&model.password, PASSWORD_ENV),
        }
    }

    pub fn from_env(model: &FakecloudProviderModel) -> Self {
        Self::resolve(model, |key| std::env::var(key).ok())
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

pub struct FakecloudProvider {
    /// "dev" for local builds, "test" under acceptance tests, the release version otherwise.
    version: String,
}

impl FakecloudProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

#[async_trait]
impl Provider for FakecloudProvider {
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_attribute("host", Attribute::optional_string())
            .with_attribute("username", Attribute::optional_string())
            .with_attribute("password", Attribute::optional_string().sensitive())
    }

    async fn configure(&self, config: &State, diags: &mut Diagnostics) -> Option<ProviderData> {
        let model: FakecloudProviderModel = config.get(diags)?;

        if model.host.is_unknown() {
            diags.add_attribute_error(
                AttributePath::root("host"),
                "Unknown Fakecloud API Host",
                format!(
                    "The provider cannot create the Fakecloud API client as there is an unknown configuration value for the Fakecloud API host. \
                     Either target apply the source of the value first, set the value statically in the configuration, or use the {} environment variable.",
                    HOST_ENV
                ),
            );
        }

        if diags.has_error() {
            return None;
        }

        let resolved = ProviderConfig::from_env(&model);

        if resolved.host.is_empty() {
            diags.add_attribute_error(
                AttributePath::root("host"),
                "Missing Fakecloud API Host",
                format!(
                    "The provider cannot create the Fakecloud API client as there is a missing or empty value for the Fakecloud API host. \
                     Set the host value in the configuration or use the {} environment variable. \
                     If either is already set, ensure the value is not empty.",
                    HOST_ENV
                ),
            );
        }

        if diags.has_error() {
            return None;
        }

        let client =
            match FakecloudClient::new(&resolved.host, &resolved.username, &resolved.password) {
                Ok(client) => client,
                Err(e) => {
                    diags.add_error(
                        "Unable to Create Fakecloud API Client",
                        format!(
                            "An unexpected error occurred when creating the Fakecloud API client. \
                             If the error is not clear, please contact the provider developers.\n\n\
                             Fakecloud Client Error: {}",
                            e
                        ),
                    );
                    return None;
                }
            };

        tracing::info!(host = %resolved.host, username = %resolved.username, "Fakecloud client configured");

        Some(Arc::new(client))
    }

    fn resources(&self) -> Vec<ResourceFactory> {
        vec![new_virtual_machine_resource as ResourceFactory]
    }

    fn data_sources(&self) -> Vec<DataSourceFactory> {
        vec![
            new_virtual_machines_data_source as DataSourceFactory,
            new_virtual_machine_data_source,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_config_wins_over_env() {
        let model = FakecloudProviderModel {
            host: "http://config:8080".into(),
            username: "config-user".into(),
            password: "config-pass".into(),
        };
        let env = env_from(&[
            (HOST_ENV, "http://env:8080"),
            (USERNAME_ENV, "env-user"),
            (PASSWORD_ENV, "env-pass"),
        ]);

        let resolved = ProviderConfig::resolve(&model, env);
        assert_eq!(resolved.host, "http://config:8080");
        assert_eq!(resolved.username, "config-user");
        assert_eq!(resolved.password, "config-pass");
    }

    #[test]
    fn test_resolve_env_fills_null_attributes() {
        let model = FakecloudProviderModel {
            host: Value::Null,
            username: "config-user".into(),
            password: Value::Null,
        };
        let env = env_from(&[
            (HOST_ENV, "http://env:8080"),
            (USERNAME_ENV, "env-user"),
            (PASSWORD_ENV, "env-pass"),
        ]);

        let resolved = ProviderConfig::resolve(&model, env);
        assert_eq!(resolved.host, "http://env:8080");
        assert_eq!(resolved.username, "config-user");
        assert_eq!(resolved.password, "env-pass");
    }

    #[test]
    fn test_resolve_every_source_combination() {
        let env = env_from(&[
            (HOST_ENV, "env-host"),
            (USERNAME_ENV, "env-user"),
            (PASSWORD_ENV, "env-pass"),
        ]);

        for mask in 0u8..8 {
            let pick = |bit: u8, value: &str| {
                if mask & bit != 0 {
                    Value::Known(value.to_string())
                } else {
                    Value::Null
                }
            };
            let model = FakecloudProviderModel {
                host: pick(1, "cfg-host"),
                username: pick(2, "cfg-user"),
                password: pick(4, "cfg-pass"),
            };

            let resolved = ProviderConfig::resolve(&model, &env);
            let expect = |bit: u8, cfg: &str, env: &str| {
                if mask & bit != 0 { cfg.to_string() } else { env.to_string() }
            };
            assert_eq!(resolved.host, expect(1, "cfg-host", "env-host"));
            assert_eq!(resolved.username, expect(2, "cfg-user", "env-user"));
            assert_eq!(resolved.password, expect(4, "cfg-pass", "env-pass"));
        }
    }

    #[test]
    fn test_resolve_explicit_empty_string_wins() {
        let model = FakecloudProviderModel {
            host: "".into(),
            ..Default::default()
        };
        let resolved = ProviderConfig::resolve(&model, env_from(&[(HOST_ENV, "http://env")]));
        assert_eq!(resolved.host, "");
    }

    #[test]
    fn test_resolve_unknown_credentials_skip_env() {
        let model = FakecloudProviderModel {
            host: "http://config:8080".into(),
            username: Value::Unknown,
            password: Value::Unknown,
        };
        let env = env_from(&[(USERNAME_ENV, "env-user"), (PASSWORD_ENV, "env-pass")]);

        let resolved = ProviderConfig::resolve(&model, env);
        assert_eq!(resolved.username, "");
        assert_eq!(resolved.password, "");
    }

    #[test]
    fn test_provider_config_debug_redacts_password() {
        let config = ProviderConfig {
            host: "http://localhost".to_string(),
            username: "admin".to_string(),
            password: "hunter2_secret".to_string(),
        };
        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2_secret"));
    }

    #[test]
    fn test_provider_schema() {
        let schema = FakecloudProvider::new("test").schema();
        for name in ["host", "username", "password"] {
            let attr = schema.attribute(name).unwrap();
            assert!(attr.optional, "{} should be optional", name);
        }
        assert!(schema.attribute("password").unwrap().sensitive);
        assert!(!schema.attribute("host").unwrap().sensitive);
    }

    #[test]
    fn test_provider_metadata() {
        let metadata = FakecloudProvider::new("1.2.3").metadata();
        assert_eq!(metadata.type_name, "fakecloud");
        assert_eq!(metadata.version, "1.2.3");
    }

    #[tokio::test]
    async fn test_configure_unknown_host_is_attribute_error() {
        let provider = FakecloudProvider::new("test");
        let config = State::from_value(serde_json::json!({
            "host": crate::terraform::UNKNOWN_VALUE,
        }));
        let mut diags = Diagnostics::new();

        let client = provider.configure(&config, &mut diags).await;

        assert!(client.is_none());
        let diag = diags.errors().next().unwrap();
        assert_eq!(diag.summary, "Unknown Fakecloud API Host");
        assert_eq!(diag.attribute, Some(AttributePath::root("host")));
    }

    #[tokio::test]
    async fn test_configure_invalid_host_is_client_error() {
        let provider = FakecloudProvider::new("test");
        let config = State::from_value(serde_json::json!({"host": "::not a url::"}));
        let mut diags = Diagnostics::new();

        let client = provider.configure(&config, &mut diags).await;

        assert!(client.is_none());
        let diag = diags.errors().next().unwrap();
        assert_eq!(diag.summary, "Unable to Create Fakecloud API Client");
        assert!(diag.attribute.is_none());
        assert!(diag.detail.contains("Fakecloud Client Error: invalid host"));
    }

    #[tokio::test]
    async fn test_configure_host_without_scheme_is_client_error() {
        let provider = FakecloudProvider::new("test");
        let config = State::from_value(serde_json::json!({"host": "localhost:8080"}));
        let mut diags = Diagnostics::new();

        let client = provider.configure(&config, &mut diags).await;

        assert!(client.is_none());
        let diag = diags.errors().next().unwrap();
        assert_eq!(diag.summary, "Unable to Create Fakecloud API Client");
        assert!(diag.detail.contains("unsupported scheme"));
    }

    #[tokio::test]
    async fn test_configure_with_explicit_host() {
        let provider = FakecloudProvider::new("test");
        let config = State::from_value(serde_json::json!({
            "host": "http://localhost:8080",
            "username": "admin",
            "password": "secret",
        }));
        let mut diags = Diagnostics::new();

        let client = provider.configure(&config, &mut diags).await;

        assert!(client.is_some());
        assert!(!diags.has_error());
    }
}
