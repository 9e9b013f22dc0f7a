pub mod fakecloud;

use async_trait::async_trait;
use thiserror::Error;

use crate::terraform::{Diagnostics, Schema, State};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),
    #[error("unknown data source type: {0}")]
    UnknownDataSourceType(String),
    #[error("{}", first_error(.0))]
    Diagnostics(Diagnostics),
}

fn first_error(diags: &Diagnostics) -> String {
    diags
        .errors()
        .next()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "operation failed without diagnostics".to_string())
}

/// Data a configured provider hands to its resources and data sources.
pub type ProviderData = fakecloud::SharedClient;

pub type ResourceFactory = fn() -> Box<dyn Resource>;
pub type DataSourceFactory = fn() -> Box<dyn DataSource>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub type_name: String,
    pub version: String,
}

#[async_trait]
pub trait Provider: Send + Sync {
    fn metadata(&self) -> ProviderMetadata;
    fn schema(&self) -> Schema;
    /// Returns the data for resources and data sources, or `None` with errors in `diags`.
    async fn configure(&self, config: &State, diags: &mut Diagnostics) -> Option<ProviderData>;
    fn resources(&self) -> Vec<ResourceFactory>;
    fn data_sources(&self) -> Vec<DataSourceFactory>;
}

/// A managed resource. Every handler returns `None` when it fails, leaving
/// the host's copy of the state untouched.
#[async_trait]
pub trait Resource: Send + Sync {
    fn type_name(&self, provider_type_name: &str) -> String;
    fn schema(&self) -> Schema;
    /// Called with `None` while the provider itself is not yet configured.
    fn configure(&mut self, provider_data: Option<ProviderData>, diags: &mut Diagnostics);
    async fn create(&self, plan: &State, diags: &mut Diagnostics) -> Option<State>;
    async fn read(&self, state: &State, diags: &mut Diagnostics) -> Option<State>;
    async fn update(&self, plan: &State, prior_state: &State, diags: &mut Diagnostics)
    -> Option<State>;
    async fn delete(&self, state: &State, diags: &mut Diagnostics) -> Option<()>;

    fn import_state(&self, _id: &str, diags: &mut Diagnostics) -> Option<State> {
        diags.add_error(
            "Resource Import Not Implemented",
            "This resource does not support import. Please contact the provider developer for additional information.",
        );
        None
    }
}

#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self, provider_type_name: &str) -> String;
    fn schema(&self) -> Schema;
    fn configure(&mut self, provider_data: Option<ProviderData>, diags: &mut Diagnostics);
    async fn read(&self, config: &State, diags: &mut Diagnostics) -> Option<State>;
}

pub fn get_provider(name: &str, version: &str) -> Result<Box<dyn Provider>, ProviderError> {
    match name {
        fakecloud::PROVIDER_TYPE_NAME => Ok(Box::new(fakecloud::FakecloudProvider::new(version))),
        other => Err(ProviderError::UnknownProvider(other.to_string())),
    }
}
