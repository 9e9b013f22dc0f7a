//! Host-side dispatch: one provider instance, its configured client, and the
//! per-request lifecycle of resources and data sources.

use crate::providers::{DataSource, Provider, ProviderData, ProviderError, Resource};
use crate::terraform::{
    AttributePath, Diagnostics, PlanModifier, ProviderSchema, State, UNKNOWN_VALUE,
};

/// Result of a single handler invocation.
#[derive(Debug)]
pub struct Response<T> {
    pub result: Option<T>,
    pub diagnostics: Diagnostics,
}

impl<T> Response<T> {
    fn new(result: Option<T>, diagnostics: Diagnostics) -> Self {
        // Errors always discard the result, whatever the handler returned.
        let result = if diagnostics.has_error() { None } else { result };
        Self {
            result,
            diagnostics,
        }
    }

    pub fn into_result(self) -> Result<T, ProviderError> {
        match self.result {
            Some(value) => Ok(value),
            None => Err(ProviderError::Diagnostics(self.diagnostics)),
        }
    }
}

pub struct ProviderServer {
    provider: Box<dyn Provider>,
    provider_data: Option<ProviderData>,
}

impl ProviderServer {
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            provider,
            provider_data: None,
        }
    }

    /// Skips provider configuration and hands `provider_data` straight to resources.
    pub fn with_provider_data(provider: Box<dyn Provider>, provider_data: ProviderData) -> Self {
        Self {
            provider,
            provider_data: Some(provider_data),
        }
    }

    pub fn type_name(&self) -> String {
        self.provider.metadata().type_name
    }

    pub fn is_configured(&self) -> bool {
        self.provider_data.is_some()
    }

    pub fn schema(&self) -> ProviderSchema {
        let type_name = self.type_name();
        let mut schema = ProviderSchema {
            provider: self.provider.schema(),
            ..Default::default()
        };

        for factory in self.provider.resources() {
            let resource = factory();
            schema
                .resource_schemas
                .insert(resource.type_name(&type_name), resource.schema());
        }

        for factory in self.provider.data_sources() {
            let data_source = factory();
            schema
                .data_source_schemas
                .insert(data_source.type_name(&type_name), data_source.schema());
        }

        schema
    }

    pub async fn configure(&mut self, config: &State) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let metadata = self.provider.metadata();

        tracing::debug!(provider = %metadata.type_name, version = %metadata.version, "configuring provider");

        // A failed reconfigure must not leave handlers running with the old client.
        self.provider_data = self
            .provider
            .configure(config, &mut diags)
            .await
            .filter(|_| !diags.has_error());

        diags
    }

    fn resource(
        &self,
        type_name: &str,
    ) -> Result<(Box<dyn Resource>, Diagnostics), ProviderError> {
        let provider_type_name = self.type_name();
        let factory = self
            .provider
            .resources()
            .into_iter()
            .find(|factory| factory().type_name(&provider_type_name) == type_name)
            .ok_or_else(|| ProviderError::UnknownResourceType(type_name.to_string()))?;

        let mut resource = factory();
        let mut diags = Diagnostics::new();
        resource.configure(self.provider_data.clone(), &mut diags);
        Ok((resource, diags))
    }

    fn data_source(
        &self,
        type_name: &str,
    ) -> Result<(Box<dyn DataSource>, Diagnostics), ProviderError> {
        let provider_type_name = self.type_name();
        let factory = self
            .provider
            .data_sources()
            .into_iter()
            .find(|factory| factory().type_name(&provider_type_name) == type_name)
            .ok_or_else(|| ProviderError::UnknownDataSourceType(type_name.to_string()))?;

        let mut data_source = factory();
        let mut diags = Diagnostics::new();
        data_source.configure(self.provider_data.clone(), &mut diags);
        Ok((data_source, diags))
    }

    pub async fn create_resource(
        &self,
        type_name: &str,
        plan: &State,
    ) -> Result<Response<State>, ProviderError> {
        let (resource, mut diags) = self.resource(type_name)?;
        if diags.has_error() {
            return Ok(Response::new(None, diags));
        }

        tracing::debug!(resource = type_name, "create");
        let state = resource.create(plan, &mut diags).await;
        Ok(Response::new(state, diags))
    }

    pub async fn read_resource(
        &self,
        type_name: &str,
        state: &State,
    ) -> Result<Response<State>, ProviderError> {
        let (resource, mut diags) = self.resource(type_name)?;
        if diags.has_error() {
            return Ok(Response::new(None, diags));
        }

        tracing::debug!(resource = type_name, "read");
        let new_state = resource.read(state, &mut diags).await;
        Ok(Response::new(new_state, diags))
    }

    pub async fn update_resource(
        &self,
        type_name: &str,
        prior_state: &State,
        plan: &State,
    ) -> Result<Response<State>, ProviderError> {
        let (resource, mut diags) = self.resource(type_name)?;
        if diags.has_error() {
            return Ok(Response::new(None, diags));
        }

        let schema = resource.schema();
        for (name, attribute) in &schema.attributes {
            if !attribute.is_computed_only() {
                continue;
            }

            let path = AttributePath::root(name.as_str());
            let (Some(planned), Some(prior)) =
                (plan.get_attribute(&path), prior_state.get_attribute(&path))
            else {
                continue;
            };

            if !is_unknown_or_null(planned) && !prior.is_null() && planned != prior {
                diags.add_attribute_error(
                    path,
                    "Computed Attribute Changed",
                    format!(
                        "The planned value {} differs from the prior state value {}. \
                         This attribute is set by the provider and cannot be changed by a plan.",
                        planned, prior
                    ),
                );
            }
        }

        if diags.has_error() {
            return Ok(Response::new(None, diags));
        }

        let mut plan = plan.clone();
        for name in schema.attributes_with_modifier(PlanModifier::UseStateForUnknown) {
            let path = AttributePath::root(name);
            // Plans built outside Terraform may leave computed attributes out entirely.
            let planned_unknown = plan.get_attribute(&path).is_none_or(is_unknown_or_null);

            if planned_unknown {
                if let Some(prior) = prior_state.get_attribute(&path).cloned() {
                    plan.set_attribute(&path, prior, &mut diags);
                }
            }
        }

        tracing::debug!(resource = type_name, "update");
        let state = resource.update(&plan, prior_state, &mut diags).await;
        Ok(Response::new(state, diags))
    }

    pub async fn delete_resource(
        &self,
        type_name: &str,
        state: &State,
    ) -> Result<Response<()>, ProviderError> {
        let (resource, mut diags) = self.resource(type_name)?;
        if diags.has_error() {
            return Ok(Response::new(None, diags));
        }

        tracing::debug!(resource = type_name, "delete");
        let result = resource.delete(state, &mut diags).await;
        Ok(Response::new(result, diags))
    }

    pub fn import_resource(
        &self,
        type_name: &str,
        id: &str,
    ) -> Result<Response<State>, ProviderError> {
        let (resource, mut diags) = self.resource(type_name)?;
        if diags.has_error() {
            return Ok(Response::new(None, diags));
        }

        tracing::debug!(resource = type_name, id, "import");
        let state = resource.import_state(id, &mut diags);
        Ok(Response::new(state, diags))
    }

    pub async fn read_data_source(
        &self,
        type_name: &str,
        config: &State,
    ) -> Result<Response<State>, ProviderError> {
        let (data_source, mut diags) = self.data_source(type_name)?;
        if diags.has_error() {
            return Ok(Response::new(None, diags));
        }

        tracing::debug!(data_source = type_name, "read");
        let state = data_source.read(config, &mut diags).await;
        Ok(Response::new(state, diags))
    }
}

fn is_unknown_or_null(value: &serde_json::Value) -> bool {
    value.is_null() || value.as_str() == Some(UNKNOWN_VALUE)
}
