use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SharedClient, unconfigured_client};
use crate::providers::{DataSource, ProviderData};
use crate::terraform::{Attribute, Diagnostics, Schema, State, Value};

pub fn new_virtual_machine_data_source() -> Box<dyn DataSource> {
    Box::new(VirtualMachineDataSource::default())
}

/// Looks up a single virtual machine by ID.
#[derive(Default)]
pub struct VirtualMachineDataSource {
    client: Option<SharedClient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualMachineDataSourceModel {
    #[serde(default)]
    pub id: Value<i64>,
    #[serde(default)]
    pub name: Value<String>,
    #[serde(default)]
    pub instance_type: Value<String>,
}

#[async_trait]
impl DataSource for VirtualMachineDataSource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{}_virtual_machine", provider_type_name)
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_attribute("id", Attribute::required_int64())
            .with_attribute("name", Attribute::computed_string())
            .with_attribute("instance_type", Attribute::computed_string())
    }

    fn configure(&mut self, provider_data: Option<ProviderData>, _diags: &mut Diagnostics) {
        if let Some(client) = provider_data {
            self.client = Some(client);
        }
    }

    async fn read(&self, config: &State, diags: &mut Diagnostics) -> Option<State> {
        let mut state: VirtualMachineDataSourceModel = config.get(diags)?;
        let Some(client) = &self.client else {
            unconfigured_client(diags);
            return None;
        };

        let vm = match client.get_vm(state.id.value_or_default()).await {
            Ok(vm) => vm,
            Err(e) => {
                diags.add_error("Unable to Read Fakecloud VM", e.to_string());
                return None;
            }
        };

        state.name = Value::Known(vm.name);
        state.instance_type = Value::Known(vm.instance_type);

        State::from_model(&state, diags)
    }
}
