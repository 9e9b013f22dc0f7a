use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SharedClient, VirtualMachine, unconfigured_client};
use crate::providers::{DataSource, ProviderData};
use crate::terraform::{Attribute, Diagnostics, Schema, State, Value};

pub fn new_virtual_machines_data_source() -> Box<dyn DataSource> {
    Box::new(VirtualMachinesDataSource::default())
}

/// Lists every virtual machine known to the service.
#[derive(Default)]
pub struct VirtualMachinesDataSource {
    client: Option<SharedClient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualMachinesDataSourceModel {
    #[serde(default)]
    pub virtual_machines: Vec<VirtualMachineModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualMachineModel {
    pub id: Value<i64>,
    pub name: Value<String>,
    pub instance_type: Value<String>,
}

impl From<VirtualMachine> for VirtualMachineModel {
    fn from(vm: VirtualMachine) -> Self {
        Self {
            id: Value::Known(vm.id),
            name: Value::Known(vm.name),
            instance_type: Value::Known(vm.instance_type),
        }
    }
}

#[async_trait]
impl DataSource for VirtualMachinesDataSource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{}_virtual_machines", provider_type_name)
    }

    fn schema(&self) -> Schema {
        let nested = Schema::new()
            .with_attribute("id", Attribute::computed_int64())
            .with_attribute("name", Attribute::computed_string())
            .with_attribute("instance_type", Attribute::computed_string());

        Schema::new().with_attribute(
            "virtual_machines",
            Attribute::computed_list_nested(nested.attributes),
        )
    }

    fn configure(&mut self, provider_data: Option<ProviderData>, _diags: &mut Diagnostics) {
        if let Some(client) = provider_data {
            self.client = Some(client);
        }
    }

    async fn read(&self, _config: &State, diags: &mut Diagnostics) -> Option<State> {
        let Some(client) = &self.client else {
            unconfigured_client(diags);
            return None;
        };

        let vms = match client.get_vms().await {
            Ok(vms) => vms,
            Err(e) => {
                diags.add_error("Unable to Read Fakecloud VMs", e.to_string());
                return None;
            }
        };

        let state = VirtualMachinesDataSourceModel {
            virtual_machines: vms.into_iter().map(VirtualMachineModel::from).collect(),
        };

        tracing::debug!(count = state.virtual_machines.len(), "read virtual machines");

        State::from_model(&state, diags)
    }
}
