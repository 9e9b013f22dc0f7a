use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SharedClient, VirtualMachine, unconfigured_client};
use crate::providers::{ProviderData, Resource};
use crate::terraform::{Attribute, AttributePath, Diagnostics, PlanModifier, Schema, State, Value};

pub fn new_virtual_machine_resource() -> Box<dyn Resource> {
    Box::new(VirtualMachineResource::default())
}

/// Manages a single fakecloud virtual machine.
#[derive(Default)]
pub struct VirtualMachineResource {
    client: Option<SharedClient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualMachineResourceModel {
    #[serde(default)]
    pub id: Value<i64>,
    #[serde(default)]
    pub name: Value<String>,
    #[serde(default)]
    pub instance_type: Value<String>,
}

impl VirtualMachineResource {
    fn client(&self, diags: &mut Diagnostics) -> Option<&SharedClient> {
        if self.client.is_none() {
            unconfigured_client(diags);
        }
        self.client.as_ref()
    }
}

#[async_trait]
impl Resource for VirtualMachineResource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{}_virtual_machine", provider_type_name)
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_description("Virtual machine resource")
            .with_attribute(
                "id",
                Attribute::computed_int64()
                    .with_description("Virtual machine identifier")
                    .with_plan_modifier(PlanModifier::UseStateForUnknown),
            )
            .with_attribute(
                "name",
                Attribute::required_string().with_description("Name of the VM"),
            )
            .with_attribute(
                "instance_type",
                Attribute::required_string().with_description("Instance type for the VM"),
            )
    }

    fn configure(&mut self, provider_data: Option<ProviderData>, _diags: &mut Diagnostics) {
        // Provider not configured yet; Terraform calls Configure again later.
        if let Some(client) = provider_data {
            self.client = Some(client);
        }
    }

    async fn create(&self, plan: &State, diags: &mut Diagnostics) -> Option<State> {
        let mut data: VirtualMachineResourceModel = plan.get(diags)?;
        let client = self.client(diags)?;

        let request = VirtualMachine::new(
            data.name.value_or_default(),
            data.instance_type.value_or_default(),
        );
        let vm = match client.create_vm(&request).await {
            Ok(vm) => vm,
            Err(e) => {
                diags.add_error("Unable to create VM", e.to_string());
                return None;
            }
        };

        data.id = Value::Known(vm.id);

        tracing::trace!(id = vm.id, "created a resource");

        State::from_model(&data, diags)
    }

    async fn read(&self, state: &State, diags: &mut Diagnostics) -> Option<State> {
        let mut data: VirtualMachineResourceModel = state.get(diags)?;
        let client = self.client(diags)?;

        let id = data.id.value_or_default();
        let vm = match client.get_vm(id).await {
            Ok(vm) => vm,
            Err(e) => {
                diags.add_error(format!("Unable to read VM, got error: {}", e), e.to_string());
                return None;
            }
        };

        data.name = Value::Known(vm.name);
        data.instance_type = Value::Known(vm.instance_type);

        State::from_model(&data, diags)
    }

    async fn update(
        &self,
        plan: &State,
        _prior_state: &State,
        diags: &mut Diagnostics,
    ) -> Option<State> {
        let data: VirtualMachineResourceModel = plan.get(diags)?;
        let client = self.client(diags)?;

        let id = data.id.value_or_default();
        let name = data.name.value_or_default();
        let instance_type = data.instance_type.value_or_default();

        if let Err(e) = client.update_vm(id, &name, &instance_type).await {
            diags.add_error(format!("Unable to update VM, got error: {}", e), e.to_string());
            return None;
        }

        tracing::trace!(id, "updated a resource");

        State::from_model(&data, diags)
    }

    async fn delete(&self, state: &State, diags: &mut Diagnostics) -> Option<()> {
        let data: VirtualMachineResourceModel = state.get(diags)?;
        let client = self.client(diags)?;

        let id = data.id.value_or_default();
        if let Err(e) = client.delete_vm(id).await {
            diags.add_error(format!("Unable to delete VM, got error: {}", e), e.to_string());
            return None;
        }

        tracing::trace!(id, "deleted a resource");
        Some(())
    }

    fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<State> {
        let path = AttributePath::root("id");

        // The id attribute is an integer, so the passthrough value has to parse as one.
        let parsed: i64 = match id.trim().parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                diags.add_attribute_error(
                    path,
                    "Invalid Import Identifier",
                    format!("Expected a numeric virtual machine ID, got \"{}\": {}", id, e),
                );
                return None;
            }
        };

        let mut state = State::null();
        state.set_attribute(&path, serde_json::json!(parsed), diags);
        if diags.has_error() { None } else { Some(state) }
    }
}
