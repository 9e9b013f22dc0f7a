use serde::Serialize;
use serde::de::DeserializeOwned;

use super::diagnostics::{AttributePath, Diagnostics};

/// A Terraform object (configuration, plan or state) as exchanged with the host.
///
/// Handlers convert it to and from their typed models with [`State::get`] and
/// [`State::set`]. A null object is what Terraform sends for "no prior state".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct State(serde_json::Value);

impl State {
    pub fn null() -> Self {
        Self(serde_json::Value::Null)
    }

    pub fn from_value(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn from_model<T: Serialize>(model: &T, diags: &mut Diagnostics) -> Option<Self> {
        let mut state = Self::null();
        state.set(model, diags);
        if diags.has_error() { None } else { Some(state) }
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// Decode the object into a typed model.
    pub fn get<T: DeserializeOwned>(&self, diags: &mut Diagnostics) -> Option<T> {
        let source = if self.0.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            self.0.clone()
        };

        match serde_json::from_value(source) {
            Ok(model) => Some(model),
            Err(e) => {
                diags.add_error(
                    "Value Conversion Error",
                    format!("An unexpected error was encountered trying to convert the Terraform value into the provider model: {}", e),
                );
                None
            }
        }
    }

    /// Replace the object with the encoded model.
    pub fn set<T: Serialize>(&mut self, model: &T, diags: &mut Diagnostics) {
        match serde_json::to_value(model) {
            Ok(value) => self.0 = value,
            Err(e) => diags.add_error(
                "Value Conversion Error",
                format!("An unexpected error was encountered trying to convert the provider model into a Terraform value: {}", e),
            ),
        }
    }

    pub fn get_attribute(&self, path: &AttributePath) -> Option<&serde_json::Value> {
        path.steps()
            .iter()
            .try_fold(&self.0, |value, step| value.get(step))
    }

    /// Write a single top-level attribute, turning a null object into an empty one first.
    pub fn set_attribute(
        &mut self,
        path: &AttributePath,
        value: serde_json::Value,
        diags: &mut Diagnostics,
    ) {
        if self.0.is_null() {
            self.0 = serde_json::Value::Object(Default::default());
        }

        let Some((last, parents)) = path.steps().split_last() else {
            diags.add_error("Invalid Attribute Path", "the attribute path is empty");
            return;
        };

        let mut target = &mut self.0;
        for step in parents {
            target = match target.get_mut(step) {
                Some(next) => next,
                None => {
                    diags.add_attribute_error(
                        path.clone(),
                        "Invalid Attribute Path",
                        format!("no attribute \"{}\" in the object", step),
                    );
                    return;
                }
            };
        }

        match target.as_object_mut() {
            Some(object) => {
                object.insert(last.clone(), value);
            }
            None => diags.add_attribute_error(
                path.clone(),
                "Invalid Attribute Path",
                "the parent of the attribute is not an object",
            ),
        }
    }
}

impl From<serde_json::Value> for State {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
