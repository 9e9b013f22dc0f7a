//! The Terraform side of the plugin boundary: values, objects, schemas and
//! diagnostics as the host exchanges them with provider code.

mod diagnostics;
mod schema;
mod state;
mod value;

pub use diagnostics::{AttributePath, Diagnostic, Diagnostics, Severity};
pub use schema::{Attribute, AttributeType, PlanModifier, ProviderSchema, Schema};
pub use state::State;
pub use value::{UNKNOWN_VALUE, Value};
