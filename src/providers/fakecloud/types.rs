use serde::{Deserialize, Serialize};

/// A virtual machine as reported by the fakecloud API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachine {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub instance_type: String,
}

impl VirtualMachine {
    pub fn new(name: impl Into<String>, instance_type: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            instance_type: instance_type.into(),
        }
    }
}

/// Body of create and update requests. The ID travels in the URL, never in the body.
#[derive(Debug, Serialize)]
pub(crate) struct VmRequest<'a> {
    pub name: &'a str,
    pub instance_type: &'a str,
}

/// Error payload returned by the API on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        let non_empty = |m: &String| !m.is_empty();
        self.error
            .filter(non_empty)
            .or(self.message.filter(non_empty))
    }
}
