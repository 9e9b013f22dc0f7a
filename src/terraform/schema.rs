use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum AttributeType {
    String,
    Int64,
    ListNested {
        attributes: BTreeMap<String, Attribute>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanModifier {
    /// Copy the prior state value into the plan when the planned value is unknown.
    UseStateForUnknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    #[serde(flatten)]
    pub attr_type: AttributeType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub computed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,
}

impl Attribute {
    fn new(attr_type: AttributeType) -> Self {
        Self {
            attr_type,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            markdown_description: None,
            plan_modifiers: Vec::new(),
        }
    }

    pub fn required_string() -> Self {
        Self {
            required: true,
            ..Self::new(AttributeType::String)
        }
    }

    pub fn optional_string() -> Self {
        Self {
            optional: true,
            ..Self::new(AttributeType::String)
        }
    }

    pub fn computed_string() -> Self {
        Self {
            computed: true,
            ..Self::new(AttributeType::String)
        }
    }

    pub fn required_int64() -> Self {
        Self {
            required: true,
            ..Self::new(AttributeType::Int64)
        }
    }

    pub fn computed_int64() -> Self {
        Self {
            computed: true,
            ..Self::new(AttributeType::Int64)
        }
    }

    pub fn computed_list_nested(attributes: BTreeMap<String, Attribute>) -> Self {
        Self {
            computed: true,
            ..Self::new(AttributeType::ListNested { attributes })
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.markdown_description = Some(description.into());
        self
    }

    pub fn with_plan_modifier(mut self, modifier: PlanModifier) -> Self {
        self.plan_modifiers.push(modifier);
        self
    }

    /// Set only by the provider; configuration can never supply it.
    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.markdown_description = Some(description.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Names of top-level attributes carrying the given plan modifier.
    pub fn attributes_with_modifier(&self, modifier: PlanModifier) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|(_, attr)| attr.plan_modifiers.contains(&modifier))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Every schema a provider exposes, keyed by Terraform type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderSchema {
    pub provider: Schema,
    pub resource_schemas: BTreeMap<String, Schema>,
    pub data_source_schemas: BTreeMap<String, Schema>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_set_flags() {
        let attr = Attribute::optional_string().sensitive();
        assert!(attr.optional);
        assert!(attr.sensitive);
        assert!(!attr.required);
        assert_eq!(attr.attr_type, AttributeType::String);
    }

    #[test]
    fn test_computed_only() {
        assert!(Attribute::computed_int64().is_computed_only());
        assert!(!Attribute::required_string().is_computed_only());
        assert!(!Attribute::optional_string().is_computed_only());
    }

    #[test]
    fn test_attributes_with_modifier() {
        let schema = Schema::new()
            .with_attribute(
                "id",
                Attribute::computed_int64().with_plan_modifier(PlanModifier::UseStateForUnknown),
            )
            .with_attribute("name", Attribute::required_string());
        assert_eq!(
            schema.attributes_with_modifier(PlanModifier::UseStateForUnknown),
            vec!["id"]
        );
    }

    #[test]
    fn test_serialization_skips_false_flags() {
        let schema = Schema::new().with_attribute("name", Attribute::required_string());
        let json = serde_json::to_value(&schema).unwrap();
        let name = &json["attributes"]["name"];
        assert_eq!(name["type"], "string");
        assert_eq!(name["required"], true);
        assert!(name.get("optional").is_none());
        assert!(name.get("sensitive").is_none());
    }
}
