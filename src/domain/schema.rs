use crate::domain::model::AggregationAuthorization;
use crate::utils::error::{AuthzError, Result};
use crate::utils::validation::{validate_aws_account_id, validate_aws_region};
use serde::Serialize;

pub const RESOURCE_TYPE: &str = "aws_config_aggregate_authorization";

pub type ValidateFn = fn(&str, &str) -> Result<()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
}

/// How an import string becomes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// The import string is used as the state id verbatim.
    Passthrough,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub r#type: AttributeType,
    pub required: bool,
    pub computed: bool,
    pub force_new: bool,
    #[serde(skip)]
    pub validate: Option<ValidateFn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub attributes: Vec<AttributeSchema>,
    pub import: ImportMode,
}

impl ResourceSchema {
    pub fn aggregation_authorization() -> Self {
        Self {
            type_name: RESOURCE_TYPE,
            attributes: vec![
                AttributeSchema {
                    name: "arn",
                    r#type: AttributeType::String,
                    required: false,
                    computed: true,
                    force_new: false,
                    validate: None,
                },
                AttributeSchema {
                    name: "account_id",
                    r#type: AttributeType::String,
                    required: true,
                    computed: false,
                    force_new: true,
                    validate: Some(validate_aws_account_id),
                },
                AttributeSchema {
                    name: "region",
                    r#type: AttributeType::String,
                    required: true,
                    computed: false,
                    force_new: true,
                    validate: Some(validate_aws_region),
                },
            ],
            import: ImportMode::Passthrough,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Checks a desired configuration. Computed attributes are ignored.
    pub fn validate(&self, config: &AggregationAuthorization) -> Result<()> {
        for attribute in self.attributes.iter().filter(|a| !a.computed) {
            match attribute_value(config, attribute.name) {
                Some(value) => {
                    if let Some(validate) = attribute.validate {
                        validate(attribute.name, value)?;
                    }
                }
                None if attribute.required => {
                    return Err(AuthzError::MissingField {
                        field: attribute.name.to_string(),
                    });
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Force-new attributes whose value differs between `prior` and `desired`.
    /// A non-empty result means the authorization has to be destroyed and recreated.
    pub fn replacement_fields(
        &self,
        prior: &AggregationAuthorization,
        desired: &AggregationAuthorization,
    ) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.force_new)
            .filter(|a| attribute_value(prior, a.name) != attribute_value(desired, a.name))
            .map(|a| a.name)
            .collect()
    }
}

impl Default for ResourceSchema {
    fn default() -> Self {
        Self::aggregation_authorization()
    }
}

fn attribute_value<'a>(config: &'a AggregationAuthorization, name: &str) -> Option<&'a str> {
    match name {
        "account_id" => config.account_id.as_deref(),
        "region" => config.region.as_deref(),
        "arn" => config.arn.as_deref(),
        _ => None,
    }
}
