use crate::utils::error::{AuthzError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attributes of one aggregation authorization.
///
/// `account_id` and `region` are supplied by the user and can't change once
/// the authorization exists. `arn` is assigned by AWS Config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationAuthorization {
    pub account_id: Option<String>,
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}

impl AggregationAuthorization {
    pub fn new(account_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            region: Some(region.into()),
            arn: None,
        }
    }
}

/// Composite identity `account_id:region`.
///
/// Neither part may contain `:`; there is no escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorizationId {
    pub account_id: String,
    pub region: String,
}

impl AuthorizationId {
    pub fn new(account_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            region: region.into(),
        }
    }

    pub fn parse(id: &str) -> Result<Self> {
        let parts: Vec<&str> = id.split(':').collect();
        match parts.as_slice() {
            [account_id, region] => Ok(Self::new(*account_id, *region)),
            _ => Err(AuthzError::malformed_id(id)),
        }
    }

    pub fn matches(&self, remote: &RemoteAuthorization) -> bool {
        self.account_id == remote.account_id && self.region == remote.region
    }
}

impl fmt::Display for AuthorizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.account_id, self.region)
    }
}

impl FromStr for AuthorizationId {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One entry of the remote authorization list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAuthorization {
    pub account_id: String,
    pub region: String,
    pub arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
}

/// Local state of a resource instance. An empty `id` means absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    pub id: String,
    #[serde(flatten)]
    pub attributes: AggregationAuthorization,
}

impl ResourceState {
    pub fn from_config(attributes: AggregationAuthorization) -> Self {
        Self {
            id: String::new(),
            attributes,
        }
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: AggregationAuthorization::default(),
        }
    }

    pub fn is_present(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn clear_id(&mut self) {
        self.id.clear();
    }
}
