use crate::core::{ConfigService, RemoteAuthorization, Result};
use crate::utils::error::{AuthzError, CREATE_OPERATION, DELETE_OPERATION, LIST_OPERATION};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    Put,
    List,
    Delete,
}

impl RemoteOperation {
    fn error_prefix(self) -> &'static str {
        match self {
            RemoteOperation::Put => CREATE_OPERATION,
            RemoteOperation::List => LIST_OPERATION,
            RemoteOperation::Delete => DELETE_OPERATION,
        }
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteOperation::Put => write!(f, "PutAggregationAuthorization"),
            RemoteOperation::List => write!(f, "DescribeAggregationAuthorizations"),
            RemoteOperation::Delete => write!(f, "DeleteAggregationAuthorization"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Put { account_id: String, region: String },
    List,
    Delete { account_id: String, region: String },
}

impl RecordedCall {
    pub fn operation(&self) -> RemoteOperation {
        match self {
            RecordedCall::Put { .. } => RemoteOperation::Put,
            RecordedCall::List => RemoteOperation::List,
            RecordedCall::Delete { .. } => RemoteOperation::Delete,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    authorizations: Vec<RemoteAuthorization>,
    calls: Vec<RecordedCall>,
    failures: HashMap<RemoteOperation, String>,
}

/// Process-local stand-in for AWS Config.
///
/// Keeps the authorizations granted by one "home" account, records every
/// call, and can be told to fail a given operation.
#[derive(Debug)]
pub struct InMemoryConfigService {
    home_account_id: String,
    home_region: String,
    inner: Mutex<Inner>,
}

impl InMemoryConfigService {
    pub fn new(home_account_id: impl Into<String>, home_region: impl Into<String>) -> Self {
        Self {
            home_account_id: home_account_id.into(),
            home_region: home_region.into(),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn with_authorizations(self, authorizations: Vec<RemoteAuthorization>) -> Self {
        self.lock().authorizations = authorizations;
        self
    }

    pub fn arn_for(&self, account_id: &str, region: &str) -> String {
        format!(
            "arn:aws:config:{}:{}:aggregation-authorization/{}/{}",
            self.home_region, self.home_account_id, account_id, region
        )
    }

    pub fn fail_operation(&self, operation: RemoteOperation, message: impl Into<String>) {
        self.lock().failures.insert(operation, message.into());
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Removes an authorization behind the resource's back, as another tool would.
    pub fn revoke_out_of_band(&self, account_id: &str, region: &str) {
        self.lock()
            .authorizations
            .retain(|a| !(a.account_id == account_id && a.region == region));
    }

    pub fn authorizations(&self) -> Vec<RemoteAuthorization> {
        self.lock().authorizations.clone()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn reset_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: RecordedCall) -> Result<MutexGuard<'_, Inner>> {
        let mut inner = self.lock();
        let operation = call.operation();
        inner.calls.push(call);
        if let Some(message) = inner.failures.get(&operation) {
            return Err(AuthzError::remote(
                operation.error_prefix(),
                format!("{}: {}", operation, message),
            ));
        }
        Ok(inner)
    }
}

#[async_trait]
impl ConfigService for InMemoryConfigService {
    async fn put_authorization(&self, account_id: &str, region: &str) -> Result<()> {
        let arn = self.arn_for(account_id, region);
        let mut inner = self.record(RecordedCall::Put {
            account_id: account_id.to_string(),
            region: region.to_string(),
        })?;

        let exists = inner
            .authorizations
            .iter()
            .any(|a| a.account_id == account_id && a.region == region);
        if !exists {
            inner.authorizations.push(RemoteAuthorization {
                account_id: account_id.to_string(),
                region: region.to_string(),
                arn,
                creation_time: Some(Utc::now()),
            });
        }
        Ok(())
    }

    async fn list_authorizations(&self) -> Result<Vec<RemoteAuthorization>> {
        let inner = self.record(RecordedCall::List)?;
        Ok(inner.authorizations.clone())
    }

    async fn delete_authorization(&self, account_id: &str, region: &str) -> Result<()> {
        let mut inner = self.record(RecordedCall::Delete {
            account_id: account_id.to_string(),
            region: region.to_string(),
        })?;
        inner
            .authorizations
            .retain(|a| !(a.account_id == account_id && a.region == region));
        Ok(())
    }
}
