use crate::core::{
    AggregationAuthorization, AuthorizationId, ConfigService, ResourceLifecycle, ResourceSchema,
    ResourceState, Result,
};
use crate::utils::error::{AuthzError, CREATE_OPERATION, DELETE_OPERATION, LIST_OPERATION};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;

/// Any remote failure surfaces as `RemoteCall` prefixed with `operation`,
/// whatever error kind the injected client produced.
fn remote_failure(operation: &'static str) -> impl FnOnce(AuthzError) -> AuthzError {
    move |err| match err {
        AuthzError::RemoteCall { .. } => err,
        other => AuthzError::remote(operation, other.to_string()),
    }
}

/// Lifecycle implementation for `aws_config_aggregate_authorization`.
///
/// AWS Config is the source of truth. The local state only caches the
/// identifier and the computed ARN and is reconciled on every read.
pub struct AggregationAuthorizationResource<C: ConfigService> {
    client: C,
    schema: ResourceSchema,
}

impl<C: ConfigService> AggregationAuthorizationResource<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            schema: ResourceSchema::aggregation_authorization(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: ConfigService> ResourceLifecycle for AggregationAuthorizationResource<C> {
    fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    async fn create(&self, state: &mut ResourceState) -> Result<()> {
        self.schema.validate(&state.attributes)?;
        let account_id = validate_required_field("account_id", &state.attributes.account_id)?;
        let region = validate_required_field("region", &state.attributes.region)?;
        let id = AuthorizationId::new(account_id.as_str(), region.as_str());

        tracing::debug!("Putting aggregation authorization for {}", id);
        self.client
            .put_authorization(&id.account_id, &id.region)
            .await
            .map_err(remote_failure(CREATE_OPERATION))?;

        state.set_id(id.to_string());
        tracing::info!("Created aggregation authorization {}", state.id);

        self.read(state).await
    }

    async fn read(&self, state: &mut ResourceState) -> Result<()> {
        let id = AuthorizationId::parse(&state.id)?;

        state.attributes.account_id = Some(id.account_id.clone());
        state.attributes.region = Some(id.region.clone());

        let authorizations = self
            .client
            .list_authorizations()
            .await
            .map_err(remote_failure(LIST_OPERATION))?;
        tracing::debug!(
            "Scanning {} authorizations for {}",
            authorizations.len(),
            id
        );

        if let Some(found) = authorizations.iter().find(|auth| id.matches(auth)) {
            state.attributes.arn = Some(found.arn.clone());
            return Ok(());
        }

        tracing::warn!("Authorization not found, removing from state: {}", state.id);
        state.clear_id();
        Ok(())
    }

    async fn delete(&self, state: &mut ResourceState) -> Result<()> {
        let id = AuthorizationId::parse(&state.id)?;

        self.client
            .delete_authorization(&id.account_id, &id.region)
            .await
            .map_err(remote_failure(DELETE_OPERATION))?;

        tracing::info!("Deleted aggregation authorization {}", id);
        state.clear_id();
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<ResourceState> {
        let mut state = ResourceState::with_id(id);
        self.read(&mut state).await?;
        Ok(state)
    }
}

/// Desired configuration for a new authorization, ready for `create`.
pub fn planned_state(account_id: &str, region: &str) -> ResourceState {
    ResourceState::from_config(AggregationAuthorization::new(account_id, region))
}
