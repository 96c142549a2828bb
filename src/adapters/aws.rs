use crate::config::toml_config::ProviderSettings;
use crate::core::{ConfigService, RemoteAuthorization, Result};
use crate::utils::error::{AuthzError, CREATE_OPERATION, DELETE_OPERATION, LIST_OPERATION};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_config::config::Region;
use aws_sdk_config::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_config::types::AggregationAuthorization;
use aws_sdk_config::Client as ConfigClient;
use chrono::{DateTime, Utc};

/// `ConfigService` backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct AwsConfigService {
    client: ConfigClient,
}

impl AwsConfigService {
    pub fn new(client: ConfigClient) -> Self {
        Self { client }
    }

    /// Builds a client from the default credential chain, with any
    /// region/profile/endpoint overrides from the provider settings.
    pub async fn from_settings(settings: &ProviderSettings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint_url) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;
        Self::new(ConfigClient::new(&sdk_config))
    }
}

fn remote_error<E>(operation: &'static str, err: E) -> AuthzError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let message = match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{}: {}", code, message),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(&err).to_string(),
    };
    AuthzError::remote(operation, message)
}

fn to_remote(auth: &AggregationAuthorization) -> Option<RemoteAuthorization> {
    Some(RemoteAuthorization {
        account_id: auth.authorized_account_id()?.to_string(),
        region: auth.authorized_aws_region()?.to_string(),
        arn: auth
            .aggregation_authorization_arn()
            .unwrap_or_default()
            .to_string(),
        creation_time: auth
            .creation_time()
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos())),
    })
}

#[async_trait]
impl ConfigService for AwsConfigService {
    async fn put_authorization(&self, account_id: &str, region: &str) -> Result<()> {
        self.client
            .put_aggregation_authorization()
            .authorized_account_id(account_id)
            .authorized_aws_region(region)
            .send()
            .await
            .map_err(|e| remote_error(CREATE_OPERATION, e.into_service_error()))?;
        Ok(())
    }

    async fn list_authorizations(&self) -> Result<Vec<RemoteAuthorization>> {
        let mut authorizations = Vec::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let output = self
                .client
                .describe_aggregation_authorizations()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| remote_error(LIST_OPERATION, e.into_service_error()))?;
            pages += 1;

            authorizations.extend(output.aggregation_authorizations().iter().filter_map(to_remote));

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        tracing::debug!(
            "Fetched {} authorizations in {} page(s)",
            authorizations.len(),
            pages
        );
        Ok(authorizations)
    }

    async fn delete_authorization(&self, account_id: &str, region: &str) -> Result<()> {
        self.client
            .delete_aggregation_authorization()
            .authorized_account_id(account_id)
            .authorized_aws_region(region)
            .send()
            .await
            .map_err(|e| remote_error(DELETE_OPERATION, e.into_service_error()))?;
        Ok(())
    }
}
