#![cfg(feature = "aws")]

use aws_sdk_config::config::retry::RetryConfig;
use aws_sdk_config::config::{BehaviorVersion, Credentials, Region};
use config_authz::core::resource::planned_state;
use config_authz::{
    AggregationAuthorizationResource, AuthzError, AwsConfigService, ConfigService,
    ResourceLifecycle, ResourceState,
};
use httpmock::prelude::*;
use serde_json::json;

const TARGET_HEADER: &str = "x-amz-target";
const AMZ_JSON: &str = "application/x-amz-json-1.1";

fn service_for(server: &MockServer) -> AwsConfigService {
    let config = aws_sdk_config::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
        .endpoint_url(server.base_url())
        .retry_config(RetryConfig::disabled())
        .build();
    AwsConfigService::new(aws_sdk_config::Client::from_conf(config))
}

fn authorization(account_id: &str, region: &str) -> serde_json::Value {
    json!({
        "AggregationAuthorizationArn": format!(
            "arn:aws:config:us-east-1:111111111111:aggregation-authorization/{}/{}",
            account_id, region
        ),
        "AuthorizedAccountId": account_id,
        "AuthorizedAwsRegion": region,
        "CreationTime": 1700000000.0
    })
}

#[tokio::test]
async fn test_put_sends_account_and_region() {
    let server = MockServer::start_async().await;
    let put_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header(TARGET_HEADER, "StarlingDoveService.PutAggregationAuthorization")
                .json_body(json!({
                    "AuthorizedAccountId": "123456789012",
                    "AuthorizedAwsRegion": "us-west-2"
                }));
            then.status(200)
                .header("Content-Type", AMZ_JSON)
                .json_body(json!({
                    "AggregationAuthorization": authorization("123456789012", "us-west-2")
                }));
        })
        .await;

    let service = service_for(&server);
    service
        .put_authorization("123456789012", "us-west-2")
        .await
        .unwrap();

    put_mock.assert_async().await;
}

#[tokio::test]
async fn test_list_follows_next_token() {
    let server = MockServer::start_async().await;
    let first_page = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header(
                    TARGET_HEADER,
                    "StarlingDoveService.DescribeAggregationAuthorizations",
                )
                .json_body(json!({}));
            then.status(200)
                .header("Content-Type", AMZ_JSON)
                .json_body(json!({
                    "AggregationAuthorizations": [authorization("123456789012", "us-west-2")],
                    "NextToken": "page-2"
                }));
        })
        .await;
    let second_page = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header(
                    TARGET_HEADER,
                    "StarlingDoveService.DescribeAggregationAuthorizations",
                )
                .json_body(json!({ "NextToken": "page-2" }));
            then.status(200)
                .header("Content-Type", AMZ_JSON)
                .json_body(json!({
                    "AggregationAuthorizations": [authorization("210987654321", "eu-west-1")]
                }));
        })
        .await;

    let service = service_for(&server);
    let listed = service.list_authorizations().await.unwrap();

    first_page.assert_async().await;
    second_page.assert_async().await;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].account_id, "123456789012");
    assert_eq!(listed[1].region, "eu-west-1");
    assert_eq!(
        listed[1].creation_time.map(|t| t.timestamp()),
        Some(1_700_000_000)
    );
}

#[tokio::test]
async fn test_service_error_is_wrapped_with_operation() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header(TARGET_HEADER, "StarlingDoveService.DeleteAggregationAuthorization");
            then.status(400)
                .header("Content-Type", AMZ_JSON)
                .json_body(json!({
                    "__type": "InvalidParameterValueException",
                    "message": "The region is not valid"
                }));
        })
        .await;

    let service = service_for(&server);
    let err = service
        .delete_authorization("123456789012", "nowhere-1")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthzError::RemoteCall { .. }));
    assert_eq!(
        err.to_string(),
        "Error deleting authorization: InvalidParameterValueException: The region is not valid"
    );
}

#[tokio::test]
async fn test_resource_create_and_delete_over_sdk() {
    let server = MockServer::start_async().await;
    let put_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header(TARGET_HEADER, "StarlingDoveService.PutAggregationAuthorization");
            then.status(200)
                .header("Content-Type", AMZ_JSON)
                .json_body(json!({
                    "AggregationAuthorization": authorization("123456789012", "us-west-2")
                }));
        })
        .await;
    let list_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/").header(
                TARGET_HEADER,
                "StarlingDoveService.DescribeAggregationAuthorizations",
            );
            then.status(200)
                .header("Content-Type", AMZ_JSON)
                .json_body(json!({
                    "AggregationAuthorizations": [authorization("123456789012", "us-west-2")]
                }));
        })
        .await;
    let delete_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header(TARGET_HEADER, "StarlingDoveService.DeleteAggregationAuthorization")
                .json_body(json!({
                    "AuthorizedAccountId": "123456789012",
                    "AuthorizedAwsRegion": "us-west-2"
                }));
            then.status(200)
                .header("Content-Type", AMZ_JSON)
                .json_body(json!({}));
        })
        .await;

    let resource = AggregationAuthorizationResource::new(service_for(&server));

    let mut state = planned_state("123456789012", "us-west-2");
    resource.create(&mut state).await.unwrap();
    assert_eq!(state.id, "123456789012:us-west-2");
    assert_eq!(
        state.attributes.arn.as_deref(),
        Some("arn:aws:config:us-east-1:111111111111:aggregation-authorization/123456789012/us-west-2")
    );

    let mut imported = resource.import("123456789012:us-west-2").await.unwrap();
    assert_eq!(imported, state);

    resource.delete(&mut imported).await.unwrap();
    assert_eq!(imported, ResourceState { id: String::new(), ..state });

    put_mock.assert_hits_async(1).await;
    list_mock.assert_hits_async(2).await;
    delete_mock.assert_async().await;
}
