//! AWS SDK client setup.

use aws_sdk_dynamodb::Client;
use tracing::debug;

use crate::config::ConnectOptions;

/// Creates a DynamoDB client. Credentials come from the default provider
/// chain.
pub async fn create_client(options: &ConnectOptions) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(options.region.clone()));

    if let Some(endpoint) = &options.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    debug!(endpoint = %options.target_display(), "created DynamoDB client");
    Client::new(&sdk_config)
}
