//! Shared AWS configuration context
//!
//! Provides `AwsContext` for loading AWS SDK configuration once and
//! creating multiple service clients from the same config.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;

/// Shared AWS configuration context for creating service clients.
///
/// # Example
/// ```ignore
/// let aws = AwsContext::from_env().await;
///
/// // Create multiple clients from the same config
/// let ec2 = Ec2Client::from_context(&aws);
/// let ecs = EcsClient::from_context(&aws);
/// ```
#[derive(Clone)]
pub struct AwsContext {
    config: Arc<SdkConfig>,
}

impl AwsContext {
    /// Load AWS configuration from the execution environment.
    ///
    /// In Lambda this resolves credentials and region from the function's
    /// environment; locally it falls back to config files and profiles.
    pub async fn from_env() -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;

        Self {
            config: Arc::new(config),
        }
    }

    /// Load AWS configuration pinned to a specific region.
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            config: Arc::new(config),
        }
    }

    /// Get the underlying SDK config for direct client construction.
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    /// Create an EC2 client from this context.
    pub fn ec2_client(&self) -> aws_sdk_ec2::Client {
        aws_sdk_ec2::Client::new(self.sdk_config())
    }

    /// Create an ECS client from this context.
    pub fn ecs_client(&self) -> aws_sdk_ecs::Client {
        aws_sdk_ecs::Client::new(self.sdk_config())
    }

    /// Create an AutoScaling client from this context.
    pub fn autoscaling_client(&self) -> aws_sdk_autoscaling::Client {
        aws_sdk_autoscaling::Client::new(self.sdk_config())
    }
}

impl std::fmt::Debug for AwsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsContext")
            .field("region", &self.config.region())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: These tests require AWS credentials and are skipped in regular
    // test runs

    #[tokio::test]
    #[ignore = "requires AWS credentials"]
    async fn context_pins_requested_region() {
        let ctx = AwsContext::new("us-east-1").await;
        assert_eq!(
            ctx.sdk_config().region().map(|r| r.as_ref()),
            Some("us-east-1")
        );
    }

    #[tokio::test]
    #[ignore = "requires AWS credentials"]
    async fn context_clone_shares_config() {
        let ctx1 = AwsContext::new("us-east-1").await;
        let ctx2 = ctx1.clone();

        assert!(Arc::ptr_eq(&ctx1.config, &ctx2.config));
    }
}
