//! EC2 instance attribute lookup

use anyhow::{Context, Result};
use aws_sdk_ec2::Client;
use aws_sdk_ec2::types::InstanceAttributeName;
use base64::Engine;
use tracing::debug;

use super::context::AwsContext;

/// EC2 client for reading instance boot configuration.
pub struct Ec2Client {
    client: Client,
}

impl Ec2Client {
    /// Create an EC2 client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
        }
    }

    /// Fetch and decode the user data of an instance.
    ///
    /// The attribute comes back base64-encoded. An instance launched without
    /// user data is an error here, since the cluster marker cannot exist.
    pub async fn user_data(&self, instance_id: &str) -> Result<String> {
        let output = self
            .client
            .describe_instance_attribute()
            .instance_id(instance_id)
            .attribute(InstanceAttributeName::UserData)
            .send()
            .await
            .context("Failed to describe instance userData attribute")?;

        let encoded = output
            .user_data()
            .and_then(|attr| attr.value())
            .with_context(|| format!("Instance {instance_id} has no user data"))?;

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .context("Failed to base64-decode instance user data")?;

        let user_data =
            String::from_utf8(decoded).context("Instance user data is not valid UTF-8")?;

        debug!(instance_id = %instance_id, bytes = user_data.len(), "Fetched instance user data");

        Ok(user_data)
    }
}
