//! AutoScaling lifecycle hook actions

use anyhow::{Context, Result};
use aws_sdk_autoscaling::Client;
use ecs_drainer_events::LifecycleDetail;
use tracing::info;

use super::context::AwsContext;

/// Result code reported when releasing the lifecycle hook.
const ACTION_RESULT_CONTINUE: &str = "CONTINUE";

/// AutoScaling client for extending or releasing a lifecycle hook.
pub struct AutoScalingClient {
    client: Client,
}

impl AutoScalingClient {
    /// Create an AutoScaling client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.autoscaling_client(),
        }
    }

    /// Extend the lifecycle hook timeout while tasks are still draining.
    pub async fn record_heartbeat(&self, detail: &LifecycleDetail) -> Result<()> {
        info!(
            group = %detail.auto_scaling_group_name,
            hook = %detail.lifecycle_hook_name,
            "Recording lifecycle action heartbeat"
        );

        self.client
            .record_lifecycle_action_heartbeat()
            .auto_scaling_group_name(&detail.auto_scaling_group_name)
            .lifecycle_action_token(&detail.lifecycle_action_token)
            .lifecycle_hook_name(&detail.lifecycle_hook_name)
            .send()
            .await
            .context("Failed to record lifecycle action heartbeat")?;

        Ok(())
    }

    /// Release the lifecycle hook, letting the instance terminate.
    pub async fn complete_lifecycle(&self, detail: &LifecycleDetail) -> Result<()> {
        info!(
            group = %detail.auto_scaling_group_name,
            hook = %detail.lifecycle_hook_name,
            "Completing lifecycle action"
        );

        self.client
            .complete_lifecycle_action()
            .auto_scaling_group_name(&detail.auto_scaling_group_name)
            .lifecycle_action_result(ACTION_RESULT_CONTINUE)
            .lifecycle_action_token(&detail.lifecycle_action_token)
            .lifecycle_hook_name(&detail.lifecycle_hook_name)
            .send()
            .await
            .context("Failed to complete lifecycle action")?;

        Ok(())
    }
}
