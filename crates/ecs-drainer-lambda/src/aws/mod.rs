//! AWS service clients

pub mod autoscaling;
pub mod context;
pub mod ec2;
pub mod ecs;

pub use autoscaling::AutoScalingClient;
pub use context::AwsContext;
pub use ec2::Ec2Client;
pub use ecs::{ContainerInstanceSummary, EcsClient, TASK_STATUS_RUNNING, TaskDesiredStatus};

use anyhow::Result;
use ecs_drainer_events::LifecycleDetail;

use crate::drain::DrainOperations;

/// Production implementation of [`DrainOperations`] over the real AWS
/// clients, all built from one loaded SDK config.
pub struct DrainServices {
    ec2: Ec2Client,
    ecs: EcsClient,
    autoscaling: AutoScalingClient,
}

impl DrainServices {
    /// Build all service clients from one context.
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            ec2: Ec2Client::from_context(ctx),
            ecs: EcsClient::from_context(ctx),
            autoscaling: AutoScalingClient::from_context(ctx),
        }
    }
}

impl DrainOperations for DrainServices {
    async fn user_data(&self, instance_id: &str) -> Result<String> {
        self.ec2.user_data(instance_id).await
    }

    async fn container_instance_pages(&self, cluster: &str) -> Result<Vec<Vec<String>>> {
        self.ecs.container_instance_pages(cluster).await
    }

    async fn describe_container_instances(
        &self,
        cluster: &str,
        arns: &[String],
    ) -> Result<Vec<ContainerInstanceSummary>> {
        self.ecs.describe_container_instances(cluster, arns).await
    }

    async fn set_draining(&self, cluster: &str, container_instance_arn: &str) -> Result<()> {
        self.ecs.set_draining(cluster, container_instance_arn).await
    }

    async fn task_pages(
        &self,
        cluster: &str,
        container_instance_arn: &str,
        desired: TaskDesiredStatus,
    ) -> Result<Vec<Vec<String>>> {
        self.ecs
            .task_pages(cluster, container_instance_arn, desired)
            .await
    }

    async fn task_statuses(&self, cluster: &str, task_arns: &[String]) -> Result<Vec<String>> {
        self.ecs.task_statuses(cluster, task_arns).await
    }

    async fn record_heartbeat(&self, detail: &LifecycleDetail) -> Result<()> {
        self.autoscaling.record_heartbeat(detail).await
    }

    async fn complete_lifecycle(&self, detail: &LifecycleDetail) -> Result<()> {
        self.autoscaling.complete_lifecycle(detail).await
    }
}
