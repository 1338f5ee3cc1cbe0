//! ECS container instance and task state

use anyhow::{Context, Result};
use aws_sdk_ecs::Client;
use aws_sdk_ecs::types::{ContainerInstanceStatus, DesiredStatus};
use tracing::{debug, info};

use super::context::AwsContext;

/// Actual status reported by a task that is still running.
pub const TASK_STATUS_RUNNING: &str = "RUNNING";

/// Desired-status filter for task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskDesiredStatus {
    Running,
    Stopped,
}

impl From<TaskDesiredStatus> for DesiredStatus {
    fn from(status: TaskDesiredStatus) -> Self {
        match status {
            TaskDesiredStatus::Running => DesiredStatus::Running,
            TaskDesiredStatus::Stopped => DesiredStatus::Stopped,
        }
    }
}

/// View of a container instance, for cross-referencing by EC2 instance id.
#[derive(Debug, Clone)]
pub struct ContainerInstanceSummary {
    pub arn: String,
    pub ec2_instance_id: Option<String>,
    pub status: Option<String>,
}

impl ContainerInstanceSummary {
    /// Whether the instance is already in the DRAINING state.
    pub fn is_draining(&self) -> bool {
        self.status.as_deref() == Some(ContainerInstanceStatus::Draining.as_str())
    }
}

/// ECS client for container instance and task state.
pub struct EcsClient {
    client: Client,
}

impl EcsClient {
    /// Create an ECS client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ecs_client(),
        }
    }

    /// List all container instance ARNs in a cluster, page by page.
    ///
    /// Pages are kept separate because DescribeContainerInstances accepts at
    /// most one page's worth of ARNs per call.
    pub async fn container_instance_pages(&self, cluster: &str) -> Result<Vec<Vec<String>>> {
        let mut pages = Vec::new();

        let mut stream = self
            .client
            .list_container_instances()
            .cluster(cluster)
            .into_paginator()
            .send();

        while let Some(page) = stream.next().await {
            let page = page.context("Failed to list container instances")?;
            let arns = page.container_instance_arns().to_vec();
            if !arns.is_empty() {
                pages.push(arns);
            }
        }

        debug!(cluster = %cluster, pages = pages.len(), "Listed container instances");

        Ok(pages)
    }

    /// Describe one page of container instances.
    pub async fn describe_container_instances(
        &self,
        cluster: &str,
        arns: &[String],
    ) -> Result<Vec<ContainerInstanceSummary>> {
        let output = self
            .client
            .describe_container_instances()
            .cluster(cluster)
            .set_container_instances(Some(arns.to_vec()))
            .send()
            .await
            .context("Failed to describe container instances")?;

        Ok(output
            .container_instances()
            .iter()
            .map(|ci| ContainerInstanceSummary {
                arn: ci.container_instance_arn().unwrap_or_default().to_string(),
                ec2_instance_id: ci.ec2_instance_id().map(str::to_string),
                status: ci.status().map(str::to_string),
            })
            .collect())
    }

    /// Put a container instance into DRAINING.
    pub async fn set_draining(&self, cluster: &str, container_instance_arn: &str) -> Result<()> {
        info!(
            cluster = %cluster,
            container_instance = %container_instance_arn,
            "Draining container instance"
        );

        self.client
            .update_container_instances_state()
            .cluster(cluster)
            .container_instances(container_instance_arn)
            .status(ContainerInstanceStatus::Draining)
            .send()
            .await
            .context("Failed to set container instance state to DRAINING")?;

        Ok(())
    }

    /// List task ARNs on a container instance by desired status, page by page.
    pub async fn task_pages(
        &self,
        cluster: &str,
        container_instance_arn: &str,
        desired: TaskDesiredStatus,
    ) -> Result<Vec<Vec<String>>> {
        let mut pages = Vec::new();

        let mut stream = self
            .client
            .list_tasks()
            .cluster(cluster)
            .container_instance(container_instance_arn)
            .desired_status(desired.into())
            .into_paginator()
            .send();

        while let Some(page) = stream.next().await {
            let page = page.context("Failed to list tasks")?;
            let arns = page.task_arns().to_vec();
            if !arns.is_empty() {
                pages.push(arns);
            }
        }

        Ok(pages)
    }

    /// Last-known status of each task in a page.
    pub async fn task_statuses(&self, cluster: &str, task_arns: &[String]) -> Result<Vec<String>> {
        let output = self
            .client
            .describe_tasks()
            .cluster(cluster)
            .set_tasks(Some(task_arns.to_vec()))
            .send()
            .await
            .context("Failed to describe tasks")?;

        Ok(output
            .tasks()
            .iter()
            .filter_map(|task| task.last_status().map(str::to_string))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desired_status_maps_to_sdk_values() {
        assert_eq!(
            DesiredStatus::from(TaskDesiredStatus::Running).as_str(),
            "RUNNING"
        );
        assert_eq!(
            DesiredStatus::from(TaskDesiredStatus::Stopped).as_str(),
            "STOPPED"
        );
    }

    #[test]
    fn draining_check_uses_instance_status() {
        let draining = ContainerInstanceSummary {
            arn: "arn:aws:ecs:us-east-1:123:container-instance/web/abc".to_string(),
            ec2_instance_id: Some("i-0123456789abcdef0".to_string()),
            status: Some("DRAINING".to_string()),
        };
        assert!(draining.is_draining());

        let active = ContainerInstanceSummary {
            status: Some("ACTIVE".to_string()),
            ..draining.clone()
        };
        assert!(!active.is_draining());

        let unknown = ContainerInstanceSummary {
            status: None,
            ..draining
        };
        assert!(!unknown.is_draining());
    }
}
