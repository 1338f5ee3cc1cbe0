//! Drain decision procedure
//!
//! One call to [`process`] performs a full decision over a lifecycle event:
//! validate it, resolve the owning cluster from instance user data, locate
//! the container instance, ensure it is draining, then either heartbeat the
//! lifecycle hook (tasks still present) or complete it (drained). The
//! procedure never waits in-process; the external poller re-invokes it while
//! the returned detail carries `wait == true`.

use anyhow::Result;
use aws_lambda_events::event::cloudwatch_events::CloudWatchEvent;
use ecs_drainer_events::{
    DETAIL_TYPE_TERMINATE_LIFECYCLE, LIFECYCLE_TRANSITION_TERMINATING, LifecycleDetail,
};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::aws::{ContainerInstanceSummary, TASK_STATUS_RUNNING, TaskDesiredStatus};
use crate::error::DrainError;

/// `ECS_CLUSTER=...` marker the ECS agent bootstrap writes into instance
/// user data.
fn cluster_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bECS_CLUSTER=([-\w]+)").expect("static pattern is valid"))
}

/// Trait for the cloud calls the drain procedure performs.
///
/// This trait abstracts EC2, ECS, and AutoScaling access so the decision
/// logic can be unit tested without hitting real AWS.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait DrainOperations: Send + Sync {
    /// Fetch and decode an instance's user data
    async fn user_data(&self, instance_id: &str) -> Result<String>;

    /// List all container instance ARNs in a cluster, page by page
    async fn container_instance_pages(&self, cluster: &str) -> Result<Vec<Vec<String>>>;

    /// Describe one page of container instances
    async fn describe_container_instances(
        &self,
        cluster: &str,
        arns: &[String],
    ) -> Result<Vec<ContainerInstanceSummary>>;

    /// Put a container instance into DRAINING
    async fn set_draining(&self, cluster: &str, container_instance_arn: &str) -> Result<()>;

    /// List task ARNs on a container instance by desired status, page by page
    async fn task_pages(
        &self,
        cluster: &str,
        container_instance_arn: &str,
        desired: TaskDesiredStatus,
    ) -> Result<Vec<Vec<String>>>;

    /// Last-known status of each task in a page
    async fn task_statuses(&self, cluster: &str, task_arns: &[String]) -> Result<Vec<String>>;

    /// Extend the lifecycle hook timeout
    async fn record_heartbeat(&self, detail: &LifecycleDetail) -> Result<()>;

    /// Release the lifecycle hook with a CONTINUE result
    async fn complete_lifecycle(&self, detail: &LifecycleDetail) -> Result<()>;
}

/// Run one drain decision over a lifecycle event.
///
/// Returns the event with `detail.wait` set: `true` means tasks are still
/// draining and the hook was heartbeated, `false` means the hook was
/// completed and the poller can stop.
pub async fn process<O: DrainOperations>(
    ops: &O,
    mut event: CloudWatchEvent<LifecycleDetail>,
) -> Result<CloudWatchEvent<LifecycleDetail>, DrainError> {
    let detail = validate(&event)?.clone();

    let cluster = resolve_cluster(ops, &detail.ec2_instance_id).await?;
    let container_instance = find_container_instance(ops, &cluster, &detail.ec2_instance_id).await?;

    if container_instance.is_draining() {
        debug!(
            container_instance = %container_instance.arn,
            "Container instance already draining"
        );
    } else {
        ops.set_draining(&cluster, &container_instance.arn).await?;
    }

    let wait = tasks_remain(ops, &cluster, &container_instance.arn).await?;
    if wait {
        ops.record_heartbeat(&detail).await?;
    } else {
        ops.complete_lifecycle(&detail).await?;
    }

    info!(
        cluster = %cluster,
        container_instance = %container_instance.arn,
        wait,
        "Drain step finished"
    );

    if let Some(detail) = event.detail.as_mut() {
        detail.wait = wait;
    }
    Ok(event)
}

/// Check the event category and transition before touching any AWS API.
fn validate(event: &CloudWatchEvent<LifecycleDetail>) -> Result<&LifecycleDetail, DrainError> {
    match event.detail_type.as_deref() {
        Some(DETAIL_TYPE_TERMINATE_LIFECYCLE) => {}
        other => {
            return Err(DrainError::validation(format!(
                "`detail-type` is {other:?}, not {DETAIL_TYPE_TERMINATE_LIFECYCLE:?}"
            )));
        }
    }

    let detail = event
        .detail
        .as_ref()
        .ok_or_else(|| DrainError::validation("event has no `detail` payload"))?;

    if !detail.is_terminating() {
        return Err(DrainError::validation(format!(
            "`LifecycleTransition` is {:?}, not {LIFECYCLE_TRANSITION_TERMINATING:?}",
            detail.lifecycle_transition
        )));
    }

    Ok(detail)
}

/// Extract the cluster name from instance user data.
fn extract_cluster_name(user_data: &str) -> Option<&str> {
    cluster_marker()
        .captures(user_data)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolve the owning cluster by reading the instance's boot configuration.
async fn resolve_cluster<O: DrainOperations>(
    ops: &O,
    instance_id: &str,
) -> Result<String, DrainError> {
    let user_data = ops.user_data(instance_id).await?;

    let cluster = extract_cluster_name(&user_data).ok_or_else(|| {
        DrainError::not_found(
            "cluster marker",
            format!("user data of {instance_id} has no `ECS_CLUSTER=...`"),
        )
    })?;

    debug!(instance_id = %instance_id, cluster = %cluster, "Resolved owning cluster");

    Ok(cluster.to_string())
}

/// Locate the container instance backed by the given EC2 instance.
async fn find_container_instance<O: DrainOperations>(
    ops: &O,
    cluster: &str,
    instance_id: &str,
) -> Result<ContainerInstanceSummary, DrainError> {
    for page in ops.container_instance_pages(cluster).await? {
        let summaries = ops.describe_container_instances(cluster, &page).await?;
        if let Some(found) = summaries
            .into_iter()
            .find(|ci| ci.ec2_instance_id.as_deref() == Some(instance_id))
        {
            return Ok(found);
        }
    }

    Err(DrainError::not_found(
        "container instance",
        format!("cluster {cluster} has no container instance for {instance_id}"),
    ))
}

/// Whether the container instance still has tasks that are not fully stopped.
///
/// A task listed under STOPPED desired status may still describe as RUNNING
/// while ECS converges; those count as remaining work.
async fn tasks_remain<O: DrainOperations>(
    ops: &O,
    cluster: &str,
    container_instance_arn: &str,
) -> Result<bool, DrainError> {
    let running = ops
        .task_pages(cluster, container_instance_arn, TaskDesiredStatus::Running)
        .await?;
    if running.iter().any(|page| !page.is_empty()) {
        return Ok(true);
    }

    let stopped = ops
        .task_pages(cluster, container_instance_arn, TaskDesiredStatus::Stopped)
        .await?;
    for page in stopped {
        let statuses = ops.task_statuses(cluster, &page).await?;
        if statuses.iter().any(|status| status == TASK_STATUS_RUNNING) {
            return Ok(true);
        }
    }

    Ok(false)
}
