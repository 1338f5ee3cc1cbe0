//! ecs-drainer: Lambda entry point
//!
//! Receives EC2 terminate lifecycle action events, drains the ECS container
//! instance behind the terminating EC2 instance, and answers with the same
//! event carrying the `Wait` continuation flag for the external poller.

use aws_lambda_events::event::cloudwatch_events::CloudWatchEvent;
use ecs_drainer_events::LifecycleDetail;
use ecs_drainer_lambda::aws::{AwsContext, DrainServices};
use ecs_drainer_lambda::config::{self, Settings};
use ecs_drainer_lambda::drain;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let settings = Settings::from_env();
    config::init_tracing(&settings);

    // Clients are built once and reused across warm invocations.
    let aws = AwsContext::from_env().await;
    let services = DrainServices::from_context(&aws);
    let services_ref = &services;

    run(service_fn(move |event| async move {
        handler(services_ref, event).await
    }))
    .await
}

async fn handler(
    services: &DrainServices,
    event: LambdaEvent<CloudWatchEvent<LifecycleDetail>>,
) -> Result<CloudWatchEvent<LifecycleDetail>, Error> {
    let (event, context) = event.into_parts();

    info!(
        request_id = %context.request_id,
        event = %serde_json::to_string(&event)?,
        "Received lifecycle event"
    );

    let updated = drain::process(services, event).await?;
    Ok(updated)
}
