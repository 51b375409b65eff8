#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use buddy_up::core::workflow::{resolve_group_for_run, save_group_for_run};
#[cfg(feature = "lambda")]
use buddy_up::domain::model::Report;
#[cfg(feature = "lambda")]
use buddy_up::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use buddy_up::{BuddyEngine, BuddyError, LambdaConfig, RosterLoader, S3GroupStore, SlackClient};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Slash command or shortcut with a channel already chosen.
    Command,
    /// Workflow step configuration: remember the channel for the workflow.
    WorkflowSave,
    /// Scheduled workflow run: pair the remembered channel.
    WorkflowExecute,
}

#[cfg(feature = "lambda")]
#[derive(Debug, Deserialize)]
pub struct Request {
    pub trigger: Trigger,
    pub channel: Option<String>,
    pub workflow_id: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Debug, Default, Serialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
    pub channel: Option<String>,
    pub pairs: usize,
    pub unpaired: Option<String>,
}

#[cfg(feature = "lambda")]
fn required<'a>(field: &str, value: &'a Option<String>) -> buddy_up::Result<&'a str> {
    buddy_up::utils::validation::validate_required_field(field, value).map(String::as_str)
}

#[cfg(feature = "lambda")]
async fn dispatch(request: Request) -> buddy_up::Result<Response> {
    let config = LambdaConfig::from_env()?;
    config.validate()?;

    // 建立 AWS 配置和 S3 客戶端
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .region(Region::new(config.s3_region.clone()))
        .force_path_style(true)
        .build();
    let store = S3GroupStore::new(
        S3Client::from_conf(s3_config),
        config.group_store_bucket.clone(),
        config.group_store_prefix.clone(),
    );

    let group_id = match request.trigger {
        Trigger::WorkflowSave => {
            let run_id = required("workflow_id", &request.workflow_id)?;
            let channel = required("channel", &request.channel)?;
            save_group_for_run(&store, run_id, channel).await?;
            return Ok(Response {
                success: true,
                message: "Saved Workflow + Channel Link".to_string(),
                channel: Some(channel.to_string()),
                ..Default::default()
            });
        }
        Trigger::WorkflowExecute => {
            let run_id = required("workflow_id", &request.workflow_id)?;
            resolve_group_for_run(&store, run_id).await?
        }
        Trigger::Command => required("channel", &request.channel)?.to_string(),
    };

    let slack = SlackClient::from_config(&config)?;
    let engine = BuddyEngine::new(RosterLoader::from_config(slack.clone(), &config), slack);
    let Report { pairing, .. } = engine.run(&group_id).await?;

    Ok(Response {
        success: true,
        message: "Matched Pairs".to_string(),
        channel: Some(group_id),
        pairs: pairing.pairs.len(),
        unpaired: pairing.leftover.map(|p| p.id),
    })
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Buddy up invoked: {:?}", event.payload);

    // 失敗只記錄給維運，不回傳錯誤給呼叫端
    let response = dispatch(event.payload).await.unwrap_or_else(|e: BuddyError| {
        tracing::error!(
            "❌ Buddy up failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        Response {
            success: false,
            message: e.user_friendly_message(),
            ..Default::default()
        }
    });

    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
