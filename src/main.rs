//! Component demo.
//!
//! Posts a message with a row of buttons and a language select to
//! `DEMO_CHANNEL_ID`, fetches it back, reports what was decoded, then
//! disables every component.

use std::process::ExitCode;

use hello_components::prelude::*;
use tracing::{error, info, warn};

fn demo_components() -> Result<Vec<Component>, ValidationError> {
    Ok(vec![
        button(ButtonStyle::Success, "Ship it", "demo_ship")?,
        button(ButtonStyle::Secondary, "Not yet", "demo_wait")?,
        link_button("Docs", "https://discord.com/developers/docs/interactions/message-components")?,
        SelectBuilder::new()
            .custom_id("demo_language")
            .placeholder("Favourite language")
            .option(SelectOption::new("Rust", "rust").description("fearless"))
            .option(SelectOption::new("Go", "go"))
            .option(SelectOption::new("Zig", "zig"))
            .build()?
            .into(),
    ])
}

async fn run(channel: &dyn ComponentAwareChannel) -> Result<()> {
    let sent = channel
        .send_components("Pick something:".to_string(), demo_components()?.into())
        .await?;
    info!(message_id = %sent.id(), rows = sent.components().rows().len(), "sent component message");

    let fetched = channel.fetch_message(sent.id()).await?;
    info!(
        author = %fetched.message().author.tag(),
        created_at = ?fetched.message().created_at(),
        sent_at = ?fetched.message().sent_at(),
        has_components = fetched.message().has_components(),
        "fetched message back"
    );
    for component in fetched.components().components() {
        info!(
            kind = ?component.kind(),
            custom_id = component.custom_id().unwrap_or("<link>"),
            disabled = component.is_disabled(),
            "decoded component"
        );
    }

    match fetched.disable_all().await? {
        Some(edited) => info!(
            disabled = edited.components().components().all(Component::is_disabled),
            "disabled all components"
        ),
        None => warn!("message is ephemeral, nothing to disable"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialise tracing (respects RUST_LOG env, defaults to info).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let channel_id: Id<ChannelMarker> = match std::env::var("DEMO_CHANNEL_ID")
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
    {
        Some(id) => id,
        None => {
            error!("DEMO_CHANNEL_ID environment variable not set or not a snowflake");
            return ExitCode::FAILURE;
        }
    };

    let client = InteractionClient::from_config(config);
    let channel = ChannelHandle::new(client, channel_id);

    match run(&channel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "demo failed");
            ExitCode::FAILURE
        }
    }
}
