use crate::buttons::SongButton;
use crate::utils::command_block;
use crate::{Data, Error};
use poise::builtins::on_error as poise_on_error;
use poise::serenity_prelude as serenity;
use poise::FrameworkError;
use tracing::{info, warn};

pub async fn handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::InteractionCreate {
            interaction: serenity::Interaction::Component(component),
        } => {
            if let Some((kind, fingerprint)) = SongButton::parse(&component.data.custom_id) {
                handle_song_button(ctx, data, component, kind, fingerprint).await?;
            }
        }
        serenity::FullEvent::GuildCreate { guild, .. } => {
            info!("Joined Guild {}: {}", guild.id, guild.name);
        }
        _ => {}
    }

    Ok(())
}

async fn handle_song_button(
    ctx: &serenity::Context,
    data: &Data,
    component: &serenity::ComponentInteraction,
    kind: SongButton,
    fingerprint: &str,
) -> Result<(), Error> {
    // The list may have changed since the buttons were sent
    let Some(record) = data.store.by_fingerprint(fingerprint).await else {
        component
            .create_response(ctx, ephemeral("Error: Not found."))
            .await?;
        return Ok(());
    };

    component
        .create_response(ctx, ephemeral(command_block(&record)))
        .await?;

    if kind == SongButton::Load {
        let dm = serenity::CreateMessage::new().content(format!(
            "Command for **{}**:\n`{}`",
            record.name, record.command
        ));
        if let Err(e) = component.user.direct_message(ctx, dm).await {
            warn!("Could not DM {}: {}", component.user.name, e);
        }
    }

    Ok(())
}

fn ephemeral(content: impl Into<String>) -> serenity::CreateInteractionResponse {
    serenity::CreateInteractionResponse::Message(
        serenity::CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

pub async fn error_handler<U, E: std::fmt::Display + std::fmt::Debug>(
    error: FrameworkError<'_, U, E>,
) {
    if let Err(e) = poise_on_error(error).await {
        tracing::error!("Error while handling error: {}", e);
    }
}
