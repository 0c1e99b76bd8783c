use crate::buttons::SongButton;
use crate::dispatch::{self, Outcome};
use crate::utils::{button_rows, caller_roles, send_err_msg, song_lines};
use crate::{Context, Error};
use poise::serenity_prelude as serenity;
use tracing::info;

const COLOR: u32 = 0x5865F2;

async fn render(ctx: Context<'_>, outcome: Outcome) -> Result<(), Error> {
    let reply = match outcome {
        Outcome::Saved(record) => {
            let embed = serenity::CreateEmbed::new()
                .color(0x2ECC71)
                .author(
                    serenity::CreateEmbedAuthor::new("Song saved")
                        .icon_url(ctx.author().avatar_url().unwrap_or_default()),
                )
                .field("Name", record.name, true)
                .field("Command", format!("`{}`", record.command), true);
            poise::CreateReply::default().embed(embed)
        }
        Outcome::Removed(name) => {
            let embed = serenity::CreateEmbed::new()
                .color(0x2ECC71)
                .author(
                    serenity::CreateEmbedAuthor::new("Song removed")
                        .icon_url(ctx.author().avatar_url().unwrap_or_default()),
                )
                .description(format!("Removed **{name}**"));
            poise::CreateReply::default().embed(embed)
        }
        Outcome::Listing { shown, total } => {
            let mut embed = serenity::CreateEmbed::new()
                .title("Saved songs")
                .color(COLOR)
                .description(song_lines(&shown));
            if total > shown.len() {
                embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
                    "And {} more...",
                    total - shown.len()
                )));
            }
            poise::CreateReply::default().embed(embed)
        }
        Outcome::Matches {
            query,
            shown,
            total,
        } => {
            let mut embed = serenity::CreateEmbed::new()
                .title(format!("Results for \"{query}\""))
                .color(COLOR)
                .description(song_lines(&shown));
            embed = embed.footer(serenity::CreateEmbedFooter::new(if total > shown.len() {
                format!("Showing {} of {} matches", shown.len(), total)
            } else {
                "Press a button to load its command".to_string()
            }));
            poise::CreateReply::default()
                .embed(embed)
                .components(button_rows(&shown, SongButton::Load))
        }
        Outcome::Empty => {
            send_err_msg(ctx, "Nothing here", "No songs have been saved yet.").await;
            return Ok(());
        }
        Outcome::NoResults(query) => {
            send_err_msg(ctx, "No results", &format!("No song matches \"{query}\".")).await;
            return Ok(());
        }
        Outcome::NotFound(name) => {
            send_err_msg(ctx, "Not found", &format!("No song named \"{name}\".")).await;
            return Ok(());
        }
        Outcome::Denied => {
            info!("Denied song change for {}", ctx.author().name);
            send_err_msg(ctx, "Permission denied", "You are not allowed to change the song list.")
                .await;
            return Ok(());
        }
        Outcome::Invalid(reason) => {
            send_err_msg(ctx, "Invalid input", reason).await;
            return Ok(());
        }
    };

    ctx.send(reply).await?;
    Ok(())
}

/// Save a song. Quote names with spaces: ?save "Lofi Beats" /play lofi beats
#[poise::command(prefix_command, slash_command, rename = "save")]
pub async fn save(
    ctx: Context<'_>,
    #[description = "Song name"] name: Option<String>,
    #[description = "Playback command (default: /play <name>)"]
    #[rest]
    command: Option<String>,
) -> Result<(), Error> {
    let data = ctx.data();
    let roles = caller_roles(ctx).await;
    let outcome = dispatch::save(
        &data.store,
        data.gate,
        &roles,
        name.as_deref().unwrap_or_default(),
        command.as_deref(),
    )
    .await?;
    render(ctx, outcome).await
}

/// List saved songs
#[poise::command(prefix_command, slash_command, rename = "list")]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let outcome = dispatch::list(&ctx.data().store).await;
    render(ctx, outcome).await
}

/// Search saved songs by name
#[poise::command(prefix_command, slash_command, rename = "search")]
pub async fn search(
    ctx: Context<'_>,
    #[description = "Part of the song name"]
    #[rest]
    query: Option<String>,
) -> Result<(), Error> {
    let outcome = dispatch::search(&ctx.data().store, query.as_deref().unwrap_or_default()).await;
    render(ctx, outcome).await
}

/// Remove every saved song with this name
#[poise::command(prefix_command, slash_command, rename = "remove")]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Song name"]
    #[rest]
    name: Option<String>,
) -> Result<(), Error> {
    let data = ctx.data();
    let roles = caller_roles(ctx).await;
    let outcome = dispatch::remove(
        &data.store,
        data.gate,
        &roles,
        name.as_deref().unwrap_or_default(),
    )
    .await?;
    render(ctx, outcome).await
}

/// Pick a saved song from buttons and get its command
#[poise::command(prefix_command, slash_command, rename = "pick")]
pub async fn pick(ctx: Context<'_>) -> Result<(), Error> {
    let Outcome::Listing { shown, total } = dispatch::list(&ctx.data().store).await else {
        return render(ctx, Outcome::Empty).await;
    };

    let mut embed = serenity::CreateEmbed::new()
        .color(COLOR)
        .title("Song Selector")
        .description("Choose a track and I will prepare the command for you.");
    if total > shown.len() {
        embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
            "Showing the {} newest of {} songs",
            shown.len(),
            total
        )));
    }

    ctx.send(
        poise::CreateReply::default()
            .embed(embed)
            .components(button_rows(&shown, SongButton::Pick)),
    )
    .await?;
    Ok(())
}
