use crate::{Context, Error};

/// Show the available commands
#[poise::command(prefix_command, slash_command, rename = "help")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to show help for"]
    #[rest]
    command: Option<String>,
) -> Result<(), Error> {
    let prefix = &ctx.data().config.discord.command_prefix;
    let bottom = format!(
        "Quote song names with spaces when saving, e.g. {prefix}save \"Lofi Beats\" /play lofi beats"
    );
    let config = poise::builtins::HelpConfiguration {
        extra_text_at_bottom: &bottom,
        ephemeral: true,
        ..Default::default()
    };
    poise::builtins::help(ctx, command.as_deref(), config).await?;
    Ok(())
}
