use std::collections::HashSet;

use crate::buttons::{self, SongButton, BUTTONS_PER_ROW};
use crate::dispatch::DISPLAY_LIMIT;
use crate::Context;
use poise::serenity_prelude as serenity;
use songbot_core::{Record, RoleId};

/// Discord's limit on an embed description.
const MAX_DESCRIPTION: usize = 4096;

/// Roles held by the invoking member; empty outside guilds.
pub async fn caller_roles(ctx: Context<'_>) -> HashSet<RoleId> {
    match ctx.author_member().await {
        Some(member) => member.roles.iter().map(|r| RoleId(r.get())).collect(),
        None => HashSet::new(),
    }
}

/// Reply with an error message
pub async fn send_err_msg(ctx: Context<'_>, title: &str, description: &str) {
    let embed = serenity::CreateEmbed::default()
        .title(title)
        .color(0xFF0000)
        .description(description);
    let _ = ctx
        .send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await;
}

/// One line per record, numbered from 1.
pub fn song_lines(records: &[Record]) -> String {
    let text = records
        .iter()
        .enumerate()
        .map(|(idx, r)| format!("**{}.** {}: `{}`", idx + 1, r.name, r.command))
        .collect::<Vec<_>>()
        .join("\n");
    buttons::clip(&text, MAX_DESCRIPTION)
}

/// Custom ids for the song buttons, one per distinct record, capped at
/// the display limit. Identical records share one button.
pub fn button_ids(records: &[Record], kind: SongButton) -> Vec<(String, &Record)> {
    let mut seen = HashSet::new();
    records
        .iter()
        .take(DISPLAY_LIMIT)
        .map(|r| (kind.custom_id(r), r))
        .filter(|(id, _)| seen.insert(id.clone()))
        .collect()
}

/// Rows of song buttons, five per row, at most five rows.
pub fn button_rows(records: &[Record], kind: SongButton) -> Vec<serenity::CreateActionRow> {
    let buttons: Vec<_> = button_ids(records, kind)
        .into_iter()
        .map(|(id, r)| {
            serenity::CreateButton::new(id)
                .label(buttons::label(&r.name))
                .style(serenity::ButtonStyle::Primary)
        })
        .collect();

    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| serenity::CreateActionRow::Buttons(chunk.to_vec()))
        .collect()
}

/// Message body handing a command to the user.
pub fn command_block(record: &Record) -> String {
    format!(
        "```\n{}\n```\nCopy the command above for **{}** and send it yourself.",
        record.command, record.name
    )
}
