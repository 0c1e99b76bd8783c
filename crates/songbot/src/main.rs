use poise::serenity_prelude as serenity;
use songbot_config::{self, config::SongbotConfig};
use songbot_core::{RoleGate, SongStore};
use tracing::{error, info, warn, Level};
use tracing_subscriber::{filter, prelude::*};

mod buttons;
mod commands;
mod dispatch;
mod handlers;
mod utils;

pub struct Data {
    config: &'static SongbotConfig,
    store: SongStore,
    gate: RoleGate,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

async fn on_ready(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    framework: &poise::Framework<Data, Error>,
    store: SongStore,
) -> Result<Data, Error> {
    info!("Logged in as {}", ready.user.name);
    let config = songbot_config::get_config();

    // Guild-scoped registration is instant; keep the global set empty to avoid duplicates
    if let Err(e) = serenity::Command::set_global_commands(&ctx.http, vec![]).await {
        warn!("Failed to clear global commands: {}", e);
    }
    for g in &ready.guilds {
        let gid = g.id;
        if let Err(e) =
            poise::builtins::register_in_guild(ctx, &framework.options().commands, gid).await
        {
            warn!("Failed to register commands in guild {}: {}", gid, e);
        }
    }

    let gate = RoleGate::from_config(config.auth.required_role_id);
    match gate.required() {
        Some(role) => info!("Song changes require role {}", role),
        None => info!("Song changes are open to everyone"),
    }

    Ok(Data {
        config,
        store,
        gate,
    })
}

async fn bot_entrypoint(config: &'static SongbotConfig) -> Result<(), Error> {
    let store = SongStore::new(&config.store.path);
    info!("Using song list at {}", store.path().display());
    // One-time upgrade of the old name -> link map
    store.migrate_legacy().await?;

    let commands = vec![
        commands::register::register_commands(),
        commands::meta::help(),
        commands::songs::save(),
        commands::songs::list(),
        commands::songs::search(),
        commands::songs::remove(),
        commands::songs::pick(),
    ];

    let options = poise::FrameworkOptions {
        commands,
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(config.discord.command_prefix.clone()),
            execute_self_messages: false,
            execute_untracked_edits: true,
            mention_as_prefix: false,
            ..Default::default()
        },
        event_handler: |ctx, event, framework, data| {
            Box::pin(handlers::handler(ctx, event, framework, data))
        },
        on_error: |error| Box::pin(handlers::error_handler(error)),
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .setup(move |ctx, ready, framework| Box::pin(on_ready(ctx, ready, framework, store)))
        .options(options)
        .build();

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(config.discord.token.as_str(), intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

fn main() -> Result<(), Error> {
    // Logging first so config loading is visible; the sentry layer picks up
    // the client once `sentry::init` has run
    let stdout_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_filter(filter::LevelFilter::from(Level::INFO));

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(sentry_tracing::layer())
        .init();

    let cfg_path = std::env::var(songbot_config::CONFIG_FILE_ENV)
        .unwrap_or(String::from(songbot_config::DEFAULT_CONFIG_FILE));
    info!("Loading configuration from: {}", cfg_path);
    let config = songbot_config::load_config(&cfg_path)?;

    if config.discord.token.is_empty() {
        return Err("Discord token is not set (DISCORD_TOKEN or discord.token)".into());
    }

    if config.sentry.dsn.is_empty() {
        warn!("Sentry initialized with empty DSN - will be disabled")
    }

    let _guard = sentry::init((
        config.sentry.dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let result = bot_entrypoint(config).await;
            if let Err(e) = &result {
                error!("Bot stopped: {}", e);
            }
            result
        })
}
