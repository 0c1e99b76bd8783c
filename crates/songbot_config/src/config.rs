use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct SongbotConfig {
    pub discord: DiscordConfig,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub sentry: SentryConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DiscordConfig {
    // The Discord token for the bot
    pub token: String,
    // Prefix recognised for text commands
    pub command_prefix: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        DiscordConfig {
            token: String::new(),
            command_prefix: String::from("?"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    // Path of the JSON file holding the saved songs
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: String::from("songs.json"),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    // Role required to save or remove songs; unset means everyone may
    pub required_role_id: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct SentryConfig {
    pub dsn: String,
}
