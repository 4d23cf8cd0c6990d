use std::path::PathBuf;

use envconfig::Envconfig;

/// Runtime knobs, read from the environment (and a `.env` file if present).
#[derive(Envconfig, Debug, Clone, PartialEq)]
pub struct MarketConfig {
    /// Request queue depth per collection actor.
    #[envconfig(from = "MARKET_CHANNEL_BUFFER", default = "32")]
    pub channel_buffer: usize,

    /// Change events a slow subscriber may fall behind before it lags.
    #[envconfig(from = "MARKET_CHANGE_BUFFER", default = "64")]
    pub change_buffer: usize,

    #[envconfig(from = "MARKET_PREFERENCES_PATH", default = "market-preferences.json")]
    pub preferences_path: PathBuf,

    #[envconfig(from = "MARKET_BCRYPT_COST", default = "10")]
    pub bcrypt_cost: u32,
}

impl MarketConfig {
    pub fn load() -> Result<Self, envconfig::Error> {
        dotenvy::dotenv().ok();
        Self::init_from_env()
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            change_buffer: 64,
            preferences_path: PathBuf::from("market-preferences.json"),
            bcrypt_cost: 10,
        }
    }
}
