use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub directory_service_url: String,
    pub localization_service_url: String,
    pub messages_api_url: String,
    pub notification_manager_url: String,

    pub server_port: u16,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|_| anyhow!("Invalid or missing environmental variable"))?;
        Ok(config)
    }
}
