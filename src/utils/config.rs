use std::env;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub environment: String,
    pub confirm_delete: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let confirm_delete = env::var("CART_CONFIRM_DELETE").unwrap_or("true".to_string());
        let config = Config {
            log_level: env::var("LOG_LEVEL")
                .unwrap_or("info".to_string())
                .to_lowercase(),
            environment: env::var("APP_ENV")
                .unwrap_or("development".to_string())
                .to_string(),
            confirm_delete: parse_flag("CART_CONFIRM_DELETE", &confirm_delete)?,
        };

        config.validate()?;
        tracing::debug!("Config: successfully loaded for {} environment", config.environment);
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(anyhow::anyhow!(
                "LOG_LEVEL must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn should_confirm_delete(&self) -> bool {
        self.confirm_delete
    }
}

fn parse_flag(name: &str, value: &str) -> anyhow::Result<bool> {
    value.trim().to_lowercase().parse::<bool>().map_err(|_| {
        anyhow::anyhow!("{} must be 'true' or 'false', got '{}'", name, value)
    })
}
