use std::env;

/// Application settings gathered from the environment (`.env` supported via
/// dotenvy). `DATABASE_URL` is the only required value.
#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub seed_on_startup: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenvy::dotenv().ok();

        Ok(Settings {
            database_url: env::var("DATABASE_URL")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            seed_on_startup: env::var("SEED_ON_STARTUP")
                .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
        })
    }
}
