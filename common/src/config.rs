use serde::Deserialize;
use std::sync::LazyLock;

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".into());
    let config_file = std::fs::read_to_string(path).expect("failed to open config file");
    serde_yaml::from_str(&config_file).expect("failed to parse config file")
});

#[derive(Deserialize)]
pub struct Config {
    pub http: Http,
    pub postgres: Postgres,
    pub auth: Auth,
    pub uploads: Uploads,
    pub loki: Loki,
}

#[derive(Deserialize)]
pub struct Http {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Postgres {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub db_name: String,
}

#[derive(Deserialize)]
pub struct Auth {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Deserialize)]
pub struct Uploads {
    pub dir: String,
}

#[derive(Deserialize)]
pub struct Loki {
    pub url: String,
}
