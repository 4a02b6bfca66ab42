// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub server_port: u16,
    pub rust_log: String,
    pub seed_lecturer_name: Option<String>,
    pub seed_lecturer_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2022);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let seed_lecturer_name = env::var("LECTURER_NAME").ok();
        let seed_lecturer_password = env::var("LECTURER_PASSWORD").ok();

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            server_port,
            rust_log,
            seed_lecturer_name,
            seed_lecturer_password,
        }
    }
}
