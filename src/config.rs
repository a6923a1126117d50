/// Fixed-width receipt layout settings for the client view.
#[derive(Debug, Clone)]
pub struct ReceiptStyle {
    pub width: usize,
    pub header: String,
    pub footer: String,
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub redis_url: String,
    /// Signs tokens and peppers password hashes. Injected into the codec and
    /// verifier at construction time — nothing reads it from the environment
    /// after startup.
    pub secret_key: String,
    /// Access token lifetime. Set via KASA_ACCESS_TTL_MIN. Default: 30.
    pub access_token_ttl_minutes: i64,
    /// Refresh token lifetime (also the session ledger TTL).
    /// Set via KASA_REFRESH_TTL_MIN. Default: 10080 (7 days).
    pub refresh_token_ttl_minutes: i64,
    pub receipt: ReceiptStyle,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let secret_key = std::env::var("KASA_SECRET_KEY")
        .unwrap_or_else(|_| "CHANGE_ME_LONG_RANDOM_SECRET".into());

    if secret_key == "CHANGE_ME_LONG_RANDOM_SECRET" {
        let env_mode = std::env::var("KASA_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default();
        if env_mode == "production" {
            anyhow::bail!(
                "KASA_SECRET_KEY is still the insecure placeholder. \
                 Set a long random secret before running in production."
            );
        }
        eprintln!("⚠️  KASA_SECRET_KEY is not set — using insecure placeholder. Set a long random secret for production.");
    }

    Ok(Config {
        port: std::env::var("KASA_PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .unwrap_or(8000),
        database_url: std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/kasa".into()),
        redis_url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
        secret_key,
        access_token_ttl_minutes: std::env::var("KASA_ACCESS_TTL_MIN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30),
        refresh_token_ttl_minutes: std::env::var("KASA_REFRESH_TTL_MIN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10080),
        receipt: ReceiptStyle {
            width: std::env::var("KASA_RECEIPT_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(40),
            header: std::env::var("KASA_RECEIPT_HEADER")
                .unwrap_or_else(|_| "ФОП Петренко І.І.".into()),
            footer: std::env::var("KASA_RECEIPT_FOOTER")
                .unwrap_or_else(|_| "Дякуємо за покупку!".into()),
        },
    })
}
