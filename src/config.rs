use std::env;

/// Longest burnout look-back accepted from the environment.
pub const MAX_BURNOUT_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,

    /// Fixed seed for forecast draws; entropy-seeded when unset.
    pub forecast_seed: Option<u64>,
    pub burnout_window_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".into())
                .parse()
                .expect("DB_MAX_CONNECTIONS must be a number"),
            db_acquire_timeout_secs: env::var("DB_ACQUIRE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".into())
                .parse()
                .expect("DB_ACQUIRE_TIMEOUT_SECS must be a number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            forecast_seed: env::var("FORECAST_SEED")
                .ok()
                .filter(|s| !s.is_empty())
                .map(|s| s.parse().expect("FORECAST_SEED must be a u64")),
            burnout_window_days: parse_burnout_window(
                &env::var("BURNOUT_WINDOW_DAYS").unwrap_or_else(|_| "30".into()),
            ),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_burnout_window(raw: &str) -> i64 {
    let days: i64 = raw
        .trim()
        .parse()
        .expect("BURNOUT_WINDOW_DAYS must be a number");
    assert!(
        (1..=MAX_BURNOUT_WINDOW_DAYS).contains(&days),
        "BURNOUT_WINDOW_DAYS must be within 1-{MAX_BURNOUT_WINDOW_DAYS}"
    );
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burnout_window_parses_in_range() {
        assert_eq!(parse_burnout_window("30"), 30);
        assert_eq!(parse_burnout_window(" 7 "), 7);
        assert_eq!(parse_burnout_window("3650"), MAX_BURNOUT_WINDOW_DAYS);
    }

    #[test]
    #[should_panic(expected = "BURNOUT_WINDOW_DAYS must be a number")]
    fn test_burnout_window_rejects_garbage() {
        parse_burnout_window("thirty");
    }

    #[test]
    #[should_panic(expected = "BURNOUT_WINDOW_DAYS must be within")]
    fn test_burnout_window_rejects_huge_values() {
        parse_burnout_window("9223372036854775");
    }

    #[test]
    #[should_panic(expected = "BURNOUT_WINDOW_DAYS must be within")]
    fn test_burnout_window_rejects_zero() {
        parse_burnout_window("0");
    }
}
