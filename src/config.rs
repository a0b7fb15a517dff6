const DEFAULT_DATABASE_URL: &str = "todoApplication.db";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Reads `DATABASE_URL`, `HOST` and `PORT`, loading a `.env` file first if one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        let port = match dotenvy::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(port = %raw, "PORT is not a valid port number, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => defaults.port,
        };
        Self {
            database_url: dotenvy::var("DATABASE_URL").unwrap_or(defaults.database_url),
            host: dotenvy::var("HOST").unwrap_or(defaults.host),
            port,
        }
    }

    pub fn new(database_url: String, host: String, port: u16) -> Self {
        Self {
            database_url,
            host,
            port,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_database_file() {
        let config = Config::default();
        assert_eq!(config.database_url, "todoApplication.db");
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_new_keeps_explicit_values() {
        let config = Config::new(":memory:".to_string(), "0.0.0.0".to_string(), 8080);
        assert_eq!(config.database_url, ":memory:");
        assert_eq!(config.address(), "0.0.0.0:8080");
    }
}
