use once_cell::sync::Lazy;
use std::env;
use std::net::SocketAddr;
use std::path::Path;

const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

pub struct Config {
    server_addr: SocketAddr,
    database_url: String,
    database_max_connections: u32,
    log_otel_stdout: bool,
}

impl Config {
    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    pub fn log_otel_stdout(&self) -> bool {
        self.log_otel_stdout
    }
}

/// Loads an alternative env file. Must run before `CONFIG` is first touched,
/// variables already present in the environment win.
pub fn load_env_file(path: &Path) -> Result<(), dotenv::Error> {
    dotenv::from_path(path)
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv::dotenv().ok();

    let server_addr = env::var("SERVER_ADDR")
        .unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_owned())
        .parse()
        .expect("SERVER_ADDR must be a socket address");
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());
    let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .map(|v| v.parse().expect("DATABASE_MAX_CONNECTIONS must be a number"))
        .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS);
    let log_otel_stdout = env::var("LOG_OTEL_STDOUT")
        .map(|v| v.parse().expect("LOG_OTEL_STDOUT must be true or false"))
        .unwrap_or(false);

    if database_max_connections == 0 {
        panic!("DATABASE_MAX_CONNECTIONS must be at least 1");
    }

    Config {
        server_addr,
        database_url,
        database_max_connections,
        log_otel_stdout,
    }
});
