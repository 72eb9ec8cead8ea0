use anyhow::{anyhow, Result};
use std::{env, net::IpAddr, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub locations_file: PathBuf,
    pub bind_addr: IpAddr,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let locations_file = env::var("HOURS_LOCATIONS_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| "locations.json".to_string());

        let bind_str = env::var("HOURS_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let bind_addr = bind_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HOURS_BIND_ADDR '{}'", bind_str))?;

        let port_str = env::var("HOURS_HTTP_PORT").unwrap_or_else(|_| "7878".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HOURS_HTTP_PORT '{}'", port_str))?;

        Ok(Config {
            locations_file: PathBuf::from(locations_file),
            bind_addr,
            http_port,
        })
    }
}
