// CLI module for menuscan

use clap::Parser;

/// menuscan - menu photo nutrition analysis service
#[derive(Parser, Debug)]
#[command(name = "menuscan", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.menuscan/config.toml if present)
    #[arg(long, short)]
    pub config: Option<String>,

    /// Address to bind, overrides server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides server.port
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Print the sample analysis as JSON and exit
    #[arg(long)]
    pub sample: bool,
}

impl Args {
    /// Apply flag overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut crate::config::AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["menuscan", "--port", "9090", "--host", "0.0.0.0"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::parse_from(["menuscan"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.port, 5000);
        assert!(!args.sample);
    }
}
