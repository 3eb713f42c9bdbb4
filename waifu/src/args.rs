use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Anime voice synthesis server
#[derive(Debug, Parser)]
#[command(name = "waifu", about = "Turns text into expressive anime character speech")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "waifu.toml", env = "WAIFU_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "WAIFU_LISTEN")]
    pub listen: Option<SocketAddr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["waifu"]).unwrap();

        assert_eq!(args.config, PathBuf::from("waifu.toml"));
        assert!(args.listen.is_none());
    }

    #[test]
    fn listen_override() {
        let args = Args::try_parse_from(["waifu", "-c", "voices.toml", "--listen", "127.0.0.1:7000"]).unwrap();

        assert_eq!(args.config, PathBuf::from("voices.toml"));
        assert_eq!(args.listen, Some("127.0.0.1:7000".parse().unwrap()));
    }

    #[test]
    fn rejects_bad_address() {
        assert!(Args::try_parse_from(["waifu", "--listen", "localhost"]).is_err());
    }
}
