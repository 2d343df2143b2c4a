use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use getopts::Options;
use tokio::time::Duration;

pub const ADDR_ENV: &str = "MOODSCAPE_ADDR";
pub const DEFAULT_GEOCODER: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub address: SocketAddr,
    pub catalog: Option<PathBuf>,
    pub enable_cache: bool,
    pub cache_ttl: Duration,
    pub geocoder: String,
}

#[derive(Debug, PartialEq)]
pub enum Parsed {
    Help(String),
    Run(Args),
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: $MOODSCAPE_ADDR or 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "",
        "catalog",
        "JSON file with the event catalog [Default: bundled sample events]",
        "PATH",
    );
    opts.optflag(
        "c",
        "enable-cache",
        "Enable caching of geocoder lookups [Default: false]",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        "Time-to-live for cached lookups [Default: 3600]",
        "SECONDS",
    );
    opts.optopt(
        "g",
        "geocoder",
        "Base URL of the Nominatim geocoder [Default: https://nominatim.openstreetmap.org]",
        "URL",
    );
    opts
}

/// Parses `args` (without the program name). `env_address` is the value of
/// [`ADDR_ENV`], used when `--address` is not given.
pub fn try_parse(args: Vec<String>, env_address: Option<String>) -> Result<Parsed, String> {
    let opts = opts();

    let matches = opts.parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        return Ok(Parsed::Help(
            opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))),
        ));
    }

    let address = match (matches.opt_str("address"), env_address) {
        (Some(raw), _) => raw
            .parse()
            .map_err(|err| format!("Provided value for option 'address' is invalid: {err}"))?,
        (None, Some(raw)) => raw
            .parse()
            .map_err(|err| format!("Failed to parse `{ADDR_ENV}` environment variable: {err}"))?,
        (None, None) => SocketAddr::from(([127, 0, 0, 1], 8080)),
    };

    let cache_ttl = matches
        .opt_get_default("cache-ttl", 3600)
        .map(Duration::from_secs)
        .map_err(|err| format!("Provided value for option 'cache-ttl' is invalid: {err}"))?;

    let geocoder = matches
        .opt_str("geocoder")
        .unwrap_or_else(|| DEFAULT_GEOCODER.to_string())
        .trim_end_matches('/')
        .to_string();

    Ok(Parsed::Run(Args {
        address,
        catalog: matches.opt_str("catalog").map(PathBuf::from),
        enable_cache: matches.opt_present("enable-cache"),
        cache_ttl,
        geocoder,
    }))
}

pub fn parse(args: Vec<String>) -> Args {
    match try_parse(args, env::var(ADDR_ENV).ok()) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help(usage)) => {
            println!("{usage}");
            process::exit(0);
        }
        Err(message) => {
            eprintln!("{message}");
            process::exit(1);
        }
    }
}
