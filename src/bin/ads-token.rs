//! Prints a fresh Google Ads API access token.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use ads_credentials::{CredentialResolver, config};
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: ads-token [-c|--config <PATH>] [--env] [--timeout <SECS>] [--header]

Resolves OAuth2 credentials from google-ads.yaml (or GOOGLE_ADS_* environment
variables with --env) and prints an access token.

options:
  -c, --config <PATH>  configuration file (default: $GOOGLE_ADS_CONFIGURATION_FILE_PATH
                       or ~/google-ads.yaml)
      --env            read configuration from the environment instead of a file
      --timeout <SECS> token endpoint timeout
      --header         print the full Authorization header
  -h, --help           show this help";

struct Args {
    config: Option<PathBuf>,
    from_env: bool,
    timeout: Option<u64>,
    header: bool,
}

impl Args {
    fn parse(args: Vec<OsString>) -> Result<Option<Self>, pico_args::Error> {
        let mut pargs = pico_args::Arguments::from_vec(args);
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Self {
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            from_env: pargs.contains("--env"),
            timeout: pargs.opt_value_from_str("--timeout")?,
            header: pargs.contains("--header"),
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            tracing::warn!(?remaining, "unused arguments left");
        }
        Ok(Some(args))
    }
}

enum Failure {
    Usage(pico_args::Error),
    Run(ads_credentials::Error),
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Usage(e) => write!(f, "error: {e}\n\n{USAGE}"),
            Failure::Run(e) => write!(f, "error: {e}"),
        }
    }
}

impl Failure {
    /// 2 for bad command lines, 1 for everything else.
    fn exit_status(&self) -> u8 {
        match self {
            Failure::Usage(_) => 2,
            Failure::Run(_) => 1,
        }
    }
}

async fn run(args: Args) -> ads_credentials::Result<String> {
    let config = if args.from_env {
        config::load_from_env()?
    } else {
        config::load_from_storage(args.config.as_deref()).await?
    };

    let mut resolver = CredentialResolver::new();
    if let Some(secs) = args.timeout {
        resolver = resolver.timeout(Duration::from_secs(secs));
    }

    let credential = resolver.resolve(&config).await?;
    if args.header {
        let (name, value) = credential.authorization_header()?;
        return Ok(format!("{name}: {value}"));
    }

    credential
        .access_token()
        .map(|token| token.expose_secret().to_string())
        .ok_or_else(|| ads_credentials::Error::auth("token endpoint returned no access token"))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::parse(std::env::args_os().skip(1).collect()) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let failure = Failure::Usage(e);
            eprintln!("{failure}");
            return ExitCode::from(failure.exit_status());
        }
    };

    match run(args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let failure = Failure::Run(e);
            eprintln!("{failure}");
            ExitCode::from(failure.exit_status())
        }
    }
}
