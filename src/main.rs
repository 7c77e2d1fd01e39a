use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use gh_pkg_helper::{
    AuthError, DEFAULT_CALLBACK_PORT, KeyringCredentialStore, Orchestrator, Outcome, RunOptions,
    Settings, SystemBrowser, TerminalPrompter,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "gh-pkg-helper",
    version,
    about = "Authenticate npm, docker or NuGet against GitHub Packages via OAuth."
)]
struct Cli {
    /// Package manager to configure (npm, docker, nuget). Prompted for when omitted.
    #[arg(long)]
    provider: Option<String>,

    /// GitHub username, for providers that need one.
    #[arg(long)]
    user: Option<String>,

    /// GitHub organization, for providers that need one.
    #[arg(long)]
    org: Option<String>,

    /// Write user-level instead of global package-manager config.
    #[arg(long)]
    local: bool,

    /// Ignore the cached token and authorize again.
    #[arg(long)]
    force_refresh: bool,

    /// Port of the local OAuth callback listener.
    #[arg(long, env = "GH_PKG_HELPER_PORT", default_value_t = DEFAULT_CALLBACK_PORT)]
    port: u16,

    /// Seconds to wait for the browser redirect; 0 waits indefinitely.
    #[arg(long, env = "GH_PKG_HELPER_TIMEOUT_SECS", default_value_t = 300)]
    timeout_secs: u64,

    /// OAuth scope to request.
    #[arg(long, env = "GH_PKG_HELPER_SCOPE")]
    scope: Option<String>,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        let timeout = (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs));
        let settings = Settings::new()
            .with_port(self.port)
            .with_authorization_timeout(timeout);
        match &self.scope {
            Some(scope) => settings.with_scope(scope),
            None => settings,
        }
    }

    fn options(&self) -> RunOptions {
        RunOptions {
            provider: self.provider.clone(),
            user: self.user.clone(),
            org: self.org.clone(),
            local: self.local,
            force_refresh: self.force_refresh,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<Outcome, AuthError> {
    let orchestrator = Orchestrator::new(
        cli.settings(),
        Arc::new(KeyringCredentialStore::new()),
        Arc::new(TerminalPrompter),
        Arc::new(SystemBrowser),
    );
    orchestrator.run(cli.options()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(Outcome::Configured { provider }) => {
            eprintln!("Done! {provider} is set up.");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Declined) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
