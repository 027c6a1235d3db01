use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use xero_reports::{
    cli,
    config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_TOKEN_FILE},
    oauth::{self, AuthClient, CallbackServer},
    APIResult,
};

/// Runs the browser OAuth2 flow once and stores the token for the report tools.
#[derive(Parser)]
#[command(name = "xero-connect", version, about = "Authorize with Xero and save the OAuth2 token")]
struct Cli {
    /// YAML file with CLIENT_ID, CLIENT_SECRET, REDIRECT_URI and optional SCOPE
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Where to write the token
    #[arg(long, default_value = DEFAULT_TOKEN_FILE)]
    token_file: PathBuf,

    /// Only print the authorization URL
    #[arg(long)]
    no_browser: bool,
}

fn main() -> ExitCode {
    cli::init_logging();
    let args = Cli::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            log::debug!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> APIResult<()> {
    let config = Config::load(&args.config)?;
    if config.is_placeholder() {
        println!(
            "Please update {} with your actual CLIENT_ID and CLIENT_SECRET.",
            args.config.display()
        );
        return Ok(());
    }

    let auth = config.auth_client()?;
    // Bound before the browser opens so the redirect cannot arrive first.
    let server = CallbackServer::bind(auth.redirect_uri())?;
    let state = AuthClient::new_state();
    let url = auth.authorization_url(&state)?;

    println!("\nOpening browser to: {url}");
    println!("Waiting for callback on {} ...", auth.redirect_uri());
    if !args.no_browser {
        oauth::open_in_browser(url.as_str());
    }

    let token = auth.authorize(&server, &state, &args.token_file, &oauth::agent())?;
    println!("Token saved to {}", args.token_file.display());
    if let Some(scope) = token.scope() {
        println!("Granted scope: {scope}");
    }
    Ok(())
}
