use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mailapps::config::Configuration;
use mailapps::{ComposeRequest, EmailApps, Error, Provider, Result};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `config.yaml` file.
    #[clap(long, short)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// List known email apps.
    List {
        /// Only keep apps which can be opened on this device.
        #[clap(long)]
        supported: bool,
        #[clap(long)]
        json: bool,
    },
    /// Print compose URLs for a new message.
    Compose {
        /// Recipient address.
        email: String,
        #[clap(long, short)]
        subject: Option<String>,
        #[clap(long, short)]
        body: Option<String>,
        /// Email app name or scheme. Every supported app otherwise.
        #[clap(long, short)]
        provider: Option<Provider>,
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct Composed {
    provider: Provider,
    url: String,
}

fn list(apps: &EmailApps, supported: bool, json: bool) -> Result<()> {
    let providers = if supported {
        apps.supported()
    } else {
        apps.all().to_vec()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&providers)?);
    } else {
        for provider in providers {
            println!("{:<8} {}", provider.name(), provider.url_prefix());
        }
    }

    Ok(())
}

fn compose(
    apps: &EmailApps,
    request: &ComposeRequest,
    provider: Option<Provider>,
) -> Result<Vec<Composed>> {
    let composed = match provider {
        Some(provider) => {
            let url = provider.compose(request).ok_or(Error::Unavailable {
                provider: provider.name(),
            })?;
            vec![(provider, url)]
        },
        None => {
            let composed = apps.compose_supported(request);
            if composed.is_empty() {
                tracing::info!("no supported email app, falling back to default");
                let url = Provider::Default.try_compose(request)?;
                vec![(Provider::Default, url)]
            } else {
                composed
            }
        },
    };

    Ok(composed
        .into_iter()
        .map(|(provider, url)| Composed {
            provider,
            url: url.into(),
        })
        .collect())
}

fn run(args: Args, apps: &EmailApps) -> Result<()> {
    match args.cmd {
        Commands::List { supported, json } => list(apps, supported, json),
        Commands::Compose {
            email,
            subject,
            body,
            provider,
            json,
        } => {
            let request = ComposeRequest {
                email,
                subject,
                body,
            };
            let composed = compose(apps, &request, provider)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&composed)?);
            } else {
                for Composed { provider, url } in composed {
                    println!("{:<8} {url}", provider.name());
                }
            }

            Ok(())
        },
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logging depends on the configuration, so its errors go to stderr.
    let config = match Configuration::default()
        .path(args.config.clone().unwrap_or_default())
        .read()
    {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        },
    };
    if let Err(err) = mailapps::telemetry::setup_logging(&config.log) {
        eprintln!("cannot initialize logging: {err}");
    }
    tracing::debug!(name = %config.name, version = config.version(), handler = ?config.handler, "configuration loaded");

    let apps = EmailApps::with_handler(config.handler());
    match run(args, &apps) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use mailapps::InstalledSchemes;

    use super::*;

    fn urls(composed: Vec<Composed>) -> Vec<(Provider, String)> {
        composed
            .into_iter()
            .map(|Composed { provider, url }| (provider, url))
            .collect()
    }

    #[test]
    fn test_compose_every_supported_app() {
        let apps = EmailApps::new(InstalledSchemes::new(["ymail", "readdle-spark"]));
        let request = ComposeRequest::new("a@b.com").body("B");

        assert_eq!(
            urls(compose(&apps, &request, None).unwrap()),
            vec![
                (Provider::Yahoo, "ymail://mail/compose?to=a@b.com&body=B".to_string()),
                (
                    Provider::Spark,
                    "readdle-spark://compose?recipient=a@b.com&body=B".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_compose_falls_back_to_default() {
        let apps = EmailApps::new(InstalledSchemes::default());
        let request = ComposeRequest::new("a@b.com").subject("Hi");

        assert_eq!(
            urls(compose(&apps, &request, None).unwrap()),
            vec![(Provider::Default, "mailto:a@b.com?subject=Hi".to_string())]
        );
    }

    #[test]
    fn test_compose_explicit_provider() {
        // Not installed, but asked for explicitly.
        let apps = EmailApps::new(InstalledSchemes::default());
        let request = ComposeRequest::new("nobody");

        assert_eq!(
            urls(compose(&apps, &request, Some(Provider::Proton)).unwrap()),
            vec![(Provider::Proton, "protonmail://mailto:nobody".to_string())]
        );
    }

    #[test]
    fn test_compose_unavailable() {
        let apps = EmailApps::new(InstalledSchemes::default());
        let request = ComposeRequest::new("a b@c.com");

        assert!(matches!(
            compose(&apps, &request, Some(Provider::Default)),
            Err(Error::Unavailable { provider: "Mail" })
        ));
        // The fallback reports the parser error instead.
        assert!(matches!(
            compose(&apps, &request, None),
            Err(Error::InvalidCharacter { .. })
        ));
    }
}
