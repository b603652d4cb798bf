mod cli;
mod output;

use acknowlist::backfill::Backfill;
use acknowlist::bundle::DirBundle;
use acknowlist::cocoapods::{PLIST_EXTENSION, PlistDecoder};
use acknowlist::config::Config;
use acknowlist::decoder::AcknowDecoder;
use acknowlist::swift::PackageDecoder;
use acknowlist::{AcknowList, resolver};
use clap::Parser;
use cli::{Cli, Command};
use output::{ListResult, ShowResult};
use std::error::Error;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let Cli {
        command,
        json,
        verbose,
        locale,
    } = Cli::parse();

    init_logging(verbose);

    let result = match command {
        Some(Command::List { bundle, plists }) => {
            load_config(locale).and_then(|config| run_list(&bundle, &plists, &config, json))
        }
        Some(Command::Show {
            title,
            bundle,
            plists,
            fetch,
        }) => load_config(locale)
            .and_then(|config| run_show(&title, &bundle, &plists, fetch, &config, json)),
        Some(Command::Decode { file }) => run_decode(&file, json),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(locale: Option<String>) -> Result<Config, Box<dyn Error>> {
    let mut config = Config::load()?;
    if locale.is_some() {
        config.locale = locale;
    }
    Ok(config)
}

/// Resolve the bundle's sources into the list a UI would show
fn load_list(bundle: &Path, plists: &[String], config: &Config) -> Result<AcknowList, Box<dyn Error>> {
    let bundle = DirBundle::open(bundle)?;
    tracing::debug!("Reading acknowledgements from {}", bundle.root().display());

    let list = if plists.is_empty() {
        resolver::default_acknowledgements(&bundle, config)
    } else {
        let names: Vec<&str> = plists.iter().map(String::as_str).collect();
        resolver::load_named(&bundle, &names)
    };

    Ok(resolver::presentable(list.unwrap_or_default(), config))
}

fn run_list(
    bundle: &Path,
    plists: &[String],
    config: &Config,
    json_output: bool,
) -> Result<(), Box<dyn Error>> {
    let list = load_list(bundle, plists, config)?;

    if json_output {
        output::print_json(&ListResult::new(&list));
    } else {
        output::print_list(&list);
    }
    Ok(())
}

fn run_show(
    title: &str,
    bundle: &Path,
    plists: &[String],
    fetch: bool,
    config: &Config,
    json_output: bool,
) -> Result<(), Box<dyn Error>> {
    let mut list = load_list(bundle, plists, config)?;
    let index = list
        .position(title)
        .ok_or_else(|| format!("No acknowledgement titled '{}'", title))?;

    let mut fetched = false;
    let mut warning = None;

    if fetch {
        let mut backfill = Backfill::default();
        if backfill.spawn(index, &list.acknowledgements[index]).is_some()
            && let Some(completion) = backfill.recv()
        {
            match &completion.result {
                Ok(_) => {
                    list = completion.apply(list);
                    fetched = true;
                }
                Err(err) => {
                    warning = Some(format!(
                        "Could not fetch license ({}). Open {} instead.",
                        err, completion.repository
                    ));
                }
            }
        }
    }

    let acknow = &list.acknowledgements[index];
    if json_output {
        output::print_json(&ShowResult {
            acknow,
            fetched,
            warning,
        });
    } else {
        if let Some(warning) = &warning {
            eprintln!("Warning: {}", warning);
        }
        output::print_acknow(acknow);
    }
    Ok(())
}

fn run_decode(file: &Path, json_output: bool) -> Result<(), Box<dyn Error>> {
    let bytes =
        std::fs::read(file).map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;

    let is_plist = file.extension().and_then(|ext| ext.to_str()) == Some(PLIST_EXTENSION);
    let list = if is_plist {
        PlistDecoder.decode(&bytes)?
    } else {
        PackageDecoder.decode(&bytes)?
    };

    if json_output {
        output::print_json(&ListResult::new(&list));
    } else {
        output::print_list(&list);
    }
    Ok(())
}
