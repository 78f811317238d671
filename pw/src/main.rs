use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::debug;

use promptwild::cli::{Cli, Command};
use promptwild::config::Config;
use promptwild::{Resolver, catalog, display};

fn setup_logging(verbose: bool) -> Result<()> {
    // stdout carries results only
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

fn read_template(template: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (template, file) {
        (Some(template), _) => Ok(template),
        (None, Some(path)) => {
            fs::read_to_string(&path).context(format!("Failed to read template file: {}", path.display()))
        }
        (None, None) => read_stdin(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    debug!(data_dir = %config.data_dir.display(), "promptwild starting");

    let resolver = Resolver::from_config(&config);

    match cli.command {
        Command::Resolve {
            template,
            file,
            seed,
            count,
            report,
            strict,
        } => {
            let template = read_template(template, file)?;
            let mut incomplete = 0;
            for i in 0..count {
                let resolution = match seed {
                    Some(seed) => resolver.resolve_report_seeded(&template, seed.wrapping_add(i as u64)),
                    None => resolver.resolve_report(&template),
                };

                if report {
                    for (placeholder, reason) in &resolution.unresolved {
                        eprintln!("{} {{{}}}: {}", "unresolved".yellow(), placeholder, reason);
                    }
                }
                println!("{}", resolution.text);
                if !resolution.is_complete() {
                    incomplete += 1;
                }
            }

            if strict && incomplete > 0 {
                return Err(eyre::eyre!(
                    "{} of {} resolutions left placeholders unresolved",
                    incomplete,
                    count
                ));
            }
        }
        Command::List => {
            let wildcards = catalog::list(resolver.paths(), resolver.delimiter())?;
            if wildcards.is_empty() {
                println!("No wildcards found in {}", config.data_dir.display());
            } else {
                for wildcard in wildcards {
                    for placeholder in wildcard.placeholders() {
                        println!("{}", placeholder.cyan());
                    }
                }
            }
        }
        Command::Display { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let text = display(text);
            if text.ends_with('\n') {
                print!("{}", text);
            } else {
                println!("{}", text);
            }
        }
    }

    Ok(())
}
