//! `mosaic-catalog`: list and render component stories.

use anyhow::Context;
use clap::Parser;
use mosaic::catalog::{Catalog, Story};
use std::io::{self, IsTerminal, Write};

mod cli;
mod logging;

use crate::cli::{Cli, Command};
use crate::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = LogConfig::from_verbosity(cli.verbose, cli.quiet)
        .with_format(cli.log_format)
        .with_ansi(!cli.no_color && io::stderr().is_terminal());
    init_logging(&config).context("failed to initialize logging")?;

    let catalog = Catalog::builtin();
    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::List { json } => {
            tracing::info!(stories = catalog.stories().len(), "listing stories");
            if json {
                serde_json::to_writer_pretty(&mut stdout, &catalog.entries())?;
                writeln!(stdout)?;
            } else {
                for component in catalog.components() {
                    let names: Vec<String> = catalog
                        .stories_for(component)
                        .into_iter()
                        .map(story_label)
                        .collect();
                    writeln!(stdout, "{component}: {}", names.join(", "))?;
                }
            }
        }
        Command::Render { component, story } => {
            let html = catalog
                .render(&component, story.as_deref())
                .with_context(|| format!("cannot render {component}"))?;
            writeln!(stdout, "{html}")?;
        }
    }
    Ok(())
}

fn story_label(story: &Story) -> String {
    if story.is_default {
        format!("{} (default)", story.name)
    } else {
        story.name.to_string()
    }
}
