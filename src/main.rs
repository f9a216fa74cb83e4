//! rltail - Terminal Line Viewer
//!
//! Opens one text file and lets the user page, jump and search through it.

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use rltail::render::ui::TerminalUI;
use rltail::{Application, Config};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("rltail")
        .version(rltail::VERSION)
        .about("A terminal line viewer with regex search and a lockable viewport")
        .long_about(
            "rltail indexes the line offsets of a text file once and then fetches only the \
             lines on screen, so large files open quickly and stay cheap to page through.",
        )
        .arg(
            Arg::new("file")
                .help("Path to the file to view")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Read settings from this TOML file"),
        )
        .arg(
            Arg::new("wrap")
                .long("wrap")
                .action(ArgAction::SetTrue)
                .help("Soft-wrap long lines"),
        )
        .arg(
            Arg::new("no-numbers")
                .long("no-numbers")
                .action(ArgAction::SetTrue)
                .help("Hide the line-number gutter"),
        )
        .arg(
            Arg::new("locked")
                .long("locked")
                .action(ArgAction::SetTrue)
                .help("Start with cursor and viewport locked together"),
        )
        .arg(
            Arg::new("ignore-case")
                .short('i')
                .long("ignore-case")
                .action(ArgAction::SetTrue)
                .help("Case-insensitive search"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("NAME")
                .help("Color theme: default, monochrome or high-contrast"),
        )
}

/// Apply command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, matches: &clap::ArgMatches) {
    if matches.get_flag("wrap") {
        config.display.wrap = true;
    }
    if matches.get_flag("no-numbers") {
        config.display.line_numbers = false;
    }
    if matches.get_flag("locked") {
        config.display.locked = true;
    }
    if matches.get_flag("ignore-case") {
        config.search.case_insensitive = true;
    }
    if let Some(theme) = matches.get_one::<String>("theme") {
        config.display.theme = theme.clone();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    let Some(file) = matches.get_one::<String>("file") else {
        anyhow::bail!("file argument is required");
    };
    let file_path = PathBuf::from(file);

    if !file_path.exists() {
        anyhow::bail!("File does not exist: {}", file_path.display());
    }

    if !file_path.is_file() {
        anyhow::bail!("Path is not a regular file: {}", file_path.display());
    }

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let mut config = Config::load(config_path.as_deref())?;
    apply_overrides(&mut config, &matches);

    let ui_renderer = Box::new(TerminalUI::with_theme(config.theme()?)?);
    let mut app = Application::new(&file_path, ui_renderer, &config)?;

    app.run().await?;

    Ok(())
}
