//! The interactive prompt.
//!
//! Each line is first matched against the global commands (`/help`, `q`,
//! `--auto-save`, ...). Anything else is parsed as a regular subcommand, so
//! `list --last 3` works the same at the prompt and on the command line.

use super::commands::{dispatch, handle_init, handle_settings_action, AppContext};
use super::render::print_messages;
use super::setup::{get_grouped_help, Cli, Commands};
use super::styles::APOD_THEME;
use apodlog::api::{CmdMessage, SettingsAction};
use apodlog::error::Result;
use apodlog::settings::SettingKey;
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use tracing::debug;

const PROMPT: &str = "apod> ";
const README: &str = include_str!("../../../README.md");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalCommand {
    Help,
    Readme,
    Quit,
    Toggle(SettingKey),
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Recognizes `/x`, `--x` and `-x` forms plus a bare `q`. Spaces and
/// underscores inside the token count as dashes.
pub fn parse_global(raw: &str) -> Option<GlobalCommand> {
    let s = raw.trim().to_lowercase();
    if s == "q" {
        return Some(GlobalCommand::Quit);
    }

    let token = s
        .strip_prefix("--")
        .or_else(|| s.strip_prefix('-'))
        .or_else(|| s.strip_prefix('/'))?;
    let token = token.trim().replace([' ', '_'], "-");

    match token.as_str() {
        "help" => Some(GlobalCommand::Help),
        "readme" => Some(GlobalCommand::Readme),
        "quit" | "q" | "exit" => Some(GlobalCommand::Quit),
        "auto-redirect" | "automatically-redirect" => {
            Some(GlobalCommand::Toggle(SettingKey::AutoRedirect))
        }
        "auto-wallpaper" | "automatically-set-wallpaper" => {
            Some(GlobalCommand::Toggle(SettingKey::AutoWallpaper))
        }
        "auto-save" | "automatically-save-apod-files" => {
            Some(GlobalCommand::Toggle(SettingKey::AutoSaveFiles))
        }
        "settings" => Some(GlobalCommand::Settings),
        _ => None,
    }
}

pub fn run(ctx: &mut AppContext) -> Result<()> {
    handle_init(ctx)?;
    let settings = ctx.api.record_launch()?;
    debug!(launch_count = settings.launch_count, "shell started");
    println!("Type /help for commands, q to quit.");

    // stdin is locked per line only: commands such as `clear` read their own
    // confirmation from it.
    loop {
        print!("{}", APOD_THEME.prompt.apply_to(PROMPT));
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }

        match handle_line(ctx, &line) {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
        }
    }
}

fn handle_line(ctx: &mut AppContext, line: &str) -> Result<Flow> {
    if let Some(global) = parse_global(line) {
        return handle_global(ctx, global);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Flow::Continue);
    }

    match Cli::try_parse_from(std::iter::once("apodlog").chain(words)) {
        Ok(Cli {
            command: None | Some(Commands::Shell),
            ..
        }) => print_messages(&[CmdMessage::info("Already in the shell.")]),
        Ok(Cli {
            command: Some(command),
            ..
        }) => dispatch(ctx, command)?,
        // clap renders its own usage and suggestions
        Err(e) => print!("{}", e),
    }
    Ok(Flow::Continue)
}

fn handle_global(ctx: &mut AppContext, command: GlobalCommand) -> Result<Flow> {
    match command {
        GlobalCommand::Help => print!("{}", get_grouped_help()),
        GlobalCommand::Readme => println!("{}", README),
        GlobalCommand::Quit => return Ok(Flow::Quit),
        GlobalCommand::Toggle(key) => handle_settings_action(ctx, SettingsAction::Toggle(key))?,
        GlobalCommand::Settings => handle_settings_action(ctx, SettingsAction::Show)?,
    }
    Ok(Flow::Continue)
}
