//! # CLI Layer
//!
//! One possible UI client for apodlog. This layer is the **only** place that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Uses `std::process::exit` (through `main.rs`)
//! - Handles argument parsing
//! - Formats output for humans
//!
//! ## Structure
//!
//! - `run()`: parses arguments, sets up logging and the context, dispatches
//! - `dispatch()`: shared by one-shot invocations and the interactive shell
//! - `handle_*()`: call the API and print the result

use super::render::{print_entries, print_messages, render_checks, render_links, render_settings};
use super::setup::{Cli, Commands, FetchTarget, StoreArg};
use super::shell;
use apodlog::api::{ApodApi, FetchRequest, ListRange, SettingsAction};
use apodlog::config::AppConfig;
use apodlog::error::Result;
use apodlog::settings::{parse_switch, SettingKey};
use apodlog::source::http::NasaClient;
use apodlog::store::lines::JsonlStore;
use apodlog::store::table::CsvStore;
use apodlog::store::StoreKind;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "APODLOG_LOG";

pub struct AppContext {
    pub api: ApodApi<JsonlStore, CsvStore>,
    pub source: NasaClient,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context()?;
    match cli.command {
        None | Some(Commands::Shell) => shell::run(&mut ctx),
        Some(cmd) => dispatch(&mut ctx, cmd),
    }
}

/// Diagnostics go to stderr so stdout carries only command output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context() -> Result<AppContext> {
    let config = AppConfig::from_env()?;
    let source = NasaClient::new(&config.base_url, &config.api_key)?;
    let api = ApodApi::open(config.paths);
    Ok(AppContext { api, source })
}

pub fn dispatch(ctx: &mut AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Fetch { target } => handle_fetch(ctx, target),
        Commands::List { first, last, store } => handle_list(ctx, first, last, store),
        Commands::Newest { store } => handle_newest(ctx, store),
        Commands::Oldest { store } => handle_oldest(ctx, store),
        Commands::Count { store } => handle_count(ctx, store),
        Commands::Delete { date } => handle_delete(ctx, date),
        Commands::Attach { date, path } => handle_attach(ctx, date, path),
        Commands::Clear { yes } => handle_clear(ctx, yes),
        Commands::Doctor => handle_doctor(ctx),
        Commands::Settings { key, value } => handle_settings(ctx, key, value),
        Commands::Init => handle_init(ctx),
        Commands::Shell => {
            println!("Already in the shell.");
            Ok(())
        }
    }
}

fn handle_fetch(ctx: &mut AppContext, target: FetchTarget) -> Result<()> {
    let result = match target {
        FetchTarget::Today => ctx.api.fetch(&ctx.source, FetchRequest::Today)?,
        FetchTarget::Date { date } => ctx.api.fetch_date(&ctx.source, &date.join(" "))?,
        FetchTarget::Random { count } => ctx.api.fetch(&ctx.source, FetchRequest::Random(count))?,
    };
    print_messages(&result.messages);
    print!("{}", render_links(&result.records));
    Ok(())
}

fn list_range(first: Option<usize>, last: Option<usize>) -> ListRange {
    match (first, last) {
        (Some(n), _) => ListRange::First(n),
        (None, Some(n)) => ListRange::Last(n),
        (None, None) => ListRange::All,
    }
}

fn handle_list(
    ctx: &mut AppContext,
    first: Option<usize>,
    last: Option<usize>,
    store: StoreArg,
) -> Result<()> {
    let result = ctx.api.list(store.into(), list_range(first, last))?;
    print_messages(&result.messages);
    print_entries(&result.records);
    Ok(())
}

fn handle_newest(ctx: &mut AppContext, store: StoreArg) -> Result<()> {
    let result = ctx.api.newest(store.into())?;
    print_messages(&result.messages);
    print_entries(&result.records);
    Ok(())
}

fn handle_oldest(ctx: &mut AppContext, store: StoreArg) -> Result<()> {
    let result = ctx.api.oldest(store.into())?;
    print_messages(&result.messages);
    print_entries(&result.records);
    Ok(())
}

fn handle_count(ctx: &mut AppContext, store: StoreArg) -> Result<()> {
    let kind: StoreKind = store.into();
    let result = ctx.api.count(kind)?;
    let label = ctx.api.stores().get(kind).label().to_string();
    println!("{}: {} entries", label, result.count.unwrap_or_default());
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, date: Vec<String>) -> Result<()> {
    let result = ctx.api.delete(&date.join(" "))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_attach(ctx: &mut AppContext, date: String, path: PathBuf) -> Result<()> {
    let result = ctx.api.attach(&date, &path.to_string_lossy())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        print!("This will remove every entry from both logs. [Y] To clear: ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if input.trim() != "Y" {
            println!("Operation cancelled.");
            return Ok(());
        }
    }
    let result = ctx.api.clear()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn settings_action(key: Option<&str>, value: Option<&str>) -> Result<SettingsAction> {
    Ok(match (key, value) {
        (None, _) => SettingsAction::Show,
        (Some(k), None) => SettingsAction::Toggle(k.parse::<SettingKey>()?),
        (Some(k), Some(v)) => SettingsAction::Set(k.parse::<SettingKey>()?, parse_switch(v)?),
    })
}

pub(super) fn handle_settings_action(ctx: &AppContext, action: SettingsAction) -> Result<()> {
    let result = ctx.api.settings(action)?;
    print_messages(&result.messages);
    if let Some(settings) = &result.settings {
        print!("{}", render_settings(settings));
    }
    Ok(())
}

fn handle_settings(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = settings_action(key.as_deref(), value.as_deref())?;
    handle_settings_action(ctx, action)
}

pub(super) fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print!("{}", render_checks(&result.checks));
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_from_flags() {
        assert_eq!(list_range(None, None), ListRange::All);
        assert_eq!(list_range(Some(2), None), ListRange::First(2));
        assert_eq!(list_range(None, Some(4)), ListRange::Last(4));
    }

    #[test]
    fn settings_arguments() {
        assert_eq!(settings_action(None, None).unwrap(), SettingsAction::Show);
        assert_eq!(
            settings_action(Some("auto-save"), None).unwrap(),
            SettingsAction::Toggle(SettingKey::AutoSaveFiles)
        );
        assert_eq!(
            settings_action(Some("auto_redirect"), Some("off")).unwrap(),
            SettingsAction::Set(SettingKey::AutoRedirect, false)
        );
        assert!(settings_action(Some("colour"), None).is_err());
        assert!(settings_action(Some("auto-save"), Some("perhaps")).is_err());
    }
}
