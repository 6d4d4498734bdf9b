//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every logger operation, whichever UI drives it.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*::run`
//! - **Normalizes inputs** (date text into dates, store names into [`StoreKind`])
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business logic.
//!
//! ## Generic Over LogStore
//!
//! `ApodApi<L, T>` is generic over both stores:
//! - Production: `ApodApi<JsonlStore, CsvStore>`
//! - Testing: `ApodApi<InMemoryStore, InMemoryStore>`
//!
//! The remote source is passed per call, so tests hand in a fake.

use crate::commands;
use crate::config::AppPaths;
use crate::dates::parse_date;
use crate::error::Result;
use crate::settings::Settings;
use crate::source::ApodSource;
use crate::store::lines::JsonlStore;
use crate::store::table::CsvStore;
use crate::store::{LogPair, LogStore, StoreKind};

pub use crate::commands::extremes::Extreme;
pub use crate::commands::fetch::{FetchOptions, FetchRequest};
pub use crate::commands::list::ListRange;
pub use crate::commands::settings::SettingsAction;
pub use crate::commands::{CheckStatus, CmdMessage, CmdResult, MessageLevel, StartupCheck};

pub struct ApodApi<L: LogStore, T: LogStore> {
    pair: LogPair<L, T>,
    paths: AppPaths,
}

impl ApodApi<JsonlStore, CsvStore> {
    /// The file-backed API rooted at `paths.data_dir`.
    pub fn open(paths: AppPaths) -> Self {
        let pair = LogPair::new(
            JsonlStore::new(paths.lines_file()),
            CsvStore::new(paths.table_file()),
        );
        Self::new(pair, paths)
    }
}

impl<L: LogStore, T: LogStore> ApodApi<L, T> {
    pub fn new(pair: LogPair<L, T>, paths: AppPaths) -> Self {
        Self { pair, paths }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn stores(&self) -> &LogPair<L, T> {
        &self.pair
    }

    /// Fetches and logs. Media is saved when the user enabled it.
    pub fn fetch<S: ApodSource + ?Sized>(
        &mut self,
        source: &S,
        request: FetchRequest,
    ) -> Result<CmdResult> {
        let settings = Settings::load(self.paths.settings_file())?;
        let mut options = FetchOptions::now();
        if settings.automatically_save_apod_files {
            options = options.with_downloads(self.paths.downloads_dir());
        }
        commands::fetch::run(source, &mut self.pair, request, &options)
    }

    pub fn fetch_date<S: ApodSource + ?Sized>(
        &mut self,
        source: &S,
        input: &str,
    ) -> Result<CmdResult> {
        let date = parse_date(input)?;
        self.fetch(source, FetchRequest::OnDate(date))
    }

    pub fn list(&self, kind: StoreKind, range: ListRange) -> Result<CmdResult> {
        commands::list::run(self.pair.get(kind), range)
    }

    pub fn newest(&self, kind: StoreKind) -> Result<CmdResult> {
        commands::extremes::run(self.pair.get(kind), Extreme::Newest)
    }

    pub fn oldest(&self, kind: StoreKind) -> Result<CmdResult> {
        commands::extremes::run(self.pair.get(kind), Extreme::Oldest)
    }

    pub fn count(&self, kind: StoreKind) -> Result<CmdResult> {
        commands::count::run(self.pair.get(kind))
    }

    pub fn delete(&mut self, date: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.pair, date, crate::dates::today())
    }

    pub fn attach(&mut self, date: &str, path: &str) -> Result<CmdResult> {
        let date = parse_date(date)?.format("%Y-%m-%d").to_string();
        commands::attach::run(&mut self.pair, &date, path)
    }

    pub fn clear(&mut self) -> Result<CmdResult> {
        commands::clear::run(&mut self.pair)
    }

    pub fn doctor(&mut self) -> Result<CmdResult> {
        commands::doctor::run(&mut self.pair)
    }

    pub fn settings(&self, action: SettingsAction) -> Result<CmdResult> {
        commands::settings::run(&self.paths.settings_file(), action)
    }

    pub fn record_launch(&self) -> Result<Settings> {
        commands::settings::record_launch(&self.paths.settings_file())
    }

    pub fn init(&mut self) -> Result<CmdResult> {
        commands::init::run(&self.paths, &mut self.pair)
    }
}
