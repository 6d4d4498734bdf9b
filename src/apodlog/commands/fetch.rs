use crate::commands::{append, attach, CmdMessage, CmdResult};
use crate::dates::check_apod_date;
use crate::error::{ApodError, Result};
use crate::format::normalize;
use crate::media::{save_media, MediaOutcome};
use crate::model::{ApodRecord, RawApod};
use crate::source::{ApodSource, MAX_RANDOM_COUNT};
use crate::store::{LogPair, LogStore};
use chrono::{DateTime, Local, NaiveDate};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRequest {
    Today,
    OnDate(NaiveDate),
    Random(u32),
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub today: NaiveDate,
    pub captured_at: DateTime<Local>,
    /// Where to save media; `None` leaves media alone.
    pub downloads_dir: Option<PathBuf>,
}

impl FetchOptions {
    pub fn now() -> Self {
        let captured_at = Local::now();
        Self {
            today: captured_at.date_naive(),
            captured_at,
            downloads_dir: None,
        }
    }

    pub fn with_downloads(mut self, dir: PathBuf) -> Self {
        self.downloads_dir = Some(dir);
        self
    }
}

fn validate(request: FetchRequest, today: NaiveDate) -> Result<()> {
    match request {
        FetchRequest::Today => Ok(()),
        FetchRequest::OnDate(date) => check_apod_date(date, today),
        FetchRequest::Random(count) if (1..=MAX_RANDOM_COUNT).contains(&count) => Ok(()),
        FetchRequest::Random(_) => Err(ApodError::InvalidInput(format!(
            "Please enter a number between 1 and {}.",
            MAX_RANDOM_COUNT
        ))),
    }
}

fn request_payloads<S: ApodSource + ?Sized>(source: &S, request: FetchRequest) -> Result<Vec<RawApod>> {
    match request {
        FetchRequest::Today => Ok(vec![source.today()?]),
        FetchRequest::OnDate(date) => Ok(vec![source.on_date(date)?]),
        FetchRequest::Random(count) => source.random(count),
    }
}

fn success_message(request: FetchRequest, count: usize) -> String {
    match request {
        FetchRequest::Today => "Success: Today's APOD was retrieved".to_string(),
        FetchRequest::OnDate(date) => format!("Success: APOD for {} was retrieved", date),
        FetchRequest::Random(_) => format!("Success: {} random APOD(s) were retrieved", count),
    }
}

/// Downloads media for each payload and records the saved path in both
/// stores. Download problems are reported, never fatal.
fn save_all_media<S, L, T>(
    source: &S,
    pair: &mut LogPair<L, T>,
    payloads: &[RawApod],
    records: &mut [ApodRecord],
    dir: &std::path::Path,
    result: &mut CmdResult,
) -> Result<()>
where
    S: ApodSource + ?Sized,
    L: LogStore,
    T: LogStore,
{
    for (raw, record) in payloads.iter().zip(records.iter_mut()) {
        match save_media(source, raw, dir) {
            Ok(MediaOutcome::Saved(path)) => {
                let path = path.to_string_lossy().into_owned();
                for store in pair.both_mut() {
                    attach::patch_store(store, &record.date, &path)?;
                }
                result.add_message(CmdMessage::success(format!("Saved media: {}", path)));
                record.local_file_path = Some(path);
            }
            Ok(MediaOutcome::AlreadyPresent) => {
                result.add_message(CmdMessage::warning(format!(
                    "Skipped (duplicate file): apod-{} already exists in downloads.",
                    record.date
                )));
            }
            Ok(MediaOutcome::NoMediaUrl) => {
                result.add_message(CmdMessage::warning(
                    "Media save skipped: No direct media URL was available.",
                ));
            }
            Err(e) => {
                result.add_message(CmdMessage::error(format!("Media save failed: {}", e)));
            }
        }
    }
    Ok(())
}

pub fn run<S, L, T>(
    source: &S,
    pair: &mut LogPair<L, T>,
    request: FetchRequest,
    options: &FetchOptions,
) -> Result<CmdResult>
where
    S: ApodSource + ?Sized,
    L: LogStore,
    T: LogStore,
{
    validate(request, options.today)?;
    let payloads = request_payloads(source, request)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(success_message(request, payloads.len())));

    for store in pair.both_mut() {
        if store.create()? {
            result.add_message(CmdMessage::info(format!("Created {}", store.label())));
        }
    }

    let mut records: Vec<ApodRecord> = payloads
        .iter()
        .map(|raw| normalize(raw, options.captured_at))
        .collect();
    result.merge(append::run(pair, &records)?);
    result.records.clear();

    if let Some(dir) = &options.downloads_dir {
        save_all_media(source, pair, &payloads, &mut records, dir, &mut result)?;
    }

    Ok(result.with_records(records))
}
