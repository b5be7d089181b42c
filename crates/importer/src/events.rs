use log::{info, warn};
use models::{
    event::{EventRecord, clean_text},
    event_date::parse_event_date,
};
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to open events file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read events CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// One line of the academic calendar sheet, as exported by the office
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EventRow {
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Holidays")]
    holidays: Option<String>,
    #[serde(rename = "Examination")]
    examination: Option<String>,
    #[serde(rename = "Academic Activities")]
    academic_activities: Option<String>,
    #[serde(rename = "Extra-curricular Activities")]
    extra_curricular_activities: Option<String>,
    #[serde(rename = "Special Days and Jayantis")]
    special_days_jayantis: Option<String>,
}

/// Outcome of parsing a calendar sheet
#[derive(Debug, Default)]
pub struct EventImport {
    pub events: Vec<EventRecord>,
    /// Rows dropped for an unreadable record or a bad date
    pub skipped: usize,
}

impl TryFrom<EventRow> for EventRecord {
    type Error = models::event_date::EventDateError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let date = parse_event_date(row.date.as_deref().unwrap_or_default())?;

        Ok(EventRecord {
            date,
            holidays: clean_text(row.holidays),
            examination: clean_text(row.examination),
            academic_activities: clean_text(row.academic_activities),
            extra_curricular_activities: clean_text(row.extra_curricular_activities),
            special_days_jayantis: clean_text(row.special_days_jayantis),
        })
    }
}

/// Parses calendar events from CSV text
///
/// Every row is handled on its own: a record that cannot be read or whose date is
/// missing or malformed is logged and skipped, and parsing carries on.
///
/// # Arguments
/// * `reader` - CSV input with a header row
///
/// # Returns
/// The parsed events in file order and the number of skipped rows. Fails only when
/// the header itself cannot be read.
pub fn parse_events<R: Read>(reader: R) -> Result<EventImport, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut import = EventImport::default();

    for (idx, result) in csv_reader.records().enumerate() {
        // Header is line 1
        let line = idx + 2;

        let row: EventRow = match result.and_then(|record| record.deserialize(Some(&headers))) {
            Ok(row) => row,
            Err(err) => {
                warn!("Skipping unreadable CSV row at line {line}: {err}");
                import.skipped += 1;
                continue;
            }
        };

        match EventRecord::try_from(row) {
            Ok(event) => import.events.push(event),
            Err(err) => {
                warn!("Skipping CSV row at line {line}: {err}");
                import.skipped += 1;
            }
        }
    }

    info!(
        "Parsed {} events from CSV ({} rows skipped)",
        import.events.len(),
        import.skipped
    );

    Ok(import)
}

/// Opens and parses a calendar CSV file
pub fn read_events_file(path: impl AsRef<Path>) -> Result<EventImport, ImportError> {
    let file = File::open(path.as_ref())?;
    parse_events(file)
}
