use super::{PersistenceError, PersistenceResult, RosterStore};
use crate::date_range::day_month_label;
use crate::employee::Employee;
use crate::roster::Roster;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Marker written into a CSV cell when the employee is off that day.
pub const DAY_OFF_MARKER: &str = "OFF";

const REQUIRED_FIELDS: [&str; 3] = ["employees", "startDate", "endDate"];

/// The portable save-file document: a full roster plus an informational
/// save timestamp. Wire names are camelCase so files round-trip with the
/// original web tool's exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub employees: Vec<Employee>,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    #[serde(rename = "savedAt", default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl RosterSnapshot {
    pub fn from_roster(roster: &Roster, saved_at: DateTime<Utc>) -> Self {
        Self {
            employees: roster.employees().to_vec(),
            start_date: roster.start_date(),
            end_date: roster.end_date(),
            saved_at: Some(saved_at),
        }
    }

    /// Schema check ahead of typed deserialization: every required field
    /// must be present, unknown extra fields are ignored, and `savedAt`
    /// may be absent.
    pub fn from_value(value: serde_json::Value) -> PersistenceResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            PersistenceError::InvalidData("roster document must be a JSON object".into())
        })?;
        for field in REQUIRED_FIELDS {
            if !object.contains_key(field) {
                return Err(PersistenceError::InvalidData(format!(
                    "roster document is missing required field '{field}'"
                )));
            }
        }
        serde_json::from_value(value).map_err(|err| {
            PersistenceError::InvalidData(format!("malformed roster document: {err}"))
        })
    }

    /// Validates and converts into a roster ready for wholesale
    /// replacement. Names are re-trimmed; duplicate ids and blank names
    /// are rejected.
    pub fn into_roster(self) -> PersistenceResult<Roster> {
        let employees: Vec<Employee> = self
            .employees
            .into_iter()
            .map(Employee::normalized)
            .collect();
        super::validate_employees(&employees)?;
        Ok(Roster::from_parts(employees, self.start_date, self.end_date))
    }
}

pub fn save_roster_to_json<P: AsRef<Path>>(roster: &Roster, path: P) -> PersistenceResult<()> {
    super::validate_employees(roster.employees())?;
    let snapshot = RosterSnapshot::from_roster(roster, Utc::now());
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

/// A parse failure surfaces as `Serialization` (the file is not JSON);
/// a well-formed document with the wrong shape surfaces as `InvalidData`.
/// Either way the caller's current roster is untouched.
pub fn load_roster_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Roster> {
    let file = File::open(path)?;
    let value: serde_json::Value = serde_json::from_reader(file)?;
    RosterSnapshot::from_value(value)?.into_roster()
}

pub fn save_roster_to_csv<P: AsRef<Path>>(
    roster: &Roster,
    dates: &[NaiveDate],
    path: P,
) -> PersistenceResult<()> {
    super::validate_employees(roster.employees())?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    write_roster_csv(roster, dates, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// The CSV export as a string, for callers that hand the text to their
/// own download/clipboard mechanism.
pub fn roster_to_csv_string(roster: &Roster, dates: &[NaiveDate]) -> PersistenceResult<String> {
    super::validate_employees(roster.employees())?;
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_roster_csv(roster, dates, &mut writer)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| PersistenceError::InvalidData(format!("csv buffer flush failed: {err}")))?;
    String::from_utf8(bytes)
        .map_err(|err| PersistenceError::InvalidData(format!("csv output was not utf-8: {err}")))
}

fn write_roster_csv<W: Write>(
    roster: &Roster,
    dates: &[NaiveDate],
    writer: &mut csv::Writer<W>,
) -> PersistenceResult<()> {
    let mut header = Vec::with_capacity(dates.len() + 1);
    header.push("Employee".to_string());
    header.extend(dates.iter().copied().map(day_month_label));
    writer.write_record(&header)?;

    for employee in roster.employees() {
        let mut row = Vec::with_capacity(dates.len() + 1);
        row.push(employee.name.clone());
        for date in dates {
            row.push(if employee.is_off(*date) {
                DAY_OFF_MARKER.to_string()
            } else {
                String::new()
            });
        }
        writer.write_record(&row)?;
    }
    Ok(())
}

pub fn default_save_filename(today: NaiveDate) -> String {
    format!("roster_{}.json", today.format("%Y-%m-%d"))
}

pub fn default_export_filename(today: NaiveDate) -> String {
    format!("roster_days_off_{}.csv", today.format("%Y-%m-%d"))
}

/// Store that keeps the whole roster as one portable document on disk.
pub struct FileRosterStore {
    path: PathBuf,
}

impl FileRosterStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterStore for FileRosterStore {
    fn save_roster(&self, roster: &Roster) -> PersistenceResult<()> {
        save_roster_to_json(roster, &self.path)
    }

    fn load_roster(&self) -> PersistenceResult<Option<Roster>> {
        if !self.path.exists() {
            return Ok(None);
        }
        load_roster_from_json(&self.path).map(Some)
    }
}
