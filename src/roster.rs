use crate::date_range::generate_range;
use crate::employee::Employee;
use chrono::{Duration, NaiveDate, Utc};
use std::fmt;

/// Days beyond the start date covered by a freshly-created roster, so the
/// default window is one week.
const DEFAULT_SPAN_DAYS: i64 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    Validation(String),
    NotFound(String),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Validation(message) => write!(f, "validation error: {message}"),
            RosterError::NotFound(id) => write!(f, "no employee with id '{id}'"),
        }
    }
}

impl std::error::Error for RosterError {}

pub type RosterResult<T> = Result<T, RosterError>;

/// The full editable state: an ordered employee list plus the active date
/// bounds. Insertion order is display order, and `start_date <= end_date`
/// holds for every roster built through the public constructors and
/// setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    employees: Vec<Employee>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Roster {
    /// An empty roster covering the week beginning `today`.
    pub fn starting_at(today: NaiveDate) -> Self {
        Self {
            employees: Vec::new(),
            start_date: today,
            end_date: today + Duration::days(DEFAULT_SPAN_DAYS),
        }
    }

    pub fn with_dates(start_date: NaiveDate, end_date: NaiveDate) -> RosterResult<Self> {
        if end_date < start_date {
            return Err(inverted_range(start_date, end_date));
        }
        Ok(Self {
            employees: Vec::new(),
            start_date,
            end_date,
        })
    }

    /// Assembly point for the persistence layer, which validates the
    /// employee collection itself before calling this. Loaded documents
    /// may carry an inverted date pair; `generate_range` treats that as an
    /// empty range.
    pub(crate) fn from_parts(
        employees: Vec<Employee>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            employees,
            start_date,
            end_date,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The derived date range, recomputed on demand from the bounds.
    pub fn date_range(&self) -> Vec<NaiveDate> {
        generate_range(self.start_date, self.end_date)
    }

    /// Appends a new employee with a fresh id and no days off, returning
    /// the created record.
    pub fn add_employee(&mut self, name: &str) -> RosterResult<&Employee> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RosterError::Validation(
                "employee name must not be empty".into(),
            ));
        }
        let id = self.mint_id();
        self.employees.push(Employee::new(id, trimmed));
        Ok(self.employees.last().expect("employee was just appended"))
    }

    pub fn rename_employee(&mut self, id: &str, new_name: &str) -> RosterResult<()> {
        let employee = self.employee_mut(id)?;
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(RosterError::Validation(
                "employee name must not be empty".into(),
            ));
        }
        employee.name = trimmed.to_string();
        Ok(())
    }

    /// Removes the record, preserving the order of the rest.
    pub fn remove_employee(&mut self, id: &str) -> RosterResult<Employee> {
        let index = self
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))?;
        Ok(self.employees.remove(index))
    }

    /// Flips day-off membership and reports the new state: `true` when the
    /// day is now off. Toggling the same pair twice restores the original
    /// set.
    pub fn toggle_day_off(&mut self, id: &str, day: NaiveDate) -> RosterResult<bool> {
        let employee = self.employee_mut(id)?;
        if employee.day_offs.remove(&day) {
            Ok(false)
        } else {
            employee.day_offs.insert(day);
            Ok(true)
        }
    }

    pub fn set_start_date(&mut self, day: NaiveDate) -> RosterResult<()> {
        if day > self.end_date {
            return Err(inverted_range(day, self.end_date));
        }
        self.start_date = day;
        Ok(())
    }

    pub fn set_end_date(&mut self, day: NaiveDate) -> RosterResult<()> {
        if day < self.start_date {
            return Err(inverted_range(self.start_date, day));
        }
        self.end_date = day;
        Ok(())
    }

    /// Updates both bounds atomically; used by the preset spans, where
    /// setting the fields one at a time could trip the ordering check
    /// against a stale counterpart.
    pub fn set_dates(&mut self, start_date: NaiveDate, end_date: NaiveDate) -> RosterResult<()> {
        if end_date < start_date {
            return Err(inverted_range(start_date, end_date));
        }
        self.start_date = start_date;
        self.end_date = end_date;
        Ok(())
    }

    fn employee_mut(&mut self, id: &str) -> RosterResult<&mut Employee> {
        self.employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))
    }

    /// Ids are millisecond timestamps, like the save files this tool
    /// exchanges; bumped until unique so rapid additions within the same
    /// millisecond cannot collide.
    fn mint_id(&self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let candidate = stamp.to_string();
            if !self.employees.iter().any(|e| e.id == candidate) {
                return candidate;
            }
            stamp += 1;
        }
    }
}

fn inverted_range(start: NaiveDate, end: NaiveDate) -> RosterError {
    RosterError::Validation(format!(
        "start date {start} must be on or before end date {end}"
    ))
}
