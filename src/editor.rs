use crate::employee::Employee;
use crate::persistence::{PersistenceResult, RosterStore};
use crate::roster::{Roster, RosterResult};
use chrono::NaiveDate;

/// Owns the roster and its store, persisting the full state after every
/// successful mutation. Validation failures leave both the roster and the
/// store untouched.
///
/// Persistence itself is fire-and-forget: a failed write is logged and the
/// in-memory mutation stands, so a full disk never blocks editing.
pub struct RosterEditor {
    roster: Roster,
    store: Box<dyn RosterStore>,
}

impl RosterEditor {
    pub fn new(roster: Roster, store: Box<dyn RosterStore>) -> Self {
        Self { roster, store }
    }

    /// Restores the persisted roster, or starts a fresh one covering the
    /// week beginning `today` when the store has never been written.
    pub fn open(store: Box<dyn RosterStore>, today: NaiveDate) -> PersistenceResult<Self> {
        let roster = store
            .load_roster()?
            .unwrap_or_else(|| Roster::starting_at(today));
        Ok(Self { roster, store })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the id of the newly-created employee.
    pub fn add_employee(&mut self, name: &str) -> RosterResult<String> {
        let id = self.roster.add_employee(name)?.id.clone();
        self.persist();
        Ok(id)
    }

    pub fn rename_employee(&mut self, id: &str, new_name: &str) -> RosterResult<()> {
        self.roster.rename_employee(id, new_name)?;
        self.persist();
        Ok(())
    }

    pub fn remove_employee(&mut self, id: &str) -> RosterResult<Employee> {
        let removed = self.roster.remove_employee(id)?;
        self.persist();
        Ok(removed)
    }

    /// Reports the new membership state: `true` when the day is now off.
    pub fn toggle_day_off(&mut self, id: &str, day: NaiveDate) -> RosterResult<bool> {
        let now_off = self.roster.toggle_day_off(id, day)?;
        self.persist();
        Ok(now_off)
    }

    pub fn set_start_date(&mut self, day: NaiveDate) -> RosterResult<()> {
        self.roster.set_start_date(day)?;
        self.persist();
        Ok(())
    }

    pub fn set_end_date(&mut self, day: NaiveDate) -> RosterResult<()> {
        self.roster.set_end_date(day)?;
        self.persist();
        Ok(())
    }

    pub fn set_dates(&mut self, start_date: NaiveDate, end_date: NaiveDate) -> RosterResult<()> {
        self.roster.set_dates(start_date, end_date)?;
        self.persist();
        Ok(())
    }

    /// Wholesale replacement used by the load flow; the supplied roster
    /// has already passed snapshot validation.
    pub fn replace_all(&mut self, roster: Roster) {
        self.roster = roster;
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.store.save_roster(&self.roster) {
            log::warn!("failed to persist roster: {err}");
        }
    }
}
