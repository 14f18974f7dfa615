use super::{PersistenceError, PersistenceResult, RosterStore};
use crate::{Employee, Roster};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

/// Store backed by a local SQLite database. The date bounds and the
/// employee list live in separate tables, keyed independently, matching
/// the two-key layout of the persisted state this tool models.
pub struct SqliteRosterStore {
    connection: Mutex<Connection>,
}

impl SqliteRosterStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS roster_bounds (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS employees (
                position INTEGER PRIMARY KEY,
                employee_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn save_bounds(&self, tx: &rusqlite::Transaction, roster: &Roster) -> PersistenceResult<()> {
        tx.execute("DELETE FROM roster_bounds", [])?;
        tx.execute(
            "INSERT INTO roster_bounds (id, start_date, end_date) VALUES (1, ?1, ?2)",
            params![
                roster.start_date().to_string(),
                roster.end_date().to_string()
            ],
        )?;
        Ok(())
    }

    fn save_employees(&self, tx: &rusqlite::Transaction, roster: &Roster) -> PersistenceResult<()> {
        tx.execute("DELETE FROM employees", [])?;
        let mut stmt = tx.prepare("INSERT INTO employees (position, employee_json) VALUES (?1, ?2)")?;
        for (position, employee) in roster.employees().iter().enumerate() {
            let json = serde_json::to_string(employee)?;
            stmt.execute(params![position as i64, json])?;
        }
        Ok(())
    }
}

impl RosterStore for SqliteRosterStore {
    fn save_roster(&self, roster: &Roster) -> PersistenceResult<()> {
        super::validate_employees(roster.employees())?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        self.save_bounds(&tx, roster)?;
        self.save_employees(&tx, roster)?;
        tx.commit()?;
        Ok(())
    }

    fn load_roster(&self) -> PersistenceResult<Option<Roster>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");

        let mut stmt = conn.prepare("SELECT start_date, end_date FROM roster_bounds WHERE id = 1")?;
        let bounds: Option<(String, String)> = stmt
            .query_row([], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;

        let Some((start_raw, end_raw)) = bounds else {
            return Ok(None);
        };

        let start_date = parse_stored_date(&start_raw)?;
        let end_date = parse_stored_date(&end_raw)?;

        let mut stmt = conn.prepare("SELECT employee_json FROM employees ORDER BY position ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut employees = Vec::new();
        for json in rows {
            let json = json?;
            let employee: Employee = serde_json::from_str(&json)?;
            employees.push(employee.normalized());
        }

        super::validate_employees(&employees)?;
        Ok(Some(Roster::from_parts(employees, start_date, end_date)))
    }
}

fn parse_stored_date(raw: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| PersistenceError::InvalidData(format!("invalid stored date '{raw}': {err}")))
}
