pub mod date_range;
pub mod editor;
pub mod employee;
pub mod persistence;
pub mod roster;
pub(crate) mod roster_validation;

pub use date_range::{day_month_label, generate_range, inclusive_day_count, preset_range};
pub use editor::RosterEditor;
pub use employee::Employee;
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteRosterStore;
pub use persistence::{
    DAY_OFF_MARKER, FileRosterStore, PersistenceError, RosterSnapshot, RosterStore,
    default_export_filename, default_save_filename, load_roster_from_json, save_roster_to_csv,
    save_roster_to_json, validate_employees,
};
pub use roster::{Roster, RosterError};
