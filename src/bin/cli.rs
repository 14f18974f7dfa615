use chrono::{Datelike, Local, NaiveDate, Weekday};
use roster_tool::persistence::PersistenceResult;
use roster_tool::{
    DAY_OFF_MARKER, PersistenceError, Roster, RosterEditor, RosterStore, day_month_label,
    default_export_filename, default_save_filename, load_roster_from_json, preset_range,
    save_roster_to_csv, save_roster_to_json,
};
use std::env;
use std::io::{self, Write};

fn weekday_abbrev(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn render_roster_as_text_table(roster: &Roster) -> String {
    let dates = roster.date_range();

    let mut headers = Vec::with_capacity(dates.len() + 1);
    headers.push("Employee".to_string());
    for date in &dates {
        headers.push(format!(
            "{} {}",
            weekday_abbrev(*date),
            day_month_label(*date)
        ));
    }

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(roster.employees().len());
    for employee in roster.employees() {
        let mut row = Vec::with_capacity(dates.len() + 1);
        row.push(employee.name.clone());
        for date in &dates {
            row.push(if employee.is_off(*date) {
                DAY_OFF_MARKER.to_string()
            } else {
                String::new()
            });
        }
        rows.push(row);
    }

    // Compute column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    // Build horizontal separator
    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    // Header
    out.push('|');
    for (i, name) in headers.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    // Rows
    for row in &rows {
        out.push('|');
        for (ci, cell) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            let pad = widths[ci].saturating_sub(cell.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out.push_str(&format!(
        "{} employee(s), {} day(s) from {} to {}\n",
        roster.employees().len(),
        dates.len(),
        roster.start_date(),
        roster.end_date()
    ));
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the schedule grid\n  employees                          List employees with ids and day-off counts\n  add <name...>                      Add an employee (rest of line is the name)\n  rename <id> <name...>              Rename an employee\n  delete <id>                        Remove an employee\n  toggle <id> <YYYY-MM-DD>           Toggle a day off for an employee\n  range <start> <end>                Set both date bounds (YYYY-MM-DD)\n  start <YYYY-MM-DD>                 Set the start date\n  end <YYYY-MM-DD>                   Set the end date\n  preset <7|14|30|60>                Span that many days starting today\n  save [path]                        Save the roster as a portable JSON document\n  load <path>                        Load a portable JSON document (replaces everything)\n  export [path]                      Export the schedule grid as CSV\n  quit|exit                          Exit"
    );
}

fn print_employees(roster: &Roster) {
    if roster.employees().is_empty() {
        println!("No employees yet. Use 'add <name>' to create one.");
        return;
    }
    for employee in roster.employees() {
        println!(
            "  {:<16} {:<24} {} day(s) off",
            employee.id,
            employee.name,
            employee.day_offs.len()
        );
    }
}

/// Remainder of the input after `skip_tokens` whitespace-separated tokens.
fn rest_of_line(input: &str, skip_tokens: usize) -> &str {
    let mut remainder = input;
    for _ in 0..skip_tokens {
        remainder = remainder.trim_start();
        match remainder.find(char::is_whitespace) {
            Some(idx) => remainder = &remainder[idx..],
            None => return "",
        }
    }
    remainder.trim()
}

fn parse_day(input: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            println!("Invalid date (YYYY-MM-DD)");
            None
        }
    }
}

#[cfg(feature = "sqlite")]
fn open_store(path: &str) -> PersistenceResult<Box<dyn RosterStore>> {
    use roster_tool::SqliteRosterStore;
    Ok(Box::new(SqliteRosterStore::new(path)?))
}

#[cfg(not(feature = "sqlite"))]
fn open_store(path: &str) -> PersistenceResult<Box<dyn RosterStore>> {
    use roster_tool::FileRosterStore;
    Ok(Box::new(FileRosterStore::new(path)))
}

fn main() {
    let data_path = env::var("ROSTER_DB").unwrap_or_else(|_| "roster.db".to_string());
    let today = Local::now().date_naive();

    let store = match open_store(&data_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Failed to open roster storage at {data_path}: {err}");
            std::process::exit(1);
        }
    };
    let mut editor = match RosterEditor::open(store, today) {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("Failed to restore roster from {data_path}: {err}");
            std::process::exit(1);
        }
    };

    println!("Roster Tool (CLI) - type 'help' for commands\n");
    println!("{}", render_roster_as_text_table(editor.roster()));

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => {
                print_help();
            }
            "quit" | "exit" => break,
            "show" => {
                println!("{}", render_roster_as_text_table(editor.roster()));
            }
            "employees" => {
                print_employees(editor.roster());
            }
            "add" => {
                let name = rest_of_line(input, 1);
                if name.is_empty() {
                    println!("Usage: add <name...>");
                    continue;
                }
                match editor.add_employee(name) {
                    Ok(id) => println!("Added employee '{}' with id {}.", name, id),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "rename" => {
                let id = parts.next();
                let name = rest_of_line(input, 2);
                match id {
                    Some(id) if !name.is_empty() => match editor.rename_employee(id, name) {
                        Ok(()) => println!("Renamed employee {id}."),
                        Err(e) => println!("Error: {}", e),
                    },
                    _ => println!("Usage: rename <id> <name...>"),
                }
            }
            "delete" => match parts.next() {
                Some(id) => match editor.remove_employee(id) {
                    Ok(removed) => println!("Removed employee '{}'.", removed.name),
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: delete <id>"),
            },
            "toggle" => {
                let id = parts.next();
                let date_s = parts.next();
                match (id, date_s) {
                    (Some(id), Some(date_s)) => {
                        let Some(day) = parse_day(date_s) else {
                            continue;
                        };
                        match editor.toggle_day_off(id, day) {
                            Ok(true) => println!("Marked {day} as a day off."),
                            Ok(false) => println!("Cleared the day off on {day}."),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: toggle <id> <YYYY-MM-DD>"),
                }
            }
            "range" => {
                let start_s = parts.next();
                let end_s = parts.next();
                match (start_s, end_s) {
                    (Some(start_s), Some(end_s)) => {
                        let (Some(start), Some(end)) = (parse_day(start_s), parse_day(end_s))
                        else {
                            continue;
                        };
                        match editor.set_dates(start, end) {
                            Ok(()) => {
                                println!("{}", render_roster_as_text_table(editor.roster()))
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: range <start> <end>"),
                }
            }
            "start" | "end" => match parts.next() {
                Some(date_s) => {
                    let Some(day) = parse_day(date_s) else {
                        continue;
                    };
                    let res = if cmd == "start" {
                        editor.set_start_date(day)
                    } else {
                        editor.set_end_date(day)
                    };
                    match res {
                        Ok(()) => println!("{}", render_roster_as_text_table(editor.roster())),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                None => println!("Usage: {} <YYYY-MM-DD>", cmd),
            },
            "preset" => match parts.next().map(str::parse::<u32>) {
                Some(Ok(days)) if days > 0 => {
                    let (start, end) = preset_range(today, days);
                    match editor.set_dates(start, end) {
                        Ok(()) => println!("{}", render_roster_as_text_table(editor.roster())),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                _ => println!("Usage: preset <7|14|30|60>"),
            },
            "save" => {
                let path = parts
                    .next()
                    .map(str::to_string)
                    .unwrap_or_else(|| default_save_filename(today));
                match save_roster_to_json(editor.roster(), &path) {
                    Ok(()) => println!("Roster saved to {path}."),
                    Err(e) => println!("Error saving roster: {}", e),
                }
            }
            "load" => match parts.next() {
                Some(path) => match load_roster_from_json(path) {
                    Ok(roster) => {
                        editor.replace_all(roster);
                        println!("Roster loaded from {path}.");
                        println!("{}", render_roster_as_text_table(editor.roster()));
                    }
                    Err(PersistenceError::InvalidData(msg)) => {
                        println!("Invalid file: {msg}");
                    }
                    Err(e) => println!("Error loading file: {}", e),
                },
                None => println!("Usage: load <path>"),
            },
            "export" => {
                let path = parts
                    .next()
                    .map(str::to_string)
                    .unwrap_or_else(|| default_export_filename(today));
                let dates = editor.roster().date_range();
                match save_roster_to_csv(editor.roster(), &dates, &path) {
                    Ok(()) => println!("Schedule exported to {path}."),
                    Err(e) => println!("Error exporting CSV: {}", e),
                }
            }
            other => {
                println!("Unknown command '{}'. Type 'help' for commands.", other);
            }
        }
    }
}
