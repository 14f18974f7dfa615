use chrono::{Duration, NaiveDate};

/// Every calendar day from `start` to `end` inclusive, in ascending order.
/// An inverted pair yields an empty range rather than an error, since
/// callers may transiently hold inverted bounds while editing.
pub fn generate_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        current = current + Duration::days(1);
    }
    days
}

/// Number of days `generate_range` would produce for the same bounds.
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> usize {
    if end < start {
        return 0;
    }
    (end - start).num_days() as usize + 1
}

/// Bounds for a preset span starting today: `span_days` covers today
/// itself, so a 7-day preset ends 6 days out.
pub fn preset_range(today: NaiveDate, span_days: u32) -> (NaiveDate, NaiveDate) {
    let span = span_days.max(1);
    (today, today + Duration::days(i64::from(span) - 1))
}

/// Short `dd/mm` column label used by the CSV export and the schedule grid.
pub fn day_month_label(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}
