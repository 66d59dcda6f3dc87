//! Calendar date-window selection for due tasks.
//!
//! The external sync layer encodes "due at midnight" as 23:00 UTC on the
//! prior day. The window therefore folds "date − 1 day, 23:00 UTC" forward
//! into `date`, and excludes "date, 23:00 UTC" (that instant belongs to the
//! next day's window).

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::task::Task;

/// The 23:00 UTC instant that stands in for midnight of the following day.
fn midnight_marker(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::from_hms_opt(23, 0, 0).expect("valid time"))
        .and_utc()
}

/// Select the tasks whose due timestamp falls on `date`.
pub fn tasks_due_on(date: NaiveDate, tasks: &[Task]) -> Vec<Task> {
    let own_marker = midnight_marker(date);
    let folded_marker = midnight_marker(date - Duration::days(1));

    tasks
        .iter()
        .filter(|t| match t.due {
            None => false,
            Some(due) => {
                due != own_marker && (due.date_naive() == date || due == folded_marker)
            }
        })
        .cloned()
        .collect()
}
