//! Hours and pay for timesheet entries.

use buildbook_records::Timesheet;
use chrono::NaiveTime;

use crate::error::FinanceError;
use crate::Result;

fn parse_time(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| FinanceError::InvalidTime(value.to_string()))
}

/// Hours worked between two `HH:MM` (or `HH:MM:SS`) times on the same day,
/// less a break in minutes. Never negative; an end before the start
/// yields zero.
pub fn timesheet_hours(start: &str, end: &str, break_minutes: f64) -> Result<f64> {
    let start = parse_time(start)?;
    let end = parse_time(end)?;

    let worked = (end - start).num_seconds() as f64 / 3600.0;
    Ok((worked - break_minutes / 60.0).max(0.0))
}

pub fn timesheet_pay(hours: f64, hourly_rate: f64) -> f64 {
    hours * hourly_rate
}

/// Refreshes `total_hours` and `total_pay` from the entry's times.
pub trait ApplyHours {
    fn recalculate_hours(&mut self) -> Result<f64>;
}

impl ApplyHours for Timesheet {
    fn recalculate_hours(&mut self) -> Result<f64> {
        let hours = timesheet_hours(
            &self.start_time,
            &self.end_time,
            self.break_duration.unwrap_or(0.0),
        )?;

        self.total_hours = hours;
        self.total_pay = self.hourly_rate.map(|rate| timesheet_pay(hours, rate));

        Ok(hours)
    }
}
