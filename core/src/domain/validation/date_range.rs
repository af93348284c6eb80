use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Utc};

use crate::domain::common::entities::app_errors::FieldError;

pub const MIN_YEAR: i32 = 2020;
pub const MAX_SPAN_YEARS: u32 = 5;

/// Inclusive created-at window; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Start,
    End,
}

impl Edge {
    fn field(self) -> &'static str {
        match self {
            Edge::Start => "start_date",
            Edge::End => "end_date",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Edge::Start => "Start",
            Edge::End => "End",
        }
    }
}

/// Accepts RFC 3339, a naive `YYYY-MM-DD[T ]HH:MM:SS` (read as UTC) or a bare date.
/// A bare end date covers the whole day.
fn parse_edge(raw: &str, edge: Edge) -> Option<DateTime<Utc>> {
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value.and_utc());
        }
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = match edge {
        Edge::Start => date.and_hms_opt(0, 0, 0),
        Edge::End => date.and_hms_micro_opt(23, 59, 59, 999_999),
    };
    time.map(|t| t.and_utc())
}

fn check_edge(
    raw: Option<&str>,
    edge: Edge,
    now: DateTime<Utc>,
    errors: &mut Vec<FieldError>,
) -> Option<DateTime<Utc>> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    let Some(value) = parse_edge(raw, edge) else {
        errors.push(FieldError::new(
            edge.field(),
            format!(
                "Invalid {} date format: {raw}. Expected format: YYYY-MM-DD or ISO string",
                edge.label().to_lowercase()
            ),
        ));
        return None;
    };

    let max_year = now.year() + 1;
    if value.year() < MIN_YEAR {
        errors.push(FieldError::new(
            edge.field(),
            format!("{} date cannot be before {MIN_YEAR}-01-01", edge.label()),
        ));
    } else if value.year() > max_year {
        errors.push(FieldError::new(
            edge.field(),
            format!("{} date cannot be after {max_year}-12-31", edge.label()),
        ));
    }

    Some(value)
}

pub fn validate_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<DateRange, Vec<FieldError>> {
    validate_date_range_at(start, end, Utc::now())
}

/// Same as [`validate_date_range`] with an explicit clock.
pub fn validate_date_range_at(
    start: Option<&str>,
    end: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DateRange, Vec<FieldError>> {
    let mut errors = Vec::new();

    let start_date = check_edge(start, Edge::Start, now, &mut errors);
    let end_date = check_edge(end, Edge::End, now, &mut errors);

    if let (Some(from), Some(to)) = (start_date, end_date) {
        if from >= to {
            errors.push(FieldError::new(
                "date_range",
                format!(
                    "Start date must be before end date. Start: {}, End: {}",
                    start.unwrap_or_default().trim(),
                    end.unwrap_or_default().trim()
                ),
            ));
        }

        // Calendar years: the limit is the same day and time five years after the start.
        let limit = from.checked_add_months(Months::new(MAX_SPAN_YEARS * 12));
        if limit.is_some_and(|limit| to > limit) {
            errors.push(FieldError::new(
                "date_range",
                format!(
                    "Date range cannot exceed {MAX_SPAN_YEARS} years. Current range: {} days",
                    (to - from).num_days()
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(DateRange {
            start: start_date,
            end: end_date,
        })
    } else {
        Err(errors)
    }
}
