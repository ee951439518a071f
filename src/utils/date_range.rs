//! Rangos de fechas y agrupación por mes calendario
//!
//! Todos los reportes trabajan sobre un rango inclusivo `[start, end]`
//! y agrupan registros en meses calendario reales (28-31 días).

use chrono::{Datelike, Days, Duration, Months, NaiveDate};

use crate::utils::errors::{internal_error, AppResult};
use crate::utils::validation::parse_optional_date;

/// Días hacia atrás cuando no se indica `start_date`
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;

/// Máximo configurable de días hacia atrás (100 años)
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

/// Formato de etiqueta de mes, p. ej. "Jan 2024"
pub const MONTH_LABEL_FORMAT: &str = "%b %Y";

/// Rango inclusivo de fechas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Resolver el rango a partir de los parámetros opcionales del request.
    ///
    /// Sin `start_date` se usa `today - lookback_days`, sin `end_date` se usa `today`.
    pub fn resolve(
        start_date: Option<&str>,
        end_date: Option<&str>,
        today: NaiveDate,
        lookback_days: i64,
    ) -> AppResult<Self> {
        let start = match parse_optional_date("start_date", start_date)? {
            Some(start) => start,
            None => lookback_start(today, lookback_days)?,
        };
        let end = parse_optional_date("end_date", end_date)?.unwrap_or(today);

        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Número de días del rango contando ambos extremos.
    /// Es cero o negativo si `end` es anterior a `start`.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// `today - lookback_days`; error si el valor es negativo o sale del calendario
fn lookback_start(today: NaiveDate, lookback_days: i64) -> AppResult<NaiveDate> {
    u64::try_from(lookback_days)
        .ok()
        .and_then(|days| today.checked_sub_days(Days::new(days)))
        .ok_or_else(|| {
            internal_error(&format!("Invalid default lookback of {} days", lookback_days))
        })
}

/// Un mes calendario completo
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthBucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthBucket {
    /// Mes calendario que contiene `date`
    pub fn containing(date: NaiveDate) -> Self {
        let start = date - Duration::days(i64::from(date.day0()));
        let end = start + Months::new(1) - Duration::days(1);
        Self { start, end }
    }

    pub fn next(&self) -> Self {
        Self::containing(self.end + Duration::days(1))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn label(&self) -> String {
        self.start.format(MONTH_LABEL_FORMAT).to_string()
    }
}

/// `count` meses consecutivos empezando por el mes de `today`
pub fn months_forward(today: NaiveDate, count: u32) -> Vec<MonthBucket> {
    let mut buckets = Vec::with_capacity(count as usize);
    let mut current = MonthBucket::containing(today);

    for _ in 0..count {
        buckets.push(current);
        current = current.next();
    }

    buckets
}

/// Meses desde el que contiene `range.start` hasta el que contiene `range.end`
pub fn months_covering(range: &DateRange) -> Vec<MonthBucket> {
    let mut buckets = Vec::new();
    let mut current = MonthBucket::containing(range.start);

    while current.start <= range.end {
        buckets.push(current);
        current = current.next();
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_resolve_defaults_to_last_year() {
        let today = date(2024, 6, 15);
        let range = DateRange::resolve(None, None, today, DEFAULT_LOOKBACK_DAYS).unwrap();

        assert_eq!(range.start, date(2023, 6, 16));
        assert_eq!(range.end, today);
    }

    #[test]
    fn test_resolve_rejects_unusable_lookback() {
        let today = date(2024, 6, 15);

        assert!(DateRange::resolve(None, None, today, -1).is_err());
        assert!(DateRange::resolve(None, None, today, i64::MAX).is_err());
        assert!(DateRange::resolve(None, None, today, 100_000_000).is_err());

        let explicit = DateRange::resolve(Some("2024-01-01"), None, today, i64::MAX).unwrap();
        assert_eq!(explicit.start, date(2024, 1, 1));
    }

    #[test]
    fn test_resolve_explicit_dates() {
        let range = DateRange::resolve(
            Some("2024-01-01"),
            Some("2024-03-31"),
            date(2030, 1, 1),
            DEFAULT_LOOKBACK_DAYS,
        )
        .unwrap();

        assert_eq!(range, DateRange::new(date(2024, 1, 1), date(2024, 3, 31)));
        assert_eq!(range.total_days(), 91);
    }

    #[test]
    fn test_resolve_rejects_bad_date() {
        let result = DateRange::resolve(Some("2024-02-30"), None, date(2024, 6, 1), 365);
        assert!(result.is_err());
    }

    #[test]
    fn test_total_days_single_day() {
        let range = DateRange::new(date(2024, 5, 5), date(2024, 5, 5));
        assert_eq!(range.total_days(), 1);
        assert!(range.contains(date(2024, 5, 5)));
        assert!(!range.contains(date(2024, 5, 6)));
    }

    #[test]
    fn test_month_bucket_variable_lengths() {
        assert_eq!(MonthBucket::containing(date(2024, 2, 10)).end, date(2024, 2, 29));
        assert_eq!(MonthBucket::containing(date(2023, 2, 10)).end, date(2023, 2, 28));
        assert_eq!(MonthBucket::containing(date(2024, 4, 30)).end, date(2024, 4, 30));
        assert_eq!(MonthBucket::containing(date(2024, 12, 31)).start, date(2024, 12, 1));
    }

    #[test]
    fn test_months_forward_rolls_over_year() {
        let buckets = months_forward(date(2024, 10, 17), 6);
        let labels: Vec<String> = buckets.iter().map(MonthBucket::label).collect();

        assert_eq!(
            labels,
            vec!["Oct 2024", "Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025", "Mar 2025"]
        );
        assert_eq!(buckets[4].end, date(2025, 2, 28));
    }

    #[test]
    fn test_months_covering_partial_months() {
        let range = DateRange::new(date(2024, 1, 20), date(2024, 3, 2));
        let buckets = months_covering(&range);

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].start, date(2024, 1, 1));
        assert_eq!(buckets[2].end, date(2024, 3, 31));
    }

    #[test]
    fn test_months_covering_inverted_range() {
        let range = DateRange::new(date(2024, 3, 15), date(2024, 3, 1));
        assert_eq!(months_covering(&range).len(), 1);

        let range = DateRange::new(date(2024, 4, 15), date(2024, 3, 1));
        assert!(months_covering(&range).is_empty());
    }
}
