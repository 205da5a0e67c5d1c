use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

/// Problems reading a locale averages file.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("locale file could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("locale file could not be parsed: {0}")]
    Csv(#[from] csv::Error),
    #[error("locale {0} has a non-positive annual average")]
    InvalidAverage(String),
}

#[derive(Debug, Deserialize)]
struct LocaleRow {
    locale: String,
    annual_metric_tons: f64,
}

/// Per-locale average annual emissions in metric tons, keyed by
/// COUNTRY-REGION code. Used only for members still on the standard
/// (estimated) profile.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    averages: HashMap<String, f64>,
}

impl LocaleTable {
    /// Built-in averages used when no table file is configured.
    pub fn standard() -> Self {
        const DEFAULTS: &[(&str, f64)] = &[
            ("US-CA", 9.3),
            ("US-IL", 14.1),
            ("US-NY", 8.5),
            ("US-TX", 25.2),
            ("US-WA", 10.4),
            ("CA-BC", 11.9),
            ("CA-ON", 12.5),
            ("GB-EN", 7.7),
            ("DE-BE", 8.9),
        ];

        let averages = DEFAULTS
            .iter()
            .map(|(locale, average)| (locale.to_string(), *average))
            .collect();

        Self { averages }
    }

    /// Read a table from CSV with `locale,annual_metric_tons` columns.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LocaleError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut averages = HashMap::new();

        for row in csv_reader.deserialize::<LocaleRow>() {
            let row = row?;
            if row.annual_metric_tons <= 0.0 {
                return Err(LocaleError::InvalidAverage(row.locale));
            }
            averages.insert(row.locale, row.annual_metric_tons);
        }

        Ok(Self { averages })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LocaleError> {
        Self::from_reader(File::open(path)?)
    }

    pub fn annual_average(&self, locale: &str) -> Option<f64> {
        self.averages.get(locale).copied()
    }

    /// Estimated annual emissions for a member covered by this locale for
    /// `locale_percent` of the year.
    pub fn estimate(&self, locale: &str, locale_percent: u8) -> Option<f64> {
        self.annual_average(locale)
            .map(|average| average * f64::from(locale_percent.min(100)) / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_scales_by_locale_percent() {
        let table = LocaleTable::standard();
        let full = table.estimate("US-IL", 100).expect("known locale");
        let half = table.estimate("US-IL", 50).expect("known locale");

        assert!((full - 14.1).abs() < 1e-9);
        assert!((half - 7.05).abs() < 1e-9);
    }

    #[test]
    fn unknown_locale_has_no_estimate() {
        let table = LocaleTable::standard();
        assert!(table.estimate("ZZ-ZZ", 100).is_none());
    }

    #[test]
    fn reads_table_from_csv() {
        let csv = "locale,annual_metric_tons\nUS-OR,9.9\nFR-IF,6.2\n";
        let table = LocaleTable::from_reader(csv.as_bytes()).expect("table parses");

        assert_eq!(table.annual_average("US-OR"), Some(9.9));
        assert_eq!(table.annual_average("FR-IF"), Some(6.2));
    }

    #[test]
    fn non_positive_average_is_rejected() {
        let csv = "locale,annual_metric_tons\nUS-OR,0\n";
        let result = LocaleTable::from_reader(csv.as_bytes());

        assert!(matches!(result, Err(LocaleError::InvalidAverage(locale)) if locale == "US-OR"));
    }
}
