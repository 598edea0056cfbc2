use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of the dataset: the latest cumulative counts for a single country.
///
/// `new_cases` and `new_deaths` may be negative when the upstream source
/// corrected earlier figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Country/Region")]
    pub country: String,
    #[serde(rename = "WHO Region")]
    pub who_region: String,
    #[serde(rename = "Confirmed")]
    pub confirmed: i64,
    #[serde(rename = "Deaths")]
    pub deaths: i64,
    #[serde(rename = "Recovered")]
    pub recovered: i64,
    #[serde(rename = "Active")]
    pub active: i64,
    #[serde(rename = "New cases")]
    pub new_cases: i64,
    #[serde(rename = "New deaths")]
    pub new_deaths: i64,
}

impl Record {
    /// Creates a record with the given identity and every count set to zero.
    pub fn new(country: impl Into<String>, who_region: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            who_region: who_region.into(),
            confirmed: 0,
            deaths: 0,
            recovered: 0,
            active: 0,
            new_cases: 0,
            new_deaths: 0,
        }
    }

    /// Sets the value of a single metric, returning the updated record.
    pub fn with(mut self, metric: Metric, value: i64) -> Self {
        match metric {
            Metric::Confirmed => self.confirmed = value,
            Metric::Deaths => self.deaths = value,
            Metric::Recovered => self.recovered = value,
            Metric::Active => self.active = value,
            Metric::NewCases => self.new_cases = value,
            Metric::NewDeaths => self.new_deaths = value,
        }
        self
    }

    /// Returns the value of the selected metric.
    pub fn value(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Confirmed => self.confirmed,
            Metric::Deaths => self.deaths,
            Metric::Recovered => self.recovered,
            Metric::Active => self.active,
            Metric::NewCases => self.new_cases,
            Metric::NewDeaths => self.new_deaths,
        }
    }
}

/// One of the six numeric columns a user can chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Metric {
    #[default]
    #[serde(rename = "Confirmed")]
    Confirmed,
    #[serde(rename = "Deaths")]
    Deaths,
    #[serde(rename = "Recovered")]
    Recovered,
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "New cases")]
    NewCases,
    #[serde(rename = "New deaths")]
    NewDeaths,
}

impl Metric {
    /// All metrics, in dropdown order.
    pub const ALL: [Metric; 6] = [
        Metric::Confirmed,
        Metric::Deaths,
        Metric::Recovered,
        Metric::Active,
        Metric::NewCases,
        Metric::NewDeaths,
    ];

    /// The CSV column backing this metric.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Confirmed => "Confirmed",
            Metric::Deaths => "Deaths",
            Metric::Recovered => "Recovered",
            Metric::Active => "Active",
            Metric::NewCases => "New cases",
            Metric::NewDeaths => "New deaths",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.column() == s)
            .ok_or_else(|| format!("Unknown metric: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_round_trips_through_column_name() {
        for metric in Metric::ALL {
            assert_eq!(metric.column().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn test_metric_rejects_unknown_column() {
        assert!("confirmed".parse::<Metric>().is_err());
        assert!("Country/Region".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_serializes_as_column_name() {
        let json = serde_json::to_string(&Metric::NewDeaths).unwrap();
        assert_eq!(json, "\"New deaths\"");
        let parsed: Metric = serde_json::from_str("\"New cases\"").unwrap();
        assert_eq!(parsed, Metric::NewCases);
    }

    #[test]
    fn test_record_value_selects_metric() {
        let record = Record::new("Italy", "Europe")
            .with(Metric::Confirmed, 100)
            .with(Metric::NewDeaths, -3);

        assert_eq!(record.value(Metric::Confirmed), 100);
        assert_eq!(record.value(Metric::NewDeaths), -3);
        assert_eq!(record.value(Metric::Recovered), 0);
    }
}
