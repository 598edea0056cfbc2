//! Headline totals shown above the charts.

use model::{Dataset, Region};
use tracing::instrument;

use crate::filter::filter;

/// Totals of the cumulative counts over one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub region: Region,
    pub countries: usize,
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
}

#[instrument(skip(dataset))]
pub fn summarize(dataset: &Dataset, region: &Region) -> Summary {
    let subset = filter(dataset, region);
    Summary {
        region: region.clone(),
        countries: subset.len(),
        confirmed: subset.iter().map(|r| r.confirmed).sum(),
        deaths: subset.iter().map(|r| r.deaths).sum(),
        recovered: subset.iter().map(|r| r.recovered).sum(),
    }
}

/// Formats an integer with comma thousands separators, e.g. `16,480,485`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
