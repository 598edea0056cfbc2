//! Region filtering over the immutable dataset.

use model::{Dataset, Metric, Record, Region};
use tracing::{debug, instrument};

/// The rows a chart is built from, borrowed from the dataset in original order.
#[derive(Debug, Clone, Default)]
pub struct Subset<'a> {
    records: Vec<&'a Record>,
}

impl<'a> Subset<'a> {
    pub fn new(records: Vec<&'a Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    /// Rebuilds a subset from row positions returned by [`select_rows`].
    /// Positions past the end of the dataset are skipped.
    pub fn from_positions(dataset: &'a Dataset, positions: &[usize]) -> Self {
        let records = dataset.records();
        Self::new(positions.iter().filter_map(|&i| records.get(i)).collect())
    }
}

/// Positions of the rows in a region, in dataset order.
///
/// Positions are plain indices so one selection can be shared with tasks
/// that own their own handle to the dataset.
#[instrument(skip(dataset, region), fields(rows = dataset.len(), region = %region))]
pub fn select_rows(dataset: &Dataset, region: &Region) -> Vec<usize> {
    let positions: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| match region {
            Region::Global => true,
            Region::Who(name) => &record.who_region == name,
        })
        .map(|(i, _)| i)
        .collect();
    debug!("Filtered {} of {} records", positions.len(), dataset.len());
    positions
}

/// Selects the rows for a region, keeping dataset order.
///
/// `Global` keeps every row. A region that no row belongs to yields an empty
/// subset rather than an error; builders render that as an empty chart.
pub fn filter<'a>(dataset: &'a Dataset, region: &Region) -> Subset<'a> {
    Subset::from_positions(dataset, &select_rows(dataset, region))
}

/// Keeps the `n` largest rows by `metric`, in ascending order.
///
/// The sort is stable, so rows with equal values keep their dataset order and
/// the later ones win the last places.
pub fn top_n<'a>(subset: &Subset<'a>, metric: Metric, n: usize) -> Subset<'a> {
    let mut sorted = subset.records.clone();
    sorted.sort_by_key(|record| record.value(metric));
    let skip = sorted.len().saturating_sub(n);
    Subset::new(sorted.split_off(skip))
}
