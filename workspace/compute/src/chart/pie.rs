use model::Selection;
use plotly::{Pie, Plot};

use super::{base_layout, BuilderError, ChartBuilder, ChartKind, ChartSpec};
use crate::filter::Subset;

/// Share of the selected metric per country.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieChart;

impl ChartBuilder for PieChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    fn build(&self, subset: &Subset<'_>, selection: &Selection) -> Result<ChartSpec, BuilderError> {
        let metric = selection.metric;
        let values: Vec<i64> = subset.iter().map(|r| r.value(metric)).collect();
        let labels: Vec<String> = subset.iter().map(|r| r.country.clone()).collect();

        let mut plot = Plot::new();
        plot.add_trace(Pie::new(values).labels(labels));
        plot.set_layout(base_layout(&format!(
            "Proportion of {} ({})",
            metric, selection.region
        )));

        ChartSpec::from_plot(ChartKind::Pie, &plot)
    }
}
