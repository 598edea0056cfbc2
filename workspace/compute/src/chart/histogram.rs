use model::Selection;
use plotly::common::Title;
use plotly::layout::{Axis, BarMode};
use plotly::{Histogram, Plot};

use super::{base_layout, group_by, BuilderError, ChartBuilder, ChartKind, ChartSpec};
use crate::filter::Subset;

/// Distribution of the selected metric; binning is left to the renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramChart;

impl ChartBuilder for HistogramChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Histogram
    }

    fn build(&self, subset: &Subset<'_>, selection: &Selection) -> Result<ChartSpec, BuilderError> {
        let metric = selection.metric;

        let mut plot = Plot::new();
        for (region, rows) in group_by(subset.iter(), |r| r.who_region.as_str()) {
            let values: Vec<i64> = rows.iter().map(|r| r.value(metric)).collect();
            plot.add_trace(Histogram::new(values).name(region.as_str()));
        }
        plot.set_layout(
            base_layout(&format!("Histogram of {} ({})", metric, selection.region))
                .x_axis(Axis::new().title(Title::with_text(metric.column())))
                .y_axis(Axis::new().title(Title::with_text("count")))
                .bar_mode(BarMode::Relative),
        );

        ChartSpec::from_plot(ChartKind::Histogram, &plot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;
    use model::{Dataset, Metric, Record, Region};
    use serde_json::json;

    #[test]
    fn test_values_are_passed_unbinned() {
        let dataset = Dataset::from_records(vec![
            Record::new("Ghana", "Africa").with(Metric::NewCases, 5),
            Record::new("Chile", "Americas").with(Metric::NewCases, -1),
            Record::new("Mali", "Africa").with(Metric::NewCases, 5),
        ]);
        let selection = Selection::new(Metric::NewCases, Region::Global);
        let subset = filter(&dataset, &selection.region);

        let spec = HistogramChart.build(&subset, &selection).unwrap();

        let traces = spec.traces();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0]["type"], "histogram");
        assert_eq!(traces[0]["name"], "Africa");
        assert_eq!(traces[0]["x"], json!([5, 5]));
        assert_eq!(traces[1]["x"], json!([-1]));
        assert_eq!(spec.figure["layout"]["barmode"], "relative");
        assert_eq!(spec.title(), "Histogram of New cases (Global)");
    }
}
