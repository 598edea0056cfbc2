use model::Selection;
use plotly::common::{Mode, Title};
use plotly::layout::Axis;
use plotly::{Plot, Scatter};

use super::{base_layout, BuilderError, ChartBuilder, ChartKind, ChartSpec, TOP_COUNTRIES};
use crate::filter::{top_n, Subset};

/// The 15 highest countries in ascending order, joined by a line.
///
/// The dataset is a single snapshot, so the x axis is the country rather
/// than time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineChart;

impl ChartBuilder for LineChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn build(&self, subset: &Subset<'_>, selection: &Selection) -> Result<ChartSpec, BuilderError> {
        let metric = selection.metric;
        let top = top_n(subset, metric, TOP_COUNTRIES);
        let countries: Vec<String> = top.iter().map(|r| r.country.clone()).collect();
        let values: Vec<i64> = top.iter().map(|r| r.value(metric)).collect();

        let mut plot = Plot::new();
        plot.add_trace(
            Scatter::new(countries, values)
                .mode(Mode::LinesMarkers)
                .name(metric.column()),
        );
        plot.set_layout(
            base_layout(&format!("Trend of {} ({})", metric, selection.region))
                .x_axis(Axis::new().title(Title::with_text("Country/Region")))
                .y_axis(Axis::new().title(Title::with_text(metric.column()))),
        );

        ChartSpec::from_plot(ChartKind::Line, &plot)
    }
}
