use model::{Metric, Selection};
use plotly::common::{Marker, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};

use super::{base_layout, bubble_sizes, group_by, BuilderError, ChartBuilder, ChartKind, ChartSpec};
use crate::filter::Subset;

/// Largest bubble diameter in pixels.
const BUBBLE_SIZE_MAX: f64 = 60.0;

fn with_axes(layout: Layout, selection: &Selection) -> Layout {
    layout
        .x_axis(Axis::new().title(Title::with_text(Metric::Confirmed.column())))
        .y_axis(Axis::new().title(Title::with_text(selection.metric.column())))
}

/// Confirmed cases against the selected metric, coloured by WHO region.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterChart;

impl ChartBuilder for ScatterChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Scatter
    }

    fn build(&self, subset: &Subset<'_>, selection: &Selection) -> Result<ChartSpec, BuilderError> {
        let metric = selection.metric;

        let mut plot = Plot::new();
        for (region, rows) in group_by(subset.iter(), |r| r.who_region.as_str()) {
            let confirmed: Vec<i64> = rows.iter().map(|r| r.confirmed).collect();
            let values: Vec<i64> = rows.iter().map(|r| r.value(metric)).collect();
            let countries: Vec<String> = rows.iter().map(|r| r.country.clone()).collect();

            plot.add_trace(
                Scatter::new(confirmed, values)
                    .name(region.as_str())
                    .mode(Mode::Markers)
                    .hover_text_array(countries),
            );
        }

        let title = format!("Confirmed vs {} ({})", metric, selection.region);
        plot.set_layout(with_axes(base_layout(&title), selection));

        ChartSpec::from_plot(ChartKind::Scatter, &plot)
    }
}

/// Confirmed cases against the selected metric, with marker area
/// proportional to the metric and one trace per country.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleChart;

impl ChartBuilder for BubbleChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Bubble
    }

    fn build(&self, subset: &Subset<'_>, selection: &Selection) -> Result<ChartSpec, BuilderError> {
        let metric = selection.metric;
        let values: Vec<i64> = subset.iter().map(|r| r.value(metric)).collect();
        let sizes = bubble_sizes(&values, BUBBLE_SIZE_MAX);

        let mut plot = Plot::new();
        for ((record, value), size) in subset.iter().zip(values).zip(sizes) {
            plot.add_trace(
                Scatter::new(vec![record.confirmed], vec![value])
                    .name(record.country.as_str())
                    .mode(Mode::Markers)
                    .hover_text_array(vec![record.country.clone()])
                    .marker(Marker::new().size(size)),
            );
        }

        let title = format!(
            "Bubble Chart of Confirmed vs {} ({})",
            metric, selection.region
        );
        plot.set_layout(with_axes(base_layout(&title), selection));

        ChartSpec::from_plot(ChartKind::Bubble, &plot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;
    use model::{Dataset, Record, Region};
    use serde_json::json;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            Record::new("Italy", "Europe")
                .with(Metric::Confirmed, 1000)
                .with(Metric::Deaths, 900),
            Record::new("Kenya", "Africa")
                .with(Metric::Confirmed, 400)
                .with(Metric::Deaths, 100),
            Record::new("Spain", "Europe")
                .with(Metric::Confirmed, 800)
                .with(Metric::Deaths, 3600),
        ])
    }

    #[test]
    fn test_scatter_groups_by_region() {
        let dataset = dataset();
        let selection = Selection::new(Metric::Deaths, Region::Global);
        let subset = filter(&dataset, &selection.region);

        let spec = ScatterChart.build(&subset, &selection).unwrap();

        assert_eq!(spec.traces().len(), 2);
        let europe = &spec.traces()[0];
        assert_eq!(europe["type"], "scatter");
        assert_eq!(europe["mode"], "markers");
        assert_eq!(europe["name"], "Europe");
        assert_eq!(europe["x"], json!([1000, 800]));
        assert_eq!(europe["y"], json!([900, 3600]));
        assert_eq!(europe["hovertext"], json!(["Italy", "Spain"]));
        assert_eq!(spec.figure["layout"]["xaxis"]["title"]["text"], "Confirmed");
        assert_eq!(spec.figure["layout"]["yaxis"]["title"]["text"], "Deaths");
    }

    #[test]
    fn test_bubble_area_follows_metric() {
        let dataset = dataset();
        let selection = Selection::new(Metric::Deaths, Region::Global);
        let subset = filter(&dataset, &selection.region);

        let spec = BubbleChart.build(&subset, &selection).unwrap();

        let traces = spec.traces();
        assert_eq!(traces.len(), 3);
        let names: Vec<&str> = traces.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Italy", "Kenya", "Spain"]);
        let sizes: Vec<u64> = traces
            .iter()
            .map(|t| t["marker"]["size"].as_u64().unwrap())
            .collect();
        assert_eq!(sizes, vec![30, 10, 60]);
        assert_eq!(
            spec.title(),
            "Bubble Chart of Confirmed vs Deaths (Global)"
        );
    }

    #[test]
    fn test_bubble_hides_non_positive_values() {
        let dataset = Dataset::from_records(vec![
            Record::new("Peru", "Americas").with(Metric::NewDeaths, -2),
        ]);
        let selection = Selection::new(Metric::NewDeaths, Region::Global);
        let subset = filter(&dataset, &selection.region);

        let spec = BubbleChart.build(&subset, &selection).unwrap();

        let trace = &spec.traces()[0];
        assert_eq!(trace["y"], json!([-2]));
        assert_eq!(trace["marker"]["size"], 0);
    }
}
