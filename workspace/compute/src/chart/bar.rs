use model::Selection;
use plotly::common::{Orientation, TextPosition, Title};
use plotly::layout::{Axis, CategoryOrder, Legend};
use plotly::{Bar, Plot};

use super::{base_layout, group_by, BuilderError, ChartBuilder, ChartKind, ChartSpec, TOP_COUNTRIES};
use crate::filter::{top_n, Subset};

/// Horizontal bars for the 15 countries with the highest value, one trace
/// per WHO region.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarChart;

impl ChartBuilder for BarChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn build(&self, subset: &Subset<'_>, selection: &Selection) -> Result<ChartSpec, BuilderError> {
        let metric = selection.metric;
        let top = top_n(subset, metric, TOP_COUNTRIES);

        let mut plot = Plot::new();
        for (region, rows) in group_by(top.iter(), |r| r.who_region.as_str()) {
            let values: Vec<i64> = rows.iter().map(|r| r.value(metric)).collect();
            let countries: Vec<String> = rows.iter().map(|r| r.country.clone()).collect();
            let labels: Vec<String> = values.iter().map(i64::to_string).collect();

            let trace = Bar::new(values, countries)
                .name(region.as_str())
                .orientation(Orientation::Horizontal)
                .text_array(labels)
                .text_position(TextPosition::Auto);
            plot.add_trace(trace);
        }

        let title = format!("Top {} Countries by {} ({})", TOP_COUNTRIES, metric, selection.region);
        plot.set_layout(
            base_layout(&title)
                .x_axis(Axis::new().title(Title::with_text("")))
                .y_axis(
                    Axis::new()
                        .title(Title::with_text(""))
                        .category_order(CategoryOrder::TotalAscending),
                )
                .legend(Legend::new().title(Title::with_text("WHO Region"))),
        );

        ChartSpec::from_plot(ChartKind::Bar, &plot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;
    use model::{Dataset, Metric, Record, Region};
    use serde_json::json;

    #[test]
    fn test_single_country_encodes_one_bar() {
        let dataset = Dataset::from_records(vec![
            Record::new("Italy", "Europe").with(Metric::Confirmed, 100),
        ]);
        let selection = Selection::new(Metric::Confirmed, Region::who("Europe"));
        let subset = filter(&dataset, &selection.region);

        let spec = BarChart.build(&subset, &selection).unwrap();

        assert_eq!(spec.traces().len(), 1);
        let trace = &spec.traces()[0];
        assert_eq!(trace["type"], "bar");
        assert_eq!(trace["x"], json!([100]));
        assert_eq!(trace["y"], json!(["Italy"]));
        assert_eq!(trace["orientation"], "h");
        assert_eq!(trace["name"], "Europe");
        assert_eq!(spec.title(), "Top 15 Countries by Confirmed (Europe)");
    }

    #[test]
    fn test_keeps_fifteen_largest_split_by_region() {
        let records: Vec<Record> = (0..30)
            .map(|i| {
                let region = if i % 2 == 0 { "Europe" } else { "Africa" };
                Record::new(format!("Country {i}"), region).with(Metric::Active, i)
            })
            .collect();
        let dataset = Dataset::from_records(records);
        let selection = Selection::new(Metric::Active, Region::Global);
        let subset = filter(&dataset, &selection.region);

        let spec = BarChart.build(&subset, &selection).unwrap();

        assert_eq!(spec.point_count(), 15);
        assert_eq!(spec.traces().len(), 2);
        for trace in spec.traces() {
            let values = trace["x"].as_array().unwrap();
            assert!(values.iter().all(|v| v.as_i64().unwrap() >= 15));
        }
        let layout = &spec.figure["layout"];
        assert_eq!(layout["legend"]["title"]["text"], "WHO Region");
        assert_eq!(layout["yaxis"]["categoryorder"], "total ascending");
    }

    #[test]
    fn test_empty_subset_has_no_bars() {
        let dataset = Dataset::from_records(vec![Record::new("Italy", "Europe")]);
        let selection = Selection::new(Metric::Deaths, Region::who("Africa"));
        let subset = filter(&dataset, &selection.region);

        let spec = BarChart.build(&subset, &selection).unwrap();

        assert!(spec.traces().is_empty());
        assert_eq!(spec.title(), "Top 15 Countries by Deaths (Africa)");
    }
}
