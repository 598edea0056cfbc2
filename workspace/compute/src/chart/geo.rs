use model::Selection;
use plotly::common::{ColorScale, ColorScalePalette, Marker};
use plotly::{Plot, Trace};
use serde::Serialize;

use super::{base_layout, bubble_sizes, BuilderError, ChartBuilder, ChartKind, ChartSpec};
use crate::filter::Subset;

/// Largest marker diameter in pixels on the map.
const MAP_SIZE_MAX: f64 = 20.0;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum GeoTraceType {
    ScatterGeo,
}

#[derive(Debug, Clone, Copy, Serialize)]
enum LocationMode {
    #[serde(rename = "country names")]
    CountryNames,
}

#[derive(Debug, Clone, Copy, Serialize)]
enum ProjectionType {
    #[serde(rename = "natural earth")]
    NaturalEarth,
}

/// Markers placed on a world map by location name.
#[derive(Debug, Clone, Serialize)]
struct ScatterGeo {
    #[serde(rename = "type")]
    trace_type: GeoTraceType,
    name: String,
    locations: Vec<String>,
    #[serde(rename = "locationmode")]
    location_mode: LocationMode,
    #[serde(rename = "hovertext")]
    hover_text: Vec<String>,
    marker: Marker,
}

impl Trace for ScatterGeo {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Projection {
    #[serde(rename = "type")]
    projection_type: ProjectionType,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GeoLayout {
    projection: Projection,
    #[serde(rename = "showcountries")]
    show_countries: bool,
}

/// Countries placed on a world map by name, sized and coloured by the metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoScatterChart;

impl ChartBuilder for GeoScatterChart {
    fn kind(&self) -> ChartKind {
        ChartKind::GeoScatter
    }

    fn build(&self, subset: &Subset<'_>, selection: &Selection) -> Result<ChartSpec, BuilderError> {
        let metric = selection.metric;
        let values: Vec<i64> = subset.iter().map(|r| r.value(metric)).collect();
        let countries: Vec<String> = subset.iter().map(|r| r.country.clone()).collect();

        let marker = Marker::new()
            .size_array(bubble_sizes(&values, MAP_SIZE_MAX))
            .color_array(values.iter().map(|&v| v as f64).collect())
            .color_scale(ColorScale::Palette(ColorScalePalette::Viridis))
            .show_scale(true);

        let mut plot = Plot::new();
        plot.add_trace(Box::new(ScatterGeo {
            trace_type: GeoTraceType::ScatterGeo,
            name: metric.to_string(),
            locations: countries.clone(),
            location_mode: LocationMode::CountryNames,
            hover_text: countries,
            marker,
        }));
        plot.set_layout(base_layout(&format!(
            "Geographic Distribution of {} ({})",
            metric, selection.region
        )));

        ChartSpec::from_plot(ChartKind::GeoScatter, &plot)?.with_layout(
            "geo",
            GeoLayout {
                projection: Projection {
                    projection_type: ProjectionType::NaturalEarth,
                },
                show_countries: true,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;
    use model::{Dataset, Metric, Record, Region};
    use serde_json::json;

    #[test]
    fn test_locations_by_country_name() {
        let dataset = Dataset::from_records(vec![
            Record::new("India", "South-East Asia").with(Metric::Active, 40000),
            Record::new("Nepal", "South-East Asia").with(Metric::Active, 10000),
        ]);
        let selection = Selection::new(Metric::Active, Region::who("South-East Asia"));
        let subset = filter(&dataset, &selection.region);

        let spec = GeoScatterChart.build(&subset, &selection).unwrap();

        let trace = &spec.traces()[0];
        assert_eq!(trace["type"], "scattergeo");
        assert_eq!(trace["locations"], json!(["India", "Nepal"]));
        assert_eq!(trace["locationmode"], "country names");
        assert_eq!(trace["marker"]["size"], json!([20, 10]));
        assert_eq!(trace["marker"]["color"], json!([40000.0, 10000.0]));
        assert_eq!(trace["marker"]["showscale"], true);
        assert_eq!(spec.point_count(), 2);

        let geo = &spec.figure["layout"]["geo"];
        assert_eq!(geo["projection"]["type"], "natural earth");
        assert_eq!(geo["showcountries"], true);
        assert_eq!(
            spec.title(),
            "Geographic Distribution of Active (South-East Asia)"
        );
    }

    #[test]
    fn test_empty_subset_keeps_map_layout() {
        let dataset = Dataset::from_records(vec![Record::new("Chad", "Africa")]);
        let selection = Selection::new(Metric::Active, Region::who("Europe"));
        let subset = filter(&dataset, &selection.region);

        let spec = GeoScatterChart.build(&subset, &selection).unwrap();

        assert!(spec.is_empty());
        assert_eq!(spec.figure["layout"]["geo"]["showcountries"], true);
    }
}
