use anyhow::Result;
use compute::{format_thousands, summarize};
use model::Region;
use std::path::Path;
use tracing::{error, info};

/// Loads the dataset and prints what the dashboard would show in its
/// summary cards.
pub fn check(data_path: &Path) -> Result<()> {
    let dataset = match model::load(data_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Dataset check failed: {}", e);
            return Err(e.into());
        }
    };
    info!("Dataset {} is valid", data_path.display());

    let summary = summarize(&dataset, &Region::Global);
    println!("{}: {} countries", data_path.display(), summary.countries);
    println!("  Confirmed  {:>14}", format_thousands(summary.confirmed));
    println!("  Deaths     {:>14}", format_thousands(summary.deaths));
    println!("  Recovered  {:>14}", format_thousands(summary.recovered));

    for region in dataset.regions() {
        let regional = summarize(&dataset, &Region::who(region.clone()));
        println!(
            "  {:<24} {:>4} countries {:>14} confirmed",
            region,
            regional.countries,
            format_thousands(regional.confirmed)
        );
    }
    Ok(())
}
