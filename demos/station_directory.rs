//! List every station with its coverage statistics, in both output shapes.

use hawaii_climate::{ClimateError, ClimateService, StationsResponse};

#[tokio::main]
async fn main() -> Result<(), ClimateError> {
    let service = ClimateService::new("data");

    if let StationsResponse::Json(entries) = service.stations().mode("json").call().await? {
        for entry in &entries {
            println!(
                "{}  {}  {} .. {}  (prec missing {}, temp missing {})",
                entry.station,
                entry.name,
                entry.start_date,
                entry.end_date,
                entry.prec_percent_missing,
                entry.temp_percent_missing,
            );
        }
    }

    if let StationsResponse::Html(table) = service.stations().mode("html").call().await? {
        println!("\n{table}");
    }

    Ok(())
}
