//! Query precipitation statistics for one station and print the JSON shape.

use hawaii_climate::{ClimateError, ClimateService};

#[tokio::main]
async fn main() -> Result<(), ClimateError> {
    let service = ClimateService::new("data");

    let response = service
        .precipitation()
        .qtype("stats")
        .station("USC00519397")
        .from_date("2012-01-01")
        .to_date("2012-12-31")
        .call()
        .await?;

    println!("{}", serde_json::to_string_pretty(&response).unwrap());
    Ok(())
}
