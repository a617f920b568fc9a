use std::time::Duration;

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;
use trip_planner::{
    build_inputs, filter_log_lines, poll_until_terminal, CancelFlag, PipelineApi, PipelineClient,
    PipelineConfig, PollOptions, TripRequest,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = PipelineConfig::from_env()?;
    let client = PipelineClient::new(&config)?;

    let request = TripRequest {
        destination: "Paris, France".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 3, 8).ok_or("bad start date")?,
        end_date: NaiveDate::from_ymd_opt(2025, 3, 12).ok_or("bad end date")?,
        budget: 2000,
        travelers: 2,
        interests: vec!["Art".to_string()],
    };

    let inputs = build_inputs(&request)?;
    println!("🚀 Starting itinerary pipeline with {} inputs:", inputs.len());
    for input in &inputs {
        println!("  {} = {}", input.input_name, input.value);
    }

    let run = client
        .start_run(&config.itinerary_pipeline_id, &inputs)
        .await?;
    println!("▶️ run started: {}", run.run_id);

    let options = PollOptions {
        interval: Duration::from_secs(2),
        ..Default::default()
    };
    let run = poll_until_terminal(&client, &run.run_id, &options, &CancelFlag::new(), |snapshot| {
        match serde_json::to_string_pretty(snapshot) {
            Ok(pretty) => println!("--- snapshot ---\n{}", pretty),
            Err(e) => eprintln!("snapshot serialize failed: {}", e),
        }
    })
    .await?;

    println!("\n🏁 final state: {}", run.state.as_str());
    println!("raw log lines: {}", run.logs.len());
    let visible = filter_log_lines(&run.logs);
    println!("visible log lines: {}", visible.len());
    for line in &visible {
        println!("  {}", line);
    }
    println!("\noutputs:\n{}", serde_json::to_string_pretty(&run.outputs)?);

    Ok(())
}
