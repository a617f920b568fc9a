use tracing_subscriber::EnvFilter;
use trip_planner::{
    extract_urls, filter_log_lines, plan_trip, CancelFlag, PipelineClient, PipelineConfig,
    PollOptions, TripRequest,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = PipelineConfig::from_env()?;
    let client = PipelineClient::new(&config)?;
    let request = request_from_env()?;

    println!(
        "🧳 Planning {} day(s) in {} for {} traveler(s), budget ${}",
        request.duration_days(),
        request.destination_city(),
        request.travelers,
        request.budget
    );

    let cancel = CancelFlag::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n⚠️ Cancelling, no further progress will be reported");
            ctrl_c.cancel();
        }
    });

    let seed = std::env::var("TRIP_SEED")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(rand::random::<u64>);

    let mut last_state = None;
    let mut seen_logs = 0usize;
    let plan = plan_trip(
        &client,
        &config.itinerary_pipeline_id,
        &request,
        &PollOptions::default(),
        &cancel,
        seed,
        |run| {
            if last_state != Some(run.state) {
                println!("⏳ run {} is {}", run.run_id, run.state.as_str());
                last_state = Some(run.state);
            }
            let offset = seen_logs.min(run.logs.len());
            for line in filter_log_lines(&run.logs[offset..]) {
                println!("   {}", line);
            }
            seen_logs = run.logs.len();
        },
    )
    .await?;

    if !plan.run.state.is_success() {
        eprintln!(
            "⚠️ run ended in state {}, itinerary was built from fallback data",
            plan.run.state.as_str()
        );
    }

    println!("\n✅ Itinerary for {}:", request.destination_city());
    for day in &plan.days {
        println!("\n📅 Day {} ({})", day.day, day.date);
        for activity in &day.activities {
            println!(
                "  {}  {} at {} ({})",
                activity.time, activity.title, activity.location, activity.cost
            );
        }
        println!(
            "  estimated day cost for the party: ${}",
            day.estimated_cost(request.travelers)
        );
    }

    let budget = plan.budget;
    println!(
        "\n💰 Budget split: activities ${}, accommodations ${}, food ${}, transportation ${}",
        budget.activities, budget.accommodations, budget.food, budget.transportation
    );

    if !plan.data.flight_links.is_empty() {
        println!("\n✈️ Flight links:");
        for url in &plan.data.flight_links {
            println!("  {}", url);
        }
    }
    if !plan.data.accommodation_links.is_empty() {
        println!("🏨 Accommodation links:");
        for url in &plan.data.accommodation_links {
            println!("  {}", url);
        }
    }
    let log_links = extract_urls(&plan.run.logs);
    if !log_links.is_empty() {
        println!("🔗 Links mentioned in the run log:");
        for url in &log_links {
            println!("  {}", url);
        }
    }

    Ok(())
}

fn request_from_env() -> anyhow::Result<TripRequest> {
    let interests = std::env::var("TRIP_INTERESTS")
        .map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_else(|_| vec!["Art".to_string(), "Food".to_string()]);

    Ok(TripRequest {
        destination: env_or("TRIP_DESTINATION", "Paris, France"),
        start_date: env_or("TRIP_START_DATE", "2025-03-08").parse()?,
        end_date: env_or("TRIP_END_DATE", "2025-03-12").parse()?,
        budget: env_or("TRIP_BUDGET", "2000").parse()?,
        travelers: env_or("TRIP_TRAVELERS", "2").parse()?,
        interests,
    })
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
