use chrono::{Duration, Utc};
use fittrack_client::{Config, ReqwestProgressClient, fetch_and_aggregate};
use fittrack_engine::{MuscleGroupTable, Window, series};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Expects FITTRACK_API_TOKEN and FITTRACK_USER_ID in env
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let client = ReqwestProgressClient::from_config(&cfg);

    let start = Utc::now().date_naive() - Duration::days(6);
    let window = Window::new(start, 7);
    let result = fetch_and_aggregate(&client, window, &MuscleGroupTable::builtin()).await?;

    for day in &result.daily {
        println!(
            "{}: {} workouts, {:.0} min",
            day.date, day.workout_count, day.total_duration_minutes
        );
    }
    for entry in series::exercise_ranking(&result) {
        println!("{}: {:.1} kg total", entry.name, entry.value);
    }
    Ok(())
}
