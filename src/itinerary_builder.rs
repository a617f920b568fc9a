//! Builds day-by-day itineraries from normalized pipeline data.
//!
//! Synthesis is deterministic for a given seed: the same request, data and
//! seed always produce the same plan, which keeps itineraries stable across
//! re-renders and reproducible in tests.

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::normalizer::NormalizedItineraryData;
use crate::trip::TripRequest;

/// Generic activity pool used when a run produced no sights and no
/// activities, so an itinerary always has content.
const FALLBACK_ACTIVITIES: [&str; 14] = [
    "Museum Visit",
    "Historical Tour",
    "Local Food Tasting",
    "City Walking Tour",
    "Shopping Trip",
    "Cultural Experience",
    "Beach Day",
    "Nature Hike",
    "Boat Tour",
    "Wine Tasting",
    "Art Gallery",
    "Local Market",
    "Scenic Viewpoint",
    "Landmark Visit",
];

const ACTIVITY_IMAGES: [&str; 7] = [
    "https://images.unsplash.com/photo-1499856871958-5b9627545d1a?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1514890547357-a9ee288728e0?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1526668665780-9a397bd45320?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1533929736458-ca588d08c8be?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1462400362591-9ca55235346a?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1504607798333-52a30db54a5d?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1507369632363-a0b8cfbfb290?auto=format&fit=crop&w=800&q=80",
];

/// One scheduled activity, display-ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedActivity {
    pub title: String,
    pub description: String,
    pub location: String,
    /// Display window, e.g. `8:00 - 10:00`.
    pub time: String,
    /// Per-person price tag, e.g. `$42`.
    pub cost: String,
    pub image: String,
}

/// One day of the itinerary. `day` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    pub date: NaiveDate,
    pub activities: Vec<PlannedActivity>,
}

impl DayPlan {
    /// Total cost of the day's activities for the whole party, read back
    /// from the `$n` price tags.
    pub fn estimated_cost(&self, travelers: u32) -> u32 {
        let per_person: u32 = self
            .activities
            .iter()
            .map(|a| a.cost.trim_start_matches('$').parse::<u32>().unwrap_or(0))
            .sum();
        per_person * travelers
    }
}

/// Synthesize a full itinerary for the trip.
///
/// Sights are preferred as the activity pool, then activities, then the
/// builtin fallback. The pool is spread over the whole trip (at least two
/// activities per day) and indexing wraps around, so short pools repeat
/// rather than leaving days empty.
pub fn synthesize(
    request: &TripRequest,
    data: &NormalizedItineraryData,
    seed: u64,
) -> Vec<DayPlan> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let fallback: Vec<String>;
    let pool: &[String] = if !data.sights.is_empty() {
        &data.sights
    } else if !data.activities.is_empty() {
        &data.activities
    } else {
        fallback = FALLBACK_ACTIVITIES.iter().map(|s| s.to_string()).collect();
        &fallback
    };

    let duration = request.duration_days();
    let per_day = (pool.len() as u32).div_ceil(duration).max(2);
    let city = request.destination_city();

    let mut days = Vec::with_capacity(duration as usize);
    let mut cursor = 0usize;

    for i in 0..duration {
        let mut activities = Vec::with_capacity(per_day as usize);
        for j in 0..per_day {
            let title = &pool[cursor % pool.len()];
            cursor += 1;

            let start_hour = 8 + 3 * j;
            activities.push(PlannedActivity {
                title: title.clone(),
                description: format!(
                    "Experience the amazing {} in {}. This is one of the must-do activities during your stay.",
                    title.to_lowercase(),
                    city
                ),
                location: format!("{} {} Center", city, title),
                time: format!("{}:00 - {}:00", start_hour, start_hour + 2),
                cost: format!("${}", rng.random_range(20..70)),
                image: ACTIVITY_IMAGES[rng.random_range(0..ACTIVITY_IMAGES.len())].to_string(),
            });
        }

        days.push(DayPlan {
            day: i + 1,
            date: request.start_date + chrono::Duration::days(i as i64),
            activities,
        });
    }

    days
}
