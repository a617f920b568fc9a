//! Domain request types: what the traveler asked for, validated before
//! anything touches the network.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// Free-text location, optionally "City, Country".
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Currency-agnostic total.
    pub budget: u32,
    pub travelers: u32,
    /// Free-text tags, may be empty.
    pub interests: Vec<String>,
}

impl TripRequest {
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            return Err(PipelineError::Validation(
                "destination must not be empty".to_string(),
            ));
        }
        if self.end_date < self.start_date {
            return Err(PipelineError::Validation(
                "end date is before start date".to_string(),
            ));
        }
        if self.travelers == 0 {
            return Err(PipelineError::Validation(
                "travelers must be at least 1".to_string(),
            ));
        }
        if self.budget == 0 {
            return Err(PipelineError::Validation(
                "budget must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Inclusive trip length; a same-day trip is 1 day.
    pub fn duration_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days().max(0);
        days as u32 + 1
    }

    /// The city part of a "City, Country" destination.
    pub fn destination_city(&self) -> &str {
        self.destination
            .split(',')
            .next()
            .unwrap_or(&self.destination)
            .trim()
    }
}

/// Rough allocation of the trip budget across spend categories, as shown
/// in the cost summary: 30% activities, 40% accommodations, 20% food,
/// 10% transportation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub activities: u32,
    pub accommodations: u32,
    pub food: u32,
    pub transportation: u32,
}

impl BudgetBreakdown {
    /// Transportation takes the integer-division remainder so the parts
    /// always sum back to the total.
    pub fn from_total(total: u32) -> Self {
        let activities = (total as u64 * 30 / 100) as u32;
        let accommodations = (total as u64 * 40 / 100) as u32;
        let food = (total as u64 * 20 / 100) as u32;
        Self {
            activities,
            accommodations,
            food,
            transportation: total - activities - accommodations - food,
        }
    }

    pub fn total(&self) -> u32 {
        self.activities + self.accommodations + self.food + self.transportation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> TripRequest {
        TripRequest {
            destination: "Paris, France".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
            budget: 2000,
            travelers: 2,
            interests: vec!["Art".to_string()],
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn test_blank_destination_rejected() {
        let mut req = sample_request();
        req.destination = "   ".to_string();
        assert!(matches!(
            req.validate(),
            Err(PipelineError::Validation(_))
        ));
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let mut req = sample_request();
        req.end_date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_zero_travelers_and_budget_rejected() {
        let mut req = sample_request();
        req.travelers = 0;
        assert!(req.validate().is_err());

        let mut req = sample_request();
        req.budget = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_duration_is_inclusive() {
        let mut req = sample_request();
        assert_eq!(req.duration_days(), 5);

        req.end_date = req.start_date;
        assert_eq!(req.duration_days(), 1);
    }

    #[test]
    fn test_destination_city() {
        let mut req = sample_request();
        assert_eq!(req.destination_city(), "Paris");

        req.destination = "Tokyo".to_string();
        assert_eq!(req.destination_city(), "Tokyo");

        req.destination = "  Bali , Indonesia".to_string();
        assert_eq!(req.destination_city(), "Bali");
    }

    #[test]
    fn test_budget_breakdown_split() {
        let split = BudgetBreakdown::from_total(2000);
        assert_eq!(split.activities, 600);
        assert_eq!(split.accommodations, 800);
        assert_eq!(split.food, 400);
        assert_eq!(split.transportation, 200);
    }

    #[test]
    fn test_budget_breakdown_sums_to_total() {
        for total in [1, 7, 99, 999, 2000, 123_456] {
            assert_eq!(BudgetBreakdown::from_total(total).total(), total);
        }
    }
}
