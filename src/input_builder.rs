//! Converts a trip request into the ordered, string-typed input list the
//! pipeline's start endpoint expects.

use chrono::{Datelike, NaiveDate};

use crate::error::Result;
use crate::schema::PipelineInput;
use crate::trip::TripRequest;

/// Build the six pipeline inputs, in the order the pipeline declares them.
/// Validates the request first so a bad request never reaches the network.
pub fn build_inputs(request: &TripRequest) -> Result<Vec<PipelineInput>> {
    request.validate()?;

    let interest = if request.interests.is_empty() {
        "anything".to_string()
    } else {
        request.interests.join(", ")
    };

    Ok(vec![
        PipelineInput::new("destination", request.destination_city()),
        PipelineInput::new("budget", request.budget.to_string()),
        PipelineInput::new("interest", interest),
        PipelineInput::new("num_travelers", request.travelers.to_string()),
        PipelineInput::new("start_date", format_trip_date(request.start_date)),
        PipelineInput::new("end_date", format_trip_date(request.end_date)),
    ])
}

/// "March 8th": long month name plus ordinal day, no year.
pub fn format_trip_date(date: NaiveDate) -> String {
    format!("{} {}", date.format("%B"), ordinal_day(date.day()))
}

fn ordinal_day(day: u32) -> String {
    let suffix = match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{day}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    fn request() -> TripRequest {
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
    fn test_six_inputs_in_declared_order() {
        let inputs = build_inputs(&request()).unwrap();
        let names: Vec<&str> = inputs.iter().map(|i| i.input_name.as_str()).collect();
        assert_eq!(
            names,
            [
                "destination",
                "budget",
                "interest",
                "num_travelers",
                "start_date",
                "end_date"
            ]
        );
    }

    #[test]
    fn test_paris_art_scenario() {
        let inputs = build_inputs(&request()).unwrap();
        assert_eq!(inputs[0].value, "Paris");
        assert!(!inputs[0].value.contains(','));
        assert_eq!(inputs[1].value, "2000");
        assert_eq!(inputs[2].value, "Art");
        assert_eq!(inputs[3].value, "2");
        assert_eq!(inputs[4].value, "March 8th");
        assert_eq!(inputs[5].value, "March 12th");
    }

    #[test]
    fn test_empty_interests_fall_back_to_anything() {
        let mut req = request();
        req.interests.clear();
        let inputs = build_inputs(&req).unwrap();
        assert_eq!(inputs[2].value, "anything");
    }

    #[test]
    fn test_interests_joined_with_comma_space() {
        let mut req = request();
        req.interests = vec!["Art".to_string(), "Food & Dining".to_string()];
        let inputs = build_inputs(&req).unwrap();
        assert_eq!(inputs[2].value, "Art, Food & Dining");
    }

    #[test]
    fn test_invalid_request_never_builds() {
        let mut req = request();
        req.destination = " ".to_string();
        assert!(matches!(
            build_inputs(&req),
            Err(PipelineError::Validation(_))
        ));
    }

    #[test]
    fn test_ordinal_days() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (31, "31st"),
        ];
        for (day, expected) in cases {
            assert_eq!(ordinal_day(day), expected);
        }
    }

    #[test]
    fn test_trip_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 21).unwrap();
        assert_eq!(format_trip_date(date), "December 21st");
    }
}
