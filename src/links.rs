//! Pulls booking links out of run logs. The pipeline sometimes reports
//! flight or accommodation URLs only as free text in its log, so the raw
//! lines are scanned rather than trusted to be structured.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// Distinct URLs in first-seen order, with trailing prose punctuation
/// stripped.
pub fn extract_urls(lines: &[String]) -> Vec<String> {
    let mut urls = Vec::new();
    for line in lines {
        for found in URL_RE.find_iter(line) {
            let url = found
                .as_str()
                .trim_end_matches(['.', ',', ';', ')'])
                .to_string();
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_urls_and_strips_trailing_punctuation() {
        let lines = vec![
            "book flights at https://flights.example/paris, cheap right now.".to_string(),
            "hotel shortlist (see http://stay.example/le-marais).".to_string(),
        ];

        assert_eq!(
            extract_urls(&lines),
            vec![
                "https://flights.example/paris".to_string(),
                "http://stay.example/le-marais".to_string(),
            ]
        );
    }

    #[test]
    fn test_repeated_urls_appear_once_in_first_seen_order() {
        let lines = vec![
            "first https://a.example/x then https://b.example/y".to_string(),
            "again https://a.example/x".to_string(),
        ];

        assert_eq!(
            extract_urls(&lines),
            vec![
                "https://a.example/x".to_string(),
                "https://b.example/y".to_string(),
            ]
        );
    }

    #[test]
    fn test_lines_without_urls_yield_nothing() {
        let lines = vec!["searching flights".to_string()];
        assert!(extract_urls(&lines).is_empty());
    }

    #[test]
    fn test_underscores_and_query_strings_survive() {
        let lines = vec!["deals at https://example.com/deals_today?sort=price_asc".to_string()];
        assert_eq!(
            extract_urls(&lines),
            vec!["https://example.com/deals_today?sort=price_asc".to_string()]
        );
    }
}
