//! Parsing of raw command line values: comma lists, workflow enums,
//! month selectors and due dates.

use chrono::NaiveDate;
use regex::Regex;

use crate::errors::AppError;
use crate::models::{TaskPriority, TaskPrivacy, TaskStatus};

/// Split a comma separated list, trimming items and dropping empty ones.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_status_list(input: &str) -> Result<Vec<TaskStatus>, AppError> {
    parse_list(input)
        .into_iter()
        .map(|item| item.parse::<TaskStatus>().map_err(AppError::Validation))
        .collect()
}

pub fn parse_priority_list(input: &str) -> Result<Vec<TaskPriority>, AppError> {
    parse_list(input)
        .into_iter()
        .map(|item| item.parse::<TaskPriority>().map_err(AppError::Validation))
        .collect()
}

pub fn parse_privacy_list(input: &str) -> Result<Vec<TaskPrivacy>, AppError> {
    parse_list(input)
        .into_iter()
        .map(|item| item.parse::<TaskPrivacy>().map_err(AppError::Validation))
        .collect()
}

/// A month selector is the year-month prefix of an ISO date.
pub fn parse_month(input: &str) -> Result<String, AppError> {
    let month_re = Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").unwrap();

    let trimmed = input.trim();
    if month_re.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(AppError::Validation(format!(
            "Months are written as YYYY-MM, got '{input}'"
        )))
    }
}

pub fn parse_due(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!("Due dates are written as YYYY-MM-DD, got '{input}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_drops_empty_items() {
        let result = parse_list("enzo, mirella,,  lucas ");
        assert_eq!(result, vec!["enzo", "mirella", "lucas"]);
    }

    #[test]
    fn test_parse_list_of_nothing_is_empty() {
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ,").is_empty());
    }

    #[test]
    fn test_parse_status_list_accepts_wire_names() {
        let result = parse_status_list("pending,in-progress, review").unwrap();
        assert_eq!(
            result,
            vec![TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Review]
        );
    }

    #[test]
    fn test_parse_status_list_rejects_unknown_names() {
        let err = parse_status_list("pending,done").unwrap_err();
        assert_eq!(err, AppError::Validation("unknown status 'done'".to_string()));
    }

    #[test]
    fn test_parse_priority_list() {
        let result = parse_priority_list("high, low").unwrap();
        assert_eq!(result, vec![TaskPriority::High, TaskPriority::Low]);
        assert!(parse_priority_list("urgent").is_err());
    }

    #[test]
    fn test_parse_privacy_list() {
        let result = parse_privacy_list("private,general").unwrap();
        assert_eq!(result, vec![TaskPrivacy::Private, TaskPrivacy::General]);
        assert!(parse_privacy_list("secret").is_err());
    }

    #[test]
    fn test_parse_month_accepts_year_month() {
        assert_eq!(parse_month("2024-06").unwrap(), "2024-06");
        assert_eq!(parse_month(" 2024-12 ").unwrap(), "2024-12");
    }

    #[test]
    fn test_parse_month_rejects_malformed_input() {
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024-6").is_err());
        assert!(parse_month("2024-06-15").is_err());
        assert!(parse_month("june").is_err());
        assert!(parse_month("").is_err());
    }

    #[test]
    fn test_parse_due_accepts_iso_dates() {
        let due = parse_due("2024-06-15").unwrap();
        assert_eq!(due, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(parse_due(" 2024-01-02 ").unwrap().to_string(), "2024-01-02");
    }

    #[test]
    fn test_parse_due_rejects_impossible_dates() {
        assert!(parse_due("2024-02-30").is_err());
        assert!(parse_due("15/06/2024").is_err());
        assert!(parse_due("soon").is_err());
    }
}
