use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One day of the academic calendar, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub date: DateTime<Utc>,
    pub holidays: Option<String>,
    pub examination: Option<String>,
    pub academic_activities: Option<String>,
    pub extra_curricular_activities: Option<String>,
    pub special_days_jayantis: Option<String>,
}

/// Trims a free-text cell, mapping blank input to `None`
pub fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(None), None);
        assert_eq!(clean_text(Some("   ".to_string())), None);
        assert_eq!(
            clean_text(Some("  Diwali \n".to_string())),
            Some("Diwali".to_string())
        );
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = EventRecord {
            date: Utc.with_ymd_and_hms(2025, 1, 26, 0, 0, 0).unwrap(),
            holidays: Some("Republic Day".to_string()),
            examination: None,
            academic_activities: None,
            extra_curricular_activities: None,
            special_days_jayantis: Some("Flag hoisting".to_string()),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["holidays"], "Republic Day");
        assert_eq!(json["specialDaysJayantis"], "Flag hoisting");
        assert!(json["academicActivities"].is_null());
        assert_eq!(json["date"], "2025-01-26T00:00:00Z");
    }
}
