//! Meal Model

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A named serving period (Breakfast, Lunch, ...)
///
/// `required` meals always get a row in the weekly grid; the others only
/// show up in the special menu when something is served under them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Meal {
    pub id: i64,
    pub title: String,
    pub starttime: NaiveTime,
    pub endtime: NaiveTime,
    pub required: bool,
}

impl Meal {
    /// `"Lunch (11:30 am - 1:00 pm)"`
    pub fn header(&self) -> String {
        format!(
            "{} ({} - {})",
            self.title,
            self.starttime.format("%-I:%M %P"),
            self.endtime.format("%-I:%M %P")
        )
    }

    /// Placeholder shown in a cell without dishes
    pub fn empty_label(&self) -> String {
        format!("No {}", self.title.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> Meal {
        Meal {
            id: 2,
            title: "Lunch".into(),
            starttime: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            endtime: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            required: true,
        }
    }

    #[test]
    fn test_header() {
        assert_eq!(lunch().header(), "Lunch (11:30 am - 1:00 pm)");
    }

    #[test]
    fn test_empty_label() {
        assert_eq!(lunch().empty_label(), "No lunch");
    }

    #[test]
    fn test_time_wire_format() {
        let json = serde_json::to_value(lunch()).unwrap();
        assert_eq!(json["starttime"], "11:30:00");
        let back: Meal = serde_json::from_value(json).unwrap();
        assert_eq!(back, lunch());
    }
}
