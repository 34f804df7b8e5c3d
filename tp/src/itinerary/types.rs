//! Itinerary wire types
//!
//! Shape returned by the model:
//! `{"itinerary": [{"day": 1, "activities": [{"time": ..., "activity": ...}], "transport"?: ..., "alternative"?: ...}]}`

use serde::{Deserialize, Serialize};

/// A full day-by-day plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub itinerary: Vec<DayPlan>,
}

/// One day of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,

    pub activities: Vec<Activity>,

    /// Suggested way of getting around that day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,

    /// Bad-weather alternative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
}

/// A time slot ("Morning", "Afternoon", ...) and what to do in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub time: String,
    pub activity: String,
}

impl Itinerary {
    pub fn days(&self) -> usize {
        self.itinerary.len()
    }
}
