//! Time-of-day, season and weather derived from the calendar

use crate::types::{Context, Season, TimeOfDay, Weather};
use chrono::{Datelike, Local, Timelike};

impl Context {
    /// Resolve context from the local clock
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn at<T: Datelike + Timelike>(moment: &T) -> Self {
        Self::resolve(moment.hour(), moment.month())
    }

    /// Pure rule table over hour (0-23) and month (1-12)
    pub fn resolve(hour: u32, month: u32) -> Self {
        let time_of_day = match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        };

        let (season, weather) = match month {
            12 | 1 | 2 => (Season::Winter, Weather::Cold),
            3..=5 => (Season::Summer, Weather::Hot),
            6..=9 => (Season::Monsoon, Weather::Humid),
            _ => (Season::Autumn, Weather::Pleasant),
        };

        Self::new(time_of_day, season, weather)
    }

    /// Build a context, deriving `needs_layer` from season and weather
    pub fn new(time_of_day: TimeOfDay, season: Season, weather: Weather) -> Self {
        let needs_layer = matches!(weather, Weather::Cold | Weather::Rainy)
            || matches!(season, Season::Winter | Season::Monsoon);
        Self {
            time_of_day,
            season,
            weather,
            needs_layer,
        }
    }
}
