use serde::{Deserialize, Serialize};

/// One bookable hour. `value` is the 24-hour token carried in the draft,
/// `label` its 12-hour display form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub label: String,
    pub value: String,
    pub available: bool,
}

impl TimeSlot {
    pub fn on_the_hour(hour: u32, available: bool) -> Self {
        Self {
            label: twelve_hour_label(hour),
            value: format!("{hour:02}:00"),
            available,
        }
    }
}

/// Hour component of a `HH:MM` token.
pub fn parse_hour(value: &str) -> Option<u32> {
    let (hour, minute) = value.split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour)
}

/// Renders a `HH:MM` slot token on the hour in 12-hour form, e.g. `"14:00"` -> `"2:00 PM"`.
pub fn format_time_slot(value: &str) -> Option<String> {
    parse_hour(value).map(twelve_hour_label)
}

fn twelve_hour_label(hour: u32) -> String {
    match hour {
        0 => "12:00 AM".to_string(),
        h if h < 12 => format!("{h}:00 AM"),
        12 => "12:00 PM".to_string(),
        h => format!("{}:00 PM", h - 12),
    }
}
