const FEET_PER_METER: f64 = 3.28084;
const MILES_PER_KILOMETER: f64 = 0.621371;

pub fn approx_equal(a: f64, b: f64, decimal_precision: u8) -> bool {
    let p = 10f64.powi(-(decimal_precision as i32));
    (a - b).abs() < p
}

/// running mean of `count` values, extended by one more value
pub fn weighted_average(current: f64, count: usize, value: f64) -> f64 {
    let count = count as f64;
    current * count / (count + 1.0) + value / (count + 1.0)
}

pub fn round_to_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// reads a cell as a float, accepting numeric strings
pub fn value_as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(string) => string.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub fn value_as_i64(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(integer) => Some(integer),
            None => number.as_f64().map(|float| float as i64),
        },
        serde_json::Value::String(string) => match string.trim().parse::<i64>() {
            Ok(integer) => Some(integer),
            Err(_) => string.trim().parse::<f64>().ok().map(|float| float as i64),
        },
        _ => None,
    }
}

pub fn value_as_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(string) => Some(string.to_owned()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// non-finite floats have no JSON form, so they are stored as `null`
pub fn f64_value(value: f64) -> serde_json::Value {
    match serde_json::Number::from_f64(value) {
        Some(number) => serde_json::Value::Number(number),
        None => serde_json::Value::Null,
    }
}

pub fn utc_from_timestamp(seconds: i64) -> Option<chrono::DateTime<chrono::Utc>> {
    use chrono::TimeZone;

    match chrono::Utc.timestamp_opt(seconds, 0) {
        chrono::LocalResult::Single(date) => Some(date),
        _ => None,
    }
}

pub fn meters_feet_string(meters: f64) -> String {
    format!("{:} m ({:.2} ft)", meters, meters * FEET_PER_METER)
}

pub fn meters_per_second_string(meters_per_second: f64) -> String {
    format!(
        "{:} m/s ({:.2} ft/s)",
        meters_per_second,
        meters_per_second * FEET_PER_METER
    )
}

pub fn kilometers_per_hour_string(kilometers_per_hour: f64) -> String {
    format!(
        "{:} kph ({:.2} mph)",
        kilometers_per_hour,
        kilometers_per_hour * MILES_PER_KILOMETER
    )
}

pub fn duration_string(duration: &chrono::Duration) -> String {
    let mut parts = vec![];

    let weeks = duration.num_weeks().abs();
    let days = duration.num_days().abs() % 7;
    let hours = duration.num_hours().abs() % 24;
    let minutes = duration.num_minutes().abs() % 60;
    let seconds = duration.num_seconds().abs() % 60;

    if weeks > 0 {
        parts.push(format!("{:}w", weeks));
    }

    if days > 0 {
        parts.push(format!("{:}d", days));
    }

    if hours > 0 {
        parts.push(format!("{:}h", hours));
    }

    if minutes > 0 {
        parts.push(format!("{:}m", minutes));
    }

    if seconds > 0 {
        parts.push(format!("{:}s", seconds));
    }

    if duration < &chrono::Duration::zero() {
        parts.push("ago".to_string());
    }

    parts.join(" ")
}

pub mod optional_utc_timestamp {
    use serde::Deserialize;

    pub fn serialize<S>(
        date: &Option<chrono::DateTime<chrono::Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let Some(ref date) = *date {
            return serializer.serialize_i64(date.timestamp());
        }
        serializer.serialize_none()
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<Option<chrono::DateTime<chrono::Utc>>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let option: Option<serde_json::Value> = Option::deserialize(deserializer)?;
        match option {
            Some(serde_json::Value::Null) | None => Ok(None),
            Some(value) => match super::value_as_i64(&value) {
                Some(seconds) => match super::utc_from_timestamp(seconds) {
                    Some(date) => Ok(Some(date)),
                    None => Err(serde::de::Error::custom(format!(
                        "timestamp out of range; {:}",
                        seconds
                    ))),
                },
                None => Err(serde::de::Error::custom(format!(
                    "error parsing timestamp; {:}",
                    value
                ))),
            },
        }
    }
}
