//! Display formatting for RFC 3339 wire timestamps. String slicing only,
//! so malformed input degrades to showing the raw value.

pub fn fmt_date(timestamp: &str) -> String {
    let date = timestamp.split('T').next().unwrap_or(timestamp);
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{month}/{day}/{year}"),
        _ => timestamp.to_string(),
    }
}

pub fn fmt_datetime(timestamp: &str) -> String {
    let Some((date, rest)) = timestamp.split_once('T') else {
        return timestamp.to_string();
    };
    let time: String = rest.chars().take(5).collect();
    format!("{} {time} UTC", fmt_date(date))
}
