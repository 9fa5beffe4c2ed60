/// Minutes in a day; offsets are compared around the clock
const MINUTES_PER_DAY: i32 = 24 * 60;

/// Largest distance two offsets can be apart once wrapped around the clock
pub const MAX_OFFSET_DISTANCE_HOURS: f64 = 12.0;

/// Largest offset in use anywhere (UTC+14:00, Line Islands)
const MAX_OFFSET_HOURS: i32 = 14;

/// Parse a timezone label into a UTC offset in minutes
///
/// Understands `UTC`, `GMT`, `Z`, prefixed offsets such as `UTC-5`,
/// `UTC+5:30`, `GMT+02:00`, and bare signed offsets (`+0530`, `-3`).
/// Region names like `Europe/Paris` are not resolved and return `None`.
pub fn parse_utc_offset(label: &str) -> Option<i32> {
    let label = label.trim().to_ascii_uppercase();

    if matches!(label.as_str(), "UTC" | "GMT" | "Z") {
        return Some(0);
    }

    let rest = label
        .strip_prefix("UTC")
        .or_else(|| label.strip_prefix("GMT"))
        .unwrap_or(&label)
        .trim();

    let (sign, body) = match rest.chars().next()? {
        '+' => (1, &rest[1..]),
        '-' => (-1, &rest[1..]),
        _ => return None,
    };
    let body = body.trim();
    if !body.chars().all(|c| c.is_ascii_digit() || c == ':') {
        return None;
    }

    // ASCII only from here on, so byte offsets are char boundaries
    let (hours, minutes) = match body.split_once(':') {
        Some((h, m)) => (h, m),
        None if body.len() > 2 => body.split_at(body.len() - 2),
        None => (body, "0"),
    };

    if hours.is_empty() || !hours.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if minutes.is_empty() || !minutes.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > MAX_OFFSET_HOURS || minutes >= 60 {
        return None;
    }

    Some(sign * (hours * 60 + minutes))
}

/// Distance in hours between two offsets, wrapped around the clock (0..=12)
#[inline]
pub fn offset_distance_hours(a_minutes: i32, b_minutes: i32) -> f64 {
    let diff = (a_minutes - b_minutes).rem_euclid(MINUTES_PER_DAY);
    let wrapped = diff.min(MINUTES_PER_DAY - diff);
    wrapped as f64 / 60.0
}

/// Closeness of two timezone labels in `[0, 1]`
///
/// Identical labels (ignoring case) are a full match. Parseable offsets decay
/// linearly with their distance, reaching zero twelve hours apart. Anything
/// else scores zero.
pub fn timezone_closeness(a: &str, b: &str) -> f64 {
    if a.trim().eq_ignore_ascii_case(b.trim()) {
        return 1.0;
    }

    match (parse_utc_offset(a), parse_utc_offset(b)) {
        (Some(a), Some(b)) => {
            let distance = offset_distance_hours(a, b);
            (1.0 - distance / MAX_OFFSET_DISTANCE_HOURS).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("UTC"), Some(0));
        assert_eq!(parse_utc_offset("gmt"), Some(0));
        assert_eq!(parse_utc_offset("UTC-5"), Some(-300));
        assert_eq!(parse_utc_offset("utc+5:30"), Some(330));
        assert_eq!(parse_utc_offset("GMT+02:00"), Some(120));
        assert_eq!(parse_utc_offset("+0530"), Some(330));
        assert_eq!(parse_utc_offset("-3"), Some(-180));
        assert_eq!(parse_utc_offset("UTC + 1"), Some(60));
    }

    #[test]
    fn test_parse_rejects_region_names_and_garbage() {
        assert_eq!(parse_utc_offset("Europe/Paris"), None);
        assert_eq!(parse_utc_offset("evenings"), None);
        assert_eq!(parse_utc_offset("5"), None);
        assert_eq!(parse_utc_offset("UTC+"), None);
        assert_eq!(parse_utc_offset("UTC+15"), None);
        assert_eq!(parse_utc_offset("UTC+5:75"), None);
    }

    #[test]
    fn test_parse_rejects_non_ascii_offsets() {
        assert_eq!(parse_utc_offset("+é1"), None);
        assert_eq!(parse_utc_offset("UTC+1é"), None);
        assert_eq!(parse_utc_offset("GMT-０５"), None);
        assert_eq!(parse_utc_offset("+12ü30"), None);
        assert_eq!(timezone_closeness("UTC", "+é1"), 0.0);
    }

    #[test]
    fn test_offset_distance_wraps() {
        assert_eq!(offset_distance_hours(-300, -300), 0.0);
        assert_eq!(offset_distance_hours(-300, 60), 6.0);
        // UTC+12 and UTC-12 share a wall clock
        assert_eq!(offset_distance_hours(720, -720), 0.0);
        assert_eq!(offset_distance_hours(840, -600), 0.0);
        assert_eq!(offset_distance_hours(0, 720), 12.0);
    }

    #[test]
    fn test_timezone_closeness() {
        assert_eq!(timezone_closeness("UTC-5", "utc-5"), 1.0);
        assert_eq!(timezone_closeness("UTC-5", "GMT-05:00"), 1.0);
        assert_eq!(timezone_closeness("UTC", "UTC+6"), 0.5);
        assert_eq!(timezone_closeness("UTC", "UTC+12"), 0.0);
        assert_eq!(timezone_closeness("Europe/Paris", "Europe/Paris"), 1.0);
        assert_eq!(timezone_closeness("Europe/Paris", "UTC+1"), 0.0);

        let near = timezone_closeness("UTC-5", "UTC-4");
        let far = timezone_closeness("UTC-5", "UTC+3");
        assert!(near > far);
    }
}
