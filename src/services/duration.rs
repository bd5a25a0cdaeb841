//! Fight duration from the `H:MM:SS` stream timestamps on a boss record.

/// Parse an `H:MM:SS` timestamp into seconds. Hours may have any width.
pub fn parse_clock_time(value: &str) -> Option<i64> {
    let mut parts = value.trim().split(':');
    let hours = parts.next()?.parse::<i64>().ok()?;
    let minutes = parts.next()?.parse::<i64>().ok()?;
    let seconds = parts.next()?.parse::<i64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Human readable length of a fight: `"1h 21m"`, or `"30m"` under an hour.
///
/// Returns `None` when either timestamp is missing or unparseable. An end
/// before the start is not rejected and renders as negative minutes.
pub fn format_duration(start: Option<&str>, end: Option<&str>) -> Option<String> {
    let (start, end) = (start?, end?);
    if start.is_empty() || end.is_empty() {
        return None;
    }

    let (Some(start_secs), Some(end_secs)) = (parse_clock_time(start), parse_clock_time(end)) else {
        tracing::debug!("Unparseable fight timestamps: {} - {}", start, end);
        return None;
    };

    let elapsed = end_secs - start_secs;
    let hours = elapsed.div_euclid(3600);
    let minutes = (elapsed % 3600).div_euclid(60);

    if hours > 0 {
        Some(format!("{}h {}m", hours, minutes))
    } else {
        Some(format!("{}m", minutes))
    }
}
