//! Display-label helpers for surf seasons.

const ALL_YEAR_ROUND: &str = "All year round";

/// Maps a season token ("1".."12" or "All year round") to its display name.
/// Unknown tokens pass through unchanged.
pub fn month_name(token: &str) -> &str {
    match token {
        "1" => "January",
        "2" => "February",
        "3" => "March",
        "4" => "April",
        "5" => "May",
        "6" => "June",
        "7" => "July",
        "8" => "August",
        "9" => "September",
        "10" => "October",
        "11" => "November",
        "12" => "December",
        ALL_YEAR_ROUND => ALL_YEAR_ROUND,
        other => other,
    }
}

/// Joins items as "a", "a and b" or "a, b and c".
pub fn join_with_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    }
}

/// Human-readable label for a spot's surf season token list.
pub fn season_label(tokens: &[String]) -> String {
    let names: Vec<String> = tokens
        .iter()
        .map(|token| month_name(token).to_string())
        .collect();
    join_with_and(&names)
}
