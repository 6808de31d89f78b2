/// Today's date in Chile (fixed UTC-4 offset)
pub fn today_cl() -> chrono::NaiveDate {
    (chrono::Utc::now() - chrono::Duration::hours(4)).date_naive()
}

/// Keep ASCII digits only
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}
