#[must_use]
pub fn format_duration(minutes: u32) -> String {
    format!("{minutes} min")
}

#[must_use]
pub fn format_lesson_meta(level: &str, minutes: u32) -> String {
    format!("{level} · {}", format_duration(minutes))
}

#[must_use]
pub fn format_progress(percent: u8) -> String {
    format!("{percent}% answered")
}
