//! Russian noun agreement for commit counts

/// "коммит" (1, 21, 101, ...)
pub const ONE: &str = "коммит";
/// "коммита" (2-4, 22-24, ...)
pub const FEW: &str = "коммита";
/// "коммитов" (0, 5-20, 25-30, ...)
pub const MANY: &str = "коммитов";

/// Word form of "commit" agreeing with `count`
pub fn pluralize(count: u64) -> &'static str {
    let last = count % 10;
    let last_two = count % 100;

    if last == 1 && last_two != 11 {
        ONE
    } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
        FEW
    } else {
        MANY
    }
}

/// Count followed by its agreeing noun, e.g. "5 коммитов"
pub fn format_count(count: u64) -> String {
    format!("{} {}", count, pluralize(count))
}
