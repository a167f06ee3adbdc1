pub const ATTEMPTS_PER_HINT: u32 = 2;

// Hint i (0-based) unlocks once attempts >= (i + 1) * 2
pub fn available_hint_count(attempts: u32, total_hints: usize) -> u32 {
    let unlocked = attempts / ATTEMPTS_PER_HINT;
    let total = u32::try_from(total_hints).unwrap_or(u32::MAX);
    unlocked.min(total)
}

pub fn should_auto_reveal(attempts: u32, total_hints: usize, shown: u32) -> bool {
    available_hint_count(attempts, total_hints) > shown
}
