use crate::mission::Mission;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

impl From<bool> for Verdict {
    fn from(correct: bool) -> Self {
        if correct {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }
}

pub fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

// "15.0" does not match "15": numbers compare as text
pub fn validate(submitted: &str, canonical: &str) -> bool {
    normalize(submitted) == normalize(canonical)
}

// Byte for byte, case included. Unlike `validate`.
pub fn matches_secret_code(submitted: &str, code: &str) -> bool {
    submitted == code
}

pub fn check(mission: &Mission, submitted: &str) -> Verdict {
    let canonical = &mission.challenge.answer;
    if mission.is_puzzle() {
        matches_secret_code(submitted, canonical).into()
    } else {
        validate(submitted, canonical).into()
    }
}
