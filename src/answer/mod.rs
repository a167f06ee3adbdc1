pub mod checker;

pub use checker::{check, matches_secret_code, normalize, validate, Verdict};
