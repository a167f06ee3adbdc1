use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        SessionToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait Authenticator {
    fn authenticate(&mut self) -> Result<SessionToken, AuthError>;
}

/// Issues a random anonymous token. The first token is reused for the
/// lifetime of the authenticator.
pub struct AnonymousAuthenticator {
    rng: StdRng,
    current: Option<SessionToken>,
}

impl AnonymousAuthenticator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        AnonymousAuthenticator { rng, current: None }
    }
}

impl Default for AnonymousAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl Authenticator for AnonymousAuthenticator {
    fn authenticate(&mut self) -> Result<SessionToken, AuthError> {
        if let Some(token) = &self.current {
            return Ok(token.clone());
        }
        let token = SessionToken(format!("anon-{:032x}", self.rng.gen::<u128>()));
        log::debug!("[AUTH] anonymous sign-in token:{}", token);
        self.current = Some(token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_token_is_stable() {
        let mut auth = AnonymousAuthenticator::with_rng(StdRng::seed_from_u64(9));
        let first = auth.authenticate().unwrap();
        let again = auth.authenticate().unwrap();
        assert_eq!(first, again);
        assert!(first.as_str().starts_with("anon-"));
        assert_eq!(first.as_str().len(), "anon-".len() + 32);
    }
}
