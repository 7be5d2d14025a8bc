//! Collision-free key generation for duplicated templates.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use super::category::TEMPLATES_DIR;

/// Length of the random segment inserted into generated keys.
pub const KEY_SUFFIX_LEN: usize = 10;

/// Symbols the random segment is drawn from.
pub const KEY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Extension given to generated template keys.
pub const TEMPLATE_EXTENSION: &str = ".liquid";

/// Source of uniform indices used to build random key segments.
///
/// Injected into the generator so callers can substitute a deterministic
/// sequence. Does not need to be cryptographically secure.
pub trait RandomSource: Send {
    /// Return an index uniformly drawn from `0..upper`. `upper` is never zero.
    fn pick(&mut self, upper: usize) -> usize;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn pick(&mut self, upper: usize) -> usize {
        self.0.gen_range(0..upper)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyGenError {
    #[error("no free template key found after {attempts} attempt(s)")]
    ExhaustedKeyspace { attempts: u32 },
}

/// Build a [`KEY_SUFFIX_LEN`]-character segment from [`KEY_ALPHABET`].
pub fn random_suffix(rng: &mut dyn RandomSource) -> String {
    (0..KEY_SUFFIX_LEN)
        .map(|_| KEY_ALPHABET[rng.pick(KEY_ALPHABET.len())] as char)
        .collect()
}

/// Format a candidate key: `templates/<token>.<suffix>.liquid`.
pub fn candidate_key(token: &str, suffix: &str) -> String {
    format!("{TEMPLATES_DIR}{token}.{suffix}{TEMPLATE_EXTENSION}")
}

/// Generates keys that are absent from a snapshot of existing keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyGenerator {
    /// Give up after this many colliding candidates. `None` keeps drawing
    /// until a free key turns up.
    max_attempts: Option<u32>,
}

impl KeyGenerator {
    /// A cap of zero is raised to one: at least one candidate is always drawn.
    pub fn new(max_attempts: Option<u32>) -> Self {
        Self {
            max_attempts: max_attempts.map(|max| max.max(1)),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Draw candidates for `token` until one is not contained in `existing`.
    ///
    /// Uniqueness holds only against the snapshot passed in; concurrent
    /// creators of the same key are not detected.
    pub fn generate<'a, I>(
        &self,
        token: &str,
        existing: I,
        rng: &mut dyn RandomSource,
    ) -> Result<String, KeyGenError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let taken: HashSet<&str> = existing.into_iter().collect();
        let mut collisions: u32 = 0;

        loop {
            let candidate = candidate_key(token, &random_suffix(rng));
            if !taken.contains(candidate.as_str()) {
                debug!(
                    "Generated template key {} after {} collision(s)",
                    candidate, collisions
                );
                return Ok(candidate);
            }

            collisions = collisions.saturating_add(1);
            debug!("Template key {} already exists; drawing again", candidate);

            if let Some(max) = self.max_attempts {
                if collisions >= max {
                    return Err(KeyGenError::ExhaustedKeyspace { attempts: collisions });
                }
            }
        }
    }
}

/// Deterministic [`RandomSource`] replaying a fixed sequence of indices.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    picks: Vec<usize>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(picks: Vec<usize>) -> Self {
        Self { picks, cursor: 0 }
    }

    /// Indices that spell `suffix` in [`KEY_ALPHABET`].
    pub(crate) fn spelling(suffixes: &[&str]) -> Self {
        let picks = suffixes
            .iter()
            .flat_map(|s| s.bytes())
            .map(|b| {
                KEY_ALPHABET
                    .iter()
                    .position(|&a| a == b)
                    .expect("suffix uses alphabet symbols")
            })
            .collect();
        Self::new(picks)
    }

    pub(crate) fn consumed(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn pick(&mut self, upper: usize) -> usize {
        let value = self.picks[self.cursor % self.picks.len()] % upper;
        self.cursor += 1;
        value
    }
}
