//! Ambient sources the function library reads: time, randomness and the
//! current user.
//!
//! Each is a trait so tests can inject deterministic implementations.

use std::env;
use std::ops::RangeInclusive;

use chrono::{Local, NaiveDateTime};
use parking_lot::Mutex;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, thread_rng};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Source of randomness.
pub trait Entropy: Send + Sync {
    /// A uniformly chosen integer in the inclusive range, which is never empty.
    fn integer(&self, range: RangeInclusive<i64>) -> i64;

    /// Sixteen random bytes, used for v4 UUIDs.
    fn uuid_bytes(&self) -> [u8; 16];

    /// A string of ASCII letters and digits.
    fn alphanumeric(&self, len: usize) -> String;
}

/// Who is rendering the template.
pub trait Identity: Send + Sync {
    fn name(&self) -> String;
    fn email(&self) -> String;
}

/// The system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// The thread-local generator from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadEntropy;

impl Entropy for ThreadEntropy {
    fn integer(&self, range: RangeInclusive<i64>) -> i64 {
        thread_rng().gen_range(range)
    }

    fn uuid_bytes(&self) -> [u8; 16] {
        random_bytes(&mut thread_rng())
    }

    fn alphanumeric(&self, len: usize) -> String {
        alphanumeric(&mut thread_rng(), len)
    }
}

/// A seeded generator: the same seed yields the same sequence.
#[derive(Debug)]
pub struct SeededEntropy {
    rng: Mutex<StdRng>,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Entropy for SeededEntropy {
    fn integer(&self, range: RangeInclusive<i64>) -> i64 {
        self.rng.lock().gen_range(range)
    }

    fn uuid_bytes(&self) -> [u8; 16] {
        random_bytes(&mut *self.rng.lock())
    }

    fn alphanumeric(&self, len: usize) -> String {
        alphanumeric(&mut *self.rng.lock(), len)
    }
}

fn random_bytes(rng: &mut impl Rng) -> [u8; 16] {
    let mut bytes = [0; 16];
    rng.fill(&mut bytes);
    bytes
}

fn alphanumeric(rng: &mut impl Rng, len: usize) -> String {
    rng.sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Identity from the environment: `USER` (or `USERNAME`) and `EMAIL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvIdentity;

impl EnvIdentity {
    pub const DEFAULT_NAME: &'static str = "User";
    pub const DEFAULT_EMAIL: &'static str = "user@example.com";
}

impl Identity for EnvIdentity {
    fn name(&self) -> String {
        env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or_else(|_| Self::DEFAULT_NAME.to_string())
    }

    fn email(&self) -> String {
        env::var("EMAIL").unwrap_or_else(|_| Self::DEFAULT_EMAIL.to_string())
    }
}

/// A fixed identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    pub name: String,
    pub email: String,
}

impl StaticIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Identity for StaticIdentity {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn email(&self) -> String {
        self.email.clone()
    }
}
