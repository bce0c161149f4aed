//! Time and randomness sources injected into the session store

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::domain::entities::challenge::CODE_SPACE;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of one-time code values
pub trait CodeGenerator: Send + Sync {
    /// Returns a value in `0..1_000_000`; values outside are reduced modulo the code space
    fn next_code(&self) -> u32;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Uniform codes drawn from the OS-provided CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn next_code(&self) -> u32 {
        OsRng.gen_range(0..CODE_SPACE)
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = *now + by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Yields queued codes in order, then counts upward from the last one
#[derive(Debug)]
pub struct SequenceCodeGenerator {
    queued: Mutex<VecDeque<u32>>,
    next: Mutex<u32>,
}

impl SequenceCodeGenerator {
    pub fn new(codes: impl IntoIterator<Item = u32>) -> Self {
        let queued: VecDeque<u32> = codes.into_iter().collect();
        let next = queued.back().map(|last| last.wrapping_add(1)).unwrap_or(0);
        Self {
            queued: Mutex::new(queued),
            next: Mutex::new(next),
        }
    }
}

impl CodeGenerator for SequenceCodeGenerator {
    fn next_code(&self) -> u32 {
        if let Some(code) = self
            .queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
        {
            return code;
        }
        let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let code = *next % CODE_SPACE;
        *next = next.wrapping_add(1);
        code
    }
}
