//! Identifier generation with collision avoidance.
//!
//! Candidates come from a [`UidSource`] and are checked against the record
//! store until one is free. The loop is bounded; running out of attempts is a
//! `ResourceExhausted` failure rather than unbounded retrying.

use crate::error::ApiError;
use crate::store::RecordStore;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, warn};

pub const DEFAULT_MAX_ATTEMPTS: usize = 16;
const UID_BYTES: usize = 8;

/// Producer of candidate identifiers.
pub trait UidSource {
    fn next_candidate(&self) -> Result<String, ApiError>;
}

/// Operating-system randomness rendered as 16 lowercase hex characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomUidSource;

impl UidSource for RandomUidSource {
    fn next_candidate(&self) -> Result<String, ApiError> {
        let mut bytes = [0u8; UID_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| ApiError::UidGeneration(e.to_string()))?;
        Ok(hex::encode(bytes))
    }
}

/// Which record space a uid must be free in.
///
/// Preparation uids must also be free among experiments: an untyped status
/// lookup tries experiments first and would shadow a preparation sharing the uid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UidSpace {
    Experiment,
    Preparation,
}

pub struct UidGenerator<'a> {
    store: &'a dyn RecordStore,
    source: Box<dyn UidSource + 'a>,
    max_attempts: usize,
}

impl<'a> UidGenerator<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self::with_source(store, Box::new(RandomUidSource))
    }

    pub fn with_source(store: &'a dyn RecordStore, source: Box<dyn UidSource + 'a>) -> Self {
        Self {
            store,
            source,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Cap on candidates tried per call. Values below 1 are treated as 1.
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Uid not used by any experiment record.
    pub fn generate_uid(&self) -> Result<String, ApiError> {
        self.generate_in(UidSpace::Experiment)
    }

    pub fn generate_in(&self, space: UidSpace) -> Result<String, ApiError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.source.next_candidate()?;
            if !self.is_taken(space, &candidate)? {
                debug!(uid = %candidate, attempt, "generated uid");
                return Ok(candidate);
            }
            warn!(uid = %candidate, attempt, "uid collision, retrying");
        }
        Err(ApiError::ResourceExhausted(format!(
            "no free uid after {} attempts",
            self.max_attempts
        )))
    }

    fn is_taken(&self, space: UidSpace, uid: &str) -> Result<bool, ApiError> {
        let taken = match space {
            UidSpace::Experiment => self.store.query_experiment_by_uid(uid)?.is_some(),
            UidSpace::Preparation => {
                self.store.query_preparation_by_uid(uid)?.is_some()
                    || self.store.query_experiment_by_uid(uid)?.is_some()
            }
        };
        Ok(taken)
    }
}
