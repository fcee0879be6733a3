//! Ordered batches of calldata and their text output.

use std::fmt;
use std::io::{self, Write};

use alloy_primitives::{hex, Bytes};

use crate::error::CallResult;

/// What a batch does with a record that fails to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Stop at the first failure.
    #[default]
    AbortOnError,
    /// Log the failure and continue.
    SkipInvalid,
}

/// Calldata for a sequence of records, in input order.
#[derive(Debug, Clone, Default)]
pub struct CallBatch {
    policy: BatchPolicy,
    calls: Vec<Bytes>,
    skipped: usize,
}

impl CallBatch {
    #[must_use]
    pub const fn new(policy: BatchPolicy) -> Self {
        Self {
            policy,
            calls: Vec::new(),
            skipped: 0,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> BatchPolicy {
        self.policy
    }

    /// Appends a call.
    pub fn push(&mut self, call: Bytes) {
        self.calls.push(call);
    }

    /// Appends the outcome of building one record.
    ///
    /// Under [`BatchPolicy::SkipInvalid`] a failure is logged with `record`
    /// and dropped.
    ///
    /// # Errors
    ///
    /// Returns the build error under [`BatchPolicy::AbortOnError`].
    pub fn try_push(&mut self, record: impl fmt::Display, result: CallResult<Bytes>) -> CallResult<()> {
        match (result, self.policy) {
            (Ok(call), _) => {
                self.calls.push(call);
                Ok(())
            }
            (Err(err), BatchPolicy::SkipInvalid) => {
                tracing::warn!(record = %record, error = %err, "skipping record");
                self.skipped += 1;
                Ok(())
            }
            (Err(err), BatchPolicy::AbortOnError) => Err(err),
        }
    }

    #[must_use]
    pub fn calls(&self) -> &[Bytes] {
        &self.calls
    }

    #[must_use]
    pub fn into_calls(self) -> Vec<Bytes> {
        self.calls
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Number of records dropped under [`BatchPolicy::SkipInvalid`].
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Writes one lowercase hex line per call, without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns any error from `writer`.
    pub fn write_hex_lines<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for call in &self.calls {
            writeln!(writer, "{}", hex::encode(call))?;
        }
        writer.flush()
    }
}

impl Extend<Bytes> for CallBatch {
    fn extend<I: IntoIterator<Item = Bytes>>(&mut self, iter: I) {
        self.calls.extend(iter);
    }
}
