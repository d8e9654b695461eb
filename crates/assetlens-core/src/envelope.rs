//! JSON envelope wrapped around every CLI response.
//!
//! Failures never produce an envelope: the CLI reports them on stderr with a
//! category exit code. An envelope therefore always carries a payload, and
//! anything that went wrong without failing the command (a history file that
//! could not be written) travels in `meta.warnings`.

use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// Schema version stamped on every envelope.
pub const SCHEMA_VERSION: &str = "v1.0.0";

const MIN_REQUEST_ID_LEN: usize = 8;
const TRACE_ID_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self { meta, data }
    }

    /// True when the payload should fail a `--strict` run.
    pub fn has_warnings(&self) -> bool {
        !self.meta.warnings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    pub schema_version: String,
    pub generated_at: UtcDateTime,
    pub latency_ms: u64,
    /// True when any payload record came from the fallback synthesizer.
    pub fallback_used: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    /// Fails when `request_id` is shorter than eight visible characters.
    pub fn new(
        request_id: impl Into<String>,
        latency_ms: u64,
        fallback_used: bool,
    ) -> Result<Self, ValidationError> {
        let request_id = request_id.into();
        if request_id.trim().len() < MIN_REQUEST_ID_LEN {
            return Err(ValidationError::InvalidRequestId);
        }

        Ok(Self {
            request_id,
            trace_id: None,
            schema_version: String::from(SCHEMA_VERSION),
            generated_at: UtcDateTime::now(),
            latency_ms,
            fallback_used,
            warnings: Vec::new(),
        })
    }

    /// Attaches a W3C-style trace id: 32 hex digits, not all zero.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Result<Self, ValidationError> {
        let trace_id = trace_id.into();
        let well_formed = trace_id.len() == TRACE_ID_LEN
            && trace_id.chars().all(|ch| ch.is_ascii_hexdigit())
            && trace_id.chars().any(|ch| ch != '0');
        if !well_formed {
            return Err(ValidationError::InvalidTraceId);
        }

        self.trace_id = Some(trace_id);
        Ok(self)
    }

    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}
