//! Identifiers stamped on each response.

use std::fmt::{Display, Formatter};

use assetlens_core::{EnvelopeMeta, ValidationError};
use uuid::Uuid;

/// One id per CLI invocation, rendered as a hyphenated UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Trace id rendered as 32 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for TraceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Response metadata for one command run, with fresh ids.
pub fn response_meta(
    latency_ms: u64,
    fallback_used: bool,
    warnings: Vec<String>,
) -> Result<EnvelopeMeta, ValidationError> {
    let meta = EnvelopeMeta::new(RequestId::generate().to_string(), latency_ms, fallback_used)?
        .with_trace_id(TraceId::generate().to_string())?;
    Ok(meta.with_warnings(warnings))
}
