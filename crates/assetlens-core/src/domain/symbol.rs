use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Free-form asset identifier as typed by the user.
///
/// Construction never fails: any string is a usable identifier. The trimmed
/// input is kept next to its uppercase form because the classifier reads
/// the text as typed while registry lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AssetSymbol {
    raw: String,
    normalized: String,
}

impl AssetSymbol {
    pub fn new(input: &str) -> Self {
        let raw = input.trim().to_owned();
        let normalized = raw.to_ascii_uppercase();
        Self { raw, normalized }
    }

    /// Uppercase form used as the canonical symbol.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Trimmed input with the casing it was typed in.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Stable FNV-1a hash of the normalized symbol, used to derive
    /// per-request generator seeds.
    pub fn fingerprint(&self) -> u64 {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;

        self.normalized.bytes().fold(OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(PRIME)
        })
    }
}

impl Display for AssetSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AssetSymbol {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for AssetSymbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<AssetSymbol> for String {
    fn from(value: AssetSymbol) -> Self {
        value.normalized
    }
}
