//! Heuristic asset-type classification.

use crate::AssetType;

/// Symbols always treated as crypto.
pub const CRYPTO_SYMBOLS: [&str; 10] = [
    "BTC", "ETH", "BNB", "ADA", "SOL", "XRP", "DOT", "AVAX", "MATIC", "LINK",
];

const CURRENCY_CODES: [&str; 3] = ["USD", "EUR", "GBP"];
const CRYPTO_MARKERS: [&str; 2] = ["COIN", "TOKEN"];

/// Classifies an identifier as stock, crypto or forex. Total.
///
/// Rules apply in order: six ASCII letters is a currency pair; a major
/// currency code anywhere is forex; a curated crypto symbol or a
/// `COIN`/`TOKEN` marker is crypto; everything else is a stock.
///
/// Only the `COIN`/`TOKEN` markers are matched against the text as typed, so
/// a mixed-case product name such as `XyzNewToken` stays a stock while
/// `NEWTOKEN` does not. Currency codes ignore case.
pub fn classify(identifier: &str) -> AssetType {
    let trimmed = identifier.trim();

    if trimmed.len() == 6 && trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return AssetType::Forex;
    }

    let upper = trimmed.to_ascii_uppercase();
    if CURRENCY_CODES.iter().any(|code| upper.contains(code)) {
        return AssetType::Forex;
    }

    if CRYPTO_SYMBOLS.contains(&upper.as_str())
        || CRYPTO_MARKERS.iter().any(|marker| trimmed.contains(marker))
    {
        return AssetType::Crypto;
    }

    AssetType::Stock
}
