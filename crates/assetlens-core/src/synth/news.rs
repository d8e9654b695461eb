//! Templated, polarity-tagged news items.

use crate::{AssetType, NewsItem, Sentiment, UtcDateTime};

/// Most items returned for one asset.
pub const MAX_NEWS_ITEMS: usize = 4;
const SPACING_HOURS: i64 = 2;

struct Template {
    headline: &'static str,
    summary: &'static str,
    sentiment: Sentiment,
    source: &'static str,
}

const fn template(
    headline: &'static str,
    summary: &'static str,
    sentiment: Sentiment,
    source: &'static str,
) -> Template {
    Template {
        headline,
        summary,
        sentiment,
        source,
    }
}

// `{symbol}` is substituted at generation time.
static STOCK_TEMPLATES: [Template; 4] = [
    template(
        "{symbol} Shows Strong Performance in Current Market Conditions",
        "Recent market analysis indicates positive momentum and investor confidence",
        Sentiment::Positive,
        "MarketWatch",
    ),
    template(
        "Analysts Update {symbol} Price Targets Following Market Trends",
        "Market dynamics and sector performance drive updated analyst outlook",
        Sentiment::Positive,
        "Reuters",
    ),
    template(
        "Market Volatility Affects {symbol} Trading Patterns",
        "Broader market conditions influence individual asset performance",
        Sentiment::Neutral,
        "CNBC",
    ),
    template(
        "{symbol} Faces Market Headwinds Amid Economic Uncertainty",
        "Economic factors create challenges for asset performance",
        Sentiment::Negative,
        "Financial Times",
    ),
];

static CRYPTO_TEMPLATES: [Template; 4] = [
    template(
        "{symbol} Gains Traction in Digital Asset Market",
        "Growing adoption and market interest drive positive sentiment",
        Sentiment::Positive,
        "CoinDesk",
    ),
    template(
        "{symbol} Network Activity Shows Increased Usage",
        "On-chain metrics indicate growing user adoption and activity",
        Sentiment::Positive,
        "CoinTelegraph",
    ),
    template(
        "Regulatory Developments Impact {symbol} Market Dynamics",
        "Policy discussions create market uncertainty and volatility",
        Sentiment::Negative,
        "CryptoNews",
    ),
    template(
        "{symbol} Trading Volume Reflects Market Interest",
        "Market activity signals continued investor engagement",
        Sentiment::Neutral,
        "Decrypt",
    ),
];

static FOREX_TEMPLATES: [Template; 3] = [
    template(
        "{symbol} Exchange Rate Influenced by Economic Data",
        "Economic indicators and policy decisions drive currency movement",
        Sentiment::Neutral,
        "ForexFactory",
    ),
    template(
        "Central Bank Policies Affect {symbol} Outlook",
        "Monetary policy decisions impact currency pair dynamics",
        Sentiment::Positive,
        "FXStreet",
    ),
    template(
        "Global Economic Trends Impact {symbol} Volatility",
        "International economic conditions influence currency flows",
        Sentiment::Negative,
        "DailyFX",
    ),
];

fn templates_for(asset_type: AssetType) -> &'static [Template] {
    match asset_type {
        AssetType::Stock => &STOCK_TEMPLATES,
        AssetType::Crypto => &CRYPTO_TEMPLATES,
        AssetType::Forex => &FOREX_TEMPLATES,
    }
}

/// Takes the first [`MAX_NEWS_ITEMS`] templates for the type, newest first,
/// spaced two hours apart before `now`.
pub fn generate(
    symbol: &str,
    asset_type: AssetType,
    estimated: bool,
    now: UtcDateTime,
) -> Vec<NewsItem> {
    let slug = symbol.to_lowercase();

    templates_for(asset_type)
        .iter()
        .take(MAX_NEWS_ITEMS)
        .enumerate()
        .map(|(index, template)| {
            let ordinal = index as i64 + 1;
            NewsItem {
                headline: template.headline.replace("{symbol}", symbol),
                summary: template.summary.to_owned(),
                sentiment: template.sentiment,
                source: template.source.to_owned(),
                published_at: now.hours_before(ordinal * SPACING_HOURS),
                url: format!("https://example.com/news/{slug}-{ordinal}"),
                is_estimated: estimated,
            }
        })
        .collect()
}

/// Positive and negative item counts.
pub fn polarity_counts(news: &[NewsItem]) -> (usize, usize) {
    news.iter()
        .fold((0, 0), |(positive, negative), item| match item.sentiment {
            Sentiment::Positive => (positive + 1, negative),
            Sentiment::Negative => (positive, negative + 1),
            Sentiment::Neutral => (positive, negative),
        })
}
