use crate::random::RandomSource;
use crate::{ChartPeriod, ChartPoint, UtcDateTime};

use super::positive;

const LIVE_STEP_VOLATILITY: f64 = 0.03;
const ESTIMATED_STEP_VOLATILITY: f64 = 0.05;
const VOLUME_RANGE: (f64, f64) = (500_000.0, 1_500_000.0);

/// Daily random walk from `days` ago up to `now`, oldest first.
///
/// The walk starts from `base_price` and every point, including the first,
/// is one jittered step from its predecessor.
pub fn synthesize<R: RandomSource>(
    base_price: f64,
    period: ChartPeriod,
    estimated: bool,
    rng: &mut R,
    now: UtcDateTime,
) -> Vec<ChartPoint> {
    let volatility = if estimated {
        ESTIMATED_STEP_VOLATILITY
    } else {
        LIVE_STEP_VOLATILITY
    };
    let days = i64::from(period.days());
    let mut price = positive(base_price);

    (0..=days)
        .rev()
        .map(|days_back| {
            price = positive(rng.jitter(price, volatility));
            ChartPoint {
                timestamp: now.days_before(days_back),
                price,
                volume: rng.uniform(VOLUME_RANGE.0, VOLUME_RANGE.1),
                is_estimated: estimated,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_one_point_per_day_plus_today() {
        let now = UtcDateTime::parse("2024-02-29T00:00:00Z").expect("timestamp");
        let mut rng = fastrand::Rng::with_seed(5);
        let points = synthesize(50.0, ChartPeriod::SevenDays, false, &mut rng, now);

        assert_eq!(points.len(), 8);
        assert_eq!(points[0].timestamp.format_rfc3339(), "2024-02-22T00:00:00Z");
        assert_eq!(points[7].timestamp, now);
        assert!(points.iter().all(|point| point.price > 0.0));
        assert!(points
            .iter()
            .all(|point| (500_000.0..1_500_000.0).contains(&point.volume)));
    }

    #[test]
    fn steps_are_bounded_by_volatility() {
        let mut rng = fastrand::Rng::with_seed(9);
        let points = synthesize(100.0, ChartPeriod::ThirtyDays, true, &mut rng, UtcDateTime::now());

        assert_eq!(points.len(), 31);
        for pair in points.windows(2) {
            let ratio = pair[1].price / pair[0].price;
            assert!((0.95..=1.05).contains(&ratio), "step ratio {ratio}");
        }
    }
}
