use super::pricing::round2;

/// Simple payback period in years, to two decimals.
///
/// Returns `None` when there are no savings to pay the system back with; the
/// payback is then undefined rather than infinite or NaN.
pub fn estimate_roi(total_price_usd: f64, annual_savings_usd: f64) -> Option<f64> {
    if !annual_savings_usd.is_finite() || annual_savings_usd <= 0.0 {
        return None;
    }
    Some(round2(total_price_usd / annual_savings_usd))
}
