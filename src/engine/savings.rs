use super::EngineError;
use crate::domain::{ConstantsTable, SavingsEstimate};

/// Estimate monetary savings and how much of the consumption is offset.
///
/// Long-horizon figures are flat multiples of the annual saving: no tariff
/// escalation and no panel degradation.
pub fn estimate_savings(
    constants: &ConstantsTable,
    annual_kwh: u32,
    monthly_consumption_kwh: f64,
    average_monthly_kwh: u32,
) -> Result<SavingsEstimate, EngineError> {
    let offset_percentage = offset_percentage(average_monthly_kwh, monthly_consumption_kwh).ok_or_else(|| {
        EngineError::NotComputable(format!(
            "offset percentage for monthly consumption of {monthly_consumption_kwh} kWh"
        ))
    })?;

    let annual_savings_usd = (annual_kwh as f64 * constants.electricity_rate_usd_per_kwh).round();
    // Derived from the annual figure so the two never drift apart
    let monthly_savings_usd = (annual_savings_usd / 12.0).round();
    let [short, long] = constants.savings_horizons_years;

    Ok(SavingsEstimate {
        monthly_savings_usd,
        annual_savings_usd,
        savings_25y_usd: annual_savings_usd * short as f64,
        savings_30y_usd: annual_savings_usd * long as f64,
        offset_percentage,
        surplus_percentage: offset_percentage.saturating_sub(100),
    })
}

/// Share of consumption covered by average production, in whole percent.
/// `None` when consumption is zero, negative or not finite.
pub fn offset_percentage(average_monthly_kwh: u32, monthly_consumption_kwh: f64) -> Option<u32> {
    if !monthly_consumption_kwh.is_finite() || monthly_consumption_kwh <= 0.0 {
        return None;
    }
    Some((average_monthly_kwh as f64 / monthly_consumption_kwh * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_savings_uses_rate() {
        let c = ConstantsTable::default();
        let s = estimate_savings(&c, 11_563, 1000.0, 964).unwrap();
        assert_eq!(s.annual_savings_usd, (11_563.0_f64 * 0.25).round());
        assert_eq!(s.annual_savings_usd, 2891.0);
        assert_eq!(s.monthly_savings_usd, 241.0);
    }

    #[test]
    fn test_long_horizons_are_linear() {
        let c = ConstantsTable::default();
        let s = estimate_savings(&c, 12_000, 1000.0, 1000).unwrap();
        assert_eq!(s.annual_savings_usd, 3000.0);
        assert_eq!(s.savings_25y_usd, 75_000.0);
        assert_eq!(s.savings_30y_usd, 90_000.0);
    }

    #[test]
    fn test_offset_and_surplus() {
        let c = ConstantsTable::default();

        let under = estimate_savings(&c, 9_600, 1000.0, 800).unwrap();
        assert_eq!(under.offset_percentage, 80);
        assert_eq!(under.surplus_percentage, 0);

        let over = estimate_savings(&c, 14_400, 1000.0, 1200).unwrap();
        assert_eq!(over.offset_percentage, 120);
        assert_eq!(over.surplus_percentage, 20);
    }

    #[test]
    fn test_zero_consumption_not_computable() {
        let c = ConstantsTable::default();
        let err = estimate_savings(&c, 1000, 0.0, 80).unwrap_err();
        assert!(matches!(err, EngineError::NotComputable(_)));
        assert_eq!(offset_percentage(80, f64::NAN), None);
    }
}
