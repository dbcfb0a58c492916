use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use super::PhaseType;
use crate::engine::EngineError;

/// Calendar month, January first. Indexes the per-month tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day count without leap-year adjustment.
    pub fn days(self) -> u32 {
        match self {
            Month::February => 28,
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        }
    }

    pub fn all() -> impl Iterator<Item = Month> {
        Month::iter()
    }
}

/// A grid-tied inverter model available for dimensioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverterSpec {
    pub model: String,
    pub phase: PhaseType,
    /// Maximum recommended PV input power in watts
    pub max_input_power_w: f64,
    /// Upper bound of the MPPT voltage window
    pub mppt_max_voltage_v: f64,
    /// Independent input strings
    pub strings: u32,
}

impl InverterSpec {
    pub fn new(
        model: impl Into<String>,
        phase: PhaseType,
        max_input_power_w: f64,
        mppt_max_voltage_v: f64,
        strings: u32,
    ) -> Self {
        Self {
            model: model.into(),
            phase,
            max_input_power_w,
            mppt_max_voltage_v,
            strings,
        }
    }
}

/// Physical and financial parameters shared by every calculator.
///
/// Loaded once at startup (built-in values, optionally overridden through
/// configuration) and then only read. Every calculator receives it by
/// reference; there is no global mutable copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantsTable {
    // Panel
    pub panel_wattage_w: u32,
    pub panel_voltage_v: f64,
    pub area_per_panel_m2: f64,

    // Sizing and production
    pub sun_peak_hours: f64,
    pub system_efficiency: f64,
    /// kWh/m²/day, January first
    pub monthly_irradiance: [f64; 12],

    // Savings
    pub electricity_rate_usd_per_kwh: f64,
    pub savings_horizons_years: [u32; 2],

    // Pricing
    pub system_cost_per_watt_usd: f64,
    pub installation_cost_per_watt_usd: f64,
    pub permits_cost_per_watt_usd: f64,
    pub plan1_margin: f64,
    pub plan2_margin: f64,
    pub plan1_signature_share: f64,
    pub plan1_delivery_share: f64,
    pub plan1_interconnection_share: f64,
    pub plan2_upfront_share: f64,
    pub plan2_monthly_installments: u32,

    // Environmental, per kW installed per year
    pub fuel_gallons_per_kw: f64,
    pub co2_tons_per_kw: f64,

    pub inverter_catalog: Vec<InverterSpec>,
}

static BUILTIN: Lazy<ConstantsTable> = Lazy::new(|| ConstantsTable {
    panel_wattage_w: 550,
    panel_voltage_v: 49.5,
    area_per_panel_m2: 2.6,

    sun_peak_hours: 5.0,
    system_efficiency: 0.80,
    monthly_irradiance: [4.8, 5.3, 5.8, 6.0, 5.7, 5.6, 5.8, 5.9, 5.6, 5.2, 4.8, 4.6],

    electricity_rate_usd_per_kwh: 0.25,
    savings_horizons_years: [25, 30],

    system_cost_per_watt_usd: 0.65,
    installation_cost_per_watt_usd: 0.25,
    permits_cost_per_watt_usd: 0.10,
    plan1_margin: 0.25,
    plan2_margin: 0.35,
    plan1_signature_share: 0.60,
    plan1_delivery_share: 0.30,
    plan1_interconnection_share: 0.10,
    plan2_upfront_share: 0.70,
    plan2_monthly_installments: 6,

    fuel_gallons_per_kw: 84.0,
    co2_tons_per_kw: 1.2,

    inverter_catalog: vec![
        InverterSpec::new("SUN-5K-G", PhaseType::SinglePhase, 6500.0, 550.0, 2),
        InverterSpec::new("SUN-8K-G", PhaseType::SinglePhase, 10400.0, 550.0, 2),
        InverterSpec::new("SUN-10K-G", PhaseType::SinglePhase, 13000.0, 600.0, 2),
        InverterSpec::new("SUN-15K-G03", PhaseType::ThreePhase, 19500.0, 1000.0, 2),
        InverterSpec::new("SUN-20K-G03", PhaseType::ThreePhase, 26000.0, 1000.0, 3),
        InverterSpec::new("SUN-30K-G03", PhaseType::ThreePhase, 39000.0, 1000.0, 4),
    ],
});

impl Default for ConstantsTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

/// Irradiance above this is not physical and would overflow monthly sums.
const MAX_DAILY_IRRADIANCE: f64 = 12.0;

/// Allowed drift when checking that payment shares add up to 100%.
const SHARE_EPSILON: f64 = 1e-9;

impl ConstantsTable {
    pub fn panel_wattage_kw(&self) -> f64 {
        self.panel_wattage_w as f64 / 1000.0
    }

    pub fn irradiance(&self, month: Month) -> f64 {
        self.monthly_irradiance[month.index()]
    }

    /// Catalog entries wired for the given phase.
    pub fn inverters_for(&self, phase: PhaseType) -> Vec<InverterSpec> {
        self.inverter_catalog
            .iter()
            .filter(|inv| inv.phase == phase)
            .cloned()
            .collect()
    }

    /// Check the table against its own invariants.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.panel_wattage_w == 0 {
            return Err(invalid("panel_wattage_w must be positive"));
        }

        let positive = [
            ("panel_voltage_v", self.panel_voltage_v),
            ("area_per_panel_m2", self.area_per_panel_m2),
            ("sun_peak_hours", self.sun_peak_hours),
            ("electricity_rate_usd_per_kwh", self.electricity_rate_usd_per_kwh),
            ("system_cost_per_watt_usd", self.system_cost_per_watt_usd),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("installation_cost_per_watt_usd", self.installation_cost_per_watt_usd),
            ("permits_cost_per_watt_usd", self.permits_cost_per_watt_usd),
            ("plan1_margin", self.plan1_margin),
            ("plan2_margin", self.plan2_margin),
            ("fuel_gallons_per_kw", self.fuel_gallons_per_kw),
            ("co2_tons_per_kw", self.co2_tons_per_kw),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be non-negative, got {value}")));
            }
        }

        if !(self.system_efficiency > 0.0 && self.system_efficiency <= 1.0) {
            return Err(invalid(format!(
                "system_efficiency must lie in (0, 1], got {}",
                self.system_efficiency
            )));
        }

        if let Some(month) = Month::all().find(|m| {
            let irr = self.irradiance(*m);
            !irr.is_finite() || !(0.0..=MAX_DAILY_IRRADIANCE).contains(&irr)
        }) {
            return Err(invalid(format!("irradiance for {month} must lie in [0, {MAX_DAILY_IRRADIANCE}]")));
        }

        let plan1 = self.plan1_signature_share + self.plan1_delivery_share + self.plan1_interconnection_share;
        if (plan1 - 1.0).abs() > SHARE_EPSILON {
            return Err(invalid(format!("plan 1 shares must sum to 1, got {plan1}")));
        }
        if !(0.0..=1.0).contains(&self.plan2_upfront_share) {
            return Err(invalid(format!(
                "plan2_upfront_share must lie in [0, 1], got {}",
                self.plan2_upfront_share
            )));
        }
        if self.plan2_monthly_installments == 0 {
            return Err(invalid("plan2_monthly_installments must be non-zero"));
        }

        for inv in &self.inverter_catalog {
            if inv.strings == 0 {
                return Err(invalid(format!("inverter {} has no strings", inv.model)));
            }
            if !(inv.max_input_power_w > 0.0 && inv.mppt_max_voltage_v > 0.0) {
                return Err(invalid(format!("inverter {} has non-positive ratings", inv.model)));
            }
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> EngineError {
    EngineError::InvalidConstants(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        assert!(ConstantsTable::default().validate().is_ok());
    }

    #[test]
    fn test_month_days_sum_to_365() {
        let total: u32 = Month::all().map(Month::days).sum();
        assert_eq!(total, 365);
        assert_eq!(Month::February.days(), 28);
        assert_eq!(Month::December.index(), 11);
    }

    #[test]
    fn test_plan1_shares_must_sum_to_one() {
        let table = ConstantsTable {
            plan1_interconnection_share: 0.2,
            ..ConstantsTable::default()
        };
        assert!(matches!(table.validate(), Err(EngineError::InvalidConstants(_))));
    }

    #[test]
    fn test_efficiency_out_of_range_rejected() {
        let table = ConstantsTable {
            system_efficiency: 1.2,
            ..ConstantsTable::default()
        };
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_unphysical_irradiance_rejected() {
        let mut table = ConstantsTable::default();
        table.monthly_irradiance[6] = 1.0e9;
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("july"));
    }

    #[test]
    fn test_inverter_without_strings_rejected() {
        let mut table = ConstantsTable::default();
        table.inverter_catalog[0].strings = 0;
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("SUN-5K-G"));
    }

    #[test]
    fn test_catalog_filter_by_phase() {
        let table = ConstantsTable::default();
        let single = table.inverters_for(PhaseType::SinglePhase);
        let three = table.inverters_for(PhaseType::ThreePhase);
        assert_eq!(single.len(), 3);
        assert_eq!(three.len(), 3);
        assert!(three.iter().all(|inv| inv.phase == PhaseType::ThreePhase));
    }

    #[test]
    fn test_partial_toml_falls_back_to_builtin() {
        let table: ConstantsTable = toml::from_str("electricity_rate_usd_per_kwh = 0.30").unwrap();
        assert_eq!(table.electricity_rate_usd_per_kwh, 0.30);
        assert_eq!(table.panel_wattage_w, 550);
        assert_eq!(table.inverter_catalog.len(), 6);
    }
}
