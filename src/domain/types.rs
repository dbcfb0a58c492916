use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::Month;

// ============================================================================
// Input
// ============================================================================

/// Electrical service at the customer's premises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PhaseType {
    SinglePhase,
    ThreePhase,
}

impl PhaseType {
    pub fn from_single_phase(is_single_phase: bool) -> Self {
        if is_single_phase {
            PhaseType::SinglePhase
        } else {
            PhaseType::ThreePhase
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProposalInput {
    pub monthly_consumption_kwh: f64,
    pub phase: PhaseType,
}

impl ProposalInput {
    pub fn new(monthly_consumption_kwh: f64, is_single_phase: bool) -> Self {
        Self {
            monthly_consumption_kwh,
            phase: PhaseType::from_single_phase(is_single_phase),
        }
    }

    pub fn is_single_phase(&self) -> bool {
        self.phase == PhaseType::SinglePhase
    }
}

// ============================================================================
// Calculator outputs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemSizing {
    pub panel_count: u32,
    pub system_size_kw: f64,
    pub system_size_w: u32,
    pub roof_area_m2: f64,
    pub panel_wattage_w: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEstimate {
    /// kWh per calendar month, January first
    pub monthly_kwh: [u32; 12],
    pub average_monthly_kwh: u32,
    pub annual_kwh: u32,
}

impl ProductionEstimate {
    /// Monthly values paired with their month, for charting.
    pub fn months(&self) -> impl Iterator<Item = (Month, u32)> + '_ {
        Month::all().map(move |m| (m, self.monthly_kwh[m.index()]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsEstimate {
    pub monthly_savings_usd: f64,
    pub annual_savings_usd: f64,
    pub savings_25y_usd: f64,
    pub savings_30y_usd: f64,
    pub offset_percentage: u32,
    /// Offset above 100%, i.e. net-metering surplus
    pub surplus_percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "month", rename_all = "snake_case")]
pub enum Milestone {
    ContractSignature,
    EquipmentDelivery,
    GridInterconnection,
    Upfront,
    /// 1-based month of a seller-financed installment
    Monthly(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub milestone: Milestone,
    /// Fraction of the plan total, 0..=1
    pub share: f64,
    pub amount_usd: f64,
}

/// Seller-financed balance of a plan, interest free.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Financing {
    pub balance_usd: f64,
    pub months: u32,
    pub monthly_payment_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPricing {
    pub margin: f64,
    pub system_cost_usd: f64,
    pub installation_cost_usd: f64,
    pub permits_cost_usd: f64,
    pub total_usd: f64,
    pub price_per_watt_usd: f64,
    pub installments: Vec<Installment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<Financing>,
}

impl PlanPricing {
    pub fn installments_total(&self) -> f64 {
        self.installments.iter().map(|i| i.amount_usd).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub plan1: PlanPricing,
    pub plan2: PlanPricing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    pub fuel_avoided_gallons: f64,
    pub co2_avoided_tons: f64,
}

/// Result of dimensioning a single inverter model against the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverterDimensioning {
    pub max_panels_by_power: u32,
    pub max_panels_per_string: u32,
    /// Panels per string, earliest strings first
    pub distribution: Vec<u32>,
}

impl InverterDimensioning {
    pub fn panels_per_unit(&self) -> u32 {
        self.distribution.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverterSelection {
    pub model: String,
    pub unit_count: u32,
    pub max_panels_per_string: u32,
    /// Per-string distribution applied to every unit
    pub panels_per_unit: Vec<u32>,
}

impl InverterSelection {
    pub fn capacity(&self) -> u32 {
        self.unit_count * self.panels_per_unit.iter().sum::<u32>()
    }
}

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub input: ProposalInput,
    pub sizing: SystemSizing,
    pub production: ProductionEstimate,
    pub savings: SavingsEstimate,
    pub pricing: Pricing,
    pub environmental: EnvironmentalImpact,
    pub inverters: Vec<InverterSelection>,
    pub plan1_roi_years: f64,
    pub plan2_roi_years: f64,
}

impl Proposal {
    pub fn lead_snapshot(&self) -> LeadSnapshot {
        LeadSnapshot {
            consumption_kwh: self.input.monthly_consumption_kwh,
            phase: self.input.phase,
            estimated_monthly_savings_usd: self.savings.monthly_savings_usd,
        }
    }
}

/// Fields a lead record stores alongside the computed proposal. Serialised
/// with the record store's column names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadSnapshot {
    #[serde(rename = "consumo")]
    pub consumption_kwh: f64,
    #[serde(rename = "fase_electrica")]
    pub phase: PhaseType,
    #[serde(rename = "ahorro_estimado")]
    pub estimated_monthly_savings_usd: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_from_bool() {
        assert_eq!(PhaseType::from_single_phase(true), PhaseType::SinglePhase);
        assert_eq!(PhaseType::from_single_phase(false), PhaseType::ThreePhase);
        assert!(ProposalInput::new(500.0, true).is_single_phase());
    }

    #[test]
    fn test_phase_string_forms() {
        assert_eq!(PhaseType::ThreePhase.to_string(), "three_phase");
        assert_eq!("single_phase".parse::<PhaseType>().unwrap(), PhaseType::SinglePhase);
        assert_eq!(serde_json::to_string(&PhaseType::SinglePhase).unwrap(), "\"single_phase\"");
    }

    #[test]
    fn test_milestone_serialization() {
        let json = serde_json::to_value(Milestone::Monthly(3)).unwrap();
        assert_eq!(json["kind"], "monthly");
        assert_eq!(json["month"], 3);

        let json = serde_json::to_value(Milestone::Upfront).unwrap();
        assert_eq!(json["kind"], "upfront");
    }

    #[test]
    fn test_lead_snapshot_uses_record_columns() {
        let snapshot = LeadSnapshot {
            consumption_kwh: 800.0,
            phase: PhaseType::SinglePhase,
            estimated_monthly_savings_usd: 150.0,
        };
        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(json["consumo"], 800.0);
        assert_eq!(json["fase_electrica"], "single_phase");
        assert_eq!(json["ahorro_estimado"], 150.0);
    }

    #[test]
    fn test_selection_capacity() {
        let sel = InverterSelection {
            model: "X".into(),
            unit_count: 2,
            max_panels_per_string: 12,
            panels_per_unit: vec![6, 5],
        };
        assert_eq!(sel.capacity(), 22);
    }
}
