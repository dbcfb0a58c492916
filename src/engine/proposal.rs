use std::sync::Arc;

use tracing::debug;

use super::{
    choose_inverters, estimate_environmental_impact, estimate_production, estimate_roi, estimate_savings,
    price_system, size, EngineError, DAYS_PER_BILLING_MONTH,
};
use crate::domain::{ConstantsTable, Proposal, ProposalInput};

/// Largest monthly consumption a proposal is computed for. Keeps every
/// kWh and watt figure well inside `u32`.
pub const MAX_MONTHLY_CONSUMPTION_KWH: f64 = 1_000_000.0;

/// Largest array the engine sizes. At the highest valid irradiance its
/// annual production still fits in `u32`.
const MAX_SYSTEM_SIZE_W: f64 = 5.0e8;

/// Build a complete proposal for one lead.
///
/// Either every part of the proposal is computed or an error is returned;
/// partial proposals never leave this function.
pub fn build_proposal(constants: &ConstantsTable, input: ProposalInput) -> Result<Proposal, EngineError> {
    let consumption = input.monthly_consumption_kwh;
    if !consumption.is_finite() || consumption <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "monthly consumption must be a positive number of kWh, got {consumption}"
        )));
    }
    if consumption > MAX_MONTHLY_CONSUMPTION_KWH {
        return Err(EngineError::InvalidInput(format!(
            "monthly consumption of {consumption} kWh exceeds the {MAX_MONTHLY_CONSUMPTION_KWH} kWh limit"
        )));
    }

    let required_w = consumption / DAYS_PER_BILLING_MONTH / constants.system_efficiency / constants.sun_peak_hours * 1000.0;
    if required_w > MAX_SYSTEM_SIZE_W {
        return Err(EngineError::NotComputable(format!(
            "a {required_w} W system for {consumption} kWh/month"
        )));
    }

    let sizing = size(constants, consumption);
    if sizing.panel_count == 0 {
        return Err(EngineError::SystemTooSmall {
            consumption_kwh: consumption,
        });
    }

    let production = estimate_production(constants, sizing.system_size_kw);
    let savings = estimate_savings(
        constants,
        production.annual_kwh,
        consumption,
        production.average_monthly_kwh,
    )?;
    let pricing = price_system(constants, sizing.system_size_w)?;
    let environmental = estimate_environmental_impact(constants, sizing.system_size_kw);
    let inverters = choose_inverters(constants, sizing.panel_count, &constants.inverters_for(input.phase))
        .map_err(|e| match e {
            EngineError::EmptyInverterCatalog(_) => EngineError::EmptyInverterCatalog(input.phase.to_string()),
            other => other,
        })?;

    let payback = |total_usd: f64| {
        estimate_roi(total_usd, savings.annual_savings_usd).ok_or_else(|| {
            EngineError::NotComputable(format!(
                "payback period with annual savings of {} USD",
                savings.annual_savings_usd
            ))
        })
    };
    let plan1_roi_years = payback(pricing.plan1.total_usd)?;
    let plan2_roi_years = payback(pricing.plan2.total_usd)?;

    debug!(
        consumption_kwh = consumption,
        phase = %input.phase,
        panels = sizing.panel_count,
        annual_kwh = production.annual_kwh,
        plan1_total_usd = pricing.plan1.total_usd,
        plan2_total_usd = pricing.plan2.total_usd,
        "proposal assembled"
    );

    Ok(Proposal {
        input,
        sizing,
        production,
        savings,
        pricing,
        environmental,
        inverters,
        plan1_roi_years,
        plan2_roi_years,
    })
}

/// Proposal builder bound to one constants table, cheap to clone and share
/// between request handlers.
#[derive(Debug, Clone)]
pub struct ProposalEngine {
    constants: Arc<ConstantsTable>,
}

impl ProposalEngine {
    /// Validates the table once; every later call trusts it.
    pub fn new(constants: ConstantsTable) -> Result<Self, EngineError> {
        constants.validate()?;
        Ok(Self {
            constants: Arc::new(constants),
        })
    }

    pub fn constants(&self) -> &ConstantsTable {
        &self.constants
    }

    pub fn build(&self, monthly_consumption_kwh: f64, is_single_phase: bool) -> Result<Proposal, EngineError> {
        self.build_for(ProposalInput::new(monthly_consumption_kwh, is_single_phase))
    }

    pub fn build_for(&self, input: ProposalInput) -> Result<Proposal, EngineError> {
        build_proposal(&self.constants, input)
    }
}

impl Default for ProposalEngine {
    fn default() -> Self {
        Self {
            constants: Arc::new(ConstantsTable::default()),
        }
    }
}
