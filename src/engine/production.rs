use crate::domain::{ConstantsTable, Month, ProductionEstimate};

/// Estimate month-by-month energy output of a system.
///
/// Each month uses its own irradiance and real day count (no leap years).
/// The annual figure is the sum of the rounded monthly values so the chart
/// and the headline number always agree.
pub fn estimate_production(constants: &ConstantsTable, system_size_kw: f64) -> ProductionEstimate {
    let mut monthly_kwh = [0u32; 12];
    for month in Month::all() {
        let daily = system_size_kw * constants.irradiance(month) * constants.system_efficiency;
        monthly_kwh[month.index()] = (daily * month.days() as f64).round().max(0.0) as u32;
    }

    let annual_kwh: u32 = monthly_kwh.iter().sum();
    let average_monthly_kwh = (annual_kwh as f64 / 12.0).round() as u32;

    ProductionEstimate {
        monthly_kwh,
        average_monthly_kwh,
        annual_kwh,
    }
}
