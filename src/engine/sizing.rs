use crate::domain::{ConstantsTable, SystemSizing};

/// Billing month length used to turn monthly consumption into daily.
pub const DAYS_PER_BILLING_MONTH: f64 = 30.0;

/// Size a PV system for the given monthly consumption.
///
/// The panel count is floored: the proposal never includes a fractional panel
/// and rounds toward fewer panels rather than overstating the system.
pub fn size(constants: &ConstantsTable, monthly_consumption_kwh: f64) -> SystemSizing {
    let daily_consumption = monthly_consumption_kwh / DAYS_PER_BILLING_MONTH;
    // Losses inflate the production the array has to deliver
    let required_daily_production = daily_consumption / constants.system_efficiency;
    let required_size_kw = required_daily_production / constants.sun_peak_hours;

    let panel_count = (required_size_kw / constants.panel_wattage_kw()).floor().max(0.0) as u32;
    let system_size_w = panel_count * constants.panel_wattage_w;

    SystemSizing {
        panel_count,
        system_size_kw: system_size_w as f64 / 1000.0,
        system_size_w,
        roof_area_m2: (panel_count as f64 * constants.area_per_panel_m2).ceil(),
        panel_wattage_w: constants.panel_wattage_w,
    }
}
