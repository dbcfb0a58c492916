use super::EngineError;
use crate::domain::{ConstantsTable, InverterDimensioning, InverterSelection, InverterSpec};

/// Work out how many panels one inverter can take and how they are wired.
///
/// Two bounds apply: rated input power caps the total, and the MPPT voltage
/// window caps the panels in series on each string. Panels are spread as
/// evenly as possible over the strings, extra panels going to the earliest
/// strings, and no string is ever filled past its voltage bound.
pub fn dimension(constants: &ConstantsTable, inverter: &InverterSpec) -> InverterDimensioning {
    let max_panels_by_power = (inverter.max_input_power_w / constants.panel_wattage_w as f64).floor() as u32;
    let max_panels_per_string = (inverter.mppt_max_voltage_v / constants.panel_voltage_v).ceil() as u32;

    let strings = inverter.strings.max(1);
    let voltage_ceiling = strings * max_panels_per_string;
    let placed = max_panels_by_power.min(voltage_ceiling);

    let base = placed / strings;
    let extra = placed % strings;
    let distribution = (0..strings).map(|i| base + u32::from(i < extra)).collect();

    InverterDimensioning {
        max_panels_by_power,
        max_panels_per_string,
        distribution,
    }
}

/// Pick inverters for `total_panels` from `catalog`.
///
/// Greedy single-model strategy: the highest-power model is repeated as many
/// times as needed, each unit wired with the same string pattern. Mixed-model
/// combinations are not considered.
pub fn choose_inverters(
    constants: &ConstantsTable,
    total_panels: u32,
    catalog: &[InverterSpec],
) -> Result<Vec<InverterSelection>, EngineError> {
    let chosen = catalog
        .iter()
        .max_by(|a, b| a.max_input_power_w.total_cmp(&b.max_input_power_w))
        .ok_or_else(|| EngineError::EmptyInverterCatalog(format!("{total_panels} panels")))?;

    if total_panels == 0 {
        return Ok(Vec::new());
    }

    let dims = dimension(constants, chosen);
    let per_unit = dims.panels_per_unit();
    if per_unit == 0 {
        return Err(EngineError::NotComputable(format!(
            "inverter {} cannot take a single {} W panel",
            chosen.model, constants.panel_wattage_w
        )));
    }

    Ok(vec![InverterSelection {
        model: chosen.model.clone(),
        unit_count: total_panels.div_ceil(per_unit),
        max_panels_per_string: dims.max_panels_per_string,
        panels_per_unit: dims.distribution,
    }])
}
