use crate::domain::{ConstantsTable, EnvironmentalImpact};

pub fn estimate_environmental_impact(constants: &ConstantsTable, system_size_kw: f64) -> EnvironmentalImpact {
    EnvironmentalImpact {
        fuel_avoided_gallons: (system_size_kw * constants.fuel_gallons_per_kw).round(),
        co2_avoided_tons: (system_size_kw * constants.co2_tons_per_kw).round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_in_size() {
        let c = ConstantsTable::default();
        let e = estimate_environmental_impact(&c, 10.0);
        assert_eq!(e.fuel_avoided_gallons, 840.0);
        assert_eq!(e.co2_avoided_tons, 12.0);

        let e = estimate_environmental_impact(&c, 8.25);
        assert_eq!(e.fuel_avoided_gallons, 693.0);
        assert_eq!(e.co2_avoided_tons, 10.0);
    }
}
