use super::EngineError;
use crate::domain::{ConstantsTable, Financing, Installment, Milestone, PlanPricing, Pricing};

/// Price a system under both financing plans.
///
/// The plans share installation and permit costs; only the equipment margin
/// and the payment schedule differ. Every currency figure is rounded to a
/// whole unit where it is computed, so schedules may drift from the total by
/// a unit or so.
pub fn price_system(constants: &ConstantsTable, system_size_w: u32) -> Result<Pricing, EngineError> {
    if system_size_w == 0 {
        return Err(EngineError::NotComputable("price per watt of a 0 W system".into()));
    }

    let watts = system_size_w as f64;
    let base = watts * constants.system_cost_per_watt_usd;
    let installation_cost_usd = (watts * constants.installation_cost_per_watt_usd).round();
    let permits_cost_usd = (watts * constants.permits_cost_per_watt_usd).round();

    let plan = |margin: f64, installments: fn(&ConstantsTable, f64) -> (Vec<Installment>, Option<Financing>)| {
        let system_cost_usd = (base + base * margin).round();
        let total_usd = system_cost_usd + installation_cost_usd + permits_cost_usd;
        let (installments, financing) = installments(constants, total_usd);
        PlanPricing {
            margin,
            system_cost_usd,
            installation_cost_usd,
            permits_cost_usd,
            total_usd,
            price_per_watt_usd: round2(total_usd / watts),
            installments,
            financing,
        }
    };

    Ok(Pricing {
        plan1: plan(constants.plan1_margin, milestone_schedule),
        plan2: plan(constants.plan2_margin, financed_schedule),
    })
}

/// Plan 1: three milestone payments.
fn milestone_schedule(constants: &ConstantsTable, total_usd: f64) -> (Vec<Installment>, Option<Financing>) {
    let installments = [
        (Milestone::ContractSignature, constants.plan1_signature_share),
        (Milestone::EquipmentDelivery, constants.plan1_delivery_share),
        (Milestone::GridInterconnection, constants.plan1_interconnection_share),
    ]
    .into_iter()
    .map(|(milestone, share)| Installment {
        milestone,
        share,
        amount_usd: (total_usd * share).round(),
    })
    .collect();

    (installments, None)
}

/// Plan 2: upfront payment, remainder in equal interest-free monthly payments
/// financed by the seller.
fn financed_schedule(constants: &ConstantsTable, total_usd: f64) -> (Vec<Installment>, Option<Financing>) {
    let months = constants.plan2_monthly_installments;
    let upfront_usd = (total_usd * constants.plan2_upfront_share).round();
    let balance_usd = total_usd - upfront_usd;
    let monthly_payment_usd = (balance_usd / months as f64).round();
    let monthly_share = (1.0 - constants.plan2_upfront_share) / months as f64;

    let mut installments = Vec::with_capacity(months as usize + 1);
    installments.push(Installment {
        milestone: Milestone::Upfront,
        share: constants.plan2_upfront_share,
        amount_usd: upfront_usd,
    });
    installments.extend((1..=months).map(|m| Installment {
        milestone: Milestone::Monthly(m),
        share: monthly_share,
        amount_usd: monthly_payment_usd,
    }));

    let financing = Financing {
        balance_usd,
        months,
        monthly_payment_usd,
    };
    (installments, Some(financing))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
