use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{error::ApiError, response::ApiResponse, AppState};
use crate::{
    domain::{ConstantsTable, InverterDimensioning, InverterSpec, LeadSnapshot, PhaseType, Proposal, ProposalInput},
    engine::dimension,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/proposals", post(create_proposal))
        .route("/constants", get(get_constants))
        .route("/inverters", get(list_inverters))
        .route("/healthz", get(healthz))
        .with_state(state)
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProposalRequest {
    #[validate(range(exclusive_min = 0.0, max = 1000000.0))]
    pub monthly_consumption_kwh: f64,
    pub phase: PhaseType,
}

#[derive(Debug, Serialize)]
pub struct ProposalResponse {
    pub proposal: Proposal,
    pub lead: LeadSnapshot,
}

/// POST /api/v1/proposals - Compute a proposal for a lead
pub async fn create_proposal(
    State(st): State<AppState>,
    Json(req): Json<ProposalRequest>,
) -> Result<ApiResponse<ProposalResponse>, ApiError> {
    req.validate()?;

    let started = Instant::now();
    let proposal = st.engine.build_for(ProposalInput {
        monthly_consumption_kwh: req.monthly_consumption_kwh,
        phase: req.phase,
    })?;
    let elapsed = started.elapsed().as_micros() as u64;

    tracing::info!(
        consumption_kwh = req.monthly_consumption_kwh,
        phase = %req.phase,
        panels = proposal.sizing.panel_count,
        elapsed_us = elapsed,
        "proposal computed"
    );

    let lead = proposal.lead_snapshot();
    Ok(ApiResponse::success(ProposalResponse { proposal, lead }).with_duration(elapsed))
}

/// GET /api/v1/constants - Active constants table
pub async fn get_constants(State(st): State<AppState>) -> ApiResponse<ConstantsTable> {
    ApiResponse::success(st.engine.constants().clone())
}

#[derive(Debug, Deserialize)]
pub struct InverterQuery {
    pub phase: Option<PhaseType>,
}

#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub spec: InverterSpec,
    pub dimensioning: InverterDimensioning,
}

/// GET /api/v1/inverters - Catalog with per-model dimensioning
pub async fn list_inverters(
    State(st): State<AppState>,
    Query(q): Query<InverterQuery>,
) -> ApiResponse<Vec<CatalogEntry>> {
    let constants = st.engine.constants();
    let entries = constants
        .inverter_catalog
        .iter()
        .filter(|inv| q.phase.map_or(true, |phase| inv.phase == phase))
        .map(|inv| CatalogEntry {
            spec: inv.clone(),
            dimensioning: dimension(constants, inv),
        })
        .collect();

    ApiResponse::success(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        let ok = ProposalRequest {
            monthly_consumption_kwh: 450.0,
            phase: PhaseType::SinglePhase,
        };
        assert!(ok.validate().is_ok());

        let zero = ProposalRequest {
            monthly_consumption_kwh: 0.0,
            phase: PhaseType::SinglePhase,
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_request_deserialization() {
        let req: ProposalRequest =
            serde_json::from_str(r#"{"monthly_consumption_kwh": 800, "phase": "three_phase"}"#).unwrap();
        assert_eq!(req.monthly_consumption_kwh, 800.0);
        assert_eq!(req.phase, PhaseType::ThreePhase);
    }
}
