//! # API REST
//!
//! REST API implementation for the CHW diagnosis engine.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for request/response types and `chw-core` for all domain logic.

#![warn(rust_2018_idioms)]

use api_shared::{
    AnalyzeReq, ErrorRes, FacilityQuery, HealthRes, HealthService, OutbreakQuery, ProfileReq,
    ReferralQuery,
};
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chw_core::knowledge::{Capacity, Coordinates};
use chw_core::{
    AlertLevel, AnalysisResult, CorrectionCount, CountyCaseTotal, DiagnosisEngine, DiagnosisError,
    DifferentialEntry, DiseaseCategory, DiseaseDefinition, FacilityLevel, FeedbackRecord,
    FeedbackSubmission, Gender, HealthFacility, LocationContext, OutbreakRecord, PregnancyStatus,
    ReferralUrgency, RegionalLearnings, RiskFlag, RiskFlagType, Severity, TreatmentGuidance,
    TriageLevel, Urgency,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: DiagnosisEngine,
}

impl AppState {
    pub fn new(engine: DiagnosisEngine) -> Self {
        Self { engine }
    }
}

type ApiError = (StatusCode, Json<ErrorRes>);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        analyze,
        submit_feedback,
        regional_learnings,
        list_diseases,
        list_outbreaks,
        list_alerts,
        county_case_totals,
        list_facilities,
        referral_facilities,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        AnalyzeReq,
        ProfileReq,
        Gender,
        PregnancyStatus,
        AnalysisResult,
        DifferentialEntry,
        TreatmentGuidance,
        LocationContext,
        RiskFlag,
        RiskFlagType,
        Severity,
        Urgency,
        ReferralUrgency,
        TriageLevel,
        FeedbackSubmission,
        FeedbackRecord,
        RegionalLearnings,
        CorrectionCount,
        DiseaseDefinition,
        DiseaseCategory,
        OutbreakRecord,
        AlertLevel,
        CountyCaseTotal,
        HealthFacility,
        FacilityLevel,
        Capacity,
        Coordinates,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/feedback", post(submit_feedback))
        .route("/learnings/:location", get(regional_learnings))
        .route("/diseases", get(list_diseases))
        .route("/outbreaks", get(list_outbreaks))
        .route("/outbreaks/alerts", get(list_alerts))
        .route("/outbreaks/counties", get(county_case_totals))
        .route("/facilities", get(list_facilities))
        .route("/facilities/referrals/:county", get(referral_facilities))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Map an engine error to a response. Bad input is the caller's fault; anything else is logged
/// and reported as an internal error.
fn map_error(context: &str, err: DiagnosisError) -> ApiError {
    if err.is_validation() {
        tracing::debug!("{} rejected: {}", context, err);
        return (StatusCode::BAD_REQUEST, Json(ErrorRes::new(err.to_string())));
    }
    tracing::error!("{} error: {:?}", context, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorRes::new("Internal error")),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeReq,
    responses(
        (status = 200, description = "Ranked diagnosis with guidance", body = AnalysisResult),
        (status = 400, description = "No symptoms or invalid profile", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Analyse reported symptoms for one patient.
///
/// Symptoms may be sent as a list, as free text, or both. The location defaults to the profile
/// location, and the outbreak flag to the server default.
#[axum::debug_handler]
async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeReq>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let profile = req
        .profile
        .to_profile()
        .map_err(|e| map_error("Analyze", e.into()))?;
    let include_outbreak_context = req
        .include_outbreak_context
        .unwrap_or_else(|| state.engine.config().include_outbreak_context());

    let symptoms = req.symptom_tokens();
    state
        .engine
        .analyze(
            symptoms.as_slice(),
            &profile,
            req.location(),
            include_outbreak_context,
        )
        .map(Json)
        .map_err(|e| map_error("Analyze", e))
}

#[utoipa::path(
    post,
    path = "/feedback",
    request_body = FeedbackSubmission,
    responses(
        (status = 201, description = "Feedback recorded", body = FeedbackRecord),
        (status = 400, description = "Missing diagnosis or CHW id", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Record whether a diagnosis was correct.
#[axum::debug_handler]
async fn submit_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackSubmission>,
) -> Result<(StatusCode, Json<FeedbackRecord>), ApiError> {
    let record = state
        .engine
        .submit_feedback(req)
        .map_err(|e| map_error("Submit feedback", e))?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/learnings/{location}",
    params(("location" = String, Path, description = "Exact location name")),
    responses(
        (status = 200, description = "Feedback summary for the location", body = RegionalLearnings),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn regional_learnings(
    State(state): State<AppState>,
    AxumPath(location): AxumPath<String>,
) -> Result<Json<RegionalLearnings>, ApiError> {
    state
        .engine
        .regional_learnings(&location)
        .map(Json)
        .map_err(|e| map_error("Regional learnings", e))
}

#[utoipa::path(
    get,
    path = "/diseases",
    responses(
        (status = 200, description = "Disease catalog in ranking order", body = [DiseaseDefinition])
    )
)]
#[axum::debug_handler]
async fn list_diseases(State(state): State<AppState>) -> Json<Vec<DiseaseDefinition>> {
    Json(state.engine.knowledge().diseases().to_vec())
}

#[utoipa::path(
    get,
    path = "/outbreaks",
    params(OutbreakQuery),
    responses(
        (status = 200, description = "Outbreak records", body = [OutbreakRecord])
    )
)]
#[axum::debug_handler]
async fn list_outbreaks(
    State(state): State<AppState>,
    Query(query): Query<OutbreakQuery>,
) -> Json<Vec<OutbreakRecord>> {
    let outbreaks = state.engine.knowledge().outbreaks(query.location.as_deref());
    Json(outbreaks.into_iter().cloned().collect())
}

#[utoipa::path(
    get,
    path = "/outbreaks/alerts",
    params(OutbreakQuery),
    responses(
        (status = 200, description = "Warning and emergency outbreaks", body = [OutbreakRecord])
    )
)]
#[axum::debug_handler]
async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<OutbreakQuery>,
) -> Json<Vec<OutbreakRecord>> {
    let alerts = state
        .engine
        .knowledge()
        .active_alerts(query.location.as_deref());
    Json(alerts.into_iter().cloned().collect())
}

#[utoipa::path(
    get,
    path = "/outbreaks/counties",
    responses(
        (status = 200, description = "Outbreak totals per county", body = [CountyCaseTotal])
    )
)]
#[axum::debug_handler]
async fn county_case_totals(State(state): State<AppState>) -> Json<Vec<CountyCaseTotal>> {
    Json(state.engine.knowledge().county_case_totals())
}

#[utoipa::path(
    get,
    path = "/facilities",
    params(FacilityQuery),
    responses(
        (status = 200, description = "Matching health facilities", body = [HealthFacility])
    )
)]
/// Search facilities, optionally restricted to one county.
#[axum::debug_handler]
async fn list_facilities(
    State(state): State<AppState>,
    Query(query): Query<FacilityQuery>,
) -> Json<Vec<HealthFacility>> {
    let kb = state.engine.knowledge();
    let facilities = kb
        .search_facilities(query.q.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|f| query.county.as_deref().map_or(true, |c| f.county == c))
        .cloned()
        .collect();
    Json(facilities)
}

#[utoipa::path(
    get,
    path = "/facilities/referrals/{county}",
    params(
        ("county" = String, Path, description = "Exact county name"),
        ReferralQuery
    ),
    responses(
        (status = 200, description = "Referral destinations, highest level first", body = [HealthFacility])
    )
)]
#[axum::debug_handler]
async fn referral_facilities(
    State(state): State<AppState>,
    AxumPath(county): AxumPath<String>,
    Query(query): Query<ReferralQuery>,
) -> Json<Vec<HealthFacility>> {
    let facilities = state
        .engine
        .knowledge()
        .referral_facilities(&county, query.urgency());
    Json(facilities.into_iter().cloned().collect())
}
