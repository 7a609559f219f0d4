//! Prediction Route

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feature_pipeline::{FeatureError, RawRecord};
use inference_core::InferenceError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::AppState;

/// One inference request. Field names match the training dataframe
/// columns, spaces included. Unknown JSON fields are ignored by design.
#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub tenure: u32,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
    #[serde(rename = "Contract_One year")]
    pub contract_one_year: u8,
    #[serde(rename = "Contract_Two year")]
    pub contract_two_year: u8,
    #[serde(rename = "InternetService_Fiber optic")]
    pub internet_service_fiber_optic: u8,
    #[serde(rename = "InternetService_No")]
    pub internet_service_no: u8,
    #[serde(rename = "OnlineSecurity_Yes")]
    pub online_security_yes: u8,
    #[serde(rename = "TechSupport_Yes")]
    pub tech_support_yes: u8,
}

impl CustomerRequest {
    /// Reject values that parse but are semantically invalid. JSON cannot
    /// carry NaN/inf, but the check also guards non-HTTP callers.
    fn validate(&self) -> Result<(), PredictError> {
        for (name, value) in [
            ("MonthlyCharges", self.monthly_charges),
            ("TotalCharges", self.total_charges),
        ] {
            if !value.is_finite() {
                return Err(PredictError::Validation(format!(
                    "{name} must be finite"
                )));
            }
            if value < 0.0 {
                return Err(PredictError::Validation(format!(
                    "{name} must be non-negative"
                )));
            }
        }
        for (name, value) in [
            ("Contract_One year", self.contract_one_year),
            ("Contract_Two year", self.contract_two_year),
            ("InternetService_Fiber optic", self.internet_service_fiber_optic),
            ("InternetService_No", self.internet_service_no),
            ("OnlineSecurity_Yes", self.online_security_yes),
            ("TechSupport_Yes", self.tech_support_yes),
        ] {
            if value > 1 {
                return Err(PredictError::Validation(format!(
                    "{name} must be 0 or 1"
                )));
            }
        }
        Ok(())
    }

    fn to_record(&self) -> RawRecord {
        let mut record = RawRecord::new();
        record
            .set_number("tenure", self.tenure as f64)
            .set_number("MonthlyCharges", self.monthly_charges)
            .set_number("TotalCharges", self.total_charges)
            .set_number("Contract_One year", self.contract_one_year as f64)
            .set_number("Contract_Two year", self.contract_two_year as f64)
            .set_number(
                "InternetService_Fiber optic",
                self.internet_service_fiber_optic as f64,
            )
            .set_number("InternetService_No", self.internet_service_no as f64)
            .set_number("OnlineSecurity_Yes", self.online_security_yes as f64)
            .set_number("TechSupport_Yes", self.tech_support_yes as f64);
        record
    }
}

/// Query parameters for the predict endpoint
#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    pub threshold: Option<f64>,
}

/// Prediction response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub threshold: f64,
    /// Rounded to 3 decimals on the wire
    pub churn_probability: f64,
    pub churn_prediction: u8,
    pub prediction_label: &'static str,
}

/// Per-request failures; never affect shared state
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PredictError::Validation(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message.clone())
            }
            // A rejected field value is the client's error; anything else
            // inside the pipeline is ours
            PredictError::Inference(InferenceError::Feature(
                FeatureError::NonFiniteValue { .. },
            )) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            PredictError::Inference(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };
        warn!("Predict request failed: {}", message);
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Score one customer record
pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PredictQuery>,
    Json(request): Json<CustomerRequest>,
) -> Result<Json<PredictResponse>, PredictError> {
    request.validate()?;
    let threshold = query.threshold.unwrap_or(state.default_threshold);

    let prediction = state.predictor.predict(&request.to_record(), threshold)?;

    Ok(Json(PredictResponse {
        threshold: prediction.threshold,
        churn_probability: (prediction.probability * 1000.0).round() / 1000.0,
        churn_prediction: prediction.label.as_int(),
        prediction_label: prediction.label.as_str(),
    }))
}
