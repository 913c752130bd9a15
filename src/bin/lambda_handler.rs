//! AWS Lambda handler for running product comparisons
//!
//! Accepts a profile (and optional term overrides) as JSON and returns the
//! three priced products, qualification, recommendation and optional
//! projections.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use home_equity_engine::comparison::{cash_flow, recommend, CashFlow, Comparison, Recommendation};
use home_equity_engine::products::{rank_providers, ProviderQuote};
use home_equity_engine::profile::{FinancialProfile, ProductTerms};
use home_equity_engine::projection::{
    find_breakeven_year, sensitivity_at, yearly_costs, SensitivityPoint, YearlyCostPoint, SCENARIO_RATES_PCT,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Input for one comparison
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ComparisonRequest {
    /// Homeowner inputs; omitted fields take the standard defaults
    pub profile: FinancialProfile,

    /// Product terms; environment-configured terms when omitted
    pub terms: Option<ProductTerms>,

    /// Include year-by-year cumulative costs and the breakeven year
    pub include_yearly: bool,

    /// Include HEI cost at 2/4/6/8% appreciation
    pub include_sensitivity: bool,

    /// Include per-provider HEI quotes
    pub include_providers: bool,
}

#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub comparison: Comparison,
    pub recommendation: Recommendation,
    pub cash_flow: CashFlow,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly: Option<Vec<YearlyCostPoint>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakeven_year: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Vec<SensitivityPoint>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<ProviderQuote>>,

    pub execution_time_ms: u64,
}

/// Function URL response in the shape Lambda expects
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl UrlResponse {
    fn new(status_code: u16, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    fn preflight() -> Self {
        let mut response = Self::new(200, String::new());
        response
            .headers
            .insert("Access-Control-Allow-Methods".to_string(), "POST, OPTIONS".to_string());
        response
            .headers
            .insert("Access-Control-Allow-Headers".to_string(), "Content-Type".to_string());
        response
    }

    fn error(status_code: u16, message: &str) -> Self {
        Self::new(status_code, serde_json::json!({ "error": message }).to_string())
    }
}

fn compare(request: &ComparisonRequest) -> ComparisonResponse {
    let start = std::time::Instant::now();
    let profile = &request.profile;
    let terms = request.terms.unwrap_or_else(ProductTerms::from_env);

    let comparison = Comparison::run(profile, &terms);
    let recommendation = recommend(profile, &terms, &comparison);
    let cash_flow = cash_flow(profile, &comparison);

    let (yearly, breakeven_year) = if request.include_yearly {
        let points = yearly_costs(profile, &terms);
        let breakeven = find_breakeven_year(&points);
        (Some(points), breakeven)
    } else {
        (None, None)
    };

    ComparisonResponse {
        comparison,
        recommendation,
        cash_flow,
        yearly,
        breakeven_year,
        sensitivity: request
            .include_sensitivity
            .then(|| sensitivity_at(profile, &terms, &SCENARIO_RATES_PCT)),
        providers: request.include_providers.then(|| rank_providers(profile)),
        execution_time_ms: start.elapsed().as_millis() as u64,
    }
}

async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<UrlResponse, Error> {
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return Ok(UrlResponse::preflight());
    }

    if request.is_base64_encoded {
        return Ok(UrlResponse::error(400, "Binary request bodies are not supported"));
    }

    let body = request.body.unwrap_or_default();
    let body = if body.trim().is_empty() { "{}" } else { body.as_str() };

    let parsed: ComparisonRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return Ok(UrlResponse::error(400, &format!("Invalid JSON: {}", e))),
    };

    if let Err(e) = parsed.profile.validate() {
        return Ok(UrlResponse::error(422, &e.to_string()));
    }

    let response = compare(&parsed);
    log::info!(
        "Compared profile in {}ms: verdict {:?}",
        response.execution_time_ms,
        response.recommendation.verdict
    );

    match serde_json::to_string(&response) {
        Ok(json) => Ok(UrlResponse::new(200, json)),
        Err(e) => Ok(UrlResponse::error(500, &format!("Failed to serialize response: {}", e))),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request_uses_defaults() {
        let request: ComparisonRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.profile, FinancialProfile::default());
        assert!(request.terms.is_none());
        assert!(!request.include_yearly);
    }

    #[test]
    fn test_optional_sections() {
        let request: ComparisonRequest = serde_json::from_str(
            r#"{"profile": {"cash_needed": 50000}, "terms": {}, "include_sensitivity": true, "include_providers": true}"#,
        )
        .unwrap();
        let response = compare(&request);

        assert!(response.yearly.is_none());
        assert_eq!(response.sensitivity.as_ref().map(Vec::len), Some(4));
        assert_eq!(response.providers.as_ref().map(Vec::len), Some(5));
        assert_eq!(response.comparison.hei.cash_received, 50_000.0);
        assert_eq!(response.cash_flow.lines.len(), 3);
    }

    #[test]
    fn test_error_body_is_json() {
        let response = UrlResponse::error(400, r#"bad "quote""#);
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], r#"bad "quote""#);
        assert_eq!(response.status_code, 400);
    }
}
