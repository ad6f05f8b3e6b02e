//! Learned scorer integration
//!
//! The learned model runs out of process behind an HTTP sidecar. The
//! engine treats it as optional: predictions that arrive in time
//! participate in the ensemble override, everything else degrades to
//! rule-based scoring. `LearnedScorer` is the seam; tests substitute
//! their own implementations.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use sinscreen_core::{clamp01, Error, LearnedConfig, LearnedLabel, LearnedPrediction, Result};

/// A model that predicts offensive/not-offensive for raw text
#[async_trait]
pub trait LearnedScorer: Send + Sync {
    /// Predict a label for the text
    async fn predict(&self, text: &str) -> Result<LearnedPrediction>;

    /// Scorer name for logs
    fn name(&self) -> &str;
}

/// HTTP client for the prediction sidecar.
///
/// Wire contract: `POST {base}/predict` with `{"text": ...}` returns
/// `{"prediction": "OFF"|"NOT", "confidence": f, "probabilities":
/// {"NOT": f, "OFF": f}}`. `GET {base}/health` answers 2xx when the
/// model is loaded.
pub struct HttpLearnedScorer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLearnedScorer {
    /// Create a client with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::learned(format!("failed to build http client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Build from configuration; `None` when no endpoint is configured
    pub fn from_config(config: &LearnedConfig) -> Result<Option<Self>> {
        match &config.endpoint {
            Some(endpoint) => Ok(Some(Self::new(
                endpoint.clone(),
                Duration::from_millis(config.timeout_ms),
            )?)),
            None => Ok(None),
        }
    }

    /// Probe the sidecar health endpoint
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl LearnedScorer for HttpLearnedScorer {
    async fn predict(&self, text: &str) -> Result<LearnedPrediction> {
        let url = format!("{}/predict", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout
                } else {
                    Error::learned(format!("prediction request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            return Err(Error::learned(format!(
                "sidecar returned {}",
                response.status()
            )));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| Error::learned(format!("malformed prediction response: {e}")))?;
        body.into_prediction()
    }

    fn name(&self) -> &str {
        "learned-http"
    }
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: String,
    confidence: f64,
    probabilities: PredictProbabilities,
}

#[derive(Debug, Deserialize)]
struct PredictProbabilities {
    #[serde(rename = "NOT")]
    not_offensive: f64,

    #[serde(rename = "OFF")]
    offensive: f64,
}

impl PredictResponse {
    fn into_prediction(self) -> Result<LearnedPrediction> {
        let label = match self.prediction.as_str() {
            "OFF" | "offensive" => LearnedLabel::Offensive,
            "NOT" | "not_offensive" => LearnedLabel::NotOffensive,
            other => {
                return Err(Error::learned(format!("unrecognized label '{other}'")));
            }
        };
        Ok(LearnedPrediction {
            label,
            confidence: clamp01(self.confidence),
            not_offensive: clamp01(self.probabilities.not_offensive),
            offensive: clamp01(self.probabilities.offensive),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_response_maps_to_prediction() {
        let body = r#"{
            "prediction": "OFF",
            "confidence": 0.91,
            "probabilities": { "NOT": 0.09, "OFF": 0.91 }
        }"#;
        let response: PredictResponse = serde_json::from_str(body).unwrap();
        let prediction = response.into_prediction().unwrap();
        assert_eq!(prediction.label, LearnedLabel::Offensive);
        assert_eq!(prediction.confidence, 0.91);
        assert_eq!(prediction.offensive, 0.91);
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let response = PredictResponse {
            prediction: "MAYBE".to_string(),
            confidence: 0.5,
            probabilities: PredictProbabilities {
                not_offensive: 0.5,
                offensive: 0.5,
            },
        };
        assert!(response.into_prediction().is_err());
    }

    #[test]
    fn test_out_of_range_probabilities_clamped() {
        let response = PredictResponse {
            prediction: "NOT".to_string(),
            confidence: 1.3,
            probabilities: PredictProbabilities {
                not_offensive: 1.1,
                offensive: -0.1,
            },
        };
        let prediction = response.into_prediction().unwrap();
        assert_eq!(prediction.confidence, 1.0);
        assert_eq!(prediction.not_offensive, 1.0);
        assert_eq!(prediction.offensive, 0.0);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let scorer =
            HttpLearnedScorer::new("http://localhost:5000/", Duration::from_secs(2)).unwrap();
        assert_eq!(scorer.base_url, "http://localhost:5000");
    }
}
