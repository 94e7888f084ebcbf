use std::time::Duration;

use serde_json::Value;

use ordena_core::{ServiceError, ServiceResult};

use super::http_client;

/// Client for the external ViaCEP zip-code registry.
///
/// ViaCEP answers `GET /ws/{zip}/json/` with the address payload, or with
/// `{"erro": true}` and a 200 for a well-formed but unknown zip code.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    base_url: String,
    http: reqwest::Client,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            http: http_client(timeout),
        }
    }

    /// Resolve a zip code to its raw address payload.
    pub async fn lookup(&self, zip_code: &str) -> ServiceResult<Value> {
        let url = format!("{}/ws/{}/json/", self.base_url, zip_code);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::upstream(format!("Via Cep unreachable: {e}")))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(ServiceError::upstream(
                "Error when querying the Via Cep API",
            ));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|_| ServiceError::upstream("Error when querying the Via Cep API"))?;

        // "erro" arrives as boolean true or the string "true" depending on
        // the ViaCEP deployment.
        let not_found = match data.get("erro") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        };
        if not_found {
            return Err(ServiceError::upstream("Zip code not found"));
        }

        Ok(data)
    }
}
