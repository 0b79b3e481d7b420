//! # Currency rate pass-through
//!
//! Fetches the bank's public rate feed and extracts the USD offline rate.
//! Upstream publishes rates multiplied by 100 (as strings), so both values
//! are divided back down before they leave this service.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// USD buy/sell rates in UZS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrencyRates {
    pub buy: f64,
    pub sell: f64,
}

#[derive(Debug, Deserialize)]
struct UpstreamBody {
    data: Option<UpstreamData>,
}

#[derive(Debug, Deserialize)]
struct UpstreamData {
    offline: Option<Vec<UpstreamRate>>,
}

#[derive(Debug, Deserialize)]
struct UpstreamRate {
    code: Option<String>,
    buy: Option<RateValue>,
    sell: Option<RateValue>,
}

/// The feed has been observed sending rates both as strings and as bare
/// numbers; accept either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

pub struct CurrencyService {
    http: reqwest::Client,
    url: String,
}

impl CurrencyService {
    #[must_use]
    pub const fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    pub async fn usd_rates(&self) -> Result<CurrencyRates> {
        let response = self.http.get(&self.url).send().await.map_err(|e| {
            tracing::error!(error = %e, "currency feed request failed");
            ApiError::upstream("Failed to fetch currency rates")
        })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "currency feed returned an error status");
            return Err(ApiError::upstream("Failed to fetch currency rates"));
        }

        let body: UpstreamBody = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "currency feed returned an unparseable body");
            ApiError::upstream("Failed to fetch currency rates")
        })?;

        extract_usd(&body)
    }
}

fn extract_usd(body: &UpstreamBody) -> Result<CurrencyRates> {
    let usd = body
        .data
        .as_ref()
        .and_then(|d| d.offline.as_ref())
        .and_then(|rates| {
            rates
                .iter()
                .find(|r| r.code.as_deref().is_some_and(|c| c.eq_ignore_ascii_case("usd")))
        });

    let rates = usd.and_then(|usd| {
        let buy = usd.buy.as_ref()?.as_f64()?;
        let sell = usd.sell.as_ref()?.as_f64()?;
        Some(CurrencyRates {
            buy: buy / 100.0,
            sell: sell / 100.0,
        })
    });

    rates.ok_or_else(|| ApiError::not_found("USD currency rate not found in API response"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<CurrencyRates> {
        let body: UpstreamBody = serde_json::from_str(body).unwrap();
        extract_usd(&body)
    }

    #[test]
    fn extracts_usd_and_scales_down() {
        let rates = parse(
            r#"{"data":{"offline":[
                {"code":"EUR","buy":"1310000","sell":"1320000"},
                {"code":"USD","buy":"1206000","sell":"1218000"}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(rates.buy, 12060.0);
        assert_eq!(rates.sell, 12180.0);
    }

    #[test]
    fn currency_code_match_is_case_insensitive() {
        let rates = parse(r#"{"data":{"offline":[{"code":"usd","buy":100.0,"sell":200.0}]}}"#)
            .unwrap();
        assert_eq!(rates.buy, 1.0);
        assert_eq!(rates.sell, 2.0);
    }

    #[test]
    fn missing_usd_entry_is_not_found() {
        let err = parse(r#"{"data":{"offline":[{"code":"EUR","buy":"1","sell":"2"}]}}"#)
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn usd_without_rates_is_not_found() {
        let err = parse(r#"{"data":{"offline":[{"code":"USD"}]}}"#).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn empty_body_is_not_found() {
        let err = parse(r"{}").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
