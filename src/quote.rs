use crate::errors::AppError;
use crate::models::QuoteResponse;
use serde::Deserialize;
use std::env;

pub const DEFAULT_QUOTE_URL: &str = "https://api.quotable.io/random?tags=motivational|success";

#[derive(Debug, Deserialize)]
struct UpstreamQuote {
    content: String,
    author: String,
}

/// Best-effort client for the quote service. One GET per call, no retry,
/// no timeout beyond the transport defaults, no caching.
#[derive(Clone)]
pub struct QuoteClient {
    client: reqwest::Client,
    url: String,
}

impl QuoteClient {
    pub fn from_env() -> Self {
        let url = env::var("QUOTE_API_URL").unwrap_or_else(|_| DEFAULT_QUOTE_URL.to_string());
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub async fn fetch(&self) -> Result<QuoteResponse, AppError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| AppError::bad_gateway(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::bad_gateway(format!(
                "quote service answered {}",
                response.status()
            )));
        }

        let quote: UpstreamQuote = response
            .json()
            .await
            .map_err(|err| AppError::bad_gateway(err.to_string()))?;

        Ok(QuoteResponse {
            content: quote.content,
            author: quote.author,
        })
    }
}
