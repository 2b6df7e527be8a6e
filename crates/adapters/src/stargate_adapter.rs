//! Stargate aggregator client
//!
//! One outbound `GET` per call, a client-side timeout and no retries. Non-2xx statuses
//! surface as [`AggregatorError::HttpStatusError`] so callers can classify them.

use async_trait::async_trait;
use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue},
	Client, Response,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use xroute_types::{
	AggregatorClient, AggregatorError, AggregatorResult, ChainDescriptor, Quote, QuoteQuery,
	SecretString, TokenDescriptor, TokenQuery,
};

use crate::stargate_models::{
	StargateChain, StargateChainsResponse, StargateQuotesResponse, StargateTokensResponse,
};

pub const DEFAULT_STARGATE_BASE_URL: &str = "https://stargate.finance/api/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Connection settings for [`StargateClient`]
#[derive(Debug, Clone)]
pub struct StargateConfig {
	pub base_url: String,
	pub timeout: Duration,
	pub api_key: Option<SecretString>,
	pub api_key_header: String,
}

impl Default for StargateConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_STARGATE_BASE_URL.to_string(),
			timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
			api_key: None,
			api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
		}
	}
}

#[derive(Debug, Clone)]
pub struct StargateClient {
	base_url: Url,
	timeout: Duration,
	client: Client,
}

impl StargateClient {
	pub fn new(config: StargateConfig) -> AggregatorResult<Self> {
		let base_url = Self::parse_base_url(&config.base_url)?;
		let client = Self::create_client(&config)?;

		Ok(Self {
			base_url,
			timeout: config.timeout,
			client,
		})
	}

	pub fn with_default_config() -> AggregatorResult<Self> {
		Self::new(StargateConfig::default())
	}

	pub fn base_url(&self) -> &str {
		self.base_url.as_str()
	}

	/// Build the HTTP client with JSON headers, optional API key and timeout
	fn create_client(config: &StargateConfig) -> AggregatorResult<Client> {
		let mut headers = HeaderMap::new();
		headers.insert("Accept", HeaderValue::from_static("application/json"));
		headers.insert("User-Agent", HeaderValue::from_static("xroute/0.1"));

		if let Some(api_key) = config.api_key.as_ref().filter(|k| !k.is_empty()) {
			let name = HeaderName::from_bytes(config.api_key_header.as_bytes()).map_err(|e| {
				AggregatorError::InvalidRequest {
					reason: format!("invalid API key header '{}': {}", config.api_key_header, e),
				}
			})?;
			let mut value = HeaderValue::from_str(api_key.expose_secret()).map_err(|_| {
				AggregatorError::InvalidRequest {
					reason: "API key contains invalid header characters".to_string(),
				}
			})?;
			value.set_sensitive(true);
			headers.insert(name, value);
		}

		Client::builder()
			.default_headers(headers)
			.timeout(config.timeout)
			.build()
			.map_err(AggregatorError::HttpError)
	}

	/// Ensure the base is treated as a directory so `join` appends
	fn parse_base_url(base_url: &str) -> AggregatorResult<Url> {
		let mut base = Url::parse(base_url).map_err(|e| AggregatorError::InvalidRequest {
			reason: format!("Invalid base URL '{}': {}", base_url, e),
		})?;
		if !base.path().ends_with('/') {
			base.set_path(&format!("{}/", base.path()));
		}
		Ok(base)
	}

	fn build_url(&self, path: &str, query: &[(&'static str, String)]) -> AggregatorResult<Url> {
		let mut url = self
			.base_url
			.join(path)
			.map_err(|e| AggregatorError::InvalidRequest {
				reason: format!("Failed to join URL path '{}': {}", path, e),
			})?;
		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
		}
		Ok(url)
	}

	fn map_send_error(&self, error: reqwest::Error) -> AggregatorError {
		if error.is_timeout() {
			AggregatorError::Timeout {
				timeout_ms: self.timeout.as_millis() as u64,
			}
		} else if error.is_connect() {
			AggregatorError::Connection(error.to_string())
		} else {
			AggregatorError::HttpError(error)
		}
	}

	async fn get_json<T: DeserializeOwned>(
		&self,
		path: &str,
		query: &[(&'static str, String)],
	) -> AggregatorResult<T> {
		let url = self.build_url(path, query)?;
		debug!("Stargate GET {}", url);

		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(|e| self.map_send_error(e))?;

		let body = self.read_success_body(path, response).await?;
		serde_json::from_str(&body).map_err(|e| AggregatorError::InvalidResponse {
			reason: format!("Failed to parse Stargate {} response: {}", path, e),
		})
	}

	async fn read_success_body(&self, path: &str, response: Response) -> AggregatorResult<String> {
		let status = response.status();
		if !status.is_success() {
			debug!("Stargate {} endpoint returned status {}", path, status);
			return Err(AggregatorError::from_http_failure(status.as_u16()));
		}

		let body = response.text().await.map_err(|e| self.map_send_error(e))?;
		debug!(
			"Stargate {} endpoint responded successfully with {} bytes",
			path,
			body.len()
		);
		Ok(body)
	}
}

#[async_trait]
impl AggregatorClient for StargateClient {
	fn name(&self) -> &str {
		"stargate"
	}

	async fn fetch_chains(&self) -> AggregatorResult<Vec<ChainDescriptor>> {
		let response: StargateChainsResponse = self.get_json("chains", &[]).await?;
		let chains: Vec<ChainDescriptor> = response
			.chains
			.into_iter()
			.filter_map(StargateChain::into_descriptor)
			.collect();

		if chains.is_empty() {
			return Err(AggregatorError::InvalidResponse {
				reason: "Stargate chain listing is empty".to_string(),
			});
		}

		debug!("Fetched {} chains from Stargate", chains.len());
		Ok(chains)
	}

	async fn fetch_tokens(&self, query: &TokenQuery) -> AggregatorResult<Vec<TokenDescriptor>> {
		let response: StargateTokensResponse =
			self.get_json("tokens", &query.query_pairs()).await?;
		Ok(response.tokens.into_iter().map(TokenDescriptor::from).collect())
	}

	async fn fetch_quotes(&self, query: &QuoteQuery) -> AggregatorResult<Vec<Quote>> {
		let response: StargateQuotesResponse =
			self.get_json("quotes", &query.query_pairs()).await?;

		let total = response.quotes.len();
		let quotes: Vec<Quote> = response
			.quotes
			.into_iter()
			.filter_map(|raw| match Quote::try_from(raw) {
				Ok(quote) => Some(quote),
				Err(e) => {
					warn!("Dropping Stargate quote: {}", e);
					None
				},
			})
			.collect();

		debug!(
			"Stargate returned {} quotes ({} usable) for {}",
			total,
			quotes.len(),
			query.route_key()
		);
		if total > 0 && quotes.is_empty() {
			return Err(AggregatorError::InvalidResponse {
				reason: format!("all {} Stargate quotes were unusable", total),
			});
		}
		Ok(quotes)
	}
}
