// ============================================================================
// API Client : CoinGecko
// ============================================================================
// Récupère le prix d'une crypto dans une devise fiat via l'endpoint
// `simple/price` de CoinGecko.
//
// Requête : GET {base}/simple/price?ids=bitcoin&vs_currencies=usd
// Réponse : {"bitcoin": {"usd": 67000.5}}
//
// CONCEPTS RUST :
// 1. async/await : reqwest est asynchrone, le menu appelle via block_on
// 2. Result<T, E> : fetch_price distingue chaque cause d'échec (PriceError)
// 3. Option<T> : get_price réduit tous les échecs à "prix absent"
// ============================================================================

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::error::PriceError;

/// Corps de réponse de `simple/price` : crypto -> (devise -> prix)
///
/// Les valeurs restent des serde_json::Value : CoinGecko peut renvoyer null
/// pour certains couples, ce qui doit donner "prix absent" et non une erreur
/// de parsing.
type SimplePriceResponse = HashMap<String, HashMap<String, serde_json::Value>>;

const USER_AGENT: &str = concat!("cryptoconvert/", env!("CARGO_PKG_VERSION"));

/// Client de prix réutilisé pendant toute la session
#[derive(Debug, Clone)]
pub struct PriceClient {
    http: reqwest::Client,
    base_url: String,
}

impl PriceClient {
    /// Crée le client à partir de la configuration (URL, timeout)
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Raccourci : client par défaut pointant sur une autre URL de base
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(&Config {
            api_base_url: base_url.to_string(),
            ..Config::default()
        })
    }

    /// Récupère le prix de `coin_id` en `currency`
    ///
    /// # Erreurs
    /// * `PriceError::Http` : erreur réseau
    /// * `PriceError::Status` : statut HTTP hors 2xx
    /// * `PriceError::Decode` : corps non JSON ou de forme inattendue
    /// * `PriceError::MissingPrice` : crypto ou devise absente de la réponse
    #[instrument(skip(self))]
    pub async fn fetch_price(&self, coin_id: &str, currency: &str) -> Result<f64, PriceError> {
        let url = build_price_url(&self.base_url, coin_id, currency);
        debug!(url = %url, "Built CoinGecko price URL");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");
        if !status.is_success() {
            return Err(PriceError::Status(status));
        }

        let body = response.text().await?;
        let prices: SimplePriceResponse = serde_json::from_str(&body)?;

        let price = extract_price(&prices, coin_id, currency).ok_or_else(|| {
            PriceError::MissingPrice {
                coin: coin_id.to_string(),
                currency: currency.to_string(),
            }
        })?;

        info!(price, "Fetched price");
        Ok(price)
    }

    /// Comme fetch_price, mais tout échec devient None (et un warning dans les logs)
    pub async fn get_price(&self, coin_id: &str, currency: &str) -> Option<f64> {
        match self.fetch_price(coin_id, currency).await {
            Ok(price) => Some(price),
            Err(e) => {
                warn!(coin = %coin_id, currency = %currency, error = %e, "Price lookup failed");
                None
            }
        }
    }
}

/// Construit l'URL de l'endpoint `simple/price`
///
/// Les identifiants viennent de Coin::id et Fiat::code, déjà en minuscules
/// et sans caractère à échapper.
pub fn build_price_url(base_url: &str, coin_id: &str, currency: &str) -> String {
    format!(
        "{}/simple/price?ids={}&vs_currencies={}",
        base_url.trim_end_matches('/'),
        coin_id,
        currency
    )
}

fn extract_price(prices: &SimplePriceResponse, coin_id: &str, currency: &str) -> Option<f64> {
    prices.get(coin_id)?.get(currency)?.as_f64()
}
