// ============================================================================
// Module : api
// ============================================================================
// Clients HTTP vers les sources de prix
// ============================================================================

pub mod coingecko;  // Client API CoinGecko

pub use coingecko::{build_price_url, PriceClient};
