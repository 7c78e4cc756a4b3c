// ============================================================================
// Conversion crypto <-> fiat
// ============================================================================
// Toute la logique métier tient en une multiplication ou une division.
//
// CONCEPT RUST : Option comme "valeur absente"
// - Un prix absent (API injoignable, couple inconnu) est None
// - None se propage au résultat avec map / and_then, sans cas particulier
// ============================================================================

use crate::error::ConvertError;
use crate::models::{Coin, Fiat};

/// Convertit un montant de crypto en fiat : amount * price
pub fn convert_crypto_to_fiat(amount: f64, price: Option<f64>) -> Option<f64> {
    price.map(|p| amount * p)
}

/// Convertit un montant de fiat en crypto : amount / price
///
/// Un prix nul donne None plutôt qu'un résultat infini.
pub fn convert_fiat_to_crypto(amount: f64, price: Option<f64>) -> Option<f64> {
    price.filter(|&p| p != 0.0).map(|p| amount / p)
}

/// Parse un montant saisi par l'utilisateur
///
/// Refuse le texte non numérique ainsi que NaN et les infinis.
pub fn parse_amount(input: &str) -> Result<f64, ConvertError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConvertError::InvalidAmount(trimmed.to_string())),
    }
}

/// Sens de la conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    CryptoToFiat,
    FiatToCrypto,
}

/// Une demande de conversion complète et validée
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub coin: Coin,
    pub fiat: Fiat,
    pub amount: f64,
    pub direction: Direction,
}

impl ConversionRequest {
    pub fn new(coin: Coin, fiat: Fiat, amount: f64, direction: Direction) -> Self {
        Self {
            coin,
            fiat,
            amount,
            direction,
        }
    }

    /// Applique la conversion avec le prix 1 coin = price fiat
    pub fn convert(&self, price: Option<f64>) -> Option<f64> {
        match self.direction {
            Direction::CryptoToFiat => convert_crypto_to_fiat(self.amount, price),
            Direction::FiatToCrypto => convert_fiat_to_crypto(self.amount, price),
        }
    }

    /// Formate le résultat : "1 BITCOIN = 67000.50 USD"
    ///
    /// Les montants fiat ont 2 décimales, les montants crypto 8.
    pub fn describe(&self, result: f64) -> String {
        match self.direction {
            Direction::CryptoToFiat => format!(
                "{} {} = {:.2} {}",
                self.amount,
                self.coin.label(),
                result,
                self.fiat.label()
            ),
            Direction::FiatToCrypto => format!(
                "{} {} = {:.8} {}",
                self.amount,
                self.fiat.label(),
                result,
                self.coin.label()
            ),
        }
    }
}
