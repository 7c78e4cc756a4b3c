// ============================================================================
// Module : error
// ============================================================================
// Erreurs typées du convertisseur
//
// - ConvertError : saisie utilisateur refusée (crypto, devise, montant)
// - PriceError   : échec de récupération d'un prix
// - ConfigError  : variable d'environnement invalide
//
// Le binaire travaille avec anyhow::Result ; ces enums servent aux endroits
// où l'appelant doit distinguer les cas (messages du menu, tests).
// ============================================================================

use thiserror::Error;

/// Saisie utilisateur refusée avant tout appel réseau
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("cryptomonnaie non supportée : {0}")]
    UnsupportedCoin(String),

    #[error("devise non supportée : {0}")]
    UnsupportedCurrency(String),

    #[error("montant invalide : {0}")]
    InvalidAmount(String),
}

/// Échec d'une récupération de prix
#[derive(Debug, Error)]
pub enum PriceError {
    /// Erreur de transport (DNS, connexion, timeout...)
    #[error("requête HTTP échouée : {0}")]
    Http(#[from] reqwest::Error),

    /// L'API a répondu avec un statut hors 2xx
    #[error("l'API a retourné HTTP {0}")]
    Status(reqwest::StatusCode),

    /// Corps de réponse illisible
    #[error("réponse JSON invalide : {0}")]
    Decode(#[from] serde_json::Error),

    /// La réponse ne contient pas de prix numérique pour ce couple
    #[error("aucun prix pour {coin}/{currency}")]
    MissingPrice { coin: String, currency: String },
}

/// Configuration invalide
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{var} invalide : {value:?}")]
    InvalidValue { var: &'static str, value: String },
}
