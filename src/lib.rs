// ============================================================================
// cryptoconvert - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;       // API CoinGecko
pub mod app;       // Menu interactif
pub mod config;    // Configuration (variables d'environnement)
pub mod error;     // Erreurs typées
pub mod models;    // Cryptos, devises, conversions
