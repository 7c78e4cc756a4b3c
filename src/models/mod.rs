// ============================================================================
// Module : models
// ============================================================================
// Structures de données du convertisseur : cryptos, devises, conversions
// ============================================================================

pub mod coin;       // Cryptos supportées et alias
pub mod fiat;       // Devises fiat supportées
pub mod conversion; // Calculs de conversion

// Re-export pour écrire `use cryptoconvert::models::Coin;`
pub use coin::Coin;
pub use conversion::{
    convert_crypto_to_fiat, convert_fiat_to_crypto, parse_amount, ConversionRequest, Direction,
};
pub use fiat::Fiat;
