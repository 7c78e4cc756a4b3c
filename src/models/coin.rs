// ============================================================================
// Enum : Coin
// ============================================================================
// Les cinq cryptomonnaies supportées par le convertisseur
//
// Chaque crypto a :
// - un identifiant CoinGecko (ex: "bitcoin") utilisé dans l'URL de l'API
// - un alias court (ex: "btc") que l'utilisateur peut taper à la place
// - un nom d'affichage (ex: "Bitcoin")
//
// CONCEPT RUST : FromStr
// - "btc".parse::<Coin>() appelle Coin::from_str
// - Centralise la résolution des alias et le refus des cryptos inconnues
// ============================================================================

use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;

/// Cryptomonnaie supportée
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coin {
    Bitcoin,
    Ethereum,
    Litecoin,
    Ripple,
    Dogecoin,
}

impl Coin {
    /// Toutes les cryptos, dans l'ordre de l'affichage des prix
    pub const ALL: [Coin; 5] = [
        Coin::Bitcoin,
        Coin::Ethereum,
        Coin::Litecoin,
        Coin::Ripple,
        Coin::Dogecoin,
    ];

    /// Identifiant CoinGecko (paramètre `ids` de l'API)
    pub fn id(self) -> &'static str {
        match self {
            Coin::Bitcoin => "bitcoin",
            Coin::Ethereum => "ethereum",
            Coin::Litecoin => "litecoin",
            Coin::Ripple => "ripple",
            Coin::Dogecoin => "dogecoin",
        }
    }

    /// Alias court accepté en saisie
    pub fn alias(self) -> &'static str {
        match self {
            Coin::Bitcoin => "btc",
            Coin::Ethereum => "eth",
            Coin::Litecoin => "ltc",
            Coin::Ripple => "xrp",
            Coin::Dogecoin => "doge",
        }
    }

    /// Nom capitalisé pour l'affichage (ex: "Bitcoin")
    pub fn display_name(self) -> &'static str {
        match self {
            Coin::Bitcoin => "Bitcoin",
            Coin::Ethereum => "Ethereum",
            Coin::Litecoin => "Litecoin",
            Coin::Ripple => "Ripple",
            Coin::Dogecoin => "Dogecoin",
        }
    }

    /// Libellé utilisé dans les résultats de conversion (ex: "BITCOIN")
    pub fn label(self) -> String {
        self.id().to_uppercase()
    }
}

impl FromStr for Coin {
    type Err = ConvertError;

    /// Accepte l'alias ou l'identifiant, sans tenir compte de la casse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Coin::ALL
            .into_iter()
            .find(|coin| coin.alias() == wanted || coin.id() == wanted)
            .ok_or_else(|| ConvertError::UnsupportedCoin(s.trim().to_string()))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
