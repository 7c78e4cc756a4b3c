// ============================================================================
// Enum : Fiat
// ============================================================================
// Devises fiat supportées (paramètre `vs_currencies` de l'API)
// ============================================================================

use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;

/// Devise fiat supportée
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fiat {
    Usd,
    Eur,
    Gbp,
}

impl Fiat {
    pub const ALL: [Fiat; 3] = [Fiat::Usd, Fiat::Eur, Fiat::Gbp];

    /// Code en minuscules tel qu'attendu par l'API (ex: "usd")
    pub fn code(self) -> &'static str {
        match self {
            Fiat::Usd => "usd",
            Fiat::Eur => "eur",
            Fiat::Gbp => "gbp",
        }
    }

    /// Code en majuscules pour l'affichage (ex: "USD")
    pub fn label(self) -> &'static str {
        match self {
            Fiat::Usd => "USD",
            Fiat::Eur => "EUR",
            Fiat::Gbp => "GBP",
        }
    }
}

impl FromStr for Fiat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Fiat::ALL
            .into_iter()
            .find(|fiat| fiat.code() == wanted)
            .ok_or_else(|| ConvertError::UnsupportedCurrency(s.trim().to_string()))
    }
}

impl fmt::Display for Fiat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
