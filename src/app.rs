// ============================================================================
// Structure : App
// ============================================================================
// Boucle interactive du convertisseur : menu numéroté 1-4 lu ligne par ligne
//
// CONCEPTS RUST :
// 1. Génériques : App<R: BufRead, W: Write> fonctionne sur stdin/stdout
//    comme sur un Cursor / Vec<u8> dans les tests
// 2. Async dans sync : un runtime tokio mono-thread exécute chaque requête
//    de prix avec block_on, une à la fois
// 3. let-else : une fin d'entrée (EOF) à n'importe quel prompt termine
//    proprement la boucle
//
// Toute saisie invalide (crypto, montant, devise) est refusée AVANT l'appel
// réseau : message d'erreur puis retour au menu.
// ============================================================================

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use crate::api::PriceClient;
use crate::models::{parse_amount, Coin, ConversionRequest, Direction, Fiat};

const BANNER: &str = "
    ==============================================
    CONVERTISSEUR DE CRYPTOMONNAIES
    ==============================================
    Convertit des cryptomonnaies en devises fiat et inversement.
    Prix en temps réel fournis par l'API CoinGecko.
    ==============================================
";

/// Option choisie dans le menu principal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Convert(Direction),
    ShowPrices,
    Exit,
}

impl MenuChoice {
    /// "1".."4" -> option, tout le reste -> None
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Convert(Direction::CryptoToFiat)),
            "2" => Some(MenuChoice::Convert(Direction::FiatToCrypto)),
            "3" => Some(MenuChoice::ShowPrices),
            "4" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Suite de la boucle après une action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

/// État de la session interactive
pub struct App<R, W> {
    input: R,
    output: W,
    client: PriceClient,
    runtime: Runtime,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(client: PriceClient, input: R, output: W) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Échec de la création du runtime tokio")?;

        Ok(Self {
            input,
            output,
            client,
            runtime,
        })
    }

    /// Affiche la bannière puis traite les options jusqu'à "4" ou EOF
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", BANNER)?;
        info!("Interactive session started");

        loop {
            self.display_menu()?;
            let Some(choice) = self.prompt("Choisissez une option (1-4) : ")? else {
                info!("Input closed, leaving");
                break;
            };
            debug!(choice = %choice, "Menu choice");

            let step = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Convert(direction)) => self.convert(direction)?,
                Some(MenuChoice::ShowPrices) => self.show_current_prices()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "\nMerci d'avoir utilisé le convertisseur. Au revoir !")?;
                    Step::Quit
                }
                None => {
                    writeln!(self.output, "\nErreur : option invalide. Veuillez réessayer.")?;
                    Step::Continue
                }
            };

            if step == Step::Quit {
                break;
            }
        }

        self.output.flush()?;
        info!("Interactive session ended");
        Ok(())
    }

    fn display_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\nOptions :")?;
        writeln!(self.output, "1. Convertir une cryptomonnaie en devise fiat")?;
        writeln!(self.output, "2. Convertir une devise fiat en cryptomonnaie")?;
        writeln!(self.output, "3. Afficher les prix actuels des cryptomonnaies")?;
        writeln!(self.output, "4. Quitter")?;
        Ok(())
    }

    /// Écrit le prompt et lit une ligne ; None en fin d'entrée
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Échec de la lecture de l'entrée standard")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Options 1 et 2 : crypto, montant, devise, puis une seule requête de prix
    fn convert(&mut self, direction: Direction) -> Result<Step> {
        let Some(raw_coin) = self.prompt("Entrez la cryptomonnaie (ex: btc, eth, ltc) : ")? else {
            return Ok(Step::Quit);
        };
        let coin: Coin = match raw_coin.parse() {
            Ok(coin) => coin,
            Err(e) => {
                debug!(error = %e, "Rejected coin");
                writeln!(self.output, "Erreur : cryptomonnaie non supportée.")?;
                return Ok(Step::Continue);
            }
        };

        let amount_prompt = match direction {
            Direction::CryptoToFiat => "Entrez le montant : ",
            Direction::FiatToCrypto => "Entrez le montant en devise fiat : ",
        };
        let Some(raw_amount) = self.prompt(amount_prompt)? else {
            return Ok(Step::Quit);
        };
        let amount = match parse_amount(&raw_amount) {
            Ok(amount) => amount,
            Err(e) => {
                debug!(error = %e, "Rejected amount");
                writeln!(self.output, "Erreur : veuillez entrer une valeur numérique valide.")?;
                return Ok(Step::Continue);
            }
        };

        let Some(raw_fiat) = self.prompt("Entrez la devise fiat (usd, eur, gbp) : ")? else {
            return Ok(Step::Quit);
        };
        let Some(fiat) = self.parse_fiat(&raw_fiat)? else {
            return Ok(Step::Continue);
        };

        let request = ConversionRequest::new(coin, fiat, amount, direction);
        let price = self.lookup_price(coin, fiat)?;

        match request.convert(price) {
            Some(result) => {
                info!(?request, result, "Conversion done");
                writeln!(self.output, "\nRésultat : {}", request.describe(result))?;
            }
            None => {
                writeln!(self.output, "Erreur : impossible de réaliser la conversion.")?;
            }
        }
        Ok(Step::Continue)
    }

    /// Option 3 : prix des cinq cryptos dans la devise choisie
    fn show_current_prices(&mut self) -> Result<Step> {
        let Some(raw_fiat) =
            self.prompt("Entrez la devise fiat pour afficher les prix (usd, eur, gbp) : ")?
        else {
            return Ok(Step::Quit);
        };
        let Some(fiat) = self.parse_fiat(&raw_fiat)? else {
            return Ok(Step::Continue);
        };

        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(
            self.output,
            "\nPrix actuels des cryptomonnaies (en {}, {}) :",
            fiat.label(),
            now
        )?;

        for coin in Coin::ALL {
            match self.lookup_price(coin, fiat)? {
                Some(price) => writeln!(
                    self.output,
                    "- {} : {:.2} {}",
                    coin.display_name(),
                    price,
                    fiat.label()
                )?,
                None => writeln!(self.output, "- {} : prix indisponible.", coin.display_name())?,
            }
        }
        Ok(Step::Continue)
    }

    /// Une requête de prix ; en cas d'échec la cause est affichée et le prix est None
    fn lookup_price(&mut self, coin: Coin, fiat: Fiat) -> Result<Option<f64>> {
        let result = self
            .runtime
            .block_on(self.client.fetch_price(coin.id(), fiat.code()));
        match result {
            Ok(price) => Ok(Some(price)),
            Err(e) => {
                warn!(coin = %coin, currency = %fiat.code(), error = %e, "Price lookup failed");
                writeln!(self.output, "Erreur de connexion : {}", e)?;
                Ok(None)
            }
        }
    }

    /// Parse la devise ; affiche l'erreur et renvoie None si elle est refusée
    fn parse_fiat(&mut self, raw: &str) -> Result<Option<Fiat>> {
        match raw.parse::<Fiat>() {
            Ok(fiat) => Ok(Some(fiat)),
            Err(e) => {
                debug!(error = %e, "Rejected currency");
                writeln!(self.output, "Erreur : devise non supportée.")?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use std::io::Cursor;

    fn run_session(base_url: &str, input: &str) -> String {
        let client = PriceClient::with_base_url(base_url).unwrap();
        let mut app = App::new(client, Cursor::new(input.to_string()), Vec::new()).unwrap();
        app.run().unwrap();
        String::from_utf8(app.output).unwrap()
    }

    fn mock_price(
        server: &mut ServerGuard,
        coin: &str,
        currency: &str,
        body: &str,
    ) -> mockito::Mock {
        server
            .mock("GET", "/simple/price")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("ids".into(), coin.into()),
                Matcher::UrlEncoded("vs_currencies".into(), currency.into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    /// Mock qui échoue le test si la moindre requête arrive
    fn forbid_requests(server: &mut ServerGuard) -> mockito::Mock {
        server.mock("GET", Matcher::Any).expect(0).create()
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(
            MenuChoice::parse(" 1 "),
            Some(MenuChoice::Convert(Direction::CryptoToFiat))
        );
        assert_eq!(
            MenuChoice::parse("2"),
            Some(MenuChoice::Convert(Direction::FiatToCrypto))
        );
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::ShowPrices));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("5"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_exit() {
        let mut server = Server::new();
        let guard = forbid_requests(&mut server);

        let output = run_session(&server.url(), "4\n");

        assert!(output.contains("CONVERTISSEUR DE CRYPTOMONNAIES"));
        assert!(output.contains("Au revoir"));
        guard.assert();
    }

    #[test]
    fn test_invalid_option_then_eof() {
        let output = run_session("http://127.0.0.1:1", "9\n");

        assert!(output.contains("option invalide"));
        assert!(!output.contains("Au revoir"));
    }

    #[test]
    fn test_eof_mid_conversion() {
        let output = run_session("http://127.0.0.1:1", "1\nbtc\n");
        assert!(output.contains("Entrez le montant : "));
        assert!(!output.contains("Résultat"));
    }

    #[test]
    fn test_crypto_to_fiat() {
        let mut server = Server::new();
        let mock = mock_price(&mut server, "bitcoin", "usd", r#"{"bitcoin":{"usd":67000.5}}"#);

        let output = run_session(&server.url(), "1\nBTC\n2\nUSD\n4\n");

        assert!(output.contains("Résultat : 2 BITCOIN = 134001.00 USD"), "{}", output);
        mock.assert();
    }

    #[test]
    fn test_fiat_to_crypto() {
        let mut server = Server::new();
        let mock = mock_price(&mut server, "ethereum", "eur", r#"{"ethereum":{"eur":400}}"#);

        let output = run_session(&server.url(), "2\neth\n100\neur\n4\n");

        assert!(output.contains("Résultat : 100 EUR = 0.25000000 ETHEREUM"), "{}", output);
        mock.assert();
    }

    #[test]
    fn test_unsupported_coin_skips_network() {
        let mut server = Server::new();
        let guard = forbid_requests(&mut server);

        let output = run_session(&server.url(), "1\nsolana\n4\n");

        assert!(output.contains("cryptomonnaie non supportée"));
        assert!(!output.contains("Entrez le montant"));
        guard.assert();
    }

    #[test]
    fn test_unsupported_currency_skips_network() {
        let mut server = Server::new();
        let guard = forbid_requests(&mut server);

        let output = run_session(&server.url(), "1\nbtc\n1\njpy\n3\nchf\n4\n");

        assert_eq!(output.matches("devise non supportée").count(), 2);
        guard.assert();
    }

    #[test]
    fn test_invalid_amount_skips_network() {
        let mut server = Server::new();
        let guard = forbid_requests(&mut server);

        let output = run_session(&server.url(), "2\nbtc\nbeaucoup\n4\n");

        assert!(output.contains("valeur numérique valide"));
        assert!(!output.contains("Entrez la devise fiat"));
        assert!(output.contains("Au revoir"));
        guard.assert();
    }

    #[test]
    fn test_conversion_failure_reported() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(500)
            .create();

        let output = run_session(&server.url(), "1\nltc\n3\ngbp\n4\n");

        assert!(output.contains("impossible de réaliser la conversion"));
        assert!(output.contains("Au revoir"));
        mock.assert();
    }

    #[test]
    fn test_lookup_failure_cause_is_printed() {
        let output = run_session("http://127.0.0.1:1", "1\nbtc\n1\nusd\n3\neur\n4\n");

        assert!(
            output.contains("Erreur de connexion : requête HTTP échouée"),
            "{}",
            output
        );
        assert!(output.contains("impossible de réaliser la conversion"));
        // Une cause par crypto listée, plus celle de la conversion
        assert_eq!(output.matches("Erreur de connexion").count(), 6);
        assert_eq!(output.matches("prix indisponible").count(), 5);
    }

    #[test]
    fn test_show_current_prices() {
        let mut server = Server::new();
        let mocks = vec![
            mock_price(&mut server, "bitcoin", "usd", r#"{"bitcoin":{"usd":67000.456}}"#),
            mock_price(&mut server, "ethereum", "usd", r#"{"ethereum":{"usd":2500}}"#),
            mock_price(&mut server, "litecoin", "usd", "{}"),
            mock_price(&mut server, "ripple", "usd", r#"{"ripple":{"usd":0.5}}"#),
            mock_price(&mut server, "dogecoin", "usd", r#"{"dogecoin":{"usd":null}}"#),
        ];

        let output = run_session(&server.url(), "3\nusd\n4\n");

        assert!(output.contains("Prix actuels des cryptomonnaies (en USD"));
        assert!(output.contains("- Bitcoin : 67000.46 USD"));
        assert!(output.contains("- Ethereum : 2500.00 USD"));
        assert!(output.contains("- Litecoin : prix indisponible."));
        assert!(output.contains("Erreur de connexion : aucun prix pour litecoin/usd"));
        assert!(output.contains("- Ripple : 0.50 USD"));
        assert!(output.contains("- Dogecoin : prix indisponible."));

        let bitcoin = output.find("- Bitcoin").unwrap();
        let dogecoin = output.find("- Dogecoin").unwrap();
        assert!(bitcoin < dogecoin);

        for mock in mocks {
            mock.assert();
        }
    }
}
