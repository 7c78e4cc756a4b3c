// ============================================================================
// cryptoconvert - Point d'entrée
// ============================================================================
// Convertisseur interactif crypto <-> fiat sur stdin/stdout
//
// Ordre de démarrage :
// 1. Configuration depuis l'environnement
// 2. Logging vers fichier (les logs ne polluent pas le menu)
// 3. Client HTTP CoinGecko
// 4. Boucle interactive jusqu'à "4" ou fin d'entrée
// ============================================================================

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use cryptoconvert::api::PriceClient;
use cryptoconvert::app::App;
use cryptoconvert::config::Config;

/// Initialise le logging vers un fichier à rotation quotidienne
///
/// Les logs sont écrits dans `log_dir/cryptoconvert.log.AAAA-MM-JJ`.
///
/// # Utilisation
/// ```bash
/// # Contrôler le niveau de log
/// RUST_LOG=debug cargo run
/// RUST_LOG=cryptoconvert=trace cargo run
/// ```
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "cryptoconvert.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour cryptoconvert, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cryptoconvert=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::from_env().context("Configuration invalide")?;

    // Sans logs on continue quand même : le menu reste utilisable
    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Attention : impossible d'initialiser les logs : {:#}", e);
        eprintln!("   Poursuite sans logs...");
    });

    info!(api = %config.api_base_url, timeout = ?config.timeout, "cryptoconvert starting up");

    let client = PriceClient::new(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = App::new(client, stdin.lock(), stdout.lock())?;

    let result = app.run();
    match &result {
        Ok(()) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }
    result
}
