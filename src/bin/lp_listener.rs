// src/bin/lp_listener.rs

use anyhow::{Context, Result};
use futures_util::StreamExt;
use solana_client::{
    nonblocking::pubsub_client::PubsubClient,
    rpc_config::{RpcTransactionLogsConfig, RpcTransactionLogsFilter},
};
use solana_sdk::commitment_config::CommitmentConfig;
use std::{sync::Arc, time::Duration};
use tracing::{error, info, warn};

use lp_indexer::{
    config::Config,
    decoders::raydium::amm_v4::RAYDIUM_AMM_V4_PROGRAM_ID,
    monitoring::{logging, metrics},
    pipeline::{self, PipelineError},
    rpc::ResilientRpcClient,
    storage::PgStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    logging::setup_logging();
    info!("--- Démarrage du LP Listener (Raydium AMM V4) ---");
    let config = Config::load()?;

    // On lance le serveur de métriques pour que Prometheus puisse nous scraper.
    tokio::spawn(metrics::start_metrics_server());

    let rpc_client = Arc::new(ResilientRpcClient::new(config.solana_rpc_url.clone(), 3, 500));
    let store = PgStore::connect(&config.database_url).await?;
    store.ensure_schema().await?;
    let store = Arc::new(store);

    let wss_url = config.solana_rpc_url.replace("http", "ws");

    loop {
        info!(url = %wss_url, "Connexion au WebSocket Solana");
        match run_listener(&wss_url, rpc_client.clone(), store.clone()).await {
            Ok(_) => warn!("Le stream de logs s'est terminé. Reconnexion..."),
            Err(e) => error!(error = %e, "Erreur dans le stream de logs. Reconnexion dans 5s..."),
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}

async fn run_listener(
    wss_url: &str,
    rpc_client: Arc<ResilientRpcClient>,
    store: Arc<PgStore>,
) -> Result<()> {
    let pubsub_client = PubsubClient::new(wss_url)
        .await
        .context("Connexion au client Pubsub échouée")?;

    let (mut stream, _unsubscribe) = pubsub_client
        .logs_subscribe(
            RpcTransactionLogsFilter::Mentions(vec![RAYDIUM_AMM_V4_PROGRAM_ID.to_string()]),
            RpcTransactionLogsConfig {
                commitment: Some(CommitmentConfig::confirmed()),
            },
        )
        .await?;
    info!(program = %RAYDIUM_AMM_V4_PROGRAM_ID, "Abonnement réussi. En attente des transactions LP...");

    while let Some(response) = stream.next().await {
        metrics::NOTIFICATIONS_RECEIVED.inc();
        let notification = response.value;

        // Une notification = une tâche indépendante : un fetch lent ne bloque
        // jamais la consommation du stream, et aucune erreur de traitement
        // n'est fatale au listener.
        let rpc = rpc_client.clone();
        let sink = store.clone();
        tokio::spawn(async move {
            match pipeline::process_notification(
                &rpc,
                sink.as_ref(),
                &RAYDIUM_AMM_V4_PROGRAM_ID,
                &notification,
            )
            .await
            {
                Ok(Some(event)) => info!(
                    signature = %event.signature,
                    instruction_type = event.instruction_type,
                    "✅ Événement LP persisté"
                ),
                Ok(None) => {}
                // La perte d'un événement déjà décodé est plus grave qu'une
                // notification abandonnée : on la remonte en `error`.
                Err(PipelineError::Persistence(e)) => error!(
                    signature = %notification.signature,
                    error = %e,
                    "Insertion échouée : événement perdu"
                ),
                Err(e) => warn!(
                    signature = %notification.signature,
                    error = %e,
                    "Notification abandonnée"
                ),
            }
        });
    }
    Ok(())
}
