// src/pipeline/mod.rs

pub mod events;
pub mod filter;
pub mod scanner;

pub use events::PoolEvent;
pub use scanner::{RawInstruction, find_target_instruction};

use solana_client::rpc_response::RpcLogsResponse;
use solana_sdk::{native_token::lamports_to_sol, pubkey::Pubkey, signature::Signature};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

use crate::decoders::{DecodeError, LiquidityInstruction};
use crate::monitoring::metrics;
use crate::rpc::ResilientRpcClient;
use crate::storage::EventSink;

/// Position du compte de la pool AMM dans les instructions deposit/withdraw
/// de Raydium V4 (le token program occupe la position 0).
const POOL_ACCOUNT_POSITION: usize = 1;

/// Tout ce qui peut interrompre le traitement d'UNE notification. Aucune de
/// ces erreurs n'est fatale au processus : le listener passe à la suivante.
/// `Persistence` est distinguée des autres car elle implique la perte
/// potentielle d'un événement déjà décodé.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("décodage de l'instruction impossible : {0}")]
    Decode(#[from] DecodeError),
    #[error("collaborateur RPC en échec : {0}")]
    Transport(#[source] anyhow::Error),
    #[error("insertion en base échouée : {0}")]
    Persistence(#[source] anyhow::Error),
}

/// Traite une notification de bout en bout : filtre → fetch → scan →
/// décodage → normalisation → insertion.
///
/// Retourne `Ok(None)` pour les sorties négatives normales (pas de marqueur
/// LP, transaction illisible, aucune instruction du programme cible).
/// Les notifications dupliquées produisent des enregistrements dupliqués :
/// aucune déduplication n'est garantie à la frontière de persistance.
pub async fn process_notification<S: EventSink + ?Sized>(
    rpc: &ResilientRpcClient,
    sink: &S,
    program_id: &Pubkey,
    notification: &RpcLogsResponse,
) -> Result<Option<PoolEvent>, PipelineError> {
    if !filter::is_lp_notification(&notification.logs) {
        return Ok(None);
    }
    metrics::NOTIFICATIONS_MATCHED.inc();

    let signature = Signature::from_str(&notification.signature)
        .map_err(|e| PipelineError::Transport(e.into()))?;
    let fetched = rpc
        .get_transaction(&signature)
        .await
        .map_err(PipelineError::Transport)?;

    // Le nœud peut répondre avec un encodage que nous ne savons pas décoder ;
    // ce n'est pas une erreur du pipeline, on abandonne simplement.
    let Some(transaction) = fetched.transaction.transaction.decode() else {
        warn!(signature = %notification.signature, "Transaction indécodable, notification ignorée");
        return Ok(None);
    };

    let Some(raw) = find_target_instruction(&transaction.message, program_id) else {
        return Ok(None);
    };

    let decoded = match LiquidityInstruction::decode(&raw.data) {
        Ok(decoded) => decoded,
        Err(e) => {
            metrics::DECODE_FAILURES.inc();
            return Err(e.into());
        }
    };
    metrics::EVENTS_DECODED
        .with_label_values(&[decoded.type_name()])
        .inc();

    let pool_balance =
        fetch_pool_balance(rpc, &raw, transaction.message.static_account_keys()).await;

    let event = PoolEvent::new(notification.signature.clone(), decoded, pool_balance);
    sink.insert(&event).await.map_err(|e| {
        metrics::PERSISTENCE_FAILURES.inc();
        PipelineError::Persistence(e)
    })?;
    metrics::EVENTS_PERSISTED.inc();

    Ok(Some(event))
}

/// Enrichissement optionnel : le solde (en SOL entiers) du compte de la pool
/// référencé par l'instruction matchée. Tout échec ici dégrade en `None`,
/// jamais en erreur.
async fn fetch_pool_balance(
    rpc: &ResilientRpcClient,
    raw: &RawInstruction,
    account_keys: &[Pubkey],
) -> Option<f64> {
    let pool = raw.account_at(POOL_ACCOUNT_POSITION, account_keys)?;
    match rpc.get_balance(&pool).await {
        Ok(lamports) => Some(lamports_to_sol(lamports)),
        Err(e) => {
            warn!(pool = %pool, error = %e, "Solde de la pool indisponible, événement sans enrichissement");
            None
        }
    }
}
