use anyhow::{Context, Result};
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_config::RpcTransactionConfig,
};
use solana_sdk::{
    commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signature,
};
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta, UiTransactionEncoding,
};
use std::{sync::Arc, time::Duration};
use tokio::time::sleep;

use crate::monitoring::metrics;

/// Un "wrapper" autour du RpcClient de Solana qui ajoute une logique de
/// ré-essai automatique pour les appels RPC qui échouent à cause d'erreurs réseau temporaires.
#[derive(Clone)]
pub struct ResilientRpcClient {
    client: Arc<RpcClient>,
    max_retries: u8,
    delay_ms: u64,
}

impl ResilientRpcClient {
    /// Construit un nouveau client RPC résilient.
    pub fn new(rpc_url: String, max_retries: u8, delay_ms: u64) -> Self {
        Self {
            client: Arc::new(RpcClient::new(rpc_url)),
            max_retries,
            delay_ms,
        }
    }

    /// Détermine si une erreur du client est temporaire et si une nouvelle tentative doit être effectuée.
    fn is_retryable(error: &ClientError) -> bool {
        matches!(
            error.kind,
            ClientErrorKind::Reqwest(_) | ClientErrorKind::RpcError(_) | ClientErrorKind::Io(_)
        )
    }

    // --- MÉTHODES WRAPPÉES AVEC LOGIQUE DE RÉ-ESSAI ---

    /// Récupère une transaction confirmée complète.
    /// `max_supported_transaction_version: 0` est indispensable : sans lui, le nœud
    /// rejette toute transaction versionnée (v0) avec une erreur.
    pub async fn get_transaction(
        &self,
        signature: &Signature,
    ) -> Result<EncodedConfirmedTransactionWithStatusMeta> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Base64),
            commitment: Some(CommitmentConfig::confirmed()),
            max_supported_transaction_version: Some(0),
        };
        for attempt in 0..=self.max_retries {
            match self
                .client
                .get_transaction_with_config(signature, config.clone())
                .await
            {
                Ok(tx) => return Ok(tx),
                Err(e) => {
                    if Self::is_retryable(&e) && attempt < self.max_retries {
                        sleep(Duration::from_millis(self.delay_ms)).await;
                    } else {
                        metrics::TRANSPORT_FAILURES.inc();
                        return Err(e)
                            .with_context(|| format!("Échec final de get_transaction pour {}", signature));
                    }
                }
            }
        }
        unreachable!()
    }

    /// Récupère le solde d'un compte en lamports.
    pub async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64> {
        for attempt in 0..=self.max_retries {
            match self.client.get_balance(pubkey).await {
                Ok(lamports) => return Ok(lamports),
                Err(e) => {
                    if Self::is_retryable(&e) && attempt < self.max_retries {
                        sleep(Duration::from_millis(self.delay_ms)).await;
                    } else {
                        metrics::TRANSPORT_FAILURES.inc();
                        return Err(e)
                            .with_context(|| format!("Échec final de get_balance pour {}", pubkey));
                    }
                }
            }
        }
        unreachable!()
    }
}
