// src/pipeline/events.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::decoders::LiquidityInstruction;

/// L'enregistrement normalisé remis au collaborateur de persistance.
/// Construit une seule fois par instruction matchée, jamais muté ensuite.
#[derive(Debug, Clone, Serialize)]
pub struct PoolEvent {
    pub signature: String,
    pub instruction_type: &'static str,
    pub timestamp: DateTime<Utc>,
    pub payload: LiquidityInstruction,
    /// Solde de la pool en SOL entiers (lamports / 10^9). Enrichissement
    /// optionnel : son absence ne fait jamais échouer le pipeline.
    pub liquidity_pool_balance: Option<f64>,
}

impl PoolEvent {
    /// Assemble l'événement final : horodatage courant, signature et payload
    /// copiés tels quels, solde optionnel attaché. Construction pure.
    pub fn new(
        signature: String,
        payload: LiquidityInstruction,
        liquidity_pool_balance: Option<f64>,
    ) -> Self {
        Self {
            signature,
            instruction_type: payload.type_name(),
            timestamp: Utc::now(),
            payload,
            liquidity_pool_balance,
        }
    }
}
