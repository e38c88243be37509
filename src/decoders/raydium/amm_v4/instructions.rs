// src/decoders/raydium/amm_v4/instructions.rs

use borsh::BorshDeserialize;
use serde::Serialize;
use thiserror::Error;

/// Discriminateur du premier octet pour `deposit` (ajout de liquidité).
pub const ADD_LIQUIDITY_DISCRIMINATOR: u8 = 3;
/// Discriminateur du premier octet pour `withdraw` (retrait de liquidité).
pub const REMOVE_LIQUIDITY_DISCRIMINATOR: u8 = 4;

// Longueurs minimales des layouts :
// AddLiquidity    : u8 (1) + u64 (8) + u64 (8) + u8 (1) = 18 octets
// RemoveLiquidity : u8 (1) + u64 (8)                    = 9 octets
const ADD_LIQUIDITY_LEN: usize = 18;
const REMOVE_LIQUIDITY_LEN: usize = 9;

/// Erreurs de décodage d'un payload d'instruction Raydium AMM V4.
/// Un discriminateur inconnu n'est PAS une erreur : il produit `Unknown`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload d'instruction vide")]
    MalformedInstruction,
    #[error("payload tronqué : {got} octets reçus, {need} requis")]
    TruncatedPayload { need: usize, got: usize },
    #[error("valeur de fixed_side invalide : {0} (attendu 0 ou 1)")]
    InvalidEnumValue(u8),
}

/// Côté de l'opération dont le montant est fixe, l'autre étant calculé
/// par le programme au moment du dépôt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FixedSide {
    Base,
    Quote,
}

impl TryFrom<u8> for FixedSide {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FixedSide::Base),
            1 => Ok(FixedSide::Quote),
            other => Err(DecodeError::InvalidEnumValue(other)),
        }
    }
}

// --- Layouts on-chain (borsh, champs little-endian, sans padding) ---

#[derive(BorshDeserialize)]
struct AddLiquidityLayout {
    instruction: u8,
    base_amount_in: u64,
    quote_amount_in: u64,
    fixed_side: u8,
}

#[derive(BorshDeserialize)]
struct RemoveLiquidityLayout {
    instruction: u8,
    amount_in: u64,
}

/// L'union taguée des instructions de liquidité que nous savons interpréter.
/// Les montants restent des `u64` exacts de bout en bout : jamais de passage
/// par un flottant, qui perdrait de la précision au-delà de 2^53.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LiquidityInstruction {
    AddLiquidity {
        discriminator: u8,
        base_amount_in: u64,
        quote_amount_in: u64,
        fixed_side: FixedSide,
    },
    RemoveLiquidity {
        discriminator: u8,
        amount_in: u64,
    },
    Unknown {
        discriminator: u8,
    },
}

/// Lit l'octet discriminant d'un payload. Seul un payload vide est une
/// erreur ; un discriminateur hors de la table connue reste une
/// classification valide (→ `Unknown`).
pub fn classify(data: &[u8]) -> Result<u8, DecodeError> {
    data.first().copied().ok_or(DecodeError::MalformedInstruction)
}

impl LiquidityInstruction {
    /// Classifie puis décode un payload d'instruction brut.
    ///
    /// Le premier octet sélectionne le layout : 3 → AddLiquidity,
    /// 4 → RemoveLiquidity, tout le reste → `Unknown` (résultat valide,
    /// qui ne porte que le discriminateur).
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let discriminator = classify(data)?;
        match discriminator {
            ADD_LIQUIDITY_DISCRIMINATOR => Self::decode_add_liquidity(data),
            REMOVE_LIQUIDITY_DISCRIMINATOR => Self::decode_remove_liquidity(data),
            other => Ok(LiquidityInstruction::Unknown { discriminator: other }),
        }
    }

    fn decode_add_liquidity(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < ADD_LIQUIDITY_LEN {
            return Err(DecodeError::TruncatedPayload {
                need: ADD_LIQUIDITY_LEN,
                got: data.len(),
            });
        }
        // La longueur est vérifiée : borsh ne peut plus échouer ici, mais on
        // reste total plutôt que de paniquer.
        let layout = AddLiquidityLayout::deserialize(&mut &data[..ADD_LIQUIDITY_LEN])
            .map_err(|_| DecodeError::TruncatedPayload {
                need: ADD_LIQUIDITY_LEN,
                got: data.len(),
            })?;
        Ok(LiquidityInstruction::AddLiquidity {
            discriminator: layout.instruction,
            base_amount_in: layout.base_amount_in,
            quote_amount_in: layout.quote_amount_in,
            fixed_side: FixedSide::try_from(layout.fixed_side)?,
        })
    }

    fn decode_remove_liquidity(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < REMOVE_LIQUIDITY_LEN {
            return Err(DecodeError::TruncatedPayload {
                need: REMOVE_LIQUIDITY_LEN,
                got: data.len(),
            });
        }
        let layout = RemoveLiquidityLayout::deserialize(&mut &data[..REMOVE_LIQUIDITY_LEN])
            .map_err(|_| DecodeError::TruncatedPayload {
                need: REMOVE_LIQUIDITY_LEN,
                got: data.len(),
            })?;
        Ok(LiquidityInstruction::RemoveLiquidity {
            discriminator: layout.instruction,
            amount_in: layout.amount_in,
        })
    }

    /// Retourne une chaîne statique représentant le type d'instruction.
    /// Utile pour la colonne `instruction_type` et les labels Prometheus.
    pub fn type_name(&self) -> &'static str {
        match self {
            LiquidityInstruction::AddLiquidity { .. } => "AddLiquidity",
            LiquidityInstruction::RemoveLiquidity { .. } => "RemoveLiquidity",
            LiquidityInstruction::Unknown { .. } => "Unknown",
        }
    }
}
