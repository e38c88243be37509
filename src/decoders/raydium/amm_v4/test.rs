use super::instructions::{DecodeError, FixedSide, LiquidityInstruction};

fn add_liquidity_payload(base: u64, quote: u64, fixed_side: u8) -> Vec<u8> {
    let mut data = vec![3u8];
    data.extend_from_slice(&base.to_le_bytes());
    data.extend_from_slice(&quote.to_le_bytes());
    data.push(fixed_side);
    data
}

fn remove_liquidity_payload(amount: u64) -> Vec<u8> {
    let mut data = vec![4u8];
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

#[test]
fn decode_add_liquidity_fixed_quote() {
    let data = add_liquidity_payload(1_000_000_000_000, 500_000, 1);
    assert_eq!(data.len(), 18);
    let decoded = LiquidityInstruction::decode(&data).unwrap();
    assert_eq!(
        decoded,
        LiquidityInstruction::AddLiquidity {
            discriminator: 3,
            base_amount_in: 1_000_000_000_000,
            quote_amount_in: 500_000,
            fixed_side: FixedSide::Quote,
        }
    );
}

#[test]
fn decode_add_liquidity_preserves_full_u64_magnitude() {
    // Au-delà de 2^53 : un passage par f64 perdrait les octets de poids faible.
    let base = u64::MAX;
    let quote = (1u64 << 53) + 1;
    let data = add_liquidity_payload(base, quote, 0);
    let decoded = LiquidityInstruction::decode(&data).unwrap();
    match decoded {
        LiquidityInstruction::AddLiquidity { base_amount_in, quote_amount_in, fixed_side, .. } => {
            assert_eq!(base_amount_in, u64::MAX);
            assert_eq!(quote_amount_in, (1u64 << 53) + 1);
            assert_eq!(fixed_side, FixedSide::Base);
        }
        other => panic!("variante inattendue : {:?}", other),
    }
}

#[test]
fn decode_remove_liquidity() {
    let data = remove_liquidity_payload(250);
    assert_eq!(data.len(), 9);
    let decoded = LiquidityInstruction::decode(&data).unwrap();
    assert_eq!(
        decoded,
        LiquidityInstruction::RemoveLiquidity { discriminator: 4, amount_in: 250 }
    );
}

#[test]
fn empty_payload_is_malformed() {
    assert_eq!(
        LiquidityInstruction::decode(&[]),
        Err(DecodeError::MalformedInstruction)
    );
}

#[test]
fn short_add_liquidity_is_truncated() {
    assert_eq!(
        LiquidityInstruction::decode(&[0x03, 0x00]),
        Err(DecodeError::TruncatedPayload { need: 18, got: 2 })
    );
}

#[test]
fn short_remove_liquidity_is_truncated() {
    let data = remove_liquidity_payload(99);
    assert_eq!(
        LiquidityInstruction::decode(&data[..8]),
        Err(DecodeError::TruncatedPayload { need: 9, got: 8 })
    );
}

#[test]
fn truncation_never_zero_fills() {
    // Un payload de 17 octets ne doit jamais produire un AddLiquidity
    // avec des champs remplis de zéros.
    let data = add_liquidity_payload(42, 42, 0);
    let result = LiquidityInstruction::decode(&data[..17]);
    assert_eq!(result, Err(DecodeError::TruncatedPayload { need: 18, got: 17 }));
}

#[test]
fn invalid_fixed_side_is_rejected() {
    let data = add_liquidity_payload(1, 1, 2);
    assert_eq!(
        LiquidityInstruction::decode(&data),
        Err(DecodeError::InvalidEnumValue(2))
    );
}

#[test]
fn unknown_discriminator_is_not_an_error() {
    let decoded = LiquidityInstruction::decode(&[9, 1, 2, 3]).unwrap();
    assert_eq!(decoded, LiquidityInstruction::Unknown { discriminator: 9 });
    assert_eq!(decoded.type_name(), "Unknown");

    // Même un payload d'un seul octet est une classification valide.
    let decoded = LiquidityInstruction::decode(&[0xFF]).unwrap();
    assert_eq!(decoded, LiquidityInstruction::Unknown { discriminator: 0xFF });
}

#[test]
fn type_names_match_variants() {
    let add = LiquidityInstruction::decode(&add_liquidity_payload(1, 1, 0)).unwrap();
    let remove = LiquidityInstruction::decode(&remove_liquidity_payload(1)).unwrap();
    assert_eq!(add.type_name(), "AddLiquidity");
    assert_eq!(remove.type_name(), "RemoveLiquidity");
}
