// src/pipeline/scanner.rs

use solana_sdk::{message::VersionedMessage, pubkey::Pubkey};

/// Une instruction brute extraite d'une transaction déjà résolue : son payload
/// opaque, ses indices de comptes, et l'index du programme émetteur dans la
/// table des comptes. Durée de vie limitée au traitement d'une notification.
#[derive(Debug, Clone)]
pub struct RawInstruction {
    pub program_id_index: usize,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

impl RawInstruction {
    /// Résout le compte à la position donnée de l'instruction via la table
    /// des comptes de la transaction.
    pub fn account_at(&self, position: usize, account_keys: &[Pubkey]) -> Option<Pubkey> {
        self.accounts
            .get(position)
            .and_then(|&idx| account_keys.get(idx as usize))
            .copied()
    }
}

/// Parcourt les instructions d'un message dans leur ordre d'origine et
/// retourne la PREMIÈRE dont le programme émetteur est `program_id` et dont
/// le payload est non vide. Politique volontairement "premier match" :
/// les instructions suivantes du même programme sont ignorées.
pub fn find_target_instruction(
    message: &VersionedMessage,
    program_id: &Pubkey,
) -> Option<RawInstruction> {
    let account_keys = message.static_account_keys();
    message.instructions().iter().find_map(|ix| {
        let resolved = account_keys.get(ix.program_id_index as usize)?;
        if resolved == program_id && !ix.data.is_empty() {
            Some(RawInstruction {
                program_id_index: ix.program_id_index as usize,
                accounts: ix.accounts.clone(),
                data: ix.data.clone(),
            })
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{
        hash::Hash,
        instruction::CompiledInstruction,
        message::{Message, MessageHeader},
    };

    fn message_with(
        account_keys: Vec<Pubkey>,
        instructions: Vec<CompiledInstruction>,
    ) -> VersionedMessage {
        VersionedMessage::Legacy(Message {
            header: MessageHeader {
                num_required_signatures: 1,
                num_readonly_signed_accounts: 0,
                num_readonly_unsigned_accounts: 0,
            },
            account_keys,
            recent_blockhash: Hash::default(),
            instructions,
        })
    }

    fn ix(program_id_index: u8, accounts: Vec<u8>, data: Vec<u8>) -> CompiledInstruction {
        CompiledInstruction { program_id_index, accounts, data }
    }

    #[test]
    fn finds_matching_instruction() {
        let target = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let message = message_with(
            vec![other, target],
            vec![
                ix(0, vec![], vec![1, 2, 3]),
                ix(1, vec![0], vec![4, 0, 0, 0, 0, 0, 0, 0, 250]),
            ],
        );
        let raw = find_target_instruction(&message, &target).unwrap();
        assert_eq!(raw.program_id_index, 1);
        assert_eq!(raw.data[0], 4);
    }

    #[test]
    fn first_match_wins_on_ties() {
        let target = Pubkey::new_unique();
        let message = message_with(
            vec![target],
            vec![ix(0, vec![], vec![3]), ix(0, vec![], vec![4])],
        );
        let raw = find_target_instruction(&message, &target).unwrap();
        assert_eq!(raw.data, vec![3]);
    }

    #[test]
    fn skips_empty_payloads() {
        let target = Pubkey::new_unique();
        let message = message_with(
            vec![target],
            vec![ix(0, vec![], vec![]), ix(0, vec![], vec![4])],
        );
        let raw = find_target_instruction(&message, &target).unwrap();
        assert_eq!(raw.data, vec![4]);
    }

    #[test]
    fn returns_none_without_match() {
        let target = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let message = message_with(vec![other], vec![ix(0, vec![], vec![3])]);
        assert!(find_target_instruction(&message, &target).is_none());
    }

    #[test]
    fn out_of_range_program_index_is_skipped() {
        let target = Pubkey::new_unique();
        let message = message_with(
            vec![target],
            vec![ix(7, vec![], vec![3]), ix(0, vec![], vec![4])],
        );
        let raw = find_target_instruction(&message, &target).unwrap();
        assert_eq!(raw.data, vec![4]);
    }

    #[test]
    fn account_resolution_follows_instruction_indices() {
        let target = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let token_program = Pubkey::new_unique();
        let message = message_with(
            vec![target, token_program, pool],
            vec![ix(0, vec![1, 2], vec![3, 0])],
        );
        let raw = find_target_instruction(&message, &target).unwrap();
        assert_eq!(
            raw.account_at(1, message.static_account_keys()),
            Some(pool)
        );
        assert_eq!(raw.account_at(9, message.static_account_keys()), None);
    }
}
