// src/pipeline/filter.rs

/// Marqueurs émis dans les logs du programme Raydium AMM V4 lors de la
/// création d'une pool ou de son dépôt de liquidité initial.
const LP_LOG_MARKERS: [&str; 2] = ["InitializeInstruction2", "CreatePool"];

/// Décide si une notification de logs mérite un fetch de la transaction
/// complète. Correspondance par sous-chaîne, sensible à la casse, sans aucune
/// normalisation : les marqueurs sont reproduits tels que le programme les émet.
pub fn is_lp_notification(logs: &[String]) -> bool {
    logs.iter()
        .any(|line| LP_LOG_MARKERS.iter().any(|marker| line.contains(marker)))
}
