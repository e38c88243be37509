// src/storage/mod.rs

pub mod postgres;

pub use postgres::PgStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::pipeline::events::PoolEvent;

/// La capacité de persistance injectée à l'entrée du pipeline : pas de
/// singleton global, le binaire construit le sink et le passe explicitement.
/// Aucune déduplication n'est garantie à cette frontière — une notification
/// livrée deux fois produit deux enregistrements.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn insert(&self, event: &PoolEvent) -> Result<()>;
}
