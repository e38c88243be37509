// src/storage/postgres.rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};

use super::EventSink;
use crate::pipeline::events::PoolEvent;

/// Le sink Postgres : une table `pool_events`, une ligne par événement.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await
            .context("Connexion à Postgres échouée")?;
        Ok(Self { pool })
    }

    /// Crée la table des événements si elle n'existe pas encore.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS pool_events (
                id BIGSERIAL PRIMARY KEY,
                signature TEXT NOT NULL,
                instruction_type TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                payload JSONB NOT NULL,
                liquidity_pool_balance DOUBLE PRECISION
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl EventSink for PgStore {
    async fn insert(&self, event: &PoolEvent) -> Result<()> {
        // Les montants u64 du payload sont sérialisés en JSONB via serde_json,
        // qui les conserve exacts (pas de passage par un flottant).
        let payload = serde_json::to_string(&event.payload)?;
        sqlx::query(
            "INSERT INTO pool_events
                (signature, instruction_type, created_at, payload, liquidity_pool_balance)
             VALUES ($1, $2, $3, $4::jsonb, $5)",
        )
        .bind(&event.signature)
        .bind(event.instruction_type)
        .bind(event.timestamp)
        .bind(payload)
        .bind(event.liquidity_pool_balance)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Insertion de l'événement {} échouée", event.signature))?;
        Ok(())
    }
}
