// DANS : src/monitoring/metrics.rs

use lazy_static::lazy_static;
use prometheus::{
    Encoder, IntCounter, IntCounterVec, TextEncoder, register_int_counter,
    register_int_counter_vec,
};
use warp::Filter;

lazy_static! {
    // --- Flux de notifications ---
    pub static ref NOTIFICATIONS_RECEIVED: IntCounter = register_int_counter!(
        "lp_indexer_notifications_received_total",
        "Nombre total de notifications de logs reçues du WebSocket"
    ).unwrap();
    pub static ref NOTIFICATIONS_MATCHED: IntCounter = register_int_counter!(
        "lp_indexer_notifications_matched_total",
        "Nombre de notifications contenant un marqueur LP (pool créée / liquidité)"
    ).unwrap();

    // --- Décodage ---
    pub static ref EVENTS_DECODED: IntCounterVec = register_int_counter_vec!(
        "lp_indexer_events_decoded_total",
        "Nombre d'instructions décodées avec succès, par type",
        &["instruction_type"] // Labels: "AddLiquidity", "RemoveLiquidity", "Unknown"
    ).unwrap();
    pub static ref DECODE_FAILURES: IntCounter = register_int_counter!(
        "lp_indexer_decode_failures_total",
        "Nombre de payloads d'instruction malformés ou tronqués"
    ).unwrap();

    // --- Collaborateurs externes ---
    pub static ref TRANSPORT_FAILURES: IntCounter = register_int_counter!(
        "lp_indexer_transport_failures_total",
        "Échecs RPC (fetch de transaction ou de solde) après ré-essais"
    ).unwrap();
    pub static ref PERSISTENCE_FAILURES: IntCounter = register_int_counter!(
        "lp_indexer_persistence_failures_total",
        "Échecs d'insertion en base (perte potentielle d'événement)"
    ).unwrap();
    pub static ref EVENTS_PERSISTED: IntCounter = register_int_counter!(
        "lp_indexer_events_persisted_total",
        "Nombre d'événements insérés avec succès dans pool_events"
    ).unwrap();
}

pub async fn start_metrics_server() {
    let metrics_route = warp::path!("metrics").map(|| {
        let encoder = TextEncoder::new();
        let mut buffer = vec![];
        encoder.encode(&prometheus::gather(), &mut buffer).unwrap();
        warp::reply::with_header(buffer, "content-type", "text/plain; version=0.0.4")
    });
    println!("[Monitoring] Serveur de métriques exposé sur http://0.0.0.0:9100/metrics");
    warp::serve(metrics_route).run(([0, 0, 0, 0], 9100)).await;
}
