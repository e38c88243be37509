// src/lib.rs

// On déclare tous nos modules principaux pour les rendre publics et
// utilisables par notre binaire (lp_listener.rs).
pub mod config;
pub mod decoders;
pub mod monitoring;
pub mod pipeline;
pub mod rpc;
pub mod storage;
