//! Expert Hours - Availability and booking engine for on-demand expert
//! consultations.
//!
//! Clients purchase packages of consulting hours from experts and redeem
//! them as 30-minute calendar slots. This crate owns slot derivation,
//! the hour ledger, cancellation/refund rules, earnings reconciliation,
//! and the feedback gate. It is a library consumed by a presentation
//! layer; persistence is abstracted behind repository ports.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
