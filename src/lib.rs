//! Listloader - Incremental List Loading and Optimistic Reconciliation
//!
//! This crate implements the client-side contract for fetching, paginating,
//! and reconciling list data against paginated REST endpoints: a sentinel
//! trigger, a page fetcher, a list store, and the controller tying them
//! together.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
