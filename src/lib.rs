//! WorldWise - client-side sync store for visited cities
//!
//! WorldWise keeps an in-memory view of a remote collection of visited
//! cities, mediates every read and write against it, and exposes the result
//! as snapshots that consumers render.
//!
//! # Architecture
//!
//! - [`store`] - The synchronization store: state, transitions, operations
//! - [`remote`] - Abstraction for the remote city collection (REST v1)
//! - [`core`] - Domain types, flag helpers, configuration
//! - [`cli`] - Command-line consumer of the store
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. The store is the only writer of its state
//! 2. Every operation settles with exactly one terminal transition
//! 3. The city list never holds two records with the same id
//! 4. Remote failures are reported, never propagated to callers

pub mod cli;
pub mod core;
pub mod remote;
pub mod store;
pub mod ui;
