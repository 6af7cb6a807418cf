//! Event-driven transition engine for celllab.
//!
//! [`TransitionEngine`] runs a continuous-time cellular automaton on any
//! [`Lattice`](celllab_lattice::Lattice): each link with an enabled rule
//! holds one exponentially distributed waiting time in an [`EventQueue`],
//! and [`advance_to`](TransitionEngine::advance_to) fires them in time
//! order, rescheduling the neighbourhood of every firing.
//!
//! Runs are deterministic for a fixed seed, lattice and rule table. All
//! randomness comes from a `ChaCha8Rng` owned by the engine.
//!
//! Diagnostics are emitted through `tracing` (`debug` per call, `trace` per
//! event); installing a subscriber is left to the application.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod metrics;
pub mod observer;
pub mod queue;

pub use config::EngineConfig;
pub use engine::{TransitionEngine, TransitionEngineBuilder};
pub use metrics::{AdvanceReport, EngineStats};
pub use observer::{FiredTransition, TransitionLog, TransitionObserver, TransitionRecord};
pub use queue::{EventQueue, ScheduledEvent};
