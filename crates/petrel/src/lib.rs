#![forbid(unsafe_code)]

//! Headless force-directed graph simulation.
//!
//! `petrel` advances a set of bodies one tick at a time under three forces: a Barnes–Hut
//! approximated many-body charge, per-link springs, and a centering correction. Ticking is
//! driven by the caller (`Simulation::step`), which makes the engine usable from any
//! cooperative frame loop. Observers subscribe to ticks instead of polling.

pub mod error;
pub mod force;
pub mod graph;
mod quadtree;
mod rng;
pub mod simulation;

pub use error::{Error, Result};
pub use force::{CenterOptions, LinkOptions, ManyBodyOptions};
pub use graph::{Body, Graph, LayoutResult, Link, LinkRef, Node, Pin, Point};
pub use simulation::{Simulation, SimulationOptions, SubscriptionId, Tick};

/// Headless entry point: runs a fresh simulation until it settles and returns final positions.
pub fn layout(graph: &Graph, options: SimulationOptions) -> Result<LayoutResult> {
    let mut sim = Simulation::new(graph, options)?;
    sim.run_until_settled(usize::MAX);

    let mut positions: std::collections::BTreeMap<String, Point> =
        std::collections::BTreeMap::new();
    for b in sim.bodies() {
        positions.insert(b.id.clone(), b.position());
    }
    Ok(LayoutResult { positions })
}
