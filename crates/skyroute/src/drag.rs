use petrel::Simulation;
use skyroute_core::geom::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Gesture {
    node: usize,
    reheated: bool,
}

/// Couples a single pointer to the simulation while the force layout is active.
///
/// A gesture pins its node and keeps the engine warm (`alpha_target` held at the restart value);
/// releasing it lets the engine cool down on its own.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    gesture: Option<Gesture>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn node(&self) -> Option<usize> {
        self.gesture.map(|g| g.node)
    }

    /// Whether the active gesture had to wake a halted engine.
    pub fn reheated(&self) -> bool {
        self.gesture.is_some_and(|g| g.reheated)
    }

    /// Returns `false` if a gesture is already active or `node` is unknown.
    pub fn start(&mut self, sim: &mut Simulation, node: usize) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        let Some(at) = sim.body(node).map(|b| b.position()) else {
            return false;
        };

        let reheated = !sim.is_running();
        if reheated {
            sim.reheat();
        }
        sim.set_alpha_target(sim.options().alpha_restart);
        sim.pin(node, at);
        self.gesture = Some(Gesture { node, reheated });
        tracing::debug!(node, reheated, "drag started");
        true
    }

    pub fn drag(&mut self, sim: &mut Simulation, pointer: Point) -> bool {
        let Some(g) = self.gesture else {
            return false;
        };
        sim.pin(g.node, petrel::Point::new(pointer.x, pointer.y))
    }

    pub fn end(&mut self, sim: &mut Simulation) -> bool {
        let Some(g) = self.gesture.take() else {
            return false;
        };
        sim.set_alpha_target(0.0);
        sim.release(g.node);
        tracing::debug!(node = g.node, "drag ended");
        true
    }

    /// Drops an in-flight gesture without touching the pin; the caller re-pins every node.
    pub fn cancel(&mut self, sim: &mut Simulation) {
        if let Some(g) = self.gesture.take() {
            sim.set_alpha_target(0.0);
            tracing::debug!(node = g.node, "drag cancelled");
        }
    }
}
