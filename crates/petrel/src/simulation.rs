use crate::error::Result;
use crate::force::{self, CenterOptions, LinkForce, LinkOptions, ManyBodyOptions};
use crate::graph::{Body, Graph, LinkRef, Pin, Point};
use crate::rng::XorShift64Star;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Seed for the jiggle that separates coincident bodies.
    pub random_seed: u64,
    /// Starting energy.
    pub alpha: f64,
    /// Ticking halts once alpha decays to or below this value.
    pub alpha_min: f64,
    /// Per-tick fraction of the distance to `alpha_target` that alpha covers.
    pub alpha_decay: f64,
    /// Value [`Simulation::reheat`] raises alpha to.
    pub alpha_restart: f64,
    /// Fraction of velocity lost per tick (friction).
    pub velocity_decay: f64,
    pub many_body: ManyBodyOptions,
    pub link: LinkOptions,
    pub center: CenterOptions,
}

impl SimulationOptions {
    /// Decay rate that takes alpha from 1 to `alpha_min` in roughly 300 ticks.
    pub fn default_alpha_decay(alpha_min: f64) -> f64 {
        1.0 - alpha_min.powf(1.0 / 300.0)
    }
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            random_seed: 1,
            alpha: 1.0,
            alpha_min: 0.001,
            alpha_decay: Self::default_alpha_decay(0.001),
            alpha_restart: 0.3,
            velocity_decay: 0.4,
            many_body: ManyBodyOptions::default(),
            link: LinkOptions::default(),
            center: CenterOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// State handed to tick subscribers after every step.
#[derive(Debug, Clone, Copy)]
pub struct Tick<'a> {
    /// Number of ticks integrated so far, including this one.
    pub index: u64,
    pub alpha: f64,
    pub bodies: &'a [Body],
    pub links: &'a [LinkRef],
}

type TickCallback = Box<dyn FnMut(&Tick<'_>)>;

struct Subscriber {
    id: SubscriptionId,
    callback: TickCallback,
}

pub struct Simulation {
    bodies: Vec<Body>,
    links: Vec<LinkRef>,
    id_to_idx: FxHashMap<String, usize>,
    link_force: LinkForce,
    opts: SimulationOptions,
    alpha: f64,
    alpha_target: f64,
    running: bool,
    ticks: u64,
    rng: XorShift64Star,
    subscribers: Vec<Subscriber>,
    next_subscription: u64,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("bodies", &self.bodies.len())
            .field("links", &self.links.len())
            .field("alpha", &self.alpha)
            .field("alpha_target", &self.alpha_target)
            .field("running", &self.running)
            .field("ticks", &self.ticks)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Simulation {
    const INITIAL_RADIUS: f64 = 10.0;

    /// Builds the simulation. Every link endpoint must name a node in `graph`.
    ///
    /// The simulation starts running with `options.alpha`.
    pub fn new(graph: &Graph, options: SimulationOptions) -> Result<Self> {
        let links = graph.resolve_links()?;

        let initial_angle = std::f64::consts::PI * (3.0 - 5.0f64.sqrt());
        let mut bodies: Vec<Body> = Vec::with_capacity(graph.nodes.len());
        let mut id_to_idx: FxHashMap<String, usize> = FxHashMap::default();
        id_to_idx.reserve(graph.nodes.len());
        for (idx, n) in graph.nodes.iter().enumerate() {
            let (x, y) = match n.position {
                Some(p) => (p.x, p.y),
                None => {
                    let radius = Self::INITIAL_RADIUS * (0.5 + idx as f64).sqrt();
                    let angle = idx as f64 * initial_angle;
                    (radius * angle.cos(), radius * angle.sin())
                }
            };
            bodies.push(Body {
                id: n.id.clone(),
                x,
                y,
                vx: 0.0,
                vy: 0.0,
                pin: Pin::Free,
            });
            id_to_idx.insert(n.id.clone(), idx);
        }

        let link_force = LinkForce::new(&links, bodies.len(), &options.link);
        tracing::debug!(
            nodes = bodies.len(),
            links = links.len(),
            "force simulation initialized"
        );

        Ok(Self {
            bodies,
            links,
            id_to_idx,
            link_force,
            alpha: options.alpha,
            alpha_target: 0.0,
            running: true,
            ticks: 0,
            rng: XorShift64Star::new(options.random_seed),
            subscribers: Vec::new(),
            next_subscription: 0,
            opts: options,
        })
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.opts
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn links(&self) -> &[LinkRef] {
        &self.links
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.id_to_idx.get(id).copied()
    }

    pub fn positions(&self) -> Vec<Point> {
        self.bodies.iter().map(Body::position).collect()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.max(0.0);
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn set_alpha_target(&mut self, target: f64) {
        self.alpha_target = target.max(0.0);
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Whether [`Simulation::step`] will advance.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Alpha has decayed to the stop threshold.
    pub fn is_settled(&self) -> bool {
        self.alpha <= self.opts.alpha_min
    }

    /// Raises alpha to the restart value (never lowers it) and resumes ticking.
    pub fn reheat(&mut self) {
        if self.alpha < self.opts.alpha_restart {
            self.alpha = self.opts.alpha_restart;
        }
        if !self.running {
            self.running = true;
            tracing::debug!(alpha = self.alpha, "simulation reheated");
        }
    }

    /// Halts ticking immediately, whatever alpha currently is.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            tracing::debug!(alpha = self.alpha, "simulation stopped");
        }
    }

    /// Holds body `index` at `at` until released. Returns `false` for an unknown index.
    pub fn pin(&mut self, index: usize, at: Point) -> bool {
        match self.bodies.get_mut(index) {
            Some(b) => {
                b.pin = Pin::Pinned(at);
                true
            }
            None => false,
        }
    }

    pub fn release(&mut self, index: usize) -> bool {
        match self.bodies.get_mut(index) {
            Some(b) => {
                b.pin = Pin::Free;
                true
            }
            None => false,
        }
    }

    pub fn release_all(&mut self) {
        for b in &mut self.bodies {
            b.pin = Pin::Free;
        }
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Tick<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Integrates one tick without notifying subscribers and regardless of the running flag.
    pub fn tick(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.opts.alpha_decay;
        let alpha = self.alpha;

        self.link_force.apply(&mut self.bodies, alpha, &mut self.rng);
        force::apply_many_body(&mut self.bodies, &self.opts.many_body, alpha, &mut self.rng);
        force::apply_center(&mut self.bodies, &self.opts.center);

        let keep = 1.0 - self.opts.velocity_decay;
        for b in &mut self.bodies {
            match b.pin {
                Pin::Pinned(p) => {
                    b.x = p.x;
                    b.y = p.y;
                    b.vx = 0.0;
                    b.vy = 0.0;
                }
                Pin::Free => {
                    b.vx *= keep;
                    b.vy *= keep;
                    b.x += b.vx;
                    b.y += b.vy;
                }
            }
        }
        self.ticks += 1;
    }

    /// One scheduling invocation: ticks once, notifies subscribers, and halts when settled.
    ///
    /// Returns `false` (and notifies nobody) when the simulation is not running.
    pub fn step(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.tick();

        let tick = Tick {
            index: self.ticks,
            alpha: self.alpha,
            bodies: &self.bodies,
            links: &self.links,
        };
        for s in &mut self.subscribers {
            (s.callback)(&tick);
        }

        if self.alpha <= self.opts.alpha_min {
            self.running = false;
            tracing::debug!(ticks = self.ticks, alpha = self.alpha, "simulation settled");
        }
        true
    }

    /// Steps until the simulation halts or `max_ticks` steps ran. Returns the steps taken.
    pub fn run_until_settled(&mut self, max_ticks: usize) -> usize {
        let mut n = 0;
        while n < max_ticks && self.step() {
            n += 1;
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::{Simulation, SimulationOptions};
    use crate::graph::{Graph, Node};

    #[test]
    fn unpositioned_nodes_start_on_a_spiral() {
        let g = Graph {
            nodes: (0..4).map(|i| Node::new(format!("n{i}"))).collect(),
            links: Vec::new(),
        };
        let sim = Simulation::new(&g, SimulationOptions::default()).expect("sim");
        let b0 = &sim.bodies()[0];
        assert!((b0.x - 50.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(b0.y, 0.0);
        let radii: Vec<f64> = sim
            .bodies()
            .iter()
            .map(|b| (b.x * b.x + b.y * b.y).sqrt())
            .collect();
        assert!(radii.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn alpha_decays_toward_target() {
        let g = Graph {
            nodes: vec![Node::at("a", 0.0, 0.0)],
            links: Vec::new(),
        };
        let mut sim = Simulation::new(&g, SimulationOptions::default()).expect("sim");
        let decay = sim.options().alpha_decay;
        sim.tick();
        assert!((sim.alpha() - (1.0 - decay)).abs() < 1e-12);

        sim.set_alpha_target(0.3);
        sim.set_alpha(0.3);
        sim.tick();
        assert!((sim.alpha() - 0.3).abs() < 1e-12);
    }
}
