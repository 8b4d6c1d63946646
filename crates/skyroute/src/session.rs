use crate::drag::DragController;
use crate::switch::{LayoutMode, LayoutSwitch, SwitchOptions, to_point};
use petrel::{
    CenterOptions, Graph, Link, LinkOptions, ManyBodyOptions, Node, Simulation, SimulationOptions,
};
use skyroute_core::geom::Point;
use skyroute_core::{Airport, Config, Datasets, Network, SceneOptions};
use skyroute_render::{GeoPath, Mercator, Projection, RenderSink, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Data(#[from] skyroute_core::Error),
    #[error(transparent)]
    Simulation(#[from] petrel::Error),
    #[error(transparent)]
    Render(#[from] skyroute_render::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Input to a [`Session`]. Node indices follow the network's airport order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PointerDown { node: usize, at: Point },
    PointerMove { at: Point },
    PointerUp,
    PointerEnter { node: usize, at: Point },
    PointerLeave { node: usize },
    /// A UI mode value such as `"force"` or `"map"`.
    ModeSignal(String),
}

/// One interactive airport scene: engine, layout switch, drag and sink on a single frame loop.
///
/// `now` arguments are offsets on a monotonic clock chosen by the caller.
pub struct Session<S> {
    network: Rc<Network>,
    options: SceneOptions,
    projection: Mercator,
    map_path: String,
    sim: Simulation,
    switch: Rc<RefCell<LayoutSwitch<S>>>,
    drag: DragController,
}

impl<S> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("airports", &self.network.len())
            .field("projection", &self.projection)
            .field("sim", &self.sim)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl<S: RenderSink + 'static> Session<S> {
    pub fn new(datasets: Datasets, config: &Config, sink: S) -> Result<Self> {
        Self::with_initial_positions(datasets, config, sink, |_| None)
    }

    /// Like [`Session::new`], seeding the engine with `initial(airport)` where it returns a
    /// position. Other airports start on the default spiral.
    pub fn with_initial_positions<F>(
        datasets: Datasets,
        config: &Config,
        mut sink: S,
        initial: F,
    ) -> Result<Self>
    where
        F: Fn(&Airport) -> Option<(f64, f64)>,
    {
        let options = SceneOptions::from_config(config)?;
        let Datasets {
            network,
            boundaries,
        } = datasets;
        let network = Rc::new(network);

        let projection = Mercator::fit_size(options.width, options.height, &boundaries)?;
        let map_path = GeoPath::new(&projection).path_data(&boundaries);
        let projected: Vec<Point> = network
            .airports()
            .iter()
            .map(|a| projection.project(a.longitude, a.latitude))
            .collect();

        let graph = Graph {
            nodes: network
                .airports()
                .iter()
                .map(|a| match initial(a) {
                    Some((x, y)) => Node::at(a.id.clone(), x, y),
                    None => Node::new(a.id.clone()),
                })
                .collect(),
            links: network
                .routes()
                .iter()
                .map(|r| {
                    let airports = network.airports();
                    Link::new(airports[r.source].id.clone(), airports[r.target].id.clone())
                })
                .collect(),
        };
        let mut sim = Simulation::new(&graph, simulation_options(&options))?;

        sink.setup(&Scene {
            width: options.width,
            height: options.height,
            airports: network.airports(),
            routes: network.routes(),
            map_path: &map_path,
            passengers_per_pixel: options.passengers_per_pixel,
        });
        let live: Vec<Point> = sim.bodies().iter().map(|b| to_point(b.position())).collect();
        let switch = Rc::new(RefCell::new(LayoutSwitch::new(
            Rc::clone(&network),
            live,
            projected,
            SwitchOptions {
                node_duration: options.node_transition,
                overlay_duration: options.overlay_transition,
                tooltip_offset_y: options.tooltip_offset_y,
            },
            sink,
        )));

        let on_tick = Rc::clone(&switch);
        sim.subscribe(move |tick| on_tick.borrow_mut().on_tick(tick));

        tracing::debug!(
            airports = network.len(),
            routes = network.routes().len(),
            scale = projection.scale,
            "session started"
        );
        Ok(Self {
            network,
            options,
            projection,
            map_path,
            sim,
            switch,
            drag: DragController::new(),
        })
    }

    /// Processes one input event.
    pub fn handle(&mut self, event: Event, now: Duration) {
        match event {
            Event::PointerDown { node, .. } => {
                if self.mode() == LayoutMode::Simulated {
                    self.drag.start(&mut self.sim, node);
                }
            }
            Event::PointerMove { at } => {
                if self.mode() == LayoutMode::Simulated {
                    self.drag.drag(&mut self.sim, at);
                }
            }
            Event::PointerUp => {
                self.drag.end(&mut self.sim);
            }
            Event::PointerEnter { node, at } => self.switch.borrow_mut().hover_enter(node, at),
            Event::PointerLeave { node } => self.switch.borrow_mut().hover_leave(node),
            Event::ModeSignal(signal) => match LayoutMode::from_signal(&signal) {
                Some(mode) => {
                    self.set_mode(mode, now);
                }
                None => {
                    tracing::warn!(signal = %signal, "ignoring unknown layout signal");
                }
            },
        }
    }

    /// Requests a layout mode directly. Returns `false` if it is already active.
    pub fn set_mode(&mut self, mode: LayoutMode, now: Duration) -> bool {
        if mode == LayoutMode::Projected {
            self.drag.cancel(&mut self.sim);
        }
        self.switch.borrow_mut().request(mode, &mut self.sim, now)
    }

    /// One cooperative iteration: at most one engine step, then transitions advance to `now`.
    /// Returns whether the engine stepped.
    pub fn frame(&mut self, now: Duration) -> bool {
        let stepped = self.sim.step();
        self.switch.borrow_mut().advance(now);
        stepped
    }

    pub fn mode(&self) -> LayoutMode {
        self.switch.borrow().mode()
    }

    pub fn is_transitioning(&self) -> bool {
        self.switch.borrow().is_transitioning()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn airports(&self) -> &[Airport] {
        self.network.airports()
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.network.index_of(id)
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    pub fn projection(&self) -> &Mercator {
        &self.projection
    }

    pub fn map_path(&self) -> &str {
        &self.map_path
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Positions last handed to the sink.
    pub fn rendered(&self) -> Vec<Point> {
        self.switch.borrow().rendered().to_vec()
    }

    pub fn tooltip_visible(&self) -> bool {
        self.switch.borrow().tooltip_visible()
    }

    pub fn with_sink<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(self.switch.borrow().sink())
    }

    pub fn with_sink_mut<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        f(self.switch.borrow_mut().sink_mut())
    }
}

fn simulation_options(opts: &SceneOptions) -> SimulationOptions {
    let (cx, cy) = opts.center();
    SimulationOptions {
        random_seed: opts.random_seed,
        alpha_min: opts.alpha_min,
        alpha_decay: SimulationOptions::default_alpha_decay(opts.alpha_min),
        alpha_restart: opts.alpha_restart,
        velocity_decay: opts.velocity_decay,
        many_body: ManyBodyOptions {
            strength: opts.charge_strength,
            ..ManyBodyOptions::default()
        },
        link: LinkOptions {
            distance: opts.link_distance,
            ..LinkOptions::default()
        },
        center: CenterOptions {
            x: cx,
            y: cy,
            strength: opts.center_strength,
        },
        ..SimulationOptions::default()
    }
}
