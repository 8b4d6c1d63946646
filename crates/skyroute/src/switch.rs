//! Layout switch controller: decides where every node is drawn.
//!
//! The controller keeps three position sets:
//!
//! - `live`: the latest simulated positions, refreshed by every engine tick
//! - `projected`: each airport's Mercator coordinate, fixed for the session
//! - `rendered`: what the sink was last told to draw
//!
//! While `Simulated` and idle, ticks are forwarded straight to the sink. A mode change starts a
//! node transition from `rendered` toward the new target and an overlay opacity tween; a later
//! request interrupts it and restarts from whatever is rendered at that moment.

use crate::tooltip::{HoverPolicy, Tooltip};
use crate::transition::{Timing, Tween, cubic_in_out, lerp};
use petrel::{Simulation, Tick};
use skyroute_core::Network;
use skyroute_core::geom::{Point, point};
use skyroute_render::{Frame, RenderSink};
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutMode {
    #[default]
    Simulated,
    Projected,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout signal `{0}` (expected `force` or `map`)")]
pub struct UnknownSignal(pub String);

impl LayoutMode {
    /// Maps a UI signal value to a mode: `"force"` or `"map"`.
    pub fn from_signal(signal: &str) -> Option<Self> {
        match signal {
            "force" => Some(LayoutMode::Simulated),
            "map" => Some(LayoutMode::Projected),
            _ => None,
        }
    }

    pub fn as_signal(self) -> &'static str {
        match self {
            LayoutMode::Simulated => "force",
            LayoutMode::Projected => "map",
        }
    }
}

impl FromStr for LayoutMode {
    type Err = UnknownSignal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_signal(s).ok_or_else(|| UnknownSignal(s.to_string()))
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_signal())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchOptions {
    pub node_duration: Duration,
    pub overlay_duration: Duration,
    pub tooltip_offset_y: f64,
}

impl Default for SwitchOptions {
    fn default() -> Self {
        Self {
            node_duration: Duration::from_millis(600),
            overlay_duration: Duration::from_millis(500),
            tooltip_offset_y: 80.0,
        }
    }
}

#[derive(Debug, Clone)]
struct NodeTransition {
    to: LayoutMode,
    from: Vec<Point>,
    timing: Timing,
}

pub(crate) fn to_point(p: petrel::Point) -> Point {
    point(p.x, p.y)
}

pub struct LayoutSwitch<S> {
    network: Rc<Network>,
    sink: S,
    opts: SwitchOptions,
    mode: LayoutMode,
    live: Vec<Point>,
    projected: Vec<Point>,
    rendered: Vec<Point>,
    nodes: Option<NodeTransition>,
    overlay: Tween,
    tooltip: Tooltip,
}

impl<S> std::fmt::Debug for LayoutSwitch<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutSwitch")
            .field("mode", &self.mode)
            .field("nodes", &self.rendered.len())
            .field("transitioning", &self.nodes.is_some())
            .field("overlay", &self.overlay)
            .finish_non_exhaustive()
    }
}

impl<S: RenderSink> LayoutSwitch<S> {
    /// Starts in `Simulated` with the overlay hidden and `live` as the first rendered frame.
    pub fn new(
        network: Rc<Network>,
        live: Vec<Point>,
        projected: Vec<Point>,
        opts: SwitchOptions,
        mut sink: S,
    ) -> Self {
        sink.overlay_opacity(0.0);
        let mut switch = Self {
            network,
            sink,
            tooltip: Tooltip::new(opts.tooltip_offset_y),
            opts,
            mode: LayoutMode::Simulated,
            rendered: live.clone(),
            live,
            projected,
            nodes: None,
            overlay: Tween {
                from: 0.0,
                to: 0.0,
                timing: Timing::new(Duration::ZERO, Duration::ZERO),
            },
        };
        switch.draw();
        switch
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn is_transitioning(&self) -> bool {
        self.nodes.is_some()
    }

    pub fn rendered(&self) -> &[Point] {
        &self.rendered
    }

    pub fn live(&self) -> &[Point] {
        &self.live
    }

    pub fn projected(&self) -> &[Point] {
        &self.projected
    }

    pub fn overlay_target(&self) -> f64 {
        self.overlay.to
    }

    pub fn hover_policy(&self) -> HoverPolicy {
        self.tooltip.policy()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Records the tick's positions and forwards them when nothing else owns the frame.
    pub fn on_tick(&mut self, tick: &Tick<'_>) {
        self.live.clear();
        self.live.extend(tick.bodies.iter().map(|b| point(b.x, b.y)));
        if self.mode == LayoutMode::Simulated && self.nodes.is_none() {
            self.rendered.clone_from(&self.live);
            self.draw();
        }
    }

    /// Switches to `mode`. Returns `false` when `mode` is already active or pending.
    pub fn request(&mut self, mode: LayoutMode, sim: &mut Simulation, now: Duration) -> bool {
        if mode == self.mode {
            return false;
        }
        let interrupted = self.nodes.is_some();
        self.mode = mode;

        let opacity = self.overlay.value(now);
        let overlay_to = match mode {
            LayoutMode::Simulated => {
                sim.release_all();
                self.live = sim.bodies().iter().map(|b| to_point(b.position())).collect();
                self.tooltip.install(HoverPolicy::Disabled);
                if let Some(cmd) = self.tooltip.hide() {
                    self.sink.tooltip(&cmd);
                }
                0.0
            }
            LayoutMode::Projected => {
                sim.stop();
                for (i, p) in self.projected.iter().enumerate() {
                    sim.pin(i, petrel::Point::new(p.x, p.y));
                }
                1.0
            }
        };

        self.nodes = Some(NodeTransition {
            to: mode,
            from: self.rendered.clone(),
            timing: Timing::new(now, self.opts.node_duration),
        });
        self.overlay = Tween {
            from: opacity,
            to: overlay_to,
            timing: Timing::new(now, self.opts.overlay_duration),
        };
        tracing::debug!(mode = %mode, interrupted, "layout transition started");
        true
    }

    /// Advances transitions to `now` and pushes the result to the sink.
    pub fn advance(&mut self, now: Duration) {
        self.sink.overlay_opacity(self.overlay.value(now));

        let Some(nt) = self.nodes.as_ref() else {
            return;
        };
        let t = nt.timing.progress(now);
        let to = nt.to;
        let target = match to {
            LayoutMode::Simulated => &self.live,
            LayoutMode::Projected => &self.projected,
        };
        if t >= 1.0 {
            self.rendered.clone_from(target);
        } else {
            let e = cubic_in_out(t);
            for ((r, &a), &b) in self.rendered.iter_mut().zip(&nt.from).zip(target) {
                *r = lerp(a, b, e);
            }
        }
        if t >= 1.0 {
            self.nodes = None;
            if to == LayoutMode::Projected {
                self.tooltip.install(HoverPolicy::ShowName);
            }
            tracing::debug!(mode = %to, "layout transition finished");
        }
        self.draw();
    }

    pub fn hover_enter(&mut self, node: usize, pointer: Point) {
        let Some(airport) = self.network.airport(node) else {
            return;
        };
        if let Some(cmd) = self.tooltip.enter(node, &airport.name, pointer) {
            self.sink.tooltip(&cmd);
        }
    }

    pub fn hover_leave(&mut self, node: usize) {
        if let Some(cmd) = self.tooltip.leave(node) {
            self.sink.tooltip(&cmd);
        }
    }

    pub fn tooltip_visible(&self) -> bool {
        self.tooltip.is_visible()
    }

    fn draw(&mut self) {
        let Self {
            network,
            sink,
            rendered,
            ..
        } = self;
        sink.draw(&Frame {
            airports: network.airports(),
            routes: network.routes(),
            positions: rendered,
        });
    }
}
