use petrel::{
    CenterOptions, Error, Graph, Link, ManyBodyOptions, Node, Pin, Point, Simulation,
    SimulationOptions, layout,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn triangle() -> Graph {
    Graph {
        nodes: vec![Node::new("a"), Node::new("b"), Node::new("c")],
        links: vec![Link::new("a", "b"), Link::new("a", "c")],
    }
}

fn centered(x: f64, y: f64) -> SimulationOptions {
    SimulationOptions {
        center: CenterOptions {
            x,
            y,
            strength: 1.0,
        },
        ..Default::default()
    }
}

#[test]
fn missing_endpoint_fails_at_construction() {
    let g = Graph {
        nodes: vec![Node::new("a")],
        links: vec![Link::new("a", "nowhere")],
    };
    let err = Simulation::new(&g, SimulationOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MissingEndpoint { link: 0, .. }));
}

#[test]
fn ticking_halts_once_alpha_reaches_threshold() {
    let mut sim = Simulation::new(&triangle(), SimulationOptions::default()).unwrap();
    let alpha_min = sim.options().alpha_min;

    let mut steps = 0;
    while sim.step() {
        steps += 1;
        if sim.is_running() {
            assert!(sim.alpha() > alpha_min, "still running at alpha {}", sim.alpha());
        }
        assert!(steps < 10_000, "simulation never settled");
    }

    assert!(sim.is_settled());
    assert!(!sim.is_running());
    assert!(sim.alpha() >= 0.0 && sim.alpha() <= alpha_min);
    // 1 - 0.001^(1/300) decay reaches 0.001 from 1.0 in about 300 ticks.
    assert!((295..=305).contains(&steps), "steps: {steps}");
}

#[test]
fn no_tick_callbacks_after_halting_until_reheat() {
    let mut sim = Simulation::new(&triangle(), SimulationOptions::default()).unwrap();
    let calls = Rc::new(Cell::new(0usize));
    let c = Rc::clone(&calls);
    sim.subscribe(move |_| c.set(c.get() + 1));

    let steps = sim.run_until_settled(usize::MAX);
    assert_eq!(calls.get(), steps);

    for _ in 0..10 {
        assert!(!sim.step());
    }
    assert_eq!(calls.get(), steps);
    let settled_alpha = sim.alpha();
    assert!(sim.is_settled());
    assert_eq!(sim.alpha(), settled_alpha);

    sim.reheat();
    assert_eq!(sim.alpha(), sim.options().alpha_restart);
    assert!(sim.step());
    assert_eq!(calls.get(), steps + 1);
}

#[test]
fn stop_halts_regardless_of_alpha() {
    let mut sim = Simulation::new(&triangle(), SimulationOptions::default()).unwrap();
    sim.step();
    sim.stop();
    let alpha = sim.alpha();
    assert!(alpha > sim.options().alpha_min);
    assert!(!sim.step());
    assert_eq!(sim.alpha(), alpha);
    assert!(!sim.is_settled());
}

#[test]
fn reheat_never_lowers_alpha() {
    let mut sim = Simulation::new(&triangle(), SimulationOptions::default()).unwrap();
    sim.stop();
    sim.reheat();
    assert_eq!(sim.alpha(), 1.0);
    assert!(sim.is_running());
}

#[test]
fn tick_callback_sees_full_state() {
    let mut sim = Simulation::new(&triangle(), SimulationOptions::default()).unwrap();
    let seen: Rc<RefCell<Vec<(u64, usize, usize)>>> = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    sim.subscribe(move |t| s.borrow_mut().push((t.index, t.bodies.len(), t.links.len())));
    sim.step();
    sim.step();
    assert_eq!(*seen.borrow(), vec![(1, 3, 2), (2, 3, 2)]);
}

#[test]
fn unsubscribed_callbacks_stop_firing() {
    let mut sim = Simulation::new(&triangle(), SimulationOptions::default()).unwrap();
    let calls = Rc::new(Cell::new(0usize));
    let c = Rc::clone(&calls);
    let id = sim.subscribe(move |_| c.set(c.get() + 1));
    sim.step();
    assert!(sim.unsubscribe(id));
    assert!(!sim.unsubscribe(id));
    sim.step();
    assert_eq!(calls.get(), 1);
}

#[test]
fn pinned_body_stays_exactly_on_its_pin() {
    let mut sim = Simulation::new(&triangle(), SimulationOptions::default()).unwrap();
    let pin = Point::new(12.5, -3.25);
    assert!(sim.pin(0, pin));
    for _ in 0..50 {
        sim.step();
        let a = sim.body(0).unwrap();
        assert_eq!(a.position(), pin);
        assert_eq!(a.pin, Pin::Pinned(pin));
    }
}

#[test]
fn released_body_moves_off_its_former_pin() {
    let mut sim = Simulation::new(&triangle(), centered(0.0, 0.0)).unwrap();
    sim.set_alpha_target(0.3);
    let pin = Point::new(200.0, 150.0);
    sim.pin(0, pin);
    sim.step();
    assert_eq!(sim.body(0).unwrap().position(), pin);

    sim.release(0);
    sim.set_alpha_target(0.0);
    sim.step();
    assert_ne!(sim.body(0).unwrap().position(), pin);
}

#[test]
fn pin_rejects_unknown_index() {
    let mut sim = Simulation::new(&triangle(), SimulationOptions::default()).unwrap();
    assert!(!sim.pin(99, Point::new(0.0, 0.0)));
    assert!(!sim.release(99));
}

#[test]
fn hub_settles_between_its_neighbors() {
    let mut sim = Simulation::new(&triangle(), centered(320.0, 240.0)).unwrap();
    sim.run_until_settled(usize::MAX);
    let p = sim.positions();
    let (a, b, c) = (p[0], p[1], p[2]);

    // A sits on the segment B-C, roughly halfway.
    let (bcx, bcy) = (c.x - b.x, c.y - b.y);
    let t = ((a.x - b.x) * bcx + (a.y - b.y) * bcy) / (bcx * bcx + bcy * bcy);
    assert!(t > 0.25 && t < 0.75, "projection parameter {t}");
}

#[test]
fn mirrored_neighbors_keep_hub_between_them() {
    let g = Graph {
        nodes: vec![
            Node::at("a", 0.0, 0.0),
            Node::at("b", 10.0, 10.0),
            Node::at("c", -10.0, 10.0),
        ],
        links: vec![Link::new("a", "b"), Link::new("a", "c")],
    };
    let mut sim = Simulation::new(&g, centered(320.0, 240.0)).unwrap();
    sim.run_until_settled(usize::MAX);
    let p = sim.positions();
    let (a, b, c) = (p[0], p[1], p[2]);

    assert!(c.x < a.x && a.x < b.x, "a = {a:?}, b = {b:?}, c = {c:?}");
    let (bcx, bcy) = (c.x - b.x, c.y - b.y);
    let t = ((a.x - b.x) * bcx + (a.y - b.y) * bcy) / (bcx * bcx + bcy * bcy);
    assert!(t > 0.25 && t < 0.75, "projection parameter {t}");
}

#[test]
fn centroid_settles_on_the_anchor() {
    let mut sim = Simulation::new(&triangle(), centered(320.0, 240.0)).unwrap();
    sim.run_until_settled(usize::MAX);
    let n = sim.bodies().len() as f64;
    let cx = sim.bodies().iter().map(|b| b.x).sum::<f64>() / n;
    let cy = sim.bodies().iter().map(|b| b.y).sum::<f64>() / n;
    assert!((cx - 320.0).abs() < 0.5, "cx = {cx}");
    assert!((cy - 240.0).abs() < 0.5, "cy = {cy}");
}

#[test]
fn lone_spring_relaxes_to_rest_length() {
    let g = Graph {
        nodes: vec![Node::at("a", 0.0, 0.0), Node::at("b", 100.0, 0.0)],
        links: vec![Link::new("a", "b")],
    };
    let opts = SimulationOptions {
        many_body: ManyBodyOptions {
            strength: 0.0,
            ..Default::default()
        },
        ..centered(50.0, 0.0)
    };
    let out = layout(&g, opts).unwrap();
    let (a, b) = (out.positions["a"], out.positions["b"]);
    let d = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
    assert!((d - 30.0).abs() < 0.5, "distance: {d}");
}

#[test]
fn same_seed_same_layout() {
    let a = layout(&triangle(), SimulationOptions::default()).unwrap();
    let b = layout(&triangle(), SimulationOptions::default()).unwrap();
    for (id, p) in &a.positions {
        assert_eq!(b.positions[id], *p);
    }
}
