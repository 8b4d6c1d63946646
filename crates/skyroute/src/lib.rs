#![forbid(unsafe_code)]

//! `skyroute` lays out an airport network two ways and switches between them at runtime:
//! a force-directed layout driven by [`petrel`], and a Mercator map placing every airport at its
//! real-world coordinate.
//!
//! Everything runs on one cooperative frame loop: feed pointer events and mode signals to
//! [`Session::handle`] and call [`Session::frame`] once per display frame.

pub mod drag;
pub mod session;
pub mod switch;
pub mod tooltip;
pub mod transition;

pub use drag::DragController;
pub use session::{Event, Result, Session, SessionError};
pub use switch::{LayoutMode, LayoutSwitch, SwitchOptions, UnknownSignal};
pub use tooltip::{HoverPolicy, Tooltip};

pub use petrel;
pub use skyroute_core;
pub use skyroute_render;
