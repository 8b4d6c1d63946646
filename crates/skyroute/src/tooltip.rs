use skyroute_core::geom::{Point, point};
use skyroute_render::TooltipCommand;

/// Hover behavior for the active layout.
///
/// Under the force layout hovering relies on the per-node `<title>`; the name tooltip is only
/// installed once the map layout has finished animating in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverPolicy {
    #[default]
    Disabled,
    ShowName,
}

#[derive(Debug, Clone)]
pub struct Tooltip {
    policy: HoverPolicy,
    offset_y: f64,
    hovered: Option<usize>,
}

impl Tooltip {
    pub fn new(offset_y: f64) -> Self {
        Self {
            policy: HoverPolicy::Disabled,
            offset_y,
            hovered: None,
        }
    }

    pub fn policy(&self) -> HoverPolicy {
        self.policy
    }

    pub fn is_visible(&self) -> bool {
        self.hovered.is_some()
    }

    /// Node whose name is currently shown.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn install(&mut self, policy: HoverPolicy) {
        self.policy = policy;
    }

    pub fn enter(&mut self, node: usize, name: &str, pointer: Point) -> Option<TooltipCommand> {
        match self.policy {
            HoverPolicy::Disabled => None,
            HoverPolicy::ShowName => {
                self.hovered = Some(node);
                Some(TooltipCommand::Show {
                    text: name.to_string(),
                    at: point(pointer.x, pointer.y - self.offset_y),
                })
            }
        }
    }

    /// Leaving a node other than the one shown is stale and ignored.
    pub fn leave(&mut self, node: usize) -> Option<TooltipCommand> {
        if self.hovered != Some(node) {
            return None;
        }
        self.hide()
    }

    /// Hides the tooltip if it is showing.
    pub fn hide(&mut self) -> Option<TooltipCommand> {
        self.hovered.take()?;
        Some(TooltipCommand::Hide)
    }
}
