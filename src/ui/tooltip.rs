//! Hover state for the badge detail panel.

/// Visibility of a tooltip panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
}

impl TooltipState {
    pub fn next(self, event: PointerEvent) -> Self {
        match event {
            PointerEvent::Enter => Self::Visible,
            PointerEvent::Leave => Self::Hidden,
        }
    }
}

/// Tooltip owned by a single badge. A non-interactive tooltip ignores
/// every event and stays hidden.
#[derive(Debug, Clone)]
pub struct Tooltip {
    interactive: bool,
    state: TooltipState,
}

impl Tooltip {
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            state: TooltipState::Hidden,
        }
    }

    pub fn handle(&mut self, event: PointerEvent) -> TooltipState {
        if self.interactive {
            self.state = self.state.next(event);
        }
        self.state
    }

    pub fn state(&self) -> TooltipState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == TooltipState::Visible
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}
