use ppe_portal_domain::View;

/// Tracks which portal screen is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationShell {
    current: View,
}

impl NavigationShell {
    /// Starts on the home screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current view.
    #[must_use]
    pub fn current(&self) -> View {
        self.current
    }

    /// Switches to a view.
    pub fn navigate(&mut self, view: View) {
        self.current = view;
    }

    /// Returns to the home screen.
    pub fn back(&mut self) {
        self.current = View::Home;
    }

    /// Returns the home menu entries in order.
    #[must_use]
    pub fn menu(&self) -> &'static [View] {
        &View::WORKFLOWS
    }
}
