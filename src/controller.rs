/// Outcome of a close request on the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Hide the window and show the tray affordance instead.
    HideToTray,
    /// Tear down and terminate the process.
    Exit,
}

/// Window/tray state machine. The window is never destroyed by the close
/// button; only an explicit exit request lets a close go through.
pub struct WindowController {
    visible: bool,
    exit_requested: bool,
}

impl WindowController {
    pub fn new() -> Self {
        Self {
            visible: true,
            exit_requested: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The tray affordance is shown exactly while the window is hidden.
    pub fn tray_visible(&self) -> bool {
        !self.visible
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn handle_close_request(&mut self) -> CloseAction {
        if self.exit_requested {
            CloseAction::Exit
        } else {
            self.visible = false;
            CloseAction::HideToTray
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn restore(&mut self) {
        self.visible = true;
    }
}

impl Default for WindowController {
    fn default() -> Self {
        Self::new()
    }
}
