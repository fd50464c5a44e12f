//! Page-level UI flags, owned by the root component and changed only through
//! [`ShellAction`].

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellAction {
    ToggleTheme,
    EnterTerminal,
    LeaveTerminal,
    OpenOverlay,
    CloseOverlay,
    HoverSkill(Option<usize>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellState {
    pub theme: Theme,
    pub terminal_open: bool,
    pub overlay_open: bool,
    pub hovered_skill: Option<usize>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(Theme::Dark)
    }
}

impl ShellState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            terminal_open: false,
            overlay_open: false,
            hovered_skill: None,
        }
    }

    /// Next state after `action`. The terminal replaces the page, so entering
    /// it closes the overlay and the overlay cannot open over it.
    pub fn apply(&self, action: ShellAction) -> Self {
        let mut next = self.clone();
        match action {
            ShellAction::ToggleTheme => next.theme = self.theme.toggled(),
            ShellAction::EnterTerminal => {
                next.terminal_open = true;
                next.overlay_open = false;
                next.hovered_skill = None;
            }
            ShellAction::LeaveTerminal => next.terminal_open = false,
            ShellAction::OpenOverlay => next.overlay_open = !self.terminal_open,
            ShellAction::CloseOverlay => next.overlay_open = false,
            ShellAction::HoverSkill(skill) => next.hovered_skill = skill,
        }
        next
    }
}
