#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub label: &'static str,
}

pub const SECTIONS: [Section; 7] = [
    Section { id: "home", label: "Home" },
    Section { id: "about", label: "About" },
    Section { id: "projects", label: "Projects" },
    Section { id: "experience", label: "Experience" },
    Section { id: "achievements", label: "Achievements" },
    Section { id: "skills", label: "Skills" },
    Section { id: "contact", label: "Contact" },
];

pub fn section_id(href: &str) -> Option<&str> {
    href.trim()
        .strip_prefix('#')
        .filter(|id| !id.is_empty())
}

/// Scroll position that brings a section's top just below the fixed header.
pub fn scroll_target(section_offset_top: f64, header_offset: f64) -> f64 {
    (section_offset_top - header_offset).max(0.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    CloseOverlays,
}

pub fn shortcut_for(key: &str, ctrl: bool, meta: bool) -> Option<Shortcut> {
    match key {
        "Escape" | "Esc" if !ctrl && !meta => Some(Shortcut::CloseOverlays),
        _ => None,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    pub menu_open: bool,
    pub active: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    ToggleMenu,
    CloseMenu,
    Navigate(String),
}

impl NavState {
    pub fn apply(mut self, action: NavAction) -> Self {
        match action {
            NavAction::ToggleMenu => self.menu_open = !self.menu_open,
            NavAction::CloseMenu => self.menu_open = false,
            NavAction::Navigate(id) => {
                self.active = Some(id);
                self.menu_open = false;
            }
        }

        self
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }
}
