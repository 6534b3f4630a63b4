use chrono::NaiveDate;

/// Everything a surface can ask the dashboard to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh,
    SelectWeek(NaiveDate),
    ShowEntity(String),
    CloseModal,
    ToggleCard(String),
    ToggleTheme,
    SearchReports(String),
    Key(KeyPress),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl+R / Cmd+R.
    pub fn is_refresh(&self) -> bool {
        (self.ctrl || self.meta) && self.key.eq_ignore_ascii_case("r")
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_shortcuts() {
        assert!(KeyPress::new("r").with_ctrl().is_refresh());
        assert!(KeyPress::new("R").with_meta().is_refresh());
        assert!(!KeyPress::new("r").is_refresh());
        assert!(KeyPress::new("Escape").is_escape());
    }
}
