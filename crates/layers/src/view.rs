use serde::{Deserialize, Serialize};

/// Which projection the main panel shows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Flat web-mercator-style map.
    #[default]
    Map,
    /// Orthographic globe.
    Globe,
    /// Both panels, map above globe.
    Both,
}

impl ViewMode {
    pub fn shows_map(self) -> bool {
        matches!(self, ViewMode::Map | ViewMode::Both)
    }

    pub fn shows_globe(self) -> bool {
        matches!(self, ViewMode::Globe | ViewMode::Both)
    }
}

/// The panel a hover event came from. Only globe hovers draw a felt area.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoverSource {
    Map,
    Globe,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hover {
    pub source: HoverSource,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerToggles {
    pub seismic_points: bool,
    pub fault_lines: bool,
}

impl Default for LayerToggles {
    fn default() -> Self {
        Self {
            seismic_points: true,
            fault_lines: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidebarState {
    #[default]
    Open,
    Closed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarLayout {
    pub sidebar_width_px: u32,
    pub content_margin_px: u32,
}

impl SidebarState {
    pub fn toggle(self) -> Self {
        match self {
            SidebarState::Open => SidebarState::Closed,
            SidebarState::Closed => SidebarState::Open,
        }
    }

    pub fn layout(self) -> SidebarLayout {
        match self {
            SidebarState::Open => SidebarLayout {
                sidebar_width_px: 300,
                content_margin_px: 320,
            },
            SidebarState::Closed => SidebarLayout {
                sidebar_width_px: 0,
                content_margin_px: 20,
            },
        }
    }
}
