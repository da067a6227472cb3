use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LayerStyle {
    pub visible: bool,
    /// RGBA, each channel in `[0, 1]`.
    pub color: [f32; 4],
    /// Marker size (px) for points, stroke width (px) for lines and outlines.
    pub size: f32,
}

impl LayerStyle {
    pub const fn new(visible: bool, color: [f32; 4], size: f32) -> Self {
        Self {
            visible,
            color,
            size,
        }
    }
}

pub const SEISMIC_POINT_STYLE: LayerStyle = LayerStyle::new(true, [1.0, 0.0, 0.0, 0.7], 4.0);
pub const FAULT_LINE_STYLE: LayerStyle = LayerStyle::new(true, [1.0, 0.647, 0.0, 1.0], 2.0);
pub const FELT_AREA_FILL_STYLE: LayerStyle = LayerStyle::new(true, [0.0, 0.0, 1.0, 0.2], 1.0);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Land and ocean fill for the globe, approximating each map style.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct GlobePalette {
    pub land: Rgb,
    pub ocean: Rgb,
}

/// Basemap styles offered by the style dropdown.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapStyle {
    #[default]
    OpenStreetMap,
    SatelliteEsri,
    OceanEsri,
    CartoPositron,
    CartoDarkmatter,
    WhiteBg,
}

const ESRI_WORLD_IMAGERY: &str = "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const ESRI_OCEAN_BASE: &str = "https://services.arcgisonline.com/ArcGIS/rest/services/Ocean/World_Ocean_Base/MapServer/tile/{z}/{y}/{x}";

impl MapStyle {
    pub const ALL: [MapStyle; 6] = [
        MapStyle::OpenStreetMap,
        MapStyle::SatelliteEsri,
        MapStyle::OceanEsri,
        MapStyle::CartoPositron,
        MapStyle::CartoDarkmatter,
        MapStyle::WhiteBg,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MapStyle::OpenStreetMap => "open-street-map",
            MapStyle::SatelliteEsri => "satellite-esri",
            MapStyle::OceanEsri => "ocean-esri",
            MapStyle::CartoPositron => "carto-positron",
            MapStyle::CartoDarkmatter => "carto-darkmatter",
            MapStyle::WhiteBg => "white-bg",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MapStyle::OpenStreetMap => "Open Street Map",
            MapStyle::SatelliteEsri => "Satellite (Esri)",
            MapStyle::OceanEsri => "Oceans (Esri Ocean Base)",
            MapStyle::CartoPositron => "Carto Positron",
            MapStyle::CartoDarkmatter => "Carto Darkmatter",
            MapStyle::WhiteBg => "White background",
        }
    }

    /// Vector basemap the renderer should load; raster styles draw over `white-bg`.
    pub fn base_style(self) -> &'static str {
        match self {
            MapStyle::SatelliteEsri | MapStyle::OceanEsri => MapStyle::WhiteBg.id(),
            other => other.id(),
        }
    }

    /// XYZ tile template placed below the traces, for raster styles.
    pub fn raster_source(self) -> Option<&'static str> {
        match self {
            MapStyle::SatelliteEsri => Some(ESRI_WORLD_IMAGERY),
            MapStyle::OceanEsri => Some(ESRI_OCEAN_BASE),
            _ => None,
        }
    }

    pub fn globe_palette(self) -> GlobePalette {
        let (land, ocean) = match self {
            MapStyle::CartoDarkmatter => (Rgb(40, 40, 40), Rgb(30, 30, 30)),
            MapStyle::CartoPositron => (Rgb(250, 250, 250), Rgb(220, 220, 220)),
            MapStyle::OceanEsri => (Rgb(236, 236, 236), Rgb(173, 216, 230)),
            MapStyle::SatelliteEsri => (Rgb(70, 120, 50), Rgb(30, 60, 130)),
            MapStyle::OpenStreetMap | MapStyle::WhiteBg => (Rgb(229, 229, 229), Rgb(135, 206, 250)),
        };
        GlobePalette { land, ocean }
    }
}
