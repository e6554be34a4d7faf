use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// Latitude and longitude span used for every recentered viewport.
pub const ZOOM_SPAN: f64 = 0.01;

pub const DEVICE_ACCURACY_RADIUS_METERS: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn centered_on(coordinates: Coordinates) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            latitude_delta: ZOOM_SPAN,
            longitude_delta: ZOOM_SPAN,
        }
    }

    /// Moves the center and keeps the current spans.
    pub fn moved_to(&self, coordinates: Coordinates) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            ..*self
        }
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    Pin,
    DeviceLocation,
    UniversityLogo,
    HealthCampusLogo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub coordinate: Coordinates,
    pub label: String,
    pub icon: MarkerIcon,
    pub radius_meters: Option<f64>,
}

impl Marker {
    pub fn new(coordinate: Coordinates, label: impl Into<String>, icon: MarkerIcon) -> Self {
        Self {
            coordinate,
            label: label.into(),
            icon,
            radius_meters: None,
        }
    }

    pub fn with_radius(mut self, radius_meters: f64) -> Self {
        self.radius_meters = Some(radius_meters);
        self
    }
}
