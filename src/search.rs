use crate::{
    directory::{landmarks, Directory, UNIVERSITY_CENTER},
    entities::{
        Coordinates, Marker, MarkerIcon, Permission, Place, Region, DEVICE_ACCURACY_RADIUS_METERS,
    },
};

/// Places whose name contains `query`, ignoring case, in directory order.
pub fn filter(directory: &[Place], query: &str) -> Vec<Place> {
    let query = query.to_lowercase();

    directory
        .iter()
        .filter(|place| place.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceFix {
    pub permission: Permission,
    pub coordinates: Option<Coordinates>,
}

impl Default for DeviceFix {
    fn default() -> Self {
        Self {
            permission: Permission::Denied,
            coordinates: None,
        }
    }
}

/// Search box, result list and map viewport of one navigation screen.
#[derive(Clone, Debug)]
pub struct SearchSession {
    directory: Directory,
    query: String,
    matches: Vec<Place>,
    region: Region,
    device: DeviceFix,
}

impl SearchSession {
    pub fn new(directory: Directory) -> Self {
        let matches = directory.places().to_vec();

        Self {
            directory,
            query: String::new(),
            matches,
            region: Region::centered_on(UNIVERSITY_CENTER),
            device: DeviceFix::default(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[Place] {
        &self.matches
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn device(&self) -> DeviceFix {
        self.device
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.matches = filter(self.directory.places(), &self.query);
    }

    /// Centers on `place`, puts its name in the search box and collapses the result list.
    pub fn select(&mut self, place: &Place) -> Region {
        self.region = Region::centered_on(place.coordinates());
        self.query = place.name.clone();
        self.matches.clear();

        tracing::debug!(id = %place.id, "selected place");

        self.region
    }

    /// Jumps to the first match. Leaves the viewport alone when nothing matches.
    pub fn submit(&mut self) -> Option<Region> {
        let first = self.matches.first()?;
        self.region = Region::centered_on(first.coordinates());

        Some(self.region)
    }

    pub fn set_device_fix(&mut self, permission: Permission, coordinates: Option<Coordinates>) {
        self.device = DeviceFix {
            permission,
            coordinates: coordinates.filter(|_| permission.is_granted()),
        };
    }

    /// Centers on the last known device position when location access was granted.
    pub fn recenter_on_device(&mut self) -> Option<Region> {
        if !self.device.permission.is_granted() {
            return None;
        }

        let coordinates = self.device.coordinates?;
        self.region = Region::centered_on(coordinates);

        Some(self.region)
    }

    /// Moves the viewport center without changing its spans.
    pub fn move_to(&mut self, coordinates: Coordinates) -> Region {
        self.region = self.region.moved_to(coordinates);
        self.region
    }

    pub fn markers(&self) -> Vec<Marker> {
        let mut markers: Vec<Marker> = self
            .matches
            .iter()
            .map(|place| Marker::new(place.coordinates(), place.name.clone(), MarkerIcon::Pin))
            .collect();

        if let Some(coordinates) = self.device.coordinates {
            markers.push(
                Marker::new(coordinates, "", MarkerIcon::DeviceLocation)
                    .with_radius(DEVICE_ACCURACY_RADIUS_METERS),
            );
        }

        markers.extend(landmarks());
        markers
    }
}
