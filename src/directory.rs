use std::collections::HashSet;

use crate::{
    entities::{Coordinates, Marker, MarkerIcon, Place},
    error::{rejected_error, Error},
};

pub const UNIVERSITY_CENTER: Coordinates = Coordinates {
    latitude: 9.656983685945331,
    longitude: 39.52141543884528,
};

pub const HEALTH_CAMPUS: Coordinates = Coordinates {
    latitude: 9.669594840318977,
    longitude: 39.53298007027464,
};

const CAMPUS_PLACES: [(&str, &str, f64, f64); 12] = [
    ("1", "Academic Record Center", 9.658009507123426, 39.52214520889196),
    ("2", "College of Law", 9.658559498853908, 39.52261727765654),
    ("3", "Student Cafe", 9.65573991600698, 39.523467709807264),
    ("4", "DBU Stadium", 9.653830953999734, 39.52256754496158),
    (
        "5",
        "Debre Birhan University Health Science Campus",
        9.669594840318977,
        39.53298007027464,
    ),
    ("6", "Postgraduate College Building", 9.660495039586731, 39.52203091596183),
    ("7", "Debre Berhan University", 9.657000942554573, 39.52540656578363),
    ("8", "Teacher's Cafe", 9.657408022844324, 39.522012487092475),
    ("9", "College of Computing", 9.658769381304031, 39.52215260254309),
    ("10", "President's Office", 9.65803720884416, 39.521909910795166),
    ("11", "Men's Lounge", 9.655278857788488, 39.521784057168006),
    ("12", "Administrative Building", 9.659706142013057, 39.52029454361376),
];

/// Immutable catalog of named places. Ids are unique; names need not be.
#[derive(Clone, Debug, PartialEq)]
pub struct Directory {
    places: Vec<Place>,
}

impl Directory {
    pub fn new(places: Vec<Place>) -> Result<Self, Error> {
        let mut seen = HashSet::with_capacity(places.len());

        for place in &places {
            if !seen.insert(place.id.as_str()) {
                tracing::warn!(id = %place.id, "duplicate place id in directory");
                return Err(rejected_error(format!("duplicate place id {}", place.id)));
            }
        }

        Ok(Self { places })
    }

    pub fn campus() -> Self {
        let places = CAMPUS_PLACES
            .iter()
            .map(|(id, name, latitude, longitude)| Place::new(*id, *name, *latitude, *longitude))
            .collect();

        Self { places }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn find(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|place| place.id == id)
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// Fixed markers drawn on top of the campus map regardless of the search.
pub fn landmarks() -> Vec<Marker> {
    vec![
        Marker::new(
            UNIVERSITY_CENTER,
            "Debre Birhan University",
            MarkerIcon::UniversityLogo,
        ),
        Marker::new(
            HEALTH_CAMPUS,
            "Health Science Campus",
            MarkerIcon::HealthCampusLogo,
        ),
    ]
}
