mod account;
mod credential;
mod feedback;
mod location;
mod map;
mod message;
mod place;
mod post;

pub use account::{AccessToken, Account, Registration};
pub use credential::Credential;
pub use feedback::{Feedback, FEEDBACK_COLLECTION};
pub use location::{Coordinates, Permission};
pub use map::{Marker, MarkerIcon, Region, DEVICE_ACCURACY_RADIUS_METERS, ZOOM_SPAN};
pub use message::ChatMessage;
pub use place::Place;
pub use post::{Creator, Post, PostDraft};
