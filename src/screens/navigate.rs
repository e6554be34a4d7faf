use std::sync::Arc;

use crate::{
    directory::Directory,
    entities::{Permission, Region},
    error::Error,
    external::{DeviceLocator, MapSurface},
    search::SearchSession,
};

pub struct NavigateScreen {
    session: SearchSession,
    locator: Arc<dyn DeviceLocator>,
}

impl NavigateScreen {
    pub fn new(directory: Directory, locator: Arc<dyn DeviceLocator>) -> Self {
        Self {
            session: SearchSession::new(directory),
            locator,
        }
    }

    pub fn campus(locator: Arc<dyn DeviceLocator>) -> Self {
        Self::new(Directory::campus(), locator)
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Asks for location access and, when granted, centers on the device.
    ///
    /// Locator failures are logged and leave the screen as it was.
    #[tracing::instrument(skip(self))]
    pub async fn mount(&mut self) {
        if let Err(err) = self.locate().await {
            tracing::warn!("could not resolve device location: {}", err);
        }
    }

    async fn locate(&mut self) -> Result<(), Error> {
        let permission = self.locator.request_permission().await?;

        if !permission.is_granted() {
            self.session.set_device_fix(Permission::Denied, None);
            return Ok(());
        }

        let position = self.locator.current_position().await?;
        self.session.set_device_fix(Permission::Granted, Some(position));
        self.session.move_to(position);

        Ok(())
    }

    pub fn on_query_change(&mut self, query: &str) {
        self.session.set_query(query);
    }

    pub fn on_search(&mut self) -> Option<Region> {
        self.session.submit()
    }

    /// Selects a place from the result list by id.
    pub fn on_select(&mut self, id: &str) -> Option<Region> {
        let place = self
            .session
            .matches()
            .iter()
            .find(|place| place.id == id)
            .cloned()?;

        Some(self.session.select(&place))
    }

    pub fn on_my_location(&mut self) -> Option<Region> {
        self.session.recenter_on_device()
    }

    pub fn render(&self, surface: &mut dyn MapSurface) {
        surface.show(&self.session.region(), &self.session.markers());
    }
}
