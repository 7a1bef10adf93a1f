use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, GeolocationError, model::Coordinates};

/// Source of the user's current position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Position taken from configuration, subject to the user's sharing consent.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguredGeolocator {
    home: Option<Coordinates>,
    share_location: bool,
}

impl ConfiguredGeolocator {
    pub fn new(home: Option<Coordinates>, share_location: bool) -> Self {
        Self {
            home,
            share_location,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.home, config.share_location)
    }
}

#[async_trait]
impl Geolocator for ConfiguredGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        if !self.share_location {
            return Err(GeolocationError::Denied);
        }
        self.home.ok_or(GeolocationError::Unavailable)
    }
}
