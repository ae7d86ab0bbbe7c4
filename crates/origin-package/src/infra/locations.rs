//! Package-storage location lookup.

use std::path::PathBuf;

use crate::infra::config::Config;

/// Provides the directories where installed package files reside, in search order.
pub trait PackageLocations {
    fn package_dirs(&self) -> Vec<PathBuf>;
}

/// Locations taken from configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocations {
    dirs: Vec<PathBuf>,
}

impl ConfiguredLocations {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.locations.package_dirs.clone())
    }
}

impl PackageLocations for ConfiguredLocations {
    fn package_dirs(&self) -> Vec<PathBuf> {
        self.dirs.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_configured_order() {
        let mut config = Config::default();
        config.locations.package_dirs = vec!["/b".into(), "/a".into()];

        let locations = ConfiguredLocations::from_config(&config);
        assert_eq!(
            locations.package_dirs(),
            [PathBuf::from("/b"), PathBuf::from("/a")]
        );
    }
}
