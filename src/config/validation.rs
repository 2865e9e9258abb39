//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.catalog.database.as_os_str().is_empty() {
        return Err(Error::MissingConfig("catalog.database".to_string()));
    }

    if config.media.root.as_os_str().is_empty() {
        return Err(Error::MissingConfig("media.root".to_string()));
    }

    if config.catalog.store_id < 0 {
        return Err(Error::ConfigValidation {
            field: "catalog.store_id".to_string(),
            message: format!("Store scope must be non-negative (got {})", config.catalog.store_id),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_database_rejected() {
        let mut config = Config::default();
        config.catalog.database = PathBuf::new();
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_negative_store_id_rejected() {
        let mut config = Config::default();
        config.catalog.store_id = -1;
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }
}
