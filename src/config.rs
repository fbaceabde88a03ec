use std::env;

/// Environment-driven initialization settings.
///
/// `PGSOCR_TESSERACT_VERSION`, `PGSOCR_LEPT_NAME` and `PGSOCR_LEPT_VERSION`
/// override the defaults; empty image fields fall back to the canonical
/// Leptonica name and major version during initialization.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub engine_version: String,
    pub image_library: String,
    pub image_library_version: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            engine_version: "5".to_string(),
            image_library: String::new(),
            image_library_version: String::new(),
        }
    }
}

impl Configuration {
    pub fn from_env() -> Self {
        let mut config = Configuration::default();
        if let Ok(version) = env::var("PGSOCR_TESSERACT_VERSION") {
            config.engine_version = version;
        }
        if let Ok(name) = env::var("PGSOCR_LEPT_NAME") {
            config.image_library = name;
        }
        if let Ok(version) = env::var("PGSOCR_LEPT_VERSION") {
            config.image_library_version = version;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_the_current_engine_major() {
        let config = Configuration::default();
        assert_eq!(config.engine_version, "5");
        assert!(config.image_library.is_empty());
        assert!(config.image_library_version.is_empty());
    }
}
