//! Configuration module

mod site;

pub use site::ConfigError;
pub use site::SiteSettings;
pub use site::Social;
pub use site::SETTINGS_FILE;
