pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_PICKER: &str = "dmenu";

pub const SERVER_URL_VAR: &str = "DIAGONATOR_URL";
pub const PICKER_VAR: &str = "DIAGONATOR_PICKER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Endpoint every request is posted to.
    pub server_url: String,
    /// Program used to choose a requirement.
    pub picker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            picker: DEFAULT_PICKER.to_owned(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let default = Self::default();
        Self {
            server_url: get(SERVER_URL_VAR).unwrap_or(default.server_url),
            picker: get(PICKER_VAR).unwrap_or(default.picker),
        }
    }
}
