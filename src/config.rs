use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    // 2GIS catalog key; DEALER_API_KEY wins over DGIS_API_KEY when both are set
    #[serde(default)]
    pub dealer_api_key: Option<String>,
    #[serde(default)]
    pub dgis_api_key: Option<String>,

    #[serde(default)]
    pub openweather_api_key: String,

    #[serde(default)]
    pub exchangerate_api_key: String,

    #[serde(default = "default_dgis_base_url")]
    pub dgis_base_url: String,

    #[serde(default = "default_openweather_base_url")]
    pub openweather_base_url: String,

    #[serde(default = "default_exchangerate_base_url")]
    pub exchangerate_base_url: String,

    // Applied to every outbound provider call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // Directory with the browser frontend, served as the router fallback
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default = "default_environment")]
    pub node_env: String,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }

    /// Key for the listing-search and geocoding provider.
    pub fn dealer_api_key(&self) -> String {
        [&self.dealer_api_key, &self.dgis_api_key]
            .into_iter()
            .flatten()
            .find(|key| !key.is_empty())
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            dealer_api_key: None,
            dgis_api_key: None,
            openweather_api_key: String::new(),
            exchangerate_api_key: String::new(),
            dgis_base_url: default_dgis_base_url(),
            openweather_base_url: default_openweather_base_url(),
            exchangerate_base_url: default_exchangerate_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            static_dir: default_static_dir(),
            node_env: default_environment(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_dgis_base_url() -> String {
    "https://catalog.api.2gis.com".to_string()
}

fn default_openweather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_exchangerate_base_url() -> String {
    "https://v6.exchangerate-api.com/v6".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_static_dir() -> String {
    "frontend".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}
