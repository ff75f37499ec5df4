use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Settings {
    pub codeforces: CodeforcesSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct CodeforcesSettings {
    pub base_url: String,
    /// 1-based index of the first standings row to request.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub from: usize,
    /// Number of standings rows to request.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub count: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
}

impl Default for CodeforcesSettings {
    fn default() -> Self {
        Self {
            base_url: "https://codeforces.com/api".into(),
            from: 1,
            count: 500,
            timeout_secs: 30,
        }
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct CacheSettings {
    /// Directory of cached standings; caching is disabled when absent.
    pub directory: Option<String>,
}

/// Reads `configuration.yaml` from the working directory, if present, then applies
/// environment overrides such as `APP_CODEFORCES__COUNT=100`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| config::ConfigError::Foreign(e.into()))?;
    let defaults = CodeforcesSettings::default();

    let settings = config::Config::builder()
        .set_default("codeforces.base_url", defaults.base_url)?
        .set_default("codeforces.from", defaults.from as u64)?
        .set_default("codeforces.count", defaults.count as u64)?
        .set_default("codeforces.timeout_secs", defaults.timeout_secs)?
        .add_source(config::File::from(base_path.join("configuration.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
