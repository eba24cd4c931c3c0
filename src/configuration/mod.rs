pub mod prediction;

fn default_name() -> String {
    String::from("unnamed_flight")
}

fn default_log_level() -> log::Level {
    *crate::LOG_LEVEL
}

#[serde_with::serde_as]
#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
pub struct RunConfiguration {
    #[serde(default = "default_name")]
    pub name: String,
    pub flight: PathConfiguration,
    #[serde(default)]
    pub updates: Vec<PathConfiguration>,
    #[serde(default)]
    pub time: TimeConfiguration,
    pub output: Option<PathConfiguration>,
    pub log: Option<PathConfiguration>,
    #[serde(default = "default_log_level")]
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub log_level: log::Level,
    pub prediction: Option<crate::configuration::prediction::PredictionConfiguration>,
}

impl RunConfiguration {
    pub fn from_file(path: &std::path::Path) -> Result<Self, crate::connection::ConnectionError> {
        let file = std::fs::File::open(path).map_err(|error| {
            crate::connection::ConnectionError::FailedToEstablish {
                connection: path.display().to_string(),
                message: error.to_string(),
            }
        })?;

        serde_yaml::from_reader(file).map_err(|error| {
            crate::connection::ConnectionError::ParsingError {
                path: path.display().to_string(),
                message: error.to_string(),
            }
        })
    }
}

#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
pub struct PathConfiguration {
    pub filename: std::path::PathBuf,
}

fn default_interval() -> chrono::Duration {
    *crate::DEFAULT_INTERVAL
}

#[serde_with::serde_as]
#[derive(PartialEq, Debug, serde::Deserialize, Clone)]
pub struct TimeConfiguration {
    #[serde(default = "default_interval")]
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    pub interval: chrono::Duration,
}

impl Default for TimeConfiguration {
    fn default() -> Self {
        Self {
            interval: default_interval(),
        }
    }
}
