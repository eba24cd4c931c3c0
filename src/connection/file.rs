/// A JSON payload on disk, standing in for one response of the flight server.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct JsonFile {
    pub path: std::path::PathBuf,
}

impl JsonFile {
    pub fn new(path: std::path::PathBuf) -> Result<Self, crate::connection::ConnectionError> {
        if path.exists() {
            Ok(Self { path })
        } else {
            Err(crate::connection::ConnectionError::FailedToEstablish {
                connection: path.display().to_string(),
                message: "path does not exist".to_string(),
            })
        }
    }

    pub fn read_flight(
        &self,
    ) -> Result<crate::connection::FlightPayload, crate::connection::ConnectionError> {
        self.read()
    }

    pub fn read_update(
        &self,
    ) -> Result<crate::connection::UpdatePayload, crate::connection::ConnectionError> {
        self.read()
    }

    fn read<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, crate::connection::ConnectionError> {
        let contents = read_contents(&self.path)?;
        serde_json::from_str(&contents).map_err(|error| {
            crate::connection::ConnectionError::ParsingError {
                path: self.path.display().to_string(),
                message: error.to_string(),
            }
        })
    }
}

fn read_contents(path: &std::path::Path) -> Result<String, crate::connection::ConnectionError> {
    std::fs::read_to_string(path).map_err(|error| {
        crate::connection::ConnectionError::FailedToEstablish {
            connection: path.display().to_string(),
            message: error.to_string(),
        }
    })
}

/// GeoJSON output of a tracked flight and its predicted landing.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct GeoJsonFile {
    pub path: std::path::PathBuf,
}

impl GeoJsonFile {
    pub fn new(path: std::path::PathBuf) -> Self {
        Self { path }
    }

    pub fn write_flight(
        &self,
        name: &str,
        flight: &crate::location::track::FlightSeries,
        landing: Option<&crate::location::Coordinates>,
    ) -> Result<(), crate::connection::ConnectionError> {
        let collection = feature_collection(name, flight, landing);
        let contents = geojson::GeoJson::from(collection).to_string();

        std::fs::write(&self.path, contents).map_err(|error| {
            crate::connection::ConnectionError::FailedToEstablish {
                connection: self.path.display().to_string(),
                message: error.to_string(),
            }
        })?;

        log::info!("wrote {:} to {:}", flight, self.path.display());
        Ok(())
    }
}

fn feature(
    value: geojson::Value,
    properties: serde_json::Map<String, serde_json::Value>,
) -> geojson::Feature {
    geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// The valid track as a line string with one point per valid fix, plus the landing point
/// when there is one.
pub fn feature_collection(
    name: &str,
    flight: &crate::location::track::FlightSeries,
    landing: Option<&crate::location::Coordinates>,
) -> geojson::FeatureCollection {
    let mut features = vec![];

    let points: Vec<crate::location::TelemetryPoint> = flight.iterate_all().collect();
    if !points.is_empty() {
        let mut properties = serde_json::Map::new();
        properties.insert("name".to_string(), serde_json::json!(name));
        properties.insert(
            "uid".to_string(),
            serde_json::json!(flight.uid().unwrap_or_default()),
        );
        properties.insert(
            "statistics".to_string(),
            serde_json::to_value(flight.statistics()).unwrap_or_default(),
        );

        features.push(feature(
            geojson::Value::LineString(
                points
                    .iter()
                    .map(|point| vec![point.longitude, point.latitude, point.altitude])
                    .collect(),
            ),
            properties,
        ));
    }

    for point in &points {
        let properties = match serde_json::to_value(point) {
            Ok(serde_json::Value::Object(properties)) => properties,
            _ => serde_json::Map::new(),
        };
        features.push(feature(
            geojson::Value::Point(vec![point.longitude, point.latitude, point.altitude]),
            properties,
        ));
    }

    if let Some(landing) = landing {
        let mut properties = serde_json::Map::new();
        properties.insert("name".to_string(), serde_json::json!("predicted landing"));
        if let Some(last) = points.last() {
            properties.insert(
                "distance".to_string(),
                crate::utilities::f64_value(last.coordinates().geodesic_distance(landing)),
            );
        }

        features.push(feature(
            geojson::Value::Point(vec![landing.lng, landing.lat]),
            properties,
        ));
    }

    geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
