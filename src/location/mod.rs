use geo::GeodesicDistance;

pub mod track;

pub const UID: &str = "uid";
pub const DATETIME: &str = "datetime";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const ALTITUDE: &str = "altitude";
pub const VERTICAL_VELOCITY: &str = "vertical_velocity";
pub const GROUND_SPEED: &str = "ground_speed";
pub const SATELLITES: &str = "satellites";
pub const VELOCITY_VECTOR: &str = "velocity_vector";

// fixes from this many satellites or fewer are not trusted
pub const MINIMUM_SATELLITES: u32 = 5;

/// one row of a flight, as received; cells line up with the flight's field names
pub type RawRow = Vec<serde_json::Value>;

/// Horizontal drift in degrees per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VelocityVector {
    pub latitude: f64,
    pub longitude: f64,
}

impl VelocityVector {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// displacement per second between two fixes, attributed to the earlier one
    pub fn between(from: &TelemetryPoint, to: &TelemetryPoint) -> Option<Self> {
        let seconds = (to.timestamp? - from.timestamp?).num_seconds() as f64;
        Some(Self {
            latitude: (to.latitude - from.latitude) / seconds,
            longitude: (to.longitude - from.longitude) / seconds,
        })
    }

    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Array(components) if components.len() == 2 => Some(Self {
                latitude: crate::utilities::value_as_f64(&components[0])?,
                longitude: crate::utilities::value_as_f64(&components[1])?,
            }),
            _ => None,
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Array(vec![
            crate::utilities::f64_value(self.latitude),
            crate::utilities::f64_value(self.longitude),
        ])
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.latitude * factor, self.longitude * factor)
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new(
            (self.latitude + other.latitude) / 2.0,
            (self.longitude + other.longitude) / 2.0,
        )
    }

    pub fn weighted_average(&self, other: &Self, count: usize) -> Self {
        Self::new(
            crate::utilities::weighted_average(self.latitude, count, other.latitude),
            crate::utilities::weighted_average(self.longitude, count, other.longitude),
        )
    }

    /// true when neither component exceeds `limit` in magnitude (NaN never passes)
    pub fn within(&self, limit: f64) -> bool {
        self.latitude.abs() <= limit && self.longitude.abs() <= limit
    }
}

impl std::ops::Add for VelocityVector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.latitude + other.latitude, self.longitude + other.longitude)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64, alt: Option<f64>) -> Self {
        Self { lat, lng, alt }
    }

    pub fn coord(&self) -> geo::Coord {
        geo::coord! { x: self.lng, y: self.lat }
    }

    /// meters along the ellipsoid
    pub fn geodesic_distance(&self, other: &Self) -> f64 {
        geo::Point::from(self.coord()).geodesic_distance(&geo::Point::from(other.coord()))
    }
}

impl From<Coordinates> for geo::Point {
    fn from(coordinates: Coordinates) -> Self {
        geo::Point::from(coordinates.coord())
    }
}

/// Column positions of the known fields within a flight's field names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSchema {
    names: Vec<String>,
    uid: Option<usize>,
    datetime: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    altitude: Option<usize>,
    vertical_velocity: Option<usize>,
    ground_speed: Option<usize>,
    satellites: Option<usize>,
    velocity_vector: Option<usize>,
}

impl FieldSchema {
    pub fn new(names: Vec<String>) -> Self {
        let column = |field: &str| names.iter().position(|name| name == field);
        Self {
            uid: column(UID),
            datetime: column(DATETIME),
            latitude: column(LATITUDE),
            longitude: column(LONGITUDE),
            altitude: column(ALTITUDE),
            vertical_velocity: column(VERTICAL_VELOCITY),
            ground_speed: column(GROUND_SPEED),
            satellites: column(SATELLITES),
            velocity_vector: column(VELOCITY_VECTOR),
            names,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn column(&self, field: &str) -> Option<usize> {
        self.names.iter().position(|name| name == field)
    }

    pub fn datetime_column(&self) -> Option<usize> {
        self.datetime
    }

    pub fn satellites_column(&self) -> Option<usize> {
        self.satellites
    }

    pub fn velocity_vector_column(&self) -> Option<usize> {
        self.velocity_vector
    }

    fn cell<'a>(&self, row: &'a RawRow, column: Option<usize>) -> Option<&'a serde_json::Value> {
        row.get(column?)
    }

    fn float(&self, row: &RawRow, column: Option<usize>) -> f64 {
        self.cell(row, column)
            .and_then(crate::utilities::value_as_f64)
            .unwrap_or(0.0)
    }

    pub fn timestamp(&self, row: &RawRow) -> Option<i64> {
        self.cell(row, self.datetime)
            .and_then(crate::utilities::value_as_i64)
    }

    pub fn satellites(&self, row: &RawRow) -> u32 {
        self.cell(row, self.satellites)
            .and_then(crate::utilities::value_as_i64)
            .and_then(|satellites| u32::try_from(satellites).ok())
            .unwrap_or(0)
    }

    pub fn is_valid(&self, row: &RawRow) -> bool {
        self.satellites(row) > MINIMUM_SATELLITES
    }

    pub fn latitude(&self, row: &RawRow) -> f64 {
        self.float(row, self.latitude)
    }

    pub fn longitude(&self, row: &RawRow) -> f64 {
        self.float(row, self.longitude)
    }

    pub fn altitude(&self, row: &RawRow) -> f64 {
        self.float(row, self.altitude)
    }

    /// zips a raw row with the field names into a typed point; absent cells take defaults
    pub fn point(&self, row: &RawRow) -> TelemetryPoint {
        TelemetryPoint {
            uid: self
                .cell(row, self.uid)
                .and_then(crate::utilities::value_as_string)
                .unwrap_or_default(),
            timestamp: self
                .timestamp(row)
                .and_then(crate::utilities::utc_from_timestamp),
            latitude: self.latitude(row),
            longitude: self.longitude(row),
            altitude: self.altitude(row),
            vertical_velocity: self.float(row, self.vertical_velocity),
            ground_speed: self.float(row, self.ground_speed),
            satellites: self.satellites(row),
            velocity_vector: self
                .cell(row, self.velocity_vector)
                .and_then(VelocityVector::from_value),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TelemetryPoint {
    #[serde(default)]
    pub uid: String,
    #[serde(default, rename = "datetime")]
    #[serde(with = "crate::utilities::optional_utc_timestamp")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub vertical_velocity: f64,
    #[serde(default)]
    pub ground_speed: f64,
    #[serde(default)]
    pub satellites: u32,
    #[serde(default)]
    pub velocity_vector: Option<VelocityVector>,
}

impl TelemetryPoint {
    pub fn new(field_names: &[String], values: &RawRow) -> Self {
        FieldSchema::new(field_names.to_vec()).point(values)
    }

    pub fn is_valid(&self) -> bool {
        self.satellites > MINIMUM_SATELLITES
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude, Some(self.altitude))
    }

    pub fn coord(&self) -> geo::Coord {
        geo::coord! { x: self.longitude, y: self.latitude }
    }
}
