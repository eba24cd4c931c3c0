use crate::location::{FieldSchema, RawRow, TelemetryPoint, VelocityVector};

/// Running aggregates over every row of a flight, valid or not.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub max_altitude: f64,
    #[serde(default)]
    pub min_altitude: f64,
    #[serde(default)]
    pub avg_ground: f64,
    #[serde(default)]
    pub max_ground: f64,
    #[serde(default)]
    pub max_vertical: f64,
}

impl Statistics {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a TelemetryPoint>) -> Self {
        let mut statistics = Self::default();
        for (count, point) in points.into_iter().enumerate() {
            statistics.include(point, count);
        }
        statistics
    }

    /// folds one more point into aggregates that currently cover `count` points
    pub fn include(&mut self, point: &TelemetryPoint, count: usize) {
        if count == 0 {
            self.max_altitude = point.altitude;
            self.min_altitude = point.altitude;
            self.max_vertical = point.vertical_velocity;
            self.max_ground = point.ground_speed;
            self.avg_ground = crate::utilities::round_to_two(point.ground_speed);
            return;
        }

        if point.altitude > self.max_altitude {
            self.max_altitude = point.altitude;
        }
        if point.altitude < self.min_altitude {
            self.min_altitude = point.altitude;
        }
        if point.vertical_velocity.abs() > self.max_vertical.abs() {
            self.max_vertical = point.vertical_velocity;
        }
        if point.ground_speed > self.max_ground {
            self.max_ground = point.ground_speed;
        }
        self.avg_ground = crate::utilities::round_to_two(crate::utilities::weighted_average(
            self.avg_ground,
            count,
            point.ground_speed,
        ));
    }
}

/// Every row received for one flight, kept sorted by timestamp and zipped into points on request.
#[derive(Clone, Debug, Default)]
pub struct FlightSeries {
    schema: FieldSchema,
    rows: Vec<RawRow>,
    statistics: Statistics,
    start_date: Option<chrono::DateTime<chrono::Utc>>,
    uid: Option<String>,
}

impl FlightSeries {
    /// Statistics are computed from the rows when none are given.
    pub fn new(
        field_names: Vec<String>,
        rows: Vec<RawRow>,
        statistics: Option<Statistics>,
    ) -> Self {
        let schema = FieldSchema::new(field_names);

        let mut instance = Self {
            schema,
            rows,
            statistics: Statistics::default(),
            start_date: None,
            uid: None,
        };
        instance.sort();

        instance.statistics = match statistics {
            Some(statistics) => statistics,
            None => {
                let points: Vec<TelemetryPoint> = instance
                    .rows
                    .iter()
                    .map(|row| instance.schema.point(row))
                    .collect();
                Statistics::from_points(&points)
            }
        };

        log::debug!(
            "loaded {:} with {:} rows ({:} valid)",
            instance,
            instance.len(),
            instance.valid_len()
        );
        instance
    }

    fn sort(&mut self) {
        let schema = &self.schema;
        self.rows.sort_by_key(|row| schema.timestamp(row));
        self.refresh_origin();
    }

    fn refresh_origin(&mut self) {
        match self.rows.first() {
            Some(row) => {
                let first = self.schema.point(row);
                self.start_date = first.timestamp;
                self.uid = Some(first.uid);
            }
            None => {
                self.start_date = None;
                self.uid = None;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn valid_len(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| self.schema.is_valid(row))
            .count()
    }

    pub fn field_names(&self) -> &[String] {
        self.schema.names()
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn start_date(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.start_date
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn get(&self, index: usize) -> Result<TelemetryPoint, FlightError> {
        match self.rows.get(index) {
            Some(row) => Ok(self.schema.point(row)),
            None => Err(FlightError::IndexOutOfRange {
                index,
                length: self.rows.len(),
            }),
        }
    }

    /// altitude of a row without zipping the whole point
    pub fn altitude(&self, index: usize) -> Result<f64, FlightError> {
        match self.rows.get(index) {
            Some(row) => Ok(self.schema.altitude(row)),
            None => Err(FlightError::IndexOutOfRange {
                index,
                length: self.rows.len(),
            }),
        }
    }

    /// Adds a point given as named fields and returns the index it landed at.
    ///
    /// Fields that are not part of this flight are dropped. The drift from the preceding row
    /// to the new one is stored on the preceding row's velocity vector.
    pub fn append(&mut self, point: &serde_json::Map<String, serde_json::Value>) -> usize {
        let names = self.schema.names();

        let dropped: Vec<&String> = point
            .keys()
            .filter(|key| !names.contains(key))
            .collect();
        if !dropped.is_empty() {
            log::debug!("dropped fields not in flight: {:?}", dropped);
        }

        let mut row: RawRow = names
            .iter()
            .map(|name| point.get(name).cloned().unwrap_or(serde_json::Value::Null))
            .collect();
        let new_point = self.schema.point(&row);

        let timestamp = self.schema.timestamp(&row);
        let index = self
            .rows
            .partition_point(|existing| self.schema.timestamp(existing) <= timestamp);

        if let Some(column) = self.schema.velocity_vector_column() {
            if index > 0 {
                let previous = self.schema.point(&self.rows[index - 1]);
                let vector = VelocityVector::between(&previous, &new_point);
                set_cell(
                    &mut self.rows[index - 1],
                    column,
                    match vector {
                        Some(vector) => vector.to_value(),
                        None => serde_json::Value::Null,
                    },
                );
            }

            let vector = match self.rows.get(index) {
                Some(next) => VelocityVector::between(&new_point, &self.schema.point(next)),
                None => Some(VelocityVector::default()),
            };
            set_cell(
                &mut row,
                column,
                match vector {
                    Some(vector) => vector.to_value(),
                    None => serde_json::Value::Null,
                },
            );
        }

        let count = self.rows.len();
        self.rows.insert(index, row);
        self.statistics.include(&new_point, count);

        if index == 0 {
            self.refresh_origin();
        }
        if index + 1 < self.rows.len() {
            log::debug!(
                "inserted out-of-order point at {:} of {:}",
                index,
                self.rows.len()
            );
        }

        index
    }

    /// Overwrites one cell; rows are re-sorted if the timestamp changed.
    pub fn update_raw(
        &mut self,
        index: usize,
        field: &str,
        value: serde_json::Value,
    ) -> Result<(), FlightError> {
        let column = match self.schema.column(field) {
            Some(column) => column,
            None => {
                return Err(FlightError::DomainError {
                    field: field.to_string(),
                });
            }
        };
        let length = self.rows.len();
        match self.rows.get_mut(index) {
            Some(row) => set_cell(row, column, value),
            None => return Err(FlightError::IndexOutOfRange { index, length }),
        }

        if Some(column) == self.schema.datetime_column() {
            self.sort();
        } else if index == 0 {
            self.refresh_origin();
        }
        Ok(())
    }

    /// search by unix timestamp
    pub fn get_by_timestamp(&self, seconds: i64) -> Option<TelemetryPoint> {
        self.rows
            .iter()
            .find(|row| self.schema.timestamp(row) == Some(seconds))
            .map(|row| self.schema.point(row))
    }

    /// position of a row with the same timestamp as `point`
    pub fn index_of(&self, point: &TelemetryPoint) -> Option<usize> {
        let seconds = point.timestamp?.timestamp();
        self.rows
            .iter()
            .position(|row| self.schema.timestamp(row) == Some(seconds))
    }

    pub fn first_point(&self) -> Result<TelemetryPoint, FlightError> {
        self.get(0)
    }

    pub fn last_point(&self) -> Result<TelemetryPoint, FlightError> {
        match self.rows.len() {
            0 => Err(FlightError::IndexOutOfRange {
                index: 0,
                length: 0,
            }),
            length => self.get(length - 1),
        }
    }

    pub fn first_valid_point(&self) -> Result<TelemetryPoint, FlightError> {
        match self.rows.iter().find(|row| self.schema.is_valid(row)) {
            Some(row) => Ok(self.schema.point(row)),
            None => Err(FlightError::NotFound {
                message: format!("{:} has no valid points", self),
            }),
        }
    }

    pub fn last_valid_point(&self) -> Result<TelemetryPoint, FlightError> {
        match self.rows.iter().rev().find(|row| self.schema.is_valid(row)) {
            Some(row) => Ok(self.schema.point(row)),
            None => Err(FlightError::NotFound {
                message: format!("{:} has no valid points", self),
            }),
        }
    }

    fn valid_rows(&self) -> impl Iterator<Item = &RawRow> {
        self.rows.iter().filter(|row| self.schema.is_valid(row))
    }

    pub fn coordinates(&self) -> Vec<crate::location::Coordinates> {
        self.valid_rows()
            .map(|row| {
                crate::location::Coordinates::new(
                    self.schema.latitude(row),
                    self.schema.longitude(row),
                    None,
                )
            })
            .collect()
    }

    pub fn altitudes(&self) -> Vec<f64> {
        self.valid_rows()
            .map(|row| self.schema.altitude(row))
            .collect()
    }

    pub fn timestamps(&self) -> Vec<Option<chrono::DateTime<chrono::Utc>>> {
        self.valid_rows()
            .map(|row| {
                self.schema
                    .timestamp(row)
                    .and_then(crate::utilities::utc_from_timestamp)
            })
            .collect()
    }

    /// chart labels for `timestamps()`
    pub fn datetimes(&self) -> Vec<String> {
        self.timestamps()
            .iter()
            .map(|timestamp| match timestamp {
                Some(timestamp) => format!("{:}", timestamp.format(&crate::DATETIME_FORMAT)),
                None => String::new(),
            })
            .collect()
    }

    /// valid points, in storage order
    pub fn iterate_all(&self) -> FlightPoints<'_> {
        FlightPoints {
            flight: self,
            index: 0,
            end: self.rows.len(),
            valid_only: true,
        }
    }

    /// valid points before `end`
    pub fn iterate_to(&self, end: usize) -> Result<FlightPoints<'_>, FlightError> {
        let mut points = self.iterate_range(0, end)?;
        points.valid_only = true;
        Ok(points)
    }

    /// every point in `[low, high)`, valid or not
    pub fn iterate_range(&self, low: usize, high: usize) -> Result<FlightPoints<'_>, FlightError> {
        if low > high || high > self.rows.len() {
            return Err(FlightError::RangeError {
                low,
                high,
                length: self.rows.len(),
            });
        }
        Ok(FlightPoints {
            flight: self,
            index: low,
            end: high,
            valid_only: false,
        })
    }
}

impl std::fmt::Display for FlightSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Flight:[date={:},uid={:}]",
            match self.start_date {
                Some(start_date) => format!("{:}", start_date.format(&crate::DATETIME_FORMAT)),
                None => "null".to_string(),
            },
            self.uid.as_deref().unwrap_or("null")
        )
    }
}

impl<'a> IntoIterator for &'a FlightSeries {
    type Item = TelemetryPoint;
    type IntoIter = FlightPoints<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iterate_all()
    }
}

/// Lazy cursor over a window of rows; clone it to restart.
#[derive(Clone)]
pub struct FlightPoints<'a> {
    flight: &'a FlightSeries,
    index: usize,
    end: usize,
    valid_only: bool,
}

impl<'a> Iterator for FlightPoints<'a> {
    type Item = TelemetryPoint;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.end {
            let row = &self.flight.rows[self.index];
            self.index += 1;
            if !self.valid_only || self.flight.schema.is_valid(row) {
                return Some(self.flight.schema.point(row));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.index;
        if self.valid_only {
            (0, Some(remaining))
        } else {
            (remaining, Some(remaining))
        }
    }
}

fn set_cell(row: &mut RawRow, column: usize, value: serde_json::Value) {
    if row.len() <= column {
        row.resize(column + 1, serde_json::Value::Null);
    }
    row[column] = value;
}

custom_error::custom_error! {pub FlightError
    IndexOutOfRange { index: usize, length: usize } = "index {index} out of range [0,{length})",
    RangeError { low: usize, high: usize, length: usize } = "index limits [{low},{high}) out of range [0,{length}]",
    NotFound { message: String } = "{message}",
    DomainError { field: String } = "{field} is not a field of this flight",
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{
        ALTITUDE, DATETIME, GROUND_SPEED, LATITUDE, LONGITUDE, SATELLITES, UID, VELOCITY_VECTOR,
        VERTICAL_VELOCITY,
    };
    use crate::utilities::approx_equal;

    fn fields() -> Vec<String> {
        [
            UID,
            DATETIME,
            LATITUDE,
            LONGITUDE,
            ALTITUDE,
            VERTICAL_VELOCITY,
            GROUND_SPEED,
            SATELLITES,
            VELOCITY_VECTOR,
        ]
        .iter()
        .map(|field| field.to_string())
        .collect()
    }

    fn row(datetime: i64, latitude: f64, altitude: f64, satellites: u32) -> RawRow {
        vec![
            serde_json::json!("3394426740332167"),
            serde_json::json!(datetime),
            serde_json::json!(latitude),
            serde_json::json!(-75.0),
            serde_json::json!(altitude),
            serde_json::json!(4.0),
            serde_json::json!(20.0),
            serde_json::json!(satellites),
            serde_json::json!([0.0, 0.0]),
        ]
    }

    fn point(
        datetime: i64,
        latitude: f64,
        altitude: f64,
        ground_speed: f64,
        satellites: u32,
    ) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::json!({
            "uid": "3394426740332167",
            "datetime": datetime,
            "latitude": latitude,
            "longitude": -75.0,
            "altitude": altitude,
            "vertical_velocity": -6.5,
            "ground_speed": ground_speed,
            "satellites": satellites,
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn example_flight() -> FlightSeries {
        FlightSeries::new(
            fields(),
            vec![
                row(1559347260, 40.01, 300.0, 8),
                row(1559347200, 40.0, 100.0, 3),
                row(1559347230, 40.005, 200.0, 9),
            ],
            None,
        )
    }

    #[test]
    fn test_construct_sorts() {
        let flight = example_flight();

        assert_eq!(flight.len(), 3);
        assert_eq!(flight.altitude(0).unwrap(), 100.0);
        assert_eq!(flight.altitude(1).unwrap(), 200.0);
        assert_eq!(flight.altitude(2).unwrap(), 300.0);

        assert_eq!(
            flight.start_date(),
            crate::utilities::utc_from_timestamp(1559347200)
        );
        assert_eq!(flight.uid(), Some("3394426740332167"));
        assert_eq!(
            flight.to_string(),
            "Flight:[date=2019-06-01 00:00:00,uid=3394426740332167]"
        );
    }

    #[test]
    fn test_empty() {
        let flight = FlightSeries::new(fields(), vec![], None);

        assert!(flight.is_empty());
        assert_eq!(flight.start_date(), None);
        assert_eq!(flight.uid(), None);
        assert_eq!(flight.statistics(), &Statistics::default());
        assert!(matches!(
            flight.first_point(),
            Err(FlightError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            flight.last_point(),
            Err(FlightError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            flight.first_valid_point(),
            Err(FlightError::NotFound { .. })
        ));
        assert_eq!(flight.iterate_all().count(), 0);
    }

    #[test]
    fn test_get() {
        let flight = example_flight();

        assert_eq!(flight.get(1).unwrap().altitude, 200.0);
        assert!(matches!(
            flight.get(3),
            Err(FlightError::IndexOutOfRange {
                index: 3,
                length: 3
            })
        ));
        assert_eq!(flight.first_point().unwrap().altitude, 100.0);
        assert_eq!(flight.last_point().unwrap().altitude, 300.0);
    }

    #[test]
    fn test_valid_points() {
        let flight = example_flight();

        // first row has too few satellites
        assert_eq!(flight.first_valid_point().unwrap().altitude, 200.0);
        assert_eq!(flight.last_valid_point().unwrap().altitude, 300.0);

        assert_eq!(flight.coordinates().len(), flight.valid_len());
        assert_eq!(
            flight.coordinates(),
            vec![
                crate::location::Coordinates::new(40.005, -75.0, None),
                crate::location::Coordinates::new(40.01, -75.0, None),
            ]
        );
        assert_eq!(flight.altitudes(), vec![200.0, 300.0]);
        assert_eq!(
            flight.timestamps(),
            vec![
                crate::utilities::utc_from_timestamp(1559347230),
                crate::utilities::utc_from_timestamp(1559347260),
            ]
        );
        assert_eq!(
            flight.datetimes(),
            vec!["2019-06-01 00:00:30", "2019-06-01 00:01:00"]
        );
    }

    #[test]
    fn test_all_invalid() {
        let flight = FlightSeries::new(
            fields(),
            vec![row(1, 0.0, 0.0, 0), row(2, 0.0, 0.0, 5)],
            None,
        );

        assert!(matches!(
            flight.first_valid_point(),
            Err(FlightError::NotFound { .. })
        ));
        assert!(matches!(
            flight.last_valid_point(),
            Err(FlightError::NotFound { .. })
        ));
        assert!(flight.coordinates().is_empty());
        // still stored
        assert_eq!(flight.len(), 2);
    }

    #[test]
    fn test_append_velocity_vector() {
        let mut flight = example_flight();

        let index = flight.append(&point(1559347270, 40.011, 350.0, 20.0, 10));
        assert_eq!(index, 3);

        // movement from the previous last point, stored on that point
        let previous = flight.get(2).unwrap();
        let vector = previous.velocity_vector.unwrap();
        assert!(approx_equal(vector.latitude, 0.0001, 9));
        assert!(approx_equal(vector.longitude, 0.0, 9));

        // placeholder on the new point
        assert_eq!(
            flight.get(3).unwrap().velocity_vector,
            Some(VelocityVector::default())
        );
    }

    #[test]
    fn test_append_drops_unknown_fields() {
        let mut flight = example_flight();

        let mut new_point = point(1559347270, 40.011, 350.0, 20.0, 10);
        new_point.insert("temperature".to_string(), serde_json::json!(-40.0));
        new_point.insert("battery".to_string(), serde_json::json!(3.7));

        let index = flight.append(&new_point);

        assert_eq!(flight.rows()[index].len(), fields().len());
        assert_eq!(flight.field_names(), fields().as_slice());
        assert_eq!(flight.get(index).unwrap().altitude, 350.0);
    }

    #[test]
    fn test_append_missing_fields() {
        let mut flight = example_flight();

        let mut new_point = serde_json::Map::new();
        new_point.insert("datetime".to_string(), serde_json::json!(1559347290));
        new_point.insert("altitude".to_string(), serde_json::json!(500.0));

        let index = flight.append(&new_point);
        let appended = flight.get(index).unwrap();

        assert_eq!(appended.altitude, 500.0);
        assert_eq!(appended.latitude, 0.0);
        assert_eq!(appended.satellites, 0);
    }

    #[test]
    fn test_append_keeps_sorted() {
        let mut flight = example_flight();

        let timestamps = [1559347400, 1559347215, 1559347100, 1559347400, 1559347300];
        for timestamp in timestamps {
            flight.append(&point(timestamp, 40.0, 1000.0, 10.0, 7));
        }

        let stored: Vec<Option<i64>> = flight
            .rows()
            .iter()
            .map(|row| flight.schema().timestamp(row))
            .collect();
        assert!(stored.windows(2).all(|pair| pair[0] <= pair[1]));

        // the earliest point moved to the front
        assert_eq!(
            flight.start_date(),
            crate::utilities::utc_from_timestamp(1559347100)
        );
    }

    #[test]
    fn test_append_before_existing() {
        let mut flight = example_flight();

        let index = flight.append(&point(1559347245, 40.0075, 250.0, 10.0, 7));
        assert_eq!(index, 2);

        // the inserted point carries the drift to the point after it
        let vector = flight.get(2).unwrap().velocity_vector.unwrap();
        assert!(approx_equal(vector.latitude, 0.0025 / 15.0, 9));
        let vector = flight.get(1).unwrap().velocity_vector.unwrap();
        assert!(approx_equal(vector.latitude, 0.0025 / 15.0, 9));
    }

    #[test]
    fn test_statistics() {
        let mut flight = FlightSeries::new(fields(), vec![], None);

        let samples = [
            (1, 120.0, 12.0),
            (2, 900.0, 30.0),
            (3, 80.0, 3.0),
            (4, 2500.0, 47.5),
            (5, 1800.0, 18.25),
        ];
        for (timestamp, altitude, ground_speed) in samples {
            flight.append(&point(timestamp, 40.0, altitude, ground_speed, 7));
        }

        let statistics = flight.statistics();
        assert_eq!(statistics.max_altitude, 2500.0);
        assert_eq!(statistics.min_altitude, 80.0);
        assert_eq!(statistics.max_ground, 47.5);
        assert_eq!(statistics.max_vertical, -6.5);

        let mean = samples.iter().map(|sample| sample.2).sum::<f64>() / samples.len() as f64;
        assert!(approx_equal(statistics.avg_ground, mean, 1));
    }

    #[test]
    fn test_statistics_continue_from_payload() {
        let initial = Statistics {
            max_altitude: 300.0,
            min_altitude: 100.0,
            avg_ground: 20.0,
            max_ground: 20.0,
            max_vertical: 4.0,
        };
        let mut flight = FlightSeries::new(
            fields(),
            vec![
                row(1559347200, 40.0, 100.0, 8),
                row(1559347230, 40.005, 200.0, 9),
                row(1559347260, 40.01, 300.0, 8),
            ],
            Some(initial),
        );

        flight.append(&point(1559347290, 40.02, 50.0, 40.0, 7));

        let statistics = flight.statistics();
        assert_eq!(statistics.max_altitude, 300.0);
        assert_eq!(statistics.min_altitude, 50.0);
        assert_eq!(statistics.avg_ground, 25.0);
        assert_eq!(statistics.max_ground, 40.0);
        assert_eq!(statistics.max_vertical, -6.5);
    }

    #[test]
    fn test_update_raw() {
        let mut flight = example_flight();

        flight
            .update_raw(1, ALTITUDE, serde_json::json!(222.0))
            .unwrap();
        assert_eq!(flight.altitude(1).unwrap(), 222.0);

        assert!(matches!(
            flight.update_raw(1, "temperature", serde_json::json!(1.0)),
            Err(FlightError::DomainError { .. })
        ));
        assert!(matches!(
            flight.update_raw(7, ALTITUDE, serde_json::json!(1.0)),
            Err(FlightError::IndexOutOfRange { .. })
        ));

        // moving a timestamp keeps the rows ordered
        flight
            .update_raw(0, DATETIME, serde_json::json!(1559347999))
            .unwrap();
        assert_eq!(flight.altitude(2).unwrap(), 100.0);
    }

    #[test]
    fn test_search() {
        let flight = example_flight();

        let found = flight.get_by_timestamp(1559347230).unwrap();
        assert_eq!(found.altitude, 200.0);
        assert_eq!(flight.index_of(&found), Some(1));
        assert_eq!(flight.get_by_timestamp(42), None);
        assert_eq!(flight.index_of(&TelemetryPoint::default()), None);
    }

    #[test]
    fn test_iterate_all() {
        let flight = example_flight();

        let points = flight.iterate_all();
        let altitudes: Vec<f64> = points.clone().map(|point| point.altitude).collect();
        assert_eq!(altitudes, vec![200.0, 300.0]);

        // restartable
        assert_eq!(points.count(), 2);
        assert_eq!((&flight).into_iter().count(), 2);
        assert_eq!(flight.iterate_all().count(), 2);
    }

    #[test]
    fn test_iterate_range() {
        let flight = example_flight();

        let altitudes: Vec<f64> = flight
            .iterate_range(0, 2)
            .unwrap()
            .map(|point| point.altitude)
            .collect();
        assert_eq!(altitudes, vec![100.0, 200.0]);

        assert_eq!(flight.iterate_range(3, 3).unwrap().count(), 0);
        assert!(matches!(
            flight.iterate_range(2, 1),
            Err(FlightError::RangeError { .. })
        ));
        assert!(matches!(
            flight.iterate_range(0, 4),
            Err(FlightError::RangeError { .. })
        ));

        let altitudes: Vec<f64> = flight
            .iterate_to(2)
            .unwrap()
            .map(|point| point.altitude)
            .collect();
        assert_eq!(altitudes, vec![200.0]);
    }
}
