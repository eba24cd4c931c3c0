pub mod file;

/// A flight as first delivered: field names, rows in that field order, and optionally the
/// statistics computed upstream.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, PartialEq)]
pub struct FlightPayload {
    pub fields: Vec<String>,
    #[serde(default)]
    pub data: Vec<crate::location::RawRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<crate::location::track::Statistics>,
}

impl FlightPayload {
    pub fn into_flight(self) -> crate::location::track::FlightSeries {
        crate::location::track::FlightSeries::new(self.fields, self.data, self.stats)
    }
}

impl From<&crate::location::track::FlightSeries> for FlightPayload {
    fn from(flight: &crate::location::track::FlightSeries) -> Self {
        Self {
            fields: flight.field_names().to_vec(),
            data: flight.rows().to_vec(),
            stats: Some(flight.statistics().clone()),
        }
    }
}

/// Rows received since the last poll.
#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UpdatePayload {
    #[serde(default)]
    pub update: bool,
    #[serde(default)]
    pub result: Vec<UpdateRecord>,
    pub pin_states: Option<PinStates>,
}

impl UpdatePayload {
    /// whether there is anything to apply
    pub fn has_points(&self) -> bool {
        self.update && !self.result.is_empty()
    }
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum UpdateRecord {
    Point(serde_json::Map<String, serde_json::Value>),
    Row(crate::location::RawRow),
}

impl UpdateRecord {
    /// Named fields of this record; raw rows are read in the given field order.
    pub fn into_point(
        self,
        field_names: &[String],
    ) -> serde_json::Map<String, serde_json::Value> {
        match self {
            Self::Point(point) => point,
            Self::Row(row) => field_names.iter().cloned().zip(row).collect(),
        }
    }
}

/// Payload input and output pin registers.
#[derive(serde::Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PinStates {
    #[serde(default)]
    pub input_pins: u8,
    #[serde(default)]
    pub output_pins: u8,
}

impl PinStates {
    // the fifth input bit is not wired to a pin
    pub fn inputs(&self) -> u8 {
        if self.input_pins > 15 {
            self.input_pins - 16
        } else {
            self.input_pins
        }
    }

    pub fn outputs(&self) -> u8 {
        self.output_pins
    }
}

custom_error::custom_error! {pub ConnectionError
    FailedToEstablish { connection: String, message: String } = "failed to establish connection to {connection}; {message}",
    ParsingError { path: String, message: String } = "could not parse {path}; {message}",
}
