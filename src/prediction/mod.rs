pub mod wind;

// terminal speeds are clamped to this to keep layer durations finite
const MINIMUM_TERMINAL_SPEED: f64 = 0.0000001;

/// altitude (m) to signed descent velocity (m/s)
pub type VelocityFunction = Box<dyn Fn(f64) -> f64>;

/// Landing prediction for one flight: the wind profile built from its rows and the descent
/// velocity law used to cross each layer. The flight itself stays with the caller.
pub struct LandingPrediction {
    profile: wind::AltitudeProfile,
    velocity: VelocityFunction,
}

impl Default for LandingPrediction {
    fn default() -> Self {
        let parameters = crate::model::PayloadParameters::default();
        Self::new(move |altitude| parameters.terminal_velocity(altitude))
    }
}

impl LandingPrediction {
    pub fn new(velocity: impl Fn(f64) -> f64 + 'static) -> Self {
        Self {
            profile: wind::AltitudeProfile::default(),
            velocity: Box::new(velocity),
        }
    }

    pub fn set_velocity_function(&mut self, velocity: impl Fn(f64) -> f64 + 'static) {
        self.velocity = Box::new(velocity);
    }

    pub fn terminal_velocity(&self, altitude: f64) -> f64 {
        (self.velocity)(altitude)
    }

    pub fn profile(&self) -> &wind::AltitudeProfile {
        &self.profile
    }

    pub fn build_altitude_profile(
        &mut self,
        flight: &crate::location::track::FlightSeries,
    ) -> Result<(), PredictionError> {
        self.profile.rebuild(flight)
    }

    pub fn update_altitude_profile(
        &mut self,
        flight: &crate::location::track::FlightSeries,
        index_a: usize,
        index_b: usize,
    ) -> Result<(), PredictionError> {
        self.profile.update(flight, index_a, index_b)
    }

    pub fn calculate_landing(
        &self,
        point: &crate::location::TelemetryPoint,
    ) -> Result<crate::location::Coordinates, PredictionError> {
        calculate_landing(&self.profile, self.velocity.as_ref(), point)
    }
}

/// Drifts `point` down through every layer from the profile's lowest layer up to the layer
/// of the point, each layer crossed at the terminal speed of its base altitude. Layers above
/// the highest known layer carry no wind and are not visited.
pub fn calculate_landing(
    profile: &wind::AltitudeProfile,
    velocity: &dyn Fn(f64) -> f64,
    point: &crate::location::TelemetryPoint,
) -> Result<crate::location::Coordinates, PredictionError> {
    let lowest_block = match profile.lowest_block() {
        Some(lowest_block) => lowest_block,
        None => return Err(PredictionError::ProfileNotBuilt),
    };
    if !point.altitude.is_finite() {
        return Err(PredictionError::InvalidAltitude {
            altitude: point.altitude,
        });
    }
    let highest_block = match profile.highest_block() {
        Some(highest_known) => wind::block(point.altitude).min(highest_known),
        None => lowest_block - wind::ALTITUDE_BLOCK,
    };

    let mut latitude = point.latitude;
    let mut longitude = point.longitude;
    let mut skipped = vec![];

    let mut current_block = lowest_block;
    while current_block <= highest_block {
        let mut terminal_speed = velocity(current_block as f64).abs();
        if terminal_speed == 0.0 {
            terminal_speed = MINIMUM_TERMINAL_SPEED;
        }
        let block_duration = wind::ALTITUDE_BLOCK as f64 / terminal_speed;

        match profile.get(current_block) {
            Some(layer) => {
                let displacement = layer.velocity.scale(block_duration);
                latitude += displacement.latitude;
                longitude += displacement.longitude;
            }
            None => skipped.push(current_block),
        }

        current_block += wind::ALTITUDE_BLOCK;
    }

    if !skipped.is_empty() {
        log::debug!("no wind data for layers {:?}; assuming no drift", skipped);
    }

    Ok(crate::location::Coordinates::new(latitude, longitude, None))
}

custom_error::custom_error! {pub PredictionError
    ProfileNotBuilt = "altitude profile has not been built",
    EmptyFlight = "cannot build an altitude profile from a flight with no rows",
    InvalidAltitude { altitude: f64 } = "cannot predict landing from altitude {altitude}",
    Flight { source: crate::location::track::FlightError } = "{source}",
}
