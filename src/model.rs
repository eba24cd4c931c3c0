// Third-order fits of air density (kg/m^3) against altitude (m), computed in ranges from
// the U.S. Standard Atmosphere 1976. For a profile `p` and altitude `h`:
//
//     density = p[0]*h^3 + p[1]*h^2 + p[2]*h + p[3]

// lower atmosphere, at or below 16000 m
const LOWER_PROFILE: [f64; 4] = [
    -7.65207397e-14,
    4.42990042e-09,
    -1.17903183e-04,
    1.22505436e+00,
];

// middle atmosphere, above 16000 m and at or below 50000 m
const MIDDLE_PROFILE: [f64; 4] = [
    -8.50099123e-15,
    1.06256818e-09,
    -4.41401853e-05,
    6.14126066e-01,
];

// upper atmosphere, above 50000 m
const UPPER_PROFILE: [f64; 4] = [
    -1.99935300e-17,
    5.00749995e-12,
    -4.19733974e-07,
    1.17853260e-02,
];

const LOWER_CEILING: f64 = 16000.0;
const MIDDLE_CEILING: f64 = 50000.0;

pub const STANDARD_GRAVITY: f64 = 9.80665;

// the fits go negative above their range
const MINIMUM_DENSITY: f64 = 0.0000001;

fn third_order(coefficients: &[f64; 4], x: f64) -> f64 {
    coefficients[0] * x.powi(3) + coefficients[1] * x.powi(2) + coefficients[2] * x + coefficients[3]
}

/// Approximate air density in kg/m^3 at the given altitude in meters.
///
/// May be negative far above the range of the fits; see [`terminal_velocity`].
pub fn air_density(altitude: f64) -> f64 {
    if altitude <= LOWER_CEILING {
        third_order(&LOWER_PROFILE, altitude)
    } else if altitude <= MIDDLE_CEILING {
        third_order(&MIDDLE_PROFILE, altitude)
    } else {
        third_order(&UPPER_PROFILE, altitude)
    }
}

/// Descent velocity (m/s, negative when falling) of a payload with mass `mass` (kg) under a
/// parachute of diameter `parachute_diameter` (m) and drag coefficient `drag_coefficient`:
///
/// ```text
///     v = -sqrt( (8 * m * 9 * g) / (pi * C * rho * D^2) )
/// ```
pub fn terminal_velocity(
    altitude: f64,
    mass: f64,
    parachute_diameter: f64,
    drag_coefficient: f64,
) -> f64 {
    let mut density = air_density(altitude);
    if density <= 0.0 {
        density = MINIMUM_DENSITY;
    }

    // TODO: confirm the factor of 9 on gravity with the flight team; predictions are tuned against it
    -((8.0 * mass * 9.0 * STANDARD_GRAVITY)
        / (std::f64::consts::PI * drag_coefficient * density * parachute_diameter.powi(2)))
    .sqrt()
}

fn default_payload_mass() -> f64 {
    0.001
}

fn default_parachute_diameter() -> f64 {
    0.001
}

fn default_drag_coefficient() -> f64 {
    0.1
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, Debug, PartialEq)]
pub struct PayloadParameters {
    #[serde(default = "default_payload_mass")]
    pub payload_mass: f64,
    #[serde(default = "default_parachute_diameter")]
    pub parachute_diameter: f64,
    #[serde(default = "default_drag_coefficient")]
    pub drag_coefficient: f64,
}

impl Default for PayloadParameters {
    fn default() -> Self {
        Self {
            payload_mass: default_payload_mass(),
            parachute_diameter: default_parachute_diameter(),
            drag_coefficient: default_drag_coefficient(),
        }
    }
}

impl PayloadParameters {
    pub fn new(payload_mass: f64, parachute_diameter: f64, drag_coefficient: f64) -> Self {
        Self {
            payload_mass,
            parachute_diameter,
            drag_coefficient,
        }
    }

    pub fn terminal_velocity(&self, altitude: f64) -> f64 {
        terminal_velocity(
            altitude,
            self.payload_mass,
            self.parachute_diameter,
            self.drag_coefficient,
        )
    }
}

#[derive(Clone)]
pub struct FreefallEstimate {
    pub descent_rate: f64,
    pub time_to_ground: chrono::Duration,
}

impl FreefallEstimate {
    // estimation of freefall w/ parachute, based on historical flight data
    pub fn new(altitude: f64) -> FreefallEstimate {
        // `dh/dt` based on historical flight data
        let descent_rate = -5.8e-08 * altitude.powi(2) - 6.001;

        // integration of `(1/(dh/dt)) dh` based on historical flight data
        let time_to_ground = chrono::Duration::milliseconds(
            (1695.02 * (9.8311e-05 * altitude).atan() * 1000.0) as i64,
        );

        FreefallEstimate {
            descent_rate,
            time_to_ground,
        }
    }
}
