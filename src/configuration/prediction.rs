#[derive(serde::Deserialize, PartialEq, Debug, Clone, Default)]
pub struct PredictionConfiguration {
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub velocity: VelocityProfile,
    #[serde(default)]
    pub from: PredictionStart,
}

impl PredictionConfiguration {
    pub fn to_landing_prediction(&self) -> crate::prediction::LandingPrediction {
        crate::prediction::LandingPrediction::new(self.velocity.velocity_function())
    }
}

/// Descent velocity law used to cross each wind layer.
#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub enum VelocityProfile {
    /// parachute drag in the modeled atmosphere
    Physical(crate::model::PayloadParameters),
    /// the same descent rate (m/s) at every altitude
    Constant { descent_rate: f64 },
    /// fit to past flights
    Historical,
}

impl Default for VelocityProfile {
    fn default() -> Self {
        Self::Physical(crate::model::PayloadParameters::default())
    }
}

impl VelocityProfile {
    pub fn velocity_function(&self) -> crate::prediction::VelocityFunction {
        match *self {
            Self::Physical(parameters) => {
                Box::new(move |altitude: f64| parameters.terminal_velocity(altitude))
            }
            Self::Constant { descent_rate } => Box::new(move |_: f64| -descent_rate.abs()),
            Self::Historical => {
                Box::new(|altitude: f64| crate::model::FreefallEstimate::new(altitude).descent_rate)
            }
        }
    }
}

/// Point of the flight the landing is predicted from.
#[derive(serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStart {
    #[default]
    LastValid,
    Last,
}

impl PredictionStart {
    pub fn point(
        &self,
        flight: &crate::location::track::FlightSeries,
    ) -> Result<crate::location::TelemetryPoint, crate::location::track::FlightError> {
        match self {
            Self::LastValid => flight.last_valid_point(),
            Self::Last => flight.last_point(),
        }
    }
}
