use crate::location::track::{FlightError, FlightSeries};
use crate::location::VelocityVector;

/// height of one wind layer, in meters
pub const ALTITUDE_BLOCK: i64 = 150;

// degrees per second, close to 150 mph
pub const MAX_SPEED: f64 = 6.0386e-4;

// meters; altitudes past this are corrupt fixes
pub const MAX_ALTITUDE: f64 = 100000.0;

/// Layer an altitude belongs to; a layer is keyed by its lowest altitude, so the 300 layer
/// covers 300 m up to (not including) 450 m.
pub fn block(altitude: f64) -> i64 {
    (altitude - altitude % ALTITUDE_BLOCK as f64) as i64
}

/// Whether an altitude can be placed in a layer.
pub fn usable_altitude(altitude: f64) -> bool {
    altitude.is_finite() && altitude.abs() <= MAX_ALTITUDE
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerSource {
    Observed,
    Interpolated,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct WindLayer {
    pub velocity: VelocityVector,
    pub source: LayerSource,
}

/// Averaged wind drift per altitude layer, plus the running state that lets it be extended
/// as rows are appended to the flight it was built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AltitudeProfile {
    layers: std::collections::BTreeMap<i64, WindLayer>,
    last_velocity_count: usize,
    lowest_block: Option<i64>,
}

impl AltitudeProfile {
    pub fn build(flight: &FlightSeries) -> Result<Self, crate::prediction::PredictionError> {
        let mut profile = Self::default();
        profile.rebuild(flight)?;
        Ok(profile)
    }

    /// Discards all state and aggregates every row of the flight.
    pub fn rebuild(&mut self, flight: &FlightSeries) -> Result<(), crate::prediction::PredictionError> {
        *self = Self::default();
        if flight.is_empty() {
            return Err(crate::prediction::PredictionError::EmptyFlight);
        }

        if flight.schema().velocity_vector_column().is_none() {
            log::warn!(
                "flight has no {:} field; altitude profile will be empty",
                crate::location::VELOCITY_VECTOR
            );
        }

        self.aggregate(flight, 0, flight.len())?;

        let mut start = flight.altitude(0)?;
        if !usable_altitude(start) {
            start = (0..flight.len())
                .filter_map(|index| flight.altitude(index).ok())
                .find(|altitude| usable_altitude(*altitude))
                .unwrap_or_default();
            log::warn!(
                "first row altitude {:} is unusable; lowest layer starts at {:} m",
                flight.altitude(0)?,
                start
            );
        }
        self.fix_blocks(start, None, true);

        log::debug!(
            "built altitude profile of {:} layers from {:} rows, lowest layer {:?}",
            self.layers.len(),
            flight.len(),
            self.lowest_block
        );
        Ok(())
    }

    /// Folds rows from `min(index_a, index_b)` to the end of the flight into the profile, then
    /// fills gaps across the altitudes of every row from the one preceding the update onward.
    pub fn update(
        &mut self,
        flight: &FlightSeries,
        index_a: usize,
        index_b: usize,
    ) -> Result<(), crate::prediction::PredictionError> {
        if self.lowest_block.is_none() {
            return Err(crate::prediction::PredictionError::ProfileNotBuilt);
        }

        let low = index_a.min(index_b);
        let high = index_a.max(index_b);
        if high >= flight.len() {
            return Err(FlightError::IndexOutOfRange {
                index: high,
                length: flight.len(),
            }
            .into());
        }

        self.aggregate(flight, low, flight.len())?;

        let mut lowest_altitude = f64::INFINITY;
        let mut highest_altitude = f64::NEG_INFINITY;
        // rows inserted out of order shift earlier indices, so fill to the end of the flight
        for index in low.saturating_sub(1)..flight.len() {
            let altitude = flight.altitude(index)?;
            if usable_altitude(altitude) {
                lowest_altitude = lowest_altitude.min(altitude);
                highest_altitude = highest_altitude.max(altitude);
            }
        }
        if lowest_altitude <= highest_altitude {
            self.fix_blocks(lowest_altitude, Some(highest_altitude), false);
        }

        log::debug!(
            "updated altitude profile from rows [{:},{:}) across {:} m to {:} m",
            low,
            flight.len(),
            lowest_altitude,
            highest_altitude
        );
        Ok(())
    }

    fn aggregate(
        &mut self,
        flight: &FlightSeries,
        low: usize,
        high: usize,
    ) -> Result<(), FlightError> {
        let mut current_block = block(flight.altitude(low)?);
        let mut velocity_count = self.last_velocity_count;

        for point in flight.iterate_range(low, high)? {
            // only reasonable drift speeds
            let vector = match point.velocity_vector {
                Some(vector) if vector.within(MAX_SPEED) => vector,
                _ => continue,
            };
            if !usable_altitude(point.altitude) {
                log::warn!("skipping wind at unusable altitude {:}", point.altitude);
                continue;
            }

            let point_block = block(point.altitude);
            if current_block != point_block {
                current_block = point_block;
                velocity_count = 0;
            }

            match self.layers.get_mut(&point_block) {
                Some(layer) => {
                    layer.velocity = layer.velocity.weighted_average(&vector, velocity_count);
                    layer.source = LayerSource::Observed;
                    velocity_count += 1;
                }
                None => {
                    self.layers.insert(
                        point_block,
                        WindLayer {
                            velocity: vector,
                            source: LayerSource::Observed,
                        },
                    );
                    velocity_count = 1;
                }
            }
        }

        // picks up in the same layer when rows are appended
        self.last_velocity_count = velocity_count;
        Ok(())
    }

    /// Interpolates every missing layer between the layers of `altitude_start` and
    /// `altitude_end` (or the highest known layer) from the nearest known layers on either side.
    fn fix_blocks(&mut self, altitude_start: f64, altitude_end: Option<f64>, set_lowest: bool) {
        let altitude_start = altitude_start.clamp(-MAX_ALTITUDE, MAX_ALTITUDE);
        let altitude_end = altitude_end.map(|altitude| altitude.clamp(-MAX_ALTITUDE, MAX_ALTITUDE));

        let mut lowest_block = block(altitude_start);
        let mut highest_block = match altitude_end {
            Some(altitude_end) => block(altitude_end),
            None => match self.layers.keys().next_back() {
                Some(highest) => *highest,
                None => lowest_block,
            },
        };
        if highest_block < lowest_block {
            std::mem::swap(&mut lowest_block, &mut highest_block);
        }

        if set_lowest {
            self.lowest_block = Some(lowest_block);
        }

        let mut filled = 0;
        let mut current_block = lowest_block;
        while current_block <= highest_block {
            if !self.layers.contains_key(&current_block) {
                // layers filled earlier in this pass count as known
                let above = self
                    .layers
                    .range(current_block + 1..=highest_block)
                    .next()
                    .map(|(_, layer)| layer.velocity);
                let below = self
                    .layers
                    .range(lowest_block..current_block)
                    .next_back()
                    .map(|(_, layer)| layer.velocity);

                let velocity = match (above, below) {
                    (Some(above), Some(below)) => Some(above.midpoint(&below)),
                    (Some(known), None) | (None, Some(known)) => Some(known),
                    (None, None) => None,
                };
                if let Some(velocity) = velocity {
                    self.layers.insert(
                        current_block,
                        WindLayer {
                            velocity,
                            source: LayerSource::Interpolated,
                        },
                    );
                    filled += 1;
                }
            }
            current_block += ALTITUDE_BLOCK;
        }

        if filled > 0 {
            log::trace!(
                "interpolated {:} layers between {:} m and {:} m",
                filled,
                lowest_block,
                highest_block
            );
        }
    }

    pub fn layers(&self) -> &std::collections::BTreeMap<i64, WindLayer> {
        &self.layers
    }

    pub fn get(&self, block: i64) -> Option<&WindLayer> {
        self.layers.get(&block)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// floor of landing integration, set by the first build
    pub fn lowest_block(&self) -> Option<i64> {
        self.lowest_block
    }

    pub fn highest_block(&self) -> Option<i64> {
        self.layers.keys().next_back().copied()
    }

    pub fn last_velocity_count(&self) -> usize {
        self.last_velocity_count
    }
}
