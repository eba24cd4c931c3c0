/// Appends the points of one update to the flight and extends the altitude profile over them.
/// Returns the messages to show in the log window.
pub fn apply_update(
    flight: &mut crate::location::track::FlightSeries,
    prediction: Option<&mut crate::prediction::LandingPrediction>,
    update: crate::connection::UpdatePayload,
) -> Vec<(chrono::DateTime<chrono::Local>, String, log::Level)> {
    let mut messages = Vec::<(chrono::DateTime<chrono::Local>, String, log::Level)>::new();

    if !update.has_points() {
        messages.push((
            chrono::Local::now(),
            "no new points".to_string(),
            log::Level::Debug,
        ));
        return messages;
    }

    let num_new_points = update.result.len();
    messages.push((
        chrono::Local::now(),
        format!("received {:} points", num_new_points),
        log::Level::Debug,
    ));

    let field_names = flight.field_names().to_vec();
    let mut indices = vec![];
    let mut duplicates: usize = 0;

    for record in update.result {
        let point = record.into_point(&field_names);

        if is_duplicate(flight, &point) {
            duplicates += 1;
            messages.push((
                chrono::Local::now(),
                "skipped duplicate point".to_string(),
                log::Level::Debug,
            ));
            continue;
        }

        let index = flight.append(&point);
        indices.push(index);
        messages.push((
            chrono::Local::now(),
            point_update(flight, index),
            log::Level::Debug,
        ));
    }

    messages.push((
        chrono::Local::now(),
        format!("added {:} new points", num_new_points - duplicates),
        log::Level::Debug,
    ));

    // later out-of-order inserts shift earlier indices up, so the window runs to the last row
    if let (Some(prediction), Some(low), Some(high)) = (
        prediction,
        indices.iter().min().copied(),
        flight.len().checked_sub(1),
    ) {
        let result = match prediction.profile().lowest_block() {
            Some(_) => prediction.update_altitude_profile(flight, low, high),
            None => prediction.build_altitude_profile(flight),
        };
        match result {
            Ok(()) => messages.push((
                chrono::Local::now(),
                format!(
                    "altitude profile covers {:} layers up to {:} m",
                    prediction.profile().len(),
                    prediction.profile().highest_block().unwrap_or_default()
                ),
                log::Level::Debug,
            )),
            Err(error) => {
                messages.push((chrono::Local::now(), error.to_string(), log::Level::Error))
            }
        }
    }

    if let Some(pin_states) = update.pin_states {
        messages.push((
            chrono::Local::now(),
            format!(
                "Input: {:} Output: {:}",
                pin_states.inputs(),
                pin_states.outputs()
            ),
            log::Level::Info,
        ));
    }

    if !indices.is_empty() {
        messages.push((chrono::Local::now(), flight_update(flight), log::Level::Info));
    }

    messages
}

// same fix already stored
fn is_duplicate(
    flight: &crate::location::track::FlightSeries,
    point: &serde_json::Map<String, serde_json::Value>,
) -> bool {
    let row: crate::location::RawRow = flight
        .field_names()
        .iter()
        .map(|name| point.get(name).cloned().unwrap_or(serde_json::Value::Null))
        .collect();
    let incoming = flight.schema().point(&row);

    match incoming.timestamp {
        Some(timestamp) => match flight.get_by_timestamp(timestamp.timestamp()) {
            Some(existing) => {
                existing.latitude == incoming.latitude
                    && existing.longitude == incoming.longitude
                    && existing.altitude == incoming.altitude
            }
            None => false,
        },
        None => false,
    }
}

fn point_update(flight: &crate::location::track::FlightSeries, index: usize) -> String {
    let point = match flight.get(index) {
        Ok(point) => point,
        Err(error) => return error.to_string(),
    };

    let mut message = format!("{: <8} - point #{:}", point.uid, index + 1);
    message += &format!(
        " ({:.5}, {:.5}, {:.2} m)",
        point.latitude, point.longitude, point.altitude
    );
    if let Some(timestamp) = point.timestamp {
        message += &format!(
            "; point time is {:}",
            timestamp.format(&crate::DATETIME_FORMAT)
        );
    }
    if !point.is_valid() {
        message += &format!(" - only {:} satellites", point.satellites);
    }

    message
}

fn flight_update(flight: &crate::location::track::FlightSeries) -> String {
    let statistics = flight.statistics();

    let mut message = format!(
        "{:} - {:} points ({:} valid)",
        flight,
        flight.len(),
        flight.valid_len()
    );

    if let Ok(last) = flight.last_valid_point() {
        message += &format!(
            " - current altitude: {:} - vertical velocity: {:}",
            crate::utilities::meters_feet_string(last.altitude),
            crate::utilities::meters_per_second_string(last.vertical_velocity),
        );

        if last.vertical_velocity < 0.0 {
            let estimate = crate::model::FreefallEstimate::new(last.altitude);
            message += &format!(
                " - estimated time to ground: {:}",
                crate::utilities::duration_string(&estimate.time_to_ground)
            );
        }
    }

    message += &format!(
        " - max altitude: {:} - avg. ground speed: {:}",
        crate::utilities::meters_feet_string(statistics.max_altitude),
        crate::utilities::kilometers_per_hour_string(statistics.avg_ground),
    );

    message
}
