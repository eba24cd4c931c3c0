use clap::Parser;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// load a flight, apply its updates, and predict where it lands
    Track {
        // configuration file to read
        configuration_filename: std::path::PathBuf,

        // wait the configured interval between updates
        #[arg(long, default_value_t = false)]
        realtime: bool,
    },
    /// encode or decode flight identifiers
    Uid {
        #[command(subcommand)]
        command: UidCommand,
    },
}

#[derive(clap::Subcommand)]
enum UidCommand {
    Encode {
        // flight start in UTC, as `YYYY-MM-DD HH:MM:SS`
        #[arg(long)]
        date: String,

        // device id (IMEI), at least 7 digits
        #[arg(long)]
        device: String,
    },
    Decode {
        uid: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let arguments = Cli::parse();

    match arguments.command {
        Command::Track {
            configuration_filename,
            realtime,
        } => track(&configuration_filename, realtime),
        Command::Uid { command } => uid(command),
    }
}

fn init_logging(
    configuration: &borealis::configuration::RunConfiguration,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = configuration.log_level.to_level_filter();

    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stdout,
        ColorChoice::Always,
    )];
    if let Some(log) = &configuration.log {
        loggers.push(WriteLogger::new(
            level,
            Config::default(),
            std::fs::File::create(&log.filename)?,
        ));
    }

    simplelog::CombinedLogger::init(loggers)?;
    Ok(())
}

fn track(
    configuration_filename: &std::path::Path,
    realtime: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let configuration =
        borealis::configuration::RunConfiguration::from_file(configuration_filename)?;
    init_logging(&configuration)?;

    let mut flight =
        borealis::connection::file::JsonFile::new(configuration.flight.filename.to_owned())?
            .read_flight()?
            .into_flight();
    log::info!(
        "{:} - loaded {:} with {:} points ({:} valid)",
        configuration.name,
        flight,
        flight.len(),
        flight.valid_len()
    );

    let mut prediction = configuration
        .prediction
        .as_ref()
        .map(|prediction| prediction.to_landing_prediction());
    if let Some(prediction) = prediction.as_mut() {
        match prediction.build_altitude_profile(&flight) {
            Ok(()) => log::debug!(
                "built altitude profile with {:} layers",
                prediction.profile().len()
            ),
            Err(error) => log::warn!("{:}", error),
        }
    }

    for (index, update) in configuration.updates.iter().enumerate() {
        if realtime && index > 0 {
            std::thread::sleep(configuration.time.interval.to_std()?);
        }

        let payload =
            borealis::connection::file::JsonFile::new(update.filename.to_owned())?.read_update()?;
        for (time, message, level) in
            borealis::retrieve::apply_update(&mut flight, prediction.as_mut(), payload)
        {
            log::log!(
                level,
                "{:} - {:}",
                time.format(&borealis::DATETIME_FORMAT),
                message
            );
        }
    }

    let landing = match (&prediction, &configuration.prediction) {
        (Some(prediction), Some(prediction_configuration)) => {
            predict_landing(&flight, prediction, prediction_configuration)
        }
        _ => None,
    };

    if let Some(output) = &configuration.output {
        borealis::connection::file::GeoJsonFile::new(output.filename.to_owned()).write_flight(
            &configuration.name,
            &flight,
            landing.as_ref(),
        )?;
    }

    Ok(())
}

fn predict_landing(
    flight: &borealis::location::track::FlightSeries,
    prediction: &borealis::prediction::LandingPrediction,
    configuration: &borealis::configuration::prediction::PredictionConfiguration,
) -> Option<borealis::location::Coordinates> {
    let start = match configuration.from.point(flight) {
        Ok(point) => point,
        Err(error) => {
            log::warn!("cannot predict landing; {:}", error);
            return None;
        }
    };

    match prediction.calculate_landing(&start) {
        Ok(landing) => {
            log::info!(
                "predicted landing at ({:.5}, {:.5}), {:.2} km from {:}",
                landing.lat,
                landing.lng,
                start.coordinates().geodesic_distance(&landing) / 1000.0,
                borealis::utilities::meters_feet_string(start.altitude),
            );
            Some(landing)
        }
        Err(error) => {
            log::warn!("cannot predict landing; {:}", error);
            None
        }
    }
}

fn uid(command: UidCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        UidCommand::Encode { date, device } => {
            use chrono::TimeZone;

            let date = chrono::NaiveDateTime::parse_from_str(&date, &borealis::DATETIME_FORMAT)?;
            let uid =
                borealis::snowflake::Uid::encode(&chrono::Utc.from_utc_datetime(&date), &device)?;
            println!("{:}", uid);
        }
        UidCommand::Decode { uid } => {
            let uid: borealis::snowflake::Uid = uid.parse()?;
            println!("date: {:}", uid.date()?.format(&borealis::DATETIME_FORMAT));
            println!("device: {:}", uid.device_id());
        }
    }

    Ok(())
}
