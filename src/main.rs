use clap::Parser;
use geo_location::adapters::points::read_points_file;
use geo_location::core::proximity::order_by_distance;
use geo_location::utils::logger;
use geo_location::{
    distance_km, format_coordinates, is_valid_coordinate, to_map_url, CliConfig, Command, Coordinate,
    GeoError, Locatable, MapConfig, MapLink,
};

const EXIT_INVALID_INPUT: i32 = 2;

fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.map_config() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    match run(&cli.command, &config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_INVALID_INPUT),
        Err(e) => fail(&e),
    }
}

fn fail(e: &GeoError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

/// Runs one command. `Ok(false)` means the input was well-formed but not a
/// valid location.
fn run(command: &Command, config: &MapConfig) -> geo_location::Result<bool> {
    match *command {
        Command::Validate { latitude, longitude } => {
            match Coordinate::try_new(latitude, longitude) {
                Ok(coordinate) => {
                    println!("✅ {} is a valid coordinate", config.format(&coordinate));
                    Ok(true)
                }
                Err(e) => {
                    println!("❌ {}", e);
                    Ok(false)
                }
            }
        }
        Command::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            if !is_valid_coordinate(Some(lat1), Some(lon1)) || !is_valid_coordinate(Some(lat2), Some(lon2)) {
                tracing::warn!("Computing distance for out-of-range coordinates");
            }
            match distance_km(Some(lat1), Some(lon1), Some(lat2), Some(lon2)) {
                Some(distance) => {
                    println!("{:.3} km", distance);
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        Command::Format {
            latitude,
            longitude,
            precision,
        } => {
            println!(
                "{}",
                format_coordinates(latitude, longitude, precision.map_or(config.precision, usize::from))
            );
            Ok(true)
        }
        Command::Url {
            latitude,
            longitude,
            zoom,
            no_zoom,
        } => {
            let zoom = if no_zoom { None } else { Some(zoom.unwrap_or(config.default_zoom)) };
            match to_map_url(Some(latitude), Some(longitude), zoom) {
                Some(url) => {
                    println!("{}", url);
                    Ok(true)
                }
                None => {
                    println!("❌ No link: coordinates are out of range");
                    Ok(false)
                }
            }
        }
        Command::ParseUrl { ref url } => {
            let link = MapLink::parse(url)?;
            match link.zoom {
                Some(zoom) => println!("{} (zoom {})", config.format(&link.coordinate), zoom),
                None => println!("{}", config.format(&link.coordinate)),
            }
            Ok(true)
        }
        Command::Nearby {
            ref input,
            lat,
            lon,
            radius,
            limit,
        } => {
            let center = Coordinate::try_new(lat, lon)?;
            let radius = radius.unwrap_or(config.home_radius_km);
            let points = read_points_file(input)?;
            tracing::info!("Searching {} point(s) within {} km", points.len(), radius);

            let ranked: Vec<_> = order_by_distance(&points, &center)
                .into_iter()
                .take_while(|(_, distance)| *distance <= radius)
                .take(limit.unwrap_or(usize::MAX))
                .collect();
            if ranked.is_empty() {
                println!("No points within {} km", radius);
            }
            for (point, distance) in ranked {
                println!(
                    "{}\t{:.3} km\t{}",
                    point.name,
                    distance,
                    point.map_url(Some(config.default_zoom)).unwrap_or_default()
                );
            }
            Ok(true)
        }
    }
}

