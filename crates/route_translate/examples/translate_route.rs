//! Translate a saved routing response and print the maneuver list.
//!
//! ```text
//! cargo run -p route_translate --example translate_route -- response.json [config.json]
//! ```

use std::env;
use std::fs;
use std::process::exit;

use route_translate::{RouteTranslator, TranslatorConfig};

fn main() {
    let mut args = env::args().skip(1);
    let Some(response_path) = args.next() else {
        eprintln!("usage: translate_route <response.json> [config.json]");
        exit(2);
    };

    let config = match args.next() {
        Some(path) => match TranslatorConfig::from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config {}: {}", path, err);
                exit(1);
            }
        },
        None => TranslatorConfig::default(),
    };

    let translator = match RouteTranslator::from_config(&config) {
        Ok(translator) => translator,
        Err(err) => {
            eprintln!("Invalid config: {}", err);
            exit(1);
        }
    };

    let body = match fs::read(&response_path) {
        Ok(body) => body,
        Err(err) => {
            eprintln!("Failed to read {}: {}", response_path, err);
            exit(1);
        }
    };

    match translator.translate(&body) {
        Ok(Some(route)) => {
            println!(
                "{} points, {} maneuvers, {} m, {} s",
                route.points.len(),
                route.maneuvers.len(),
                route.total_distance_m(),
                route.total_duration_s()
            );
            for maneuver in &route.maneuvers {
                println!(
                    "  [{:>5}] {:>6} m {:>5} s {:>7.1}°  {}",
                    maneuver.route_point_offset,
                    maneuver.distance_m,
                    maneuver.duration_s,
                    maneuver.turn.angle,
                    maneuver.instruction
                );
            }
        }
        Ok(None) => println!("No route found."),
        Err(err) => {
            eprintln!("Failed to translate route: {}", err);
            exit(1);
        }
    }
}
