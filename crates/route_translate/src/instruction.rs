//! Turn-to-text rendering used to build maneuver instructions.

use crate::turn::{Sharpness, TurnDirection, TurnKind};

/// Renders a canonical turn as user-facing text. Implementations supply the
/// localisation; parsers only concatenate the result with a street name.
pub trait TurnRenderer: Send + Sync {
    fn render(&self, kind: &TurnKind) -> String;
}

/// Built-in English wording.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishTurnRenderer;

impl TurnRenderer for EnglishTurnRenderer {
    fn render(&self, kind: &TurnKind) -> String {
        match kind {
            TurnKind::Straight => "Go ahead".to_string(),
            TurnKind::UTurn { .. } => "Make U-turn".to_string(),
            TurnKind::RoundaboutExit { exit, .. } => {
                format!("Roundabout: take {} exit", ordinal(*exit))
            }
            TurnKind::Turn {
                direction,
                sharpness,
            } => {
                let side = match direction {
                    TurnDirection::Left => "left",
                    TurnDirection::Right => "right",
                };
                match sharpness {
                    Sharpness::Keep => format!("Keep {side}"),
                    Sharpness::Slight => format!("Turn slightly {side}"),
                    Sharpness::Normal => format!("Turn {side}"),
                    Sharpness::Sharp => format!("Turn sharply {side}"),
                }
            }
        }
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Instruction text for a maneuver: rendered turn followed by the street
/// name, trimmed. Arrival maneuvers carry no instruction.
pub fn describe(
    renderer: &dyn TurnRenderer,
    kind: &TurnKind,
    street_name: &str,
    arrival: bool,
) -> String {
    if arrival {
        return String::new();
    }
    format!("{} {}", renderer.render(kind), street_name)
        .trim()
        .to_string()
}
