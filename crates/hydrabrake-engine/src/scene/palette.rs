//! Scene colors.

use crate::render::draw::{rgb, Color};

pub const SKY_TOP: Color = rgb(0.55, 0.80, 0.98);
pub const SKY_BOTTOM: Color = rgb(0.95, 0.95, 1.0);
pub const SUN: Color = rgb(1.0, 0.95, 0.7);
pub const CLOUD: Color = rgb(1.0, 1.0, 1.0);
pub const GRASS: Color = rgb(0.45, 0.8, 0.45);

pub const ROAD: Color = rgb(0.18, 0.18, 0.18);
pub const ROAD_EDGE: Color = rgb(0.35, 0.35, 0.35);
pub const ROAD_CENTER_LINE: Color = rgb(1.0, 1.0, 0.7);

pub const BRAKE_PEDAL: Color = rgb(0.7, 0.1, 0.1);
/// Housings: pedal base, master cylinder, slave cylinders.
pub const CYLINDER: Color = rgb(0.3, 0.3, 0.3);
pub const HYDRAULIC_PIPE: Color = rgb(0.1, 0.4, 0.9);
pub const PRESSURE_ARROW: Color = rgb(1.0, 0.8, 0.1);
pub const BRAKE_DISC: Color = rgb(0.5, 0.5, 0.5);
pub const DISC_HOLE: Color = rgb(0.2, 0.2, 0.2);
pub const BRAKE_PAD: Color = rgb(0.9, 0.1, 0.1);

pub const PISTON_BODY: Color = rgb(0.8, 0.8, 0.8);
pub const PISTON_TIP: Color = rgb(0.5, 0.5, 0.5);
pub const PISTON_RING: Color = rgb(1.0, 0.6, 0.0);

pub const CAR_BODY: Color = rgb(1.0, 0.3, 0.1);
pub const CAR_ACCENT: Color = rgb(0.7, 0.2, 0.0);
pub const CAR_WINDOW: Color = rgb(0.85, 0.97, 1.0);
pub const CAR_BUMPER: Color = rgb(0.8, 0.8, 0.9);
pub const CAR_HEADLIGHT: Color = rgb(1.0, 1.0, 0.7);
pub const CAR_SHADOW: Color = rgb(0.2, 0.2, 0.22);
pub const TIRE: Color = rgb(0.1, 0.1, 0.1);
pub const HUBCAP: Color = rgb(0.8, 0.8, 0.9);
pub const FACE: Color = rgb(0.2, 0.2, 0.2);

pub const LABEL: Color = rgb(1.0, 1.0, 1.0);
pub const HINT_ENGAGE: Color = rgb(1.0, 1.0, 0.0);
pub const HINT_RELEASE: Color = rgb(0.0, 1.0, 1.0);
pub const HINT_EXIT: Color = rgb(1.0, 128.0 / 255.0, 128.0 / 255.0);
pub const PRINCIPLE: Color = rgb(200.0 / 255.0, 200.0 / 255.0, 1.0);
