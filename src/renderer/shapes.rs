//! Shape generation for the play field
//!
//! Everything is an axis-aligned rectangle in field pixels, y down.

use glam::Vec2;

use crate::sim::{Body, Obstacle};

/// Opaque color from a `0xRRGGBB` literal
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

pub const SKY_TOP: [f32; 4] = rgb(0x9bd4ff);
pub const SKY_BOTTOM: [f32; 4] = rgb(0xe3f6ff);
pub const GROUND: [f32; 4] = rgb(0x6d4c41);
pub const GRASS: [f32; 4] = rgb(0x2e7d32);
pub const SEGMENT: [f32; 4] = rgb(0x8d6e63);
pub const CAP: [f32; 4] = rgb(0x5d4037);
pub const HORSE: [f32; 4] = rgb(0x795548);
pub const EYE: [f32; 4] = rgb(0xffffff);
pub const PUPIL: [f32; 4] = rgb(0x000000);
pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.15];
pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.4];
/// In-field score text
pub const SCORE_TEXT: [f32; 4] = [0.0, 0.0, 0.0, 0.25];
pub const SCORE_POS: Vec2 = Vec2::new(12.0, 10.0);

const GRASS_HEIGHT: f32 = 14.0;
const CAP_HEIGHT: f32 = 12.0;
const CAP_OVERHANG: f32 = 4.0;
const CLOUD_COUNT: usize = 6;
const CLOUD_RADIUS: f32 = 12.0;
/// Cloud drift (px/s)
const CLOUD_SPEED: f64 = 4.0;

/// How a rectangle is filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid([f32; 4]),
    /// Linear gradient from the top edge to the bottom edge
    Vertical { top: [f32; 4], bottom: [f32; 4] },
}

/// One filled rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub fill: Fill,
    /// Corner radius, 0 for square corners
    pub radius: f32,
}

impl Rect {
    pub fn solid(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            fill: Fill::Solid(color),
            radius: 0.0,
        }
    }

    pub fn rounded(x: f32, y: f32, w: f32, h: f32, radius: f32, color: [f32; 4]) -> Self {
        Self {
            radius,
            ..Self::solid(x, y, w, h, color)
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Full-field sky gradient
pub fn sky(width: f32, height: f32) -> Rect {
    Rect {
        pos: Vec2::ZERO,
        size: Vec2::new(width, height),
        fill: Fill::Vertical {
            top: SKY_TOP,
            bottom: SKY_BOTTOM,
        },
        radius: 0.0,
    }
}

/// Translucent clouds drifting left, wrapping around the field
pub fn clouds(width: f32, seconds: f64) -> Vec<Rect> {
    let drift = ((seconds * CLOUD_SPEED) % (width as f64 + 200.0)) as f32;
    (0..CLOUD_COUNT)
        .map(|i| {
            let w = 60.0 + (i % 3) as f32 * 20.0;
            let h = 24.0 + (i % 2) as f32 * 10.0;
            let x = width + i as f32 * 120.0 - drift;
            let y = 40.0 + i as f32 * 30.0;
            Rect::rounded(x, y, w, h, CLOUD_RADIUS, CLOUD)
        })
        .collect()
}

/// Ground band with a grass strip on top
pub fn ground(width: f32, height: f32, ground_height: f32) -> [Rect; 2] {
    let top = height - ground_height;
    [
        Rect::solid(0.0, top, width, ground_height, GROUND),
        Rect::solid(0.0, top, width, GRASS_HEIGHT.min(ground_height), GRASS),
    ]
}

/// Upper and lower segments of one obstacle, each with a cap at the gap edge.
/// Segments of zero or negative height are skipped.
pub fn obstacle(o: &Obstacle, ground_y: f32) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(4);
    let gap_top = o.gap_top();
    let gap_bottom = o.gap_bottom();
    let cap_x = o.x - CAP_OVERHANG;
    let cap_w = o.width + 2.0 * CAP_OVERHANG;

    if gap_top > 0.0 {
        rects.push(Rect::solid(o.x, 0.0, o.width, gap_top, SEGMENT));
        rects.push(Rect::solid(cap_x, gap_top - CAP_HEIGHT, cap_w, CAP_HEIGHT, CAP));
    }
    if ground_y > gap_bottom {
        rects.push(Rect::solid(o.x, gap_bottom, o.width, ground_y - gap_bottom, SEGMENT));
        rects.push(Rect::solid(cap_x, gap_bottom, cap_w, CAP_HEIGHT, CAP));
    }
    rects
}

/// The horse: ground shadow, body, head, ear, tail, eye
pub fn horse(body: &Body, ground_y: f32) -> Vec<Rect> {
    let (x, y) = (body.pos.x, body.pos.y);
    let (w, h) = (body.size.x, body.size.y);
    vec![
        Rect::solid(x - w * 0.05, ground_y + 1.0, w * 1.1, 6.0, SHADOW),
        Rect::solid(x, y, w, h, HORSE),
        // Head
        Rect::solid(x + w - 10.0, y + 4.0, 14.0, 12.0, HORSE),
        // Ear
        Rect::solid(x + w, y - 6.0, 5.0, 10.0, HORSE),
        // Tail
        Rect::solid(x - 8.0, y + h / 2.0 - 2.0, 8.0, 4.0, HORSE),
        Rect::solid(x + w + 4.0, y + 8.0, 3.0, 3.0, EYE),
        Rect::solid(x + w + 5.0, y + 9.0, 1.0, 1.0, PUPIL),
    ]
}
