// src/app/imaging.rs — per-entity image display transforms (pan/zoom)
//
// Actors carry their transform on the entity and persist it server-side;
// movies keep a purely in-memory transform keyed by movie id that lives for
// the current run only.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const SCALE_MIN: i32 = 50;
pub const SCALE_MAX: i32 = 200;
pub const POSITION_MIN: i32 = 0;
pub const POSITION_MAX: i32 = 100;
pub const NUDGE_STEP: i32 = 10;

/// Display transform for a card/detail image. Scale is a percentage,
/// positions are percentages of the pannable range on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSettings {
    pub scale: i32,
    #[serde(rename = "positionX")]
    pub position_x: i32,
    #[serde(rename = "positionY")]
    pub position_y: i32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            scale: 100,
            position_x: 50,
            position_y: 50,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nudge {
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
}

impl ImageSettings {
    /// Force all components into their legal ranges.
    pub fn clamped(self) -> Self {
        Self {
            scale: self.scale.clamp(SCALE_MIN, SCALE_MAX),
            position_x: self.position_x.clamp(POSITION_MIN, POSITION_MAX),
            position_y: self.position_y.clamp(POSITION_MIN, POSITION_MAX),
        }
    }

    /// Apply one bounded increment. Pure: repeated calls at a bound keep
    /// returning the bound, so there is no drift past the range.
    pub fn nudged(self, nudge: Nudge) -> Self {
        let mut next = self;
        match nudge {
            Nudge::ZoomIn => next.scale += NUDGE_STEP,
            Nudge::ZoomOut => next.scale -= NUDGE_STEP,
            Nudge::PanLeft => next.position_x -= NUDGE_STEP,
            Nudge::PanRight => next.position_x += NUDGE_STEP,
            Nudge::PanUp => next.position_y -= NUDGE_STEP,
            Nudge::PanDown => next.position_y += NUDGE_STEP,
        }
        next.clamped()
    }

    /// Normalized texture window for painting: (u_min, v_min, u_max, v_max).
    /// At scale 100 the whole texture is visible regardless of position; when
    /// zoomed in, position slides the visible window across the texture.
    pub fn uv_window(self) -> (f32, f32, f32, f32) {
        let s = self.clamped();
        let frac = (100.0 / s.scale as f32).min(1.0);
        let cx = frac / 2.0 + (s.position_x as f32 / 100.0) * (1.0 - frac);
        let cy = frac / 2.0 + (s.position_y as f32 / 100.0) * (1.0 - frac);
        (
            cx - frac / 2.0,
            cy - frac / 2.0,
            cx + frac / 2.0,
            cy + frac / 2.0,
        )
    }
}

/// Client-local transforms for movie cards. No persistence: dropped when the
/// app exits. Missing entries read as the default transform.
#[derive(Debug, Default)]
pub struct MovieTransforms {
    map: HashMap<String, ImageSettings>,
}

impl MovieTransforms {
    pub fn get(&self, movie_id: &str) -> ImageSettings {
        self.map.get(movie_id).copied().unwrap_or_default()
    }

    pub fn adjust(&mut self, movie_id: &str, nudge: Nudge) -> ImageSettings {
        let next = self.get(movie_id).nudged(nudge);
        self.map.insert(movie_id.to_string(), next);
        next
    }

    pub fn reset(&mut self, movie_id: &str) {
        self.map.remove(movie_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transform_is_centered_full_scale() {
        let t = ImageSettings::default();
        assert_eq!(t.scale, 100);
        assert_eq!(t.position_x, 50);
        assert_eq!(t.position_y, 50);
    }

    #[test]
    fn nudges_clamp_and_stay_clamped() {
        let mut t = ImageSettings::default();
        for _ in 0..40 {
            t = t.nudged(Nudge::ZoomIn);
        }
        assert_eq!(t.scale, SCALE_MAX);
        // Idempotent beyond the bound.
        assert_eq!(t.nudged(Nudge::ZoomIn), t);

        for _ in 0..40 {
            t = t.nudged(Nudge::PanLeft);
        }
        assert_eq!(t.position_x, POSITION_MIN);
        assert_eq!(t.nudged(Nudge::PanLeft).position_x, POSITION_MIN);
    }

    #[test]
    fn nudge_sequences_never_leave_range() {
        let seq = [
            Nudge::ZoomOut,
            Nudge::ZoomOut,
            Nudge::PanDown,
            Nudge::ZoomIn,
            Nudge::PanRight,
            Nudge::PanRight,
            Nudge::ZoomIn,
            Nudge::PanUp,
        ];
        let mut t = ImageSettings::default();
        for n in seq.iter().cycle().take(200) {
            t = t.nudged(*n);
            assert!((SCALE_MIN..=SCALE_MAX).contains(&t.scale));
            assert!((POSITION_MIN..=POSITION_MAX).contains(&t.position_x));
            assert!((POSITION_MIN..=POSITION_MAX).contains(&t.position_y));
        }
    }

    #[test]
    fn reset_returns_exact_default() {
        let mut store = MovieTransforms::default();
        store.adjust("m1", Nudge::ZoomIn);
        store.adjust("m1", Nudge::PanLeft);
        store.reset("m1");
        assert_eq!(store.get("m1"), ImageSettings::default());
    }

    #[test]
    fn movie_transforms_are_per_id() {
        let mut store = MovieTransforms::default();
        store.adjust("m1", Nudge::ZoomIn);
        assert_eq!(store.get("m1").scale, 110);
        assert_eq!(store.get("m2"), ImageSettings::default());
    }

    #[test]
    fn full_scale_uv_window_covers_texture() {
        let (u0, v0, u1, v1) = ImageSettings::default().uv_window();
        assert_eq!((u0, v0, u1, v1), (0.0, 0.0, 1.0, 1.0));
        // Position is irrelevant while the whole texture fits.
        let t = ImageSettings {
            scale: 100,
            position_x: 0,
            position_y: 100,
        };
        assert_eq!(t.uv_window(), (0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn zoomed_uv_window_slides_with_position() {
        let t = ImageSettings {
            scale: 200,
            position_x: 0,
            position_y: 0,
        };
        let (u0, v0, u1, v1) = t.uv_window();
        assert!((u0 - 0.0).abs() < 1e-6 && (v0 - 0.0).abs() < 1e-6);
        assert!((u1 - 0.5).abs() < 1e-6 && (v1 - 0.5).abs() < 1e-6);

        let t = ImageSettings {
            scale: 200,
            position_x: 100,
            position_y: 100,
        };
        let (u0, v0, u1, v1) = t.uv_window();
        assert!((u0 - 0.5).abs() < 1e-6 && (v0 - 0.5).abs() < 1e-6);
        assert!((u1 - 1.0).abs() < 1e-6 && (v1 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn wire_names_use_camel_case_positions() {
        let t = ImageSettings {
            scale: 120,
            position_x: 40,
            position_y: 60,
        };
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"positionX\":40"));
        assert!(json.contains("\"positionY\":60"));
    }
}
