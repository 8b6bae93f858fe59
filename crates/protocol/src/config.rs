use serde::{Deserialize, Serialize};

/// Declarative reveal-animation settings attached to a tracked element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Animation name; the emitted class is `animate-<name>`.
    pub name: String,
    /// Animation duration in milliseconds.
    pub duration_ms: f64,
    /// Base delay in milliseconds before the animation starts.
    pub delay_ms: f64,
    /// When set, the animation is assigned to the element's immediate
    /// children instead, each delayed by `index * stagger_delay_ms`.
    pub stagger: bool,
    /// Per-child delay step for staggered reveals, in milliseconds.
    pub stagger_delay_ms: f64,
}

impl AnimationConfig {
    /// The CSS class the trigger engine assigns on first reveal.
    pub fn class_name(&self) -> String {
        format!("animate-{}", self.name)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            name: "fade-in-up".into(),
            duration_ms: 600.0,
            delay_ms: 0.0,
            stagger: false,
            stagger_delay_ms: 50.0,
        }
    }
}

/// Scroll-proportional translation settings for one element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallaxConfig {
    /// Fraction of scroll distance applied as translation, in `[0, 1]`.
    pub speed_factor: f64,
    /// Magnitude cap for the translation, `>= 0`.
    pub max_offset_px: f64,
    /// The element's resting top offset, captured once at registration.
    pub resting_top: f64,
}

impl ParallaxConfig {
    pub fn new(speed_factor: f64, max_offset_px: f64, resting_top: f64) -> Self {
        Self {
            speed_factor,
            max_offset_px,
            resting_top,
        }
    }
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            speed_factor: 0.5,
            max_offset_px: 50.0,
            resting_top: 0.0,
        }
    }
}
