//! Runtime configuration
//!
//! Everything is optional and defaulted; the zero-config path carries the
//! production tuning. A host may also load the config from a TOML snippet
//! kept with the page content:
//!
//! ```toml
//! include_mobile = false
//! wheel_force = 0.05
//! debug = true
//!
//! [selectors]
//! group = "#gallery"
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the automatic scroll rate is derived.
///
/// Both historical variants of the marquee are expressible; the default is
/// the fixed real-time speed variant, which keeps perceived motion constant
/// as content grows.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoRate {
    /// Fixed real-time speed, in reference-viewport lengths per second.
    Speed(f32),
    /// Complete one full loop every given duration.
    LoopDuration(Duration),
}

impl Default for AutoRate {
    fn default() -> Self {
        Self::Speed(0.15)
    }
}

impl AutoRate {
    /// The duration-based variant with its conventional 60 s full loop.
    pub fn duration_based() -> Self {
        Self::LoopDuration(Duration::from_secs(60))
    }

    /// Derive the per-column automatic speed in pixels per millisecond.
    ///
    /// `reference_extent` is the window height analog used by the speed
    /// variant; the duration variant scales with the column's own loop.
    pub fn speed_px_per_ms(&self, loop_extent: f32, reference_extent: f32) -> f32 {
        match *self {
            AutoRate::Speed(rate) => rate * reference_extent / 1000.0,
            AutoRate::LoopDuration(duration) => {
                let ms = duration.as_secs_f32() * 1000.0;
                if ms > 0.0 {
                    loop_extent / ms
                } else {
                    0.0
                }
            }
        }
    }
}

/// Column and listener-group selectors, in the host's selector language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Selectors {
    /// Element the host scopes its gesture listeners to.
    #[serde(default = "default_group_selector")]
    pub group: String,
    #[serde(default = "default_left_selector")]
    pub left: String,
    #[serde(default = "default_right_selector")]
    pub right: String,
    #[serde(default = "default_mobile_selector")]
    pub mobile: String,
}

fn default_group_selector() -> String {
    "body".to_string()
}

fn default_left_selector() -> String {
    r#"[data-marquee="css"]"#.to_string()
}

fn default_right_selector() -> String {
    r#"[data-marquee="css-reverse"]"#.to_string()
}

fn default_mobile_selector() -> String {
    r#"[data-marquee="mobile"]"#.to_string()
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            group: default_group_selector(),
            left: default_left_selector(),
            right: default_right_selector(),
            mobile: default_mobile_selector(),
        }
    }
}

/// Marquee runtime configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MarqueeConfig {
    #[serde(default)]
    pub selectors: Selectors,
    /// Attach the single mobile column in addition to left/right.
    #[serde(default = "default_true")]
    pub include_mobile: bool,
    /// Wheel-to-velocity gain.
    #[serde(default = "default_wheel_force")]
    pub wheel_force: f32,
    /// Per-reference-frame velocity decay coefficient, in `(0, 1]`.
    #[serde(default = "default_friction")]
    pub friction: f32,
    /// Velocity magnitude cap, px/ms.
    #[serde(default = "default_max_velocity")]
    pub max_velocity: f32,
    #[serde(default)]
    pub auto_rate: AutoRate,
    /// Emit per-init and per-resize diagnostics.
    #[serde(default)]
    pub debug: bool,
}

fn default_true() -> bool {
    true
}

fn default_wheel_force() -> f32 {
    0.03
}

fn default_friction() -> f32 {
    0.9
}

fn default_max_velocity() -> f32 {
    2.2
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            include_mobile: true,
            wheel_force: default_wheel_force(),
            friction: default_friction(),
            max_velocity: default_max_velocity(),
            auto_rate: AutoRate::default(),
            debug: false,
        }
    }
}

/// Configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid marquee config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid marquee config: {reason}")]
    Invalid { reason: &'static str },
}

impl MarqueeConfig {
    /// Parse a config from TOML and validate the tuning values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MarqueeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the tuning values a parsed config arrived with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(ConfigError::Invalid {
                reason: "friction must be in (0, 1]",
            });
        }
        if !(self.max_velocity.is_finite() && self.max_velocity > 0.0) {
            return Err(ConfigError::Invalid {
                reason: "max_velocity must be positive and finite",
            });
        }
        if !self.wheel_force.is_finite() {
            return Err(ConfigError::Invalid {
                reason: "wheel_force must be finite",
            });
        }
        if let AutoRate::Speed(rate) = self.auto_rate {
            if !rate.is_finite() {
                return Err(ConfigError::Invalid {
                    reason: "auto rate speed must be finite",
                });
            }
        }
        Ok(())
    }
}
