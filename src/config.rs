// Engine configuration passed from JS as JSON. Every field has a default,
// so an empty object (or empty string) yields the stock page behavior.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Engine configuration passed from JS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Viewports at or below this width (CSS px) are treated as mobile.
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: f64,
    /// Scroll offset past which the nav gets the `scrolled` class.
    #[serde(default = "default_scrolled_threshold")]
    pub scrolled_threshold: f64,
    /// Scroll offset past which scrolling down hides the nav.
    #[serde(default = "default_hide_threshold")]
    pub hide_threshold: f64,
    /// Fixed gap between carousel cards (CSS px).
    #[serde(default = "default_carousel_gap")]
    pub carousel_gap: f64,
    /// Quiet period before a resize burst settles.
    #[serde(default = "default_resize_quiet_ms")]
    pub resize_quiet_ms: u32,
    /// Distance kept above an anchor target when smooth scrolling.
    #[serde(default = "default_smooth_scroll_offset")]
    pub smooth_scroll_offset: f64,
    #[serde(default = "default_hero_particles")]
    pub hero_particles: DeviceCounts,
    #[serde(default = "default_curiosity_tori")]
    pub curiosity_tori: DeviceCounts,
    /// Enable the custom cursor on desktop viewports.
    #[serde(default = "default_true")]
    pub custom_cursor: bool,
    /// `tracing` filter directive, e.g. `"info"` or `"motion_core=debug"`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

/// Object counts that scale down on mobile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCounts {
    pub desktop: usize,
    pub mobile: usize,
}

impl DeviceCounts {
    pub fn for_viewport(&self, is_mobile: bool) -> usize {
        if is_mobile {
            self.mobile
        } else {
            self.desktop
        }
    }
}

fn default_mobile_breakpoint() -> f64 {
    768.0
}

fn default_scrolled_threshold() -> f64 {
    100.0
}

fn default_hide_threshold() -> f64 {
    500.0
}

fn default_carousel_gap() -> f64 {
    32.0 // 2rem
}

fn default_resize_quiet_ms() -> u32 {
    250
}

fn default_smooth_scroll_offset() -> f64 {
    80.0
}

fn default_hero_particles() -> DeviceCounts {
    DeviceCounts {
        desktop: 1500,
        mobile: 500,
    }
}

fn default_curiosity_tori() -> DeviceCounts {
    DeviceCounts {
        desktop: 50,
        mobile: 20,
    }
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            mobile_breakpoint: default_mobile_breakpoint(),
            scrolled_threshold: default_scrolled_threshold(),
            hide_threshold: default_hide_threshold(),
            carousel_gap: default_carousel_gap(),
            resize_quiet_ms: default_resize_quiet_ms(),
            smooth_scroll_offset: default_smooth_scroll_offset(),
            hero_particles: default_hero_particles(),
            curiosity_tori: default_curiosity_tori(),
            custom_cursor: default_true(),
            log_filter: default_log_filter(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        if json.trim().is_empty() {
            return Ok(EngineConfig::default());
        }
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if !(self.mobile_breakpoint.is_finite() && self.mobile_breakpoint >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "mobile_breakpoint must be a non-negative number, got {}",
                self.mobile_breakpoint
            )));
        }
        if !(self.carousel_gap.is_finite() && self.carousel_gap >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "carousel_gap must be a non-negative number, got {}",
                self.carousel_gap
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_config_is_default() {
        assert_eq!(EngineConfig::from_json("").unwrap(), EngineConfig::default());
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = EngineConfig::from_json(r#"{"hide_threshold": 320, "custom_cursor": false}"#)
            .unwrap();
        assert_eq!(config.hide_threshold, 320.0);
        assert!(!config.custom_cursor);
        assert_eq!(config.mobile_breakpoint, 768.0);
        assert_eq!(config.resize_quiet_ms, 250);
    }

    #[test]
    fn malformed_config_is_rejected() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn negative_gap_is_rejected() {
        let err = EngineConfig::from_json(r#"{"carousel_gap": -4}"#).unwrap_err();
        assert!(err.to_string().contains("carousel_gap"));
    }

    #[test]
    fn device_counts_pick_by_viewport() {
        let counts = default_hero_particles();
        assert_eq!(counts.for_viewport(true), 500);
        assert_eq!(counts.for_viewport(false), 1500);
    }
}
