use crate::error::{SymrowError, SymrowResult};

/// Generation settings for one run of the task pipeline.
///
/// Per-task variation (symbol type, cardinality, label visibility) is
/// randomized inside the generator and intentionally has no knob here.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Size of each symbol in pixels.
    pub symbol_size: u32,
    /// Horizontal distance between adjacent slot origins, in pixels.
    pub symbol_spacing: u32,
    /// Whether to attempt ground-truth video generation.
    pub generate_videos: bool,
    /// Video frame rate.
    pub video_fps: u32,
    /// Domain tag used in output records and the video scratch directory.
    pub domain: String,
    /// Seed for the run-level RNG; a fresh entropy seed when absent.
    pub seed: Option<u64>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 200,
            symbol_size: 80,
            symbol_spacing: 120,
            generate_videos: true,
            video_fps: 15,
            domain: "symbol_reordering".to_string(),
            seed: None,
        }
    }
}

impl GenConfig {
    pub fn validate(&self) -> SymrowResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(SymrowError::validation("canvas width/height must be > 0"));
        }
        if self.symbol_size == 0 {
            return Err(SymrowError::validation("symbol_size must be > 0"));
        }
        if self.symbol_spacing == 0 {
            return Err(SymrowError::validation("symbol_spacing must be > 0"));
        }
        if self.video_fps == 0 {
            return Err(SymrowError::validation("video_fps must be > 0"));
        }
        if self.domain.trim().is_empty() {
            return Err(SymrowError::validation("domain must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(GenConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_dimensions() {
        let mut cfg = GenConfig::default();
        cfg.canvas_width = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = GenConfig::default();
        cfg.symbol_size = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = GenConfig::default();
        cfg.video_fps = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg: GenConfig = serde_json::from_str(r#"{"video_fps": 30}"#).unwrap();
        assert_eq!(cfg.video_fps, 30);
        assert_eq!(cfg.canvas_width, 800);
        assert_eq!(cfg.canvas_height, 200);
        assert_eq!(cfg.domain, "symbol_reordering");
    }
}
