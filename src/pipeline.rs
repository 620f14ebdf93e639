use std::path::PathBuf;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    anim::{self, DEFAULT_HOLD_FRAMES, DEFAULT_TRANSITION_FRAMES},
    config::GenConfig,
    encode::{self, EncodeConfig},
    error::SymrowResult,
    prompts::{self, PromptCategory},
    render::StateRenderer,
    surface::FrameRgba,
    task::{self, TaskData},
};

/// One complete task sample: the two stills that define the task plus the
/// optional ground-truth transition video.
#[derive(Clone, Debug)]
pub struct TaskPair {
    pub task_id: String,
    pub domain: String,
    pub prompt: String,
    pub first_image: FrameRgba,
    pub final_image: FrameRgba,
    pub ground_truth_video: Option<PathBuf>,
}

/// Produces task samples end to end: generate task data, render the initial
/// and target stills, and (when enabled and the backend is available) encode
/// the transition animation.
///
/// The still pair is the primary artifact; video problems degrade to
/// `ground_truth_video: None` and are never surfaced as failures.
pub struct TaskPipeline {
    config: GenConfig,
    renderer: StateRenderer,
    video_enabled: bool,
}

impl TaskPipeline {
    pub fn new(config: GenConfig) -> SymrowResult<Self> {
        config.validate()?;

        let video_enabled = config.generate_videos && encode::is_ffmpeg_on_path();
        if config.generate_videos && !video_enabled {
            warn!("ffmpeg not found on PATH; ground-truth videos disabled for this run");
        }

        let renderer = StateRenderer::new(config.clone())?;
        Ok(Self {
            config,
            renderer,
            video_enabled,
        })
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Generate one task pair. The task itself cannot fail; rendering errors
    /// (misconfiguration) propagate, video errors do not.
    pub fn generate_task_pair<R: Rng>(
        &mut self,
        rng: &mut R,
        task_id: &str,
    ) -> SymrowResult<TaskPair> {
        let task = task::generate(rng);
        debug!(
            task_id,
            num_symbols = task.num_symbols,
            symbol_type = ?task.symbol_type,
            use_labels = task.use_labels,
            "generated task data"
        );

        let first_image = self.renderer.render(&task.initial_sequence, &task)?;
        let final_image = self.renderer.render(&task.target_sequence, &task)?;

        let ground_truth_video = if self.video_enabled {
            match self.write_ground_truth_video(&task, task_id) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!(task_id, error = %e, "video generation failed; continuing without it");
                    None
                }
            }
        } else {
            None
        };

        let category = if task.use_labels {
            PromptCategory::WithLabels
        } else {
            PromptCategory::Default
        };
        let prompt = prompts::prompt_for(category, rng).to_string();

        info!(task_id, video = ground_truth_video.is_some(), "task pair ready");
        Ok(TaskPair {
            task_id: task_id.to_string(),
            domain: self.config.domain.clone(),
            prompt,
            first_image,
            final_image,
            ground_truth_video,
        })
    }

    /// Video scratch path: `<tmp>/{domain}_videos/{task_id}_ground_truth.mp4`.
    pub fn video_path(&self, task_id: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("{}_videos", self.config.domain))
            .join(format!("{task_id}_ground_truth.mp4"))
    }

    fn write_ground_truth_video(&mut self, task: &TaskData, task_id: &str) -> SymrowResult<PathBuf> {
        let frames = anim::animate(
            &mut self.renderer,
            task,
            DEFAULT_HOLD_FRAMES,
            DEFAULT_TRANSITION_FRAMES,
        )?;

        encode::encode_frames(
            &frames,
            EncodeConfig {
                width: self.config.canvas_width,
                height: self.config.canvas_height,
                fps: self.config.video_fps,
                out_path: self.video_path(task_id),
                bg_rgb: [255, 255, 255],
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn no_video_config() -> GenConfig {
        GenConfig {
            generate_videos: false,
            ..GenConfig::default()
        }
    }

    #[test]
    fn pipeline_produces_a_complete_pair() {
        let mut pipeline = TaskPipeline::new(no_video_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let pair = pipeline.generate_task_pair(&mut rng, "task_0000").unwrap();

        assert_eq!(pair.task_id, "task_0000");
        assert_eq!(pair.domain, "symbol_reordering");
        assert!(!pair.prompt.is_empty());
        assert_eq!(pair.first_image.width, 800);
        assert_eq!(pair.first_image.height, 200);
        assert_ne!(pair.first_image.data, pair.final_image.data);
        assert!(pair.ground_truth_video.is_none());
    }

    #[test]
    fn video_path_is_task_scoped() {
        let pipeline = TaskPipeline::new(no_video_config()).unwrap();
        let path = pipeline.video_path("task_7");
        let s = path.to_string_lossy();
        assert!(s.contains("symbol_reordering_videos"));
        assert!(s.ends_with("task_7_ground_truth.mp4"));
    }

    #[test]
    fn rejects_invalid_config() {
        let mut cfg = no_video_config();
        cfg.canvas_height = 0;
        assert!(TaskPipeline::new(cfg).is_err());
    }
}
