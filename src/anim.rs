//! Ground-truth motion interpolation: every symbol moves simultaneously and
//! linearly from its initial slot to its target slot along the row axis.

use crate::{error::SymrowResult, render::StateRenderer, surface::FrameRgba, task::TaskData};

pub const DEFAULT_HOLD_FRAMES: usize = 10;
pub const DEFAULT_TRANSITION_FRAMES: usize = 30;

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Interpolated x snapped to a whole pixel, truncating toward zero. Rows
/// wider than the canvas place their outer slots at negative x.
fn interpolated_x(initial_x: f64, target_x: f64, progress: f64) -> f64 {
    lerp(initial_x, target_x, progress).trunc()
}

/// Produce the full animation frame sequence for one task:
/// `hold_frames` copies of the initial still, `transition_frames`
/// interpolated frames, then `hold_frames` copies of the target still.
///
/// During the transition, labels (when the task uses them) show each symbol's
/// target slot index: interpolation is continuous but slots are discrete.
pub fn animate(
    renderer: &mut StateRenderer,
    task: &TaskData,
    hold_frames: usize,
    transition_frames: usize,
) -> SymrowResult<Vec<FrameRgba>> {
    let mut frames = Vec::with_capacity(2 * hold_frames + transition_frames);

    let initial_still = renderer.render(&task.initial_sequence, task)?;
    frames.extend(std::iter::repeat_n(initial_still, hold_frames));

    let symbol_to_target = task.symbol_to_target_slot();
    let layout = renderer.layout_for(task);

    for step in 0..transition_frames {
        let progress = if transition_frames > 1 {
            step as f64 / (transition_frames - 1) as f64
        } else {
            1.0
        };

        let mut surface = renderer.new_surface()?;
        for (initial_slot, &symbol_idx) in task.initial_sequence.iter().enumerate() {
            let target_slot = symbol_to_target[symbol_idx];
            let initial_x = layout.slot_x(initial_slot);
            let target_x = layout.slot_x(target_slot);
            let current_x = interpolated_x(initial_x, target_x, progress);

            renderer.draw_symbol(&mut surface, task, symbol_idx, current_x, layout.symbol_y)?;
            if task.use_labels {
                renderer.draw_label(
                    &mut surface,
                    target_slot,
                    current_x + layout.symbol_size / 2.0,
                    layout.label_y(),
                )?;
            }
        }
        frames.push(surface.into_frame()?);
    }

    let target_still = renderer.render(&task.target_sequence, task)?;
    frames.extend(std::iter::repeat_n(target_still, hold_frames));

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GenConfig, vocab::SymbolType};

    fn task() -> TaskData {
        TaskData {
            symbols: vec![
                "circle".into(),
                "square".into(),
                "triangle".into(),
                "diamond".into(),
            ],
            symbol_type: SymbolType::Shapes,
            initial_sequence: vec![0, 1, 2, 3],
            target_sequence: vec![2, 0, 3, 1],
            num_symbols: 4,
            use_labels: false,
        }
    }

    #[test]
    fn interpolated_x_truncates_toward_zero() {
        assert_eq!(interpolated_x(0.0, 100.0, 0.255), 25.0);
        assert_eq!(interpolated_x(-60.0, 60.0, 0.25), -30.0);
        // -0.4 truncates to zero, not down to -1.
        assert_eq!(interpolated_x(-10.0, 10.0, 0.48), 0.0);
    }

    #[test]
    fn frame_count_is_two_holds_plus_transition() {
        let mut renderer = StateRenderer::new(GenConfig::default()).unwrap();
        let frames = animate(&mut renderer, &task(), 4, 6).unwrap();
        assert_eq!(frames.len(), 2 * 4 + 6);
    }

    #[test]
    fn hold_frames_match_the_static_stills() {
        let mut renderer = StateRenderer::new(GenConfig::default()).unwrap();
        let task = task();
        let first = renderer.render(&task.initial_sequence, &task).unwrap();
        let last = renderer.render(&task.target_sequence, &task).unwrap();

        let frames = animate(&mut renderer, &task, 3, 5).unwrap();
        for frame in &frames[..3] {
            assert_eq!(frame.data, first.data);
        }
        for frame in &frames[frames.len() - 3..] {
            assert_eq!(frame.data, last.data);
        }
    }

    #[test]
    fn transition_endpoints_coincide_with_the_stills() {
        // Without labels the first transition frame draws every symbol at its
        // initial slot x and the last at its target slot x, so both are
        // pixel-identical to the corresponding stills.
        let mut renderer = StateRenderer::new(GenConfig::default()).unwrap();
        let task = task();
        let first = renderer.render(&task.initial_sequence, &task).unwrap();
        let last = renderer.render(&task.target_sequence, &task).unwrap();

        let hold = 2;
        let transition = 8;
        let frames = animate(&mut renderer, &task, hold, transition).unwrap();
        assert_eq!(frames[hold].data, first.data);
        assert_eq!(frames[hold + transition - 1].data, last.data);
    }

    #[test]
    fn single_transition_frame_lands_on_the_target() {
        let mut renderer = StateRenderer::new(GenConfig::default()).unwrap();
        let task = task();
        let last = renderer.render(&task.target_sequence, &task).unwrap();
        let frames = animate(&mut renderer, &task, 0, 1).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, last.data);
    }

    #[test]
    fn midpoint_frame_differs_from_both_stills() {
        let mut renderer = StateRenderer::new(GenConfig::default()).unwrap();
        let task = task();
        let first = renderer.render(&task.initial_sequence, &task).unwrap();
        let last = renderer.render(&task.target_sequence, &task).unwrap();
        let frames = animate(&mut renderer, &task, 0, 3).unwrap();
        assert_ne!(frames[1].data, first.data);
        assert_ne!(frames[1].data, last.data);
    }
}
