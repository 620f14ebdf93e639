//! MP4 encoding of frame sequences through the system `ffmpeg` binary.
//!
//! Frames are flattened over an opaque background and streamed to ffmpeg's
//! stdin as raw RGBA. The system binary is used rather than linking FFmpeg
//! to avoid native dev header/lib requirements.

use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    error::{SymrowError, SymrowResult},
    surface::{FrameRgba, flatten_to_opaque},
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    /// Background flattened under any translucent pixels.
    pub bg_rgb: [u8; 3],
}

impl EncodeConfig {
    pub fn validate(&self) -> SymrowResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SymrowError::validation("encode width/height must be non-zero"));
        }
        if self.fps == 0 {
            return Err(SymrowError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // yuv420p output needs even dimensions.
            return Err(SymrowError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

/// Whether the video backend is usable at all.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Encode an ordered frame sequence to MP4, returning the written path.
pub fn encode_frames(frames: &[FrameRgba], cfg: EncodeConfig) -> SymrowResult<PathBuf> {
    if frames.is_empty() {
        return Err(SymrowError::encode("no frames to encode"));
    }
    let out_path = cfg.out_path.clone();
    let mut encoder = FfmpegEncoder::spawn(cfg)?;
    for frame in frames {
        encoder.write_frame(frame)?;
    }
    encoder.finish()?;
    Ok(out_path)
}

struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
}

impl FfmpegEncoder {
    fn spawn(cfg: EncodeConfig) -> SymrowResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.arg("-y")
            .args([
                "-loglevel",
                "error",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "-s",
                &format!("{}x{}", cfg.width, cfg.height),
                "-r",
                &cfg.fps.to_string(),
                "-i",
                "pipe:0",
                "-an",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ])
            .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            SymrowError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SymrowError::encode("failed to open ffmpeg stdin (unexpected)"))?;

        Ok(Self {
            cfg,
            child,
            stdin: Some(stdin),
        })
    }

    fn write_frame(&mut self, frame: &FrameRgba) -> SymrowResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(SymrowError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }

        let opaque = flatten_to_opaque(frame, self.cfg.bg_rgb)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SymrowError::encode("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin
            .write_all(&opaque)
            .map_err(|e| SymrowError::encode(format!("failed to write frame to ffmpeg stdin: {e}")))?;

        Ok(())
    }

    fn finish(mut self) -> SymrowResult<()> {
        drop(self.stdin.take());

        let output = self
            .child
            .wait_with_output()
            .map_err(|e| SymrowError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SymrowError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> SymrowResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(width: u32, height: u32, fps: u32) -> EncodeConfig {
        EncodeConfig {
            width,
            height,
            fps,
            out_path: PathBuf::from("out/test.mp4"),
            bg_rgb: [255, 255, 255],
        }
    }

    #[test]
    fn config_validation_catches_bad_values() {
        assert!(cfg(0, 10, 30).validate().is_err());
        assert!(cfg(10, 0, 30).validate().is_err());
        assert!(cfg(11, 10, 30).validate().is_err());
        assert!(cfg(10, 11, 30).validate().is_err());
        assert!(cfg(10, 10, 0).validate().is_err());
        assert!(cfg(10, 10, 30).validate().is_ok());
    }

    #[test]
    fn encoding_an_empty_sequence_is_an_error() {
        assert!(encode_frames(&[], cfg(10, 10, 30)).is_err());
    }
}
