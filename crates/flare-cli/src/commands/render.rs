//! Headless show-to-PNG render command

use super::ShowArgs;
use anyhow::{Context, Result};
use flare_render::Canvas;
use flare_runtime::{FrameClock, FrameLoop};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

pub struct RenderArgs {
    pub show: ShowArgs,
    pub output: String,
    pub every: u64,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let mut engine = args.show.build_engine()?;
    let out_dir = Path::new(&args.output);
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", args.output))?;

    let mut canvas = Canvas::new(args.show.width, args.show.height);
    let mut frame_loop = FrameLoop::new(FrameClock::with_fps(args.show.fps));
    let every = args.every.max(1);

    let mut saved = 0u64;
    let mut failure = None;
    let ran = frame_loop.run(&mut engine, &mut canvas, args.show.frames, |frame, _stats, canvas| {
        if frame % every != 0 {
            return ControlFlow::Continue(());
        }
        let path = frame_path(out_dir, frame);
        match canvas.save_png(&path) {
            Ok(()) => {
                saved += 1;
                ControlFlow::Continue(())
            }
            Err(e) => {
                failure = Some((path, e));
                ControlFlow::Break(())
            }
        }
    });

    if let Some((path, e)) = failure {
        return Err(e).context(format!("Failed to save frame to {}", path.display()));
    }

    println!(
        "Rendered {} frame(s) at {}x{}, saved {} image(s) to {}",
        ran, args.show.width, args.show.height, saved, args.output
    );
    Ok(())
}

fn frame_path(dir: &Path, frame: u64) -> PathBuf {
    dir.join(format!("frame_{:05}.png", frame))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_names_are_zero_padded() {
        let path = frame_path(Path::new("out"), 42);
        assert_eq!(path, Path::new("out").join("frame_00042.png"));
    }

    #[test]
    fn renders_frames_into_directory() {
        let dir = std::env::temp_dir().join(format!("flare_render_{}", std::process::id()));
        let args = RenderArgs {
            show: ShowArgs {
                config: None,
                font: None,
                frames: 4,
                fps: 60.0,
                width: 64,
                height: 48,
                seed: Some(7),
            },
            output: dir.to_string_lossy().into_owned(),
            every: 2,
        };
        run(args).unwrap();
        assert!(dir.join("frame_00000.png").exists());
        assert!(!dir.join("frame_00001.png").exists());
        assert!(dir.join("frame_00002.png").exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
