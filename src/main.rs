// Platform stub: owns the window, the pixel memory and the audio device, and
// calls into the core once per frame.
//
// • The pattern scrolls if --blue-step / --green-step are non-zero.
// • The tone plays when built with `--features audio` (unless --mute).
// • F12 saves a PNG screenshot. ESC quits.

#[cfg(feature = "audio")]
mod audio;
mod config;
mod draw;
mod screenshot;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{debug, info, warn};

use config::Args;
use draw::Drawer;
use handmade::{Bitmap, Error, GameState, Oscillator, SoundBuffer, output_sound};

const DEFAULT_SCREENSHOT: &str = "handmade.png";

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    args.validate()?;

    let mut bitmap = match args.pitch {
        Some(pitch) => Bitmap::with_pitch(args.width, args.height, pitch)?,
        None => Bitmap::new(args.width, args.height)?,
    };
    let game = GameState::scrolling(args.blue_step, args.green_step);
    let oscillator = Oscillator::new(args.tone()?)?;

    info!(
        width = bitmap.width(),
        height = bitmap.height(),
        pitch = bitmap.pitch(),
        tone_hz = args.tone_hz,
        tone_volume = args.tone_volume,
        "starting"
    );

    match args.headless {
        Some(frames) => run_headless(&args, frames, &mut bitmap, game, oscillator),
        None => run_windowed(&args, &mut bitmap, game, oscillator),
    }
}

/// Render `frames` ticks with no window, pulling one tick's worth of audio per frame.
fn run_headless(
    args: &Args,
    frames: u32,
    bitmap: &mut Bitmap,
    mut game: GameState,
    mut oscillator: Oscillator,
) -> Result<(), Error> {
    let frames_per_tick = (args.sample_rate / args.fps) as usize;
    let mut samples = vec![0i16; frames_per_tick * 2];
    let mut peak: i16 = 0;

    let started = Instant::now();
    for _ in 0..frames {
        game.update_and_render(&mut bitmap.as_offscreen())?;

        let mut sound = SoundBuffer::new(&mut samples, args.sample_rate);
        output_sound(&mut oscillator, &mut sound)?;
        peak = samples.iter().fold(peak, |p, &s| p.max(s.saturating_abs()));
    }

    info!(
        frames,
        elapsed_ms = started.elapsed().as_millis() as u64,
        audio_frames = frames as usize * frames_per_tick,
        peak,
        phase = oscillator.phase(),
        "headless run finished"
    );

    if let Some(path) = &args.screenshot {
        save_screenshot(bitmap, path)?;
    }
    Ok(())
}

fn run_windowed(
    args: &Args,
    bitmap: &mut Bitmap,
    mut game: GameState,
    oscillator: Oscillator,
) -> Result<(), Error> {
    let _audio = start_audio(args, oscillator);

    let mut drawer = Drawer::new(
        "Handmade",
        bitmap.width(),
        bitmap.height(),
        args.scale,
        args.fps,
    )?;

    /* --- FPS / frame budget --- */
    let budget = Duration::from_secs(1) / args.fps;
    let mut last_fps_time = Instant::now();
    let mut last_frame_time = last_fps_time;
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let missed = missed_frames(now.duration_since(last_frame_time), budget);
        if missed > 0 {
            warn!(missed, "frame took {:?}, budget is {:?}", now - last_frame_time, budget);
        }
        last_frame_time = now;

        game.update_and_render(&mut bitmap.as_offscreen())?;
        drawer.present(bitmap)?;

        if drawer.f12_pressed_once() {
            let path = args
                .screenshot
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCREENSHOT));
            // A failed screenshot should not end the session.
            if let Err(e) = save_screenshot(bitmap, &path) {
                warn!("{e}");
            }
        }

        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            debug!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    if let Some(path) = &args.screenshot {
        save_screenshot(bitmap, path)?;
    }
    Ok(())
}

/// Whole frame periods skipped between two ticks `elapsed` apart.
/// Anything under two budgets counts as on time, so pacing jitter stays quiet.
fn missed_frames(elapsed: Duration, budget: Duration) -> u32 {
    if budget.is_zero() {
        return 0;
    }
    let periods = elapsed.as_nanos() / budget.as_nanos();
    periods.saturating_sub(1).min(u32::MAX as u128) as u32
}

fn save_screenshot(bitmap: &Bitmap, path: &Path) -> Result<(), Error> {
    screenshot::save_png(bitmap, path)?;
    info!("saved screenshot to {}", path.display());
    Ok(())
}

#[cfg(feature = "audio")]
fn start_audio(args: &Args, oscillator: Oscillator) -> Option<audio::AudioOutput> {
    if args.mute {
        return None;
    }
    match audio::AudioOutput::start(oscillator) {
        Ok(output) => {
            debug!(sample_rate = output.sample_rate(), "tone playing");
            Some(output)
        }
        Err(e) => {
            warn!("running without sound: {e}");
            None
        }
    }
}

#[cfg(not(feature = "audio"))]
fn start_audio(args: &Args, _oscillator: Oscillator) -> Option<()> {
    if !args.mute {
        info!("built without the `audio` feature; running silent");
    }
    None
}
