mod export;
mod renderer;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use potflow::{config, Config, Session, Streamline, Viewport};

struct Defaults;

impl Defaults {
    const HEADLESS_FRAMES: u64 = 200;
    const HEADLESS_OUT: &'static str = "potflow.png";
    /// Frames between particle-count log lines.
    const LOG_EVERY: u64 = 120;
}

/// Command-line options. Parsed by hand; there are only a few.
struct Args {
    headless: bool,
    config: PathBuf,
    frames: u64,
    out: PathBuf,
}

/// Value following `flag`, if present.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn parse_args(args: &[String]) -> Args {
    let frames = flag_value(args, "--frames")
        .and_then(|v| match v.parse() {
            Ok(n) => Some(n),
            Err(e) => {
                log::warn!("ignoring --frames {v}: {e}");
                None
            }
        })
        .unwrap_or(Defaults::HEADLESS_FRAMES);
    Args {
        headless: args.iter().any(|a| a == "--headless"),
        config: flag_value(args, "--config").map_or_else(|| PathBuf::from(config::DEFAULT_PATH), PathBuf::from),
        frames,
        out: flag_value(args, "--out").map_or_else(|| PathBuf::from(Defaults::HEADLESS_OUT), PathBuf::from),
    }
}

fn viewport(cfg: &Config) -> Viewport {
    Viewport::new(cfg.display.scale, cfg.display.width, cfg.display.height)
}

/// Install a Ctrl+C handler that clears the returned flag.
fn install_interrupt_flag() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");
    running
}

fn main() {
    env_logger::init();

    let argv: Vec<String> = std::env::args().collect();
    let args = parse_args(&argv);
    let cfg = config::load_or_default(&args.config);

    if args.headless {
        if let Err(e) = run_headless(&cfg, args.frames, &args.out) {
            log::error!("{e}");
            std::process::exit(1);
        }
    } else {
        run_gui(&cfg);
    }
}

fn run_gui(cfg: &Config) {
    let vp = viewport(cfg);
    let (w, h) = (vp.width, vp.height);
    let mut session = Session::new(cfg);

    let mut show_streamlines = cfg.streamline.enabled;
    let mut streamlines: Vec<Streamline> = if show_streamlines { session.streamlines() } else { Vec::new() };
    let mut paused = false;

    let mut window = Window::new("potflow", w, h, WindowOptions::default()).expect("Failed to create window");
    window.set_target_fps(cfg.display.target_fps);

    let running = install_interrupt_flag();

    let mut framebuf = vec![0u32; w * h];
    let mut rgba_buf: Vec<u8> = Vec::new();
    let mut frame_count = 0u32;
    let mut last_fps_time = Instant::now();

    while window.is_open() && running.load(Ordering::SeqCst) {
        // --- Keyboard handling ---
        if window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            break;
        }
        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            paused = !paused;
            log::info!("{}", if paused { "paused" } else { "resumed" });
        }
        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            show_streamlines = !show_streamlines;
            // The field never changes, so one trace serves every frame.
            if show_streamlines && streamlines.is_empty() {
                streamlines = session.streamlines();
            }
        }
        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            session.reset();
            log::info!("particles cleared");
        }

        if !paused {
            session.tick();
            if session.frame() % Defaults::LOG_EVERY == 0 {
                log::debug!("frame {}: {} particles", session.frame(), session.particles().len());
            }
        }

        let frame = renderer::Frame {
            seeds: session.seeds(),
            particles: session.particles(),
            streamlines: if show_streamlines { &streamlines } else { &[] },
        };
        renderer::render_into(&mut rgba_buf, &frame, &vp);
        renderer::rgba_to_argb(&rgba_buf, &mut framebuf);

        window.update_with_buffer(&framebuf, w, h).unwrap();

        frame_count += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            window.set_title(&format!(
                "potflow: {frame_count} fps, {} particles",
                session.particles().len()
            ));
            frame_count = 0;
            last_fps_time = now;
        }
    }
}

/// Run `frames` ticks without a window and save the last frame as PNG.
fn run_headless(cfg: &Config, frames: u64, out: &std::path::Path) -> Result<(), export::ExportError> {
    let vp = viewport(cfg);
    let mut session = Session::new(cfg);
    let running = install_interrupt_flag();

    for _ in 0..frames {
        if !running.load(Ordering::SeqCst) {
            log::info!("interrupted at frame {}", session.frame());
            break;
        }
        session.tick();
    }
    log::info!("frame {}: {} particles", session.frame(), session.particles().len());

    let streamlines = if cfg.streamline.enabled { session.streamlines() } else { Vec::new() };
    let frame = renderer::Frame {
        seeds: session.seeds(),
        particles: session.particles(),
        streamlines: &streamlines,
    };
    let rgba = renderer::render(&frame, &vp);
    export::write_png(out, &rgba, vp.width, vp.height)
}
