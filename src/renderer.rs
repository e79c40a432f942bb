use potflow::{Streamline, Vector2, Viewport};

const BACKGROUND: [u8; 3] = [255, 255, 255];
const BORDER: [u8; 3] = [0, 0, 0];
const SEED: [u8; 3] = [255, 0, 0];
const PARTICLE: [u8; 3] = [0, 0, 0];
const STREAMLINE: [f64; 3] = [40.0, 90.0, 200.0];
const STREAMLINE_ALPHA: f64 = 0.6;

/// Seed marker radius in pixels (diameter 5).
const SEED_RADIUS: f64 = 2.5;

/// Particle dot: center plus the four neighbours.
const DIAMOND: [(isize, isize); 5] = [(0, -1), (-1, 0), (0, 0), (1, 0), (0, 1)];

/// What to draw for one frame, all in world coordinates.
pub struct Frame<'a> {
    pub seeds: &'a [Vector2],
    pub particles: &'a [Vector2],
    pub streamlines: &'a [Streamline],
}

#[inline]
fn put(buf: &mut [u8], width: usize, x: usize, y: usize, color: [u8; 3]) {
    let off = (y * width + x) * 4;
    buf[off] = color[0];
    buf[off + 1] = color[1];
    buf[off + 2] = color[2];
    buf[off + 3] = 255;
}

#[inline]
fn put_signed(buf: &mut [u8], vp: &Viewport, x: isize, y: isize, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as usize) < vp.width && (y as usize) < vp.height {
        put(buf, vp.width, x as usize, y as usize, color);
    }
}

// Linear blend towards `color` by `alpha`.
#[inline]
fn blend(buf: &mut [u8], off: usize, color: [f64; 3], alpha: f64) {
    for c in 0..3 {
        let bg = buf[off + c] as f64;
        buf[off + c] = (bg + (color[c] - bg) * alpha).clamp(0.0, 255.0) as u8;
    }
}

/// Blend every pixel on the straight run from `a` to `b`, both ends
/// included. Steps once per pixel along the longer axis and rounds the
/// other coordinate. Pixels off the viewport are skipped.
fn draw_line_blended(buf: &mut [u8], vp: &Viewport, a: (isize, isize), b: (isize, isize), color: [f64; 3], alpha: f64) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let n = dx.abs().max(dy.abs());
    for i in 0..=n {
        let t = if n == 0 { 0.0 } else { i as f64 / n as f64 };
        let x = a.0 + (dx as f64 * t).round() as isize;
        let y = a.1 + (dy as f64 * t).round() as isize;
        if x >= 0 && y >= 0 && (x as usize) < vp.width && (y as usize) < vp.height {
            blend(buf, (y as usize * vp.width + x as usize) * 4, color, alpha);
        }
    }
}

/// Ring of radius `r` around `(cx, cy)`, one pixel thick.
fn draw_circle(buf: &mut [u8], vp: &Viewport, cx: f64, cy: f64, r: f64, color: [u8; 3]) {
    let reach = r.ceil() as isize + 1;
    let (ix, iy) = (cx.round() as isize, cy.round() as isize);
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let px = ix + dx;
            let py = iy + dy;
            let d = ((px as f64 - cx).powi(2) + (py as f64 - cy).powi(2)).sqrt();
            if (d - r).abs() <= 0.5 {
                put_signed(buf, vp, px, py, color);
            }
        }
    }
}

fn draw_border(buf: &mut [u8], vp: &Viewport) {
    let (w, h) = (vp.width, vp.height);
    for x in 0..w {
        put(buf, w, x, 0, BORDER);
        put(buf, w, x, h - 1, BORDER);
    }
    for y in 0..h {
        put(buf, w, 0, y, BORDER);
        put(buf, w, w - 1, y, BORDER);
    }
}

fn screen_point(vp: &Viewport, p: Vector2) -> Option<(isize, isize)> {
    let s = vp.world_to_screen(p);
    // Keep far-away points from overflowing the line walker.
    let limit = 4.0 * (vp.width.max(vp.height) as f64 + 1.0);
    if s.is_finite() && s.x.abs() < limit && s.y.abs() < limit {
        Some((s.x.floor() as isize, s.y.floor() as isize))
    } else {
        None
    }
}

/// Render a frame into a pre-allocated RGBA buffer.
/// The buffer is resized to `width * height * 4` as needed.
pub fn render_into(buf: &mut Vec<u8>, frame: &Frame, vp: &Viewport) {
    let len = vp.width * vp.height * 4;
    buf.resize(len, 0);
    for px in buf.chunks_exact_mut(4) {
        px[..3].copy_from_slice(&BACKGROUND);
        px[3] = 255;
    }
    if vp.width == 0 || vp.height == 0 {
        return;
    }

    draw_border(buf, vp);

    for line in frame.streamlines {
        for (from, to) in line.segments() {
            if let (Some(a), Some(b)) = (screen_point(vp, from), screen_point(vp, to)) {
                draw_line_blended(buf, vp, a, b, STREAMLINE, STREAMLINE_ALPHA);
            }
        }
    }

    for &seed in frame.seeds {
        let s = vp.world_to_screen(seed);
        if s.is_finite() {
            draw_circle(buf, vp, s.x, s.y, SEED_RADIUS, SEED);
        }
    }

    for &p in frame.particles {
        if let Some((cx, cy)) = screen_point(vp, p) {
            for &(dx, dy) in &DIAMOND {
                put_signed(buf, vp, cx + dx, cy + dy, PARTICLE);
            }
        }
    }
}

pub fn render(frame: &Frame, vp: &Viewport) -> Vec<u8> {
    let mut buf = Vec::new();
    render_into(&mut buf, frame, vp);
    buf
}

/// Convert RGBA bytes to the 0RGB `u32` layout minifb expects.
/// Alpha is dropped; extra entries on either side are left alone.
pub fn rgba_to_argb(rgba: &[u8], out: &mut [u32]) {
    for (dst, px) in out.iter_mut().zip(rgba.chunks_exact(4)) {
        *dst = u32::from_be_bytes([0, px[0], px[1], px[2]]);
    }
}
