//! Decorative sky: twinkling star fields and constellation outlines.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::zodiac::Constellation;

/// Stars per cluster in overview.
pub const OVERVIEW_STARS: usize = 70;
/// Base star count for a zoomed cluster (doubled when generated).
pub const ZOOMED_STARS: usize = 100;

/// One background star. Positions are percentages, times are seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub size: f32,
    pub top: f32,
    pub left: f32,
    pub opacity: f32,
    pub delay: f32,
    pub period: f32,
}

impl Star {
    /// Opacity at time `t`, pulsing between 30% and 100% of the base value.
    pub fn brightness(&self, t: f32) -> f32 {
        let phase = ((t - self.delay).max(0.0) / self.period) * std::f32::consts::TAU;
        let pulse = 0.65 + 0.35 * phase.cos();
        (self.opacity * pulse).clamp(0.0, 1.0)
    }
}

/// Generate the star field for a cluster.
///
/// Zoomed fields are twice as dense with slightly larger stars. The field is
/// seeded from the cluster name and zoom flag, so every repaint sees the same
/// stars until either changes.
pub fn star_field(cluster: &str, zoomed: bool, count: usize) -> Vec<Star> {
    let mut hasher = DefaultHasher::new();
    cluster.hash(&mut hasher);
    zoomed.hash(&mut hasher);
    let mut rng = StdRng::seed_from_u64(hasher.finish());

    let total = if zoomed { count * 2 } else { count };
    let max_size = if zoomed { 3.0 } else { 2.0 };

    (0..total)
        .map(|_| Star {
            size: rng.gen::<f32>() * max_size + 0.8,
            delay: rng.gen::<f32>() * 5.0,
            period: rng.gen::<f32>() * 3.0 + 2.0,
            top: rng.gen::<f32>() * 100.0,
            left: rng.gen::<f32>() * 100.0,
            opacity: rng.gen::<f32>() * 0.7 + 0.3,
        })
        .collect()
}

// ─── Outlines ────────────────────────────────────────────────────────────────

/// Outline coordinate space: (width, height).
pub const VIEW_BOX: (f32, f32) = (310.0, 320.0);

/// SVG-style path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSeg {
    Move(f32, f32),
    Line(f32, f32),
    Quad { ctrl: (f32, f32), to: (f32, f32) },
    Close,
}

use PathSeg::{Close, Line, Move, Quad};

/// Decorative outline drawn behind a cluster's nodes.
pub fn outline(kind: Constellation) -> &'static [PathSeg] {
    const HAUNTED: [PathSeg; 5] = [
        Move(55.0, 100.0),
        Line(55.0, 240.0),
        Line(255.0, 240.0),
        Line(255.0, 100.0),
        Close,
    ];
    const NOSTALGIA: [PathSeg; 5] = [
        Move(155.0, 40.0),
        Line(280.0, 160.0),
        Line(155.0, 280.0),
        Line(30.0, 160.0),
        Close,
    ];
    const ISOLATION: [PathSeg; 4] = [
        Move(40.0, 250.0),
        Quad {
            ctrl: (155.0, 50.0),
            to: (270.0, 250.0),
        },
        Line(155.0, 50.0),
        Close,
    ];
    const SURREALISM: [PathSeg; 6] = [
        Move(60.0, 220.0),
        Line(60.0, 120.0),
        Line(155.0, 40.0),
        Line(250.0, 120.0),
        Line(250.0, 220.0),
        Close,
    ];

    match kind {
        Constellation::HauntedTechnology => &HAUNTED,
        Constellation::AbsurdNostalgia => &NOSTALGIA,
        Constellation::CosmicIsolation => &ISOLATION,
        Constellation::DomesticSurrealism => &SURREALISM,
        Constellation::Uncharted => &[],
    }
}

/// Flatten a path into polylines in view-box units.
///
/// Quadratic curves are sampled with `steps` segments. `Close` repeats the
/// subpath's starting point.
pub fn flatten(path: &[PathSeg], steps: usize) -> Vec<Vec<(f32, f32)>> {
    let steps = steps.max(1);
    let mut lines: Vec<Vec<(f32, f32)>> = Vec::new();
    let mut current: Vec<(f32, f32)> = Vec::new();

    for seg in path {
        match *seg {
            Move(x, y) => {
                if current.len() > 1 {
                    lines.push(std::mem::take(&mut current));
                }
                current.clear();
                current.push((x, y));
            }
            Line(x, y) => current.push((x, y)),
            Quad { ctrl, to } => {
                let Some(&from) = current.last() else {
                    continue;
                };
                for i in 1..=steps {
                    let t = i as f32 / steps as f32;
                    let u = 1.0 - t;
                    let x = u * u * from.0 + 2.0 * u * t * ctrl.0 + t * t * to.0;
                    let y = u * u * from.1 + 2.0 * u * t * ctrl.1 + t * t * to.1;
                    current.push((x, y));
                }
            }
            Close => {
                if let Some(&start) = current.first() {
                    current.push(start);
                }
            }
        }
    }
    if current.len() > 1 {
        lines.push(current);
    }
    lines
}
