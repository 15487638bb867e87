//! Procedural lunar surface model
//!
//! A fixed catalog of maria and craters, positioned loosely after the real
//! near side, plus the darkening function the shader evaluates per pixel.
//! The catalog is plain constant data handed to the shader by reference;
//! nothing here is mutable or shared, so renders at different phases (test
//! fixtures included) never interfere.

/// Surface feature archetype.
///
/// A `Mare` darkens broadly across its whole footprint; a `Crater` has a
/// bright rim and a dark floor (the sine term peaks at mid-radius).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraterKind {
    Mare,
    Crater,
}

/// One surface feature in normalized disc coordinates.
///
/// `x` and `y` are in roughly `[-1, 1]` across the visible disc; `r` is the
/// feature radius in the same units; `depth` is the maximum darkening the
/// feature contributes.
#[derive(Debug, Clone, Copy)]
pub struct Crater {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub depth: f64,
    pub kind: CraterKind,
}

/// Cap on accumulated darkening where features overlap.
pub const MAX_DARKENING: f64 = 0.4;

/// The near-side feature catalog.
pub const CATALOG: [Crater; 15] = [
    // Maria (the large dark plains)
    Crater { x: -0.3, y: -0.25, r: 0.35, depth: 0.15, kind: CraterKind::Mare }, // Oceanus Procellarum
    Crater { x: 0.25, y: -0.1, r: 0.25, depth: 0.12, kind: CraterKind::Mare }, // Mare Tranquillitatis
    Crater { x: 0.1, y: 0.25, r: 0.2, depth: 0.1, kind: CraterKind::Mare },    // Mare Fecunditatis
    Crater { x: -0.15, y: 0.1, r: 0.18, depth: 0.1, kind: CraterKind::Mare },  // Mare Imbrium
    Crater { x: 0.4, y: -0.3, r: 0.15, depth: 0.08, kind: CraterKind::Mare },  // Mare Crisium
    // Craters
    Crater { x: -0.55, y: 0.65, r: 0.12, depth: 0.2, kind: CraterKind::Crater }, // Tycho
    Crater { x: 0.35, y: 0.55, r: 0.08, depth: 0.18, kind: CraterKind::Crater }, // Copernicus
    Crater { x: -0.2, y: -0.55, r: 0.07, depth: 0.15, kind: CraterKind::Crater },
    Crater { x: 0.5, y: 0.1, r: 0.06, depth: 0.12, kind: CraterKind::Crater },
    Crater { x: -0.4, y: 0.35, r: 0.05, depth: 0.1, kind: CraterKind::Crater },
    Crater { x: 0.15, y: -0.45, r: 0.05, depth: 0.1, kind: CraterKind::Crater },
    Crater { x: -0.6, y: -0.1, r: 0.04, depth: 0.08, kind: CraterKind::Crater },
    Crater { x: 0.55, y: -0.5, r: 0.04, depth: 0.08, kind: CraterKind::Crater },
    Crater { x: -0.35, y: -0.4, r: 0.03, depth: 0.06, kind: CraterKind::Crater },
    Crater { x: 0.3, y: 0.35, r: 0.03, depth: 0.06, kind: CraterKind::Crater },
];

/// Accumulated darkening at normalized disc point `(nx, ny)`.
///
/// Sums the contribution of every feature whose footprint covers the point,
/// then clamps to [`MAX_DARKENING`] so overlaps never over-darken.
pub fn darkening(nx: f64, ny: f64, craters: &[Crater]) -> f64 {
    let mut total = 0.0;
    for c in craters {
        let dx = nx - c.x;
        let dy = ny - c.y;
        let dist = dx.hypot(dy);
        if dist < c.r {
            let normalized = dist / c.r;
            total += match c.kind {
                // Broad, gently varying darkening across the plain.
                CraterKind::Mare => c.depth * (1.0 - normalized * 0.3),
                // Rim highlight: sin peaks at mid-radius, floor stays dark.
                CraterKind::Crater => {
                    let rim = (normalized * std::f64::consts::PI).sin();
                    c.depth * (1.0 - rim)
                }
            };
        }
    }
    total.min(MAX_DARKENING)
}
