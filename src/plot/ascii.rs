//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - catalog events: one glyph per catalog (`o`, `x`, `+`, ...)
//! - curves (theoretical `dL(z)`, densities, errors): line glyphs

use crate::cosmology::Cosmology;
use crate::domain::Catalog;
use crate::error::GwResult;

const POINT_GLYPHS: [char; 6] = ['o', 'x', '+', '*', '#', '@'];
const LINE_GLYPHS: [char; 6] = ['-', '.', ':', '~', '=', '^'];

/// Samples of the theoretical line drawn under catalogs.
const THEORETICAL_SAMPLES: usize = 200;

/// The theoretical line runs from the origin to this multiple of the largest redshift.
const THEORETICAL_REACH: f64 = 1.05;

/// A labelled curve for [`render_curves`].
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }
}

enum Layer<'a> {
    Points(char, Vec<(f64, f64)>),
    Line(char, &'a [(f64, f64)]),
}

/// Plot catalogs in the `(z, dL)` plane, optionally over the theoretical
/// line of `theoretical`.
pub fn render_catalogs(
    catalogs: &[Catalog],
    theoretical: Option<&Cosmology>,
    width: usize,
    height: usize,
) -> GwResult<String> {
    let line: Vec<(f64, f64)> = match (theoretical, z_max(catalogs)) {
        (Some(cosmology), Some(zmax)) => {
            let (zs, ds) = cosmology.distance_line(0.0, THEORETICAL_REACH * zmax, THEORETICAL_SAMPLES)?;
            zs.into_iter().zip(ds).collect()
        }
        _ => Vec::new(),
    };

    let mut legend = Vec::new();
    let mut layers = Vec::new();
    if !line.is_empty() {
        // Curves go first so points overlay them.
        layers.push(Layer::Line(LINE_GLYPHS[0], line.as_slice()));
    }
    for (i, catalog) in catalogs.iter().enumerate() {
        let glyph = POINT_GLYPHS[i % POINT_GLYPHS.len()];
        let points = catalog.events.iter().map(|e| (e.redshift, e.distance)).collect();
        layers.push(Layer::Points(glyph, points));
        let label = catalog
            .label
            .clone()
            .unwrap_or_else(|| format!("catalog {}", i + 1));
        legend.push((glyph, label));
    }
    if !line.is_empty() {
        legend.push((LINE_GLYPHS[0], "theoretical dL(z)".to_string()));
    }

    Ok(render_plot(&layers, &legend, ("z", "dL"), width, height))
}

/// Plot one or more curves sharing an x axis.
pub fn render_curves(curves: &[Curve], axes: (&str, &str), width: usize, height: usize) -> String {
    let legend: Vec<(char, String)> = curves
        .iter()
        .enumerate()
        .map(|(i, c)| (LINE_GLYPHS[i % LINE_GLYPHS.len()], c.label.clone()))
        .collect();
    let layers: Vec<Layer<'_>> = curves
        .iter()
        .zip(legend.iter())
        .map(|(c, (glyph, _))| Layer::Line(*glyph, c.points.as_slice()))
        .collect();
    render_plot(&layers, &legend, axes, width, height)
}

fn render_plot(
    layers: &[Layer<'_>],
    legend: &[(char, String)],
    axes: (&str, &str),
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = range(layer_points(layers).map(|p| p.0)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = range(layer_points(layers).map(|p| p.1)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for layer in layers {
        match layer {
            Layer::Line(glyph, points) => draw_curve(&mut grid, points, (x_min, x_max), (y_min, y_max), *glyph),
            Layer::Points(glyph, points) => {
                for &(x, y) in points {
                    if !(x.is_finite() && y.is_finite()) {
                        continue;
                    }
                    let col = map_x(x, x_min, x_max, width);
                    let row = map_y(y, y_min, y_max, height);
                    grid[row][col] = *glyph;
                }
            }
        }
    }

    let (x_label, y_label) = axes;
    let mut out = format!(
        "Plot: {x_label}=[{x_min:.3}, {x_max:.3}] | {y_label}=[{y_min:.3}, {y_max:.3}]\n"
    );
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    for (glyph, label) in legend {
        out.push_str(&format!("{glyph} = {label}\n"));
    }
    out
}

fn layer_points<'a>(layers: &'a [Layer<'_>]) -> impl Iterator<Item = &'a (f64, f64)> {
    layers.iter().flat_map(|l| match l {
        Layer::Points(_, p) => p.iter(),
        Layer::Line(_, p) => p.iter(),
    })
}

fn z_max(catalogs: &[Catalog]) -> Option<f64> {
    catalogs
        .iter()
        .flat_map(|c| c.events.iter().map(|e| e.redshift))
        .filter(|z| z.is_finite())
        .reduce(f64::max)
        .filter(|&z| z > 0.0)
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], xr: (f64, f64), yr: (f64, f64), ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
        let col = map_x(x, xr.0, xr.1, width);
        let row = map_y(y, yr.0, yr.1, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => grid[row][col] = ch,
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_golden_snapshot_small() {
        let catalog = Catalog::from_columns(&[0.1, 1.0], &[1.0, 2.0], &[0.1, 0.1]).unwrap();
        let txt = render_catalogs(&[catalog], None, 10, 5).unwrap();
        let expected = concat!(
            "Plot: z=[0.100, 1.000] | dL=[0.950, 2.050]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o         \n",
            "o = catalog 1\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn catalogs_get_distinct_glyphs_and_line() {
        let a = Catalog::from_columns(&[0.2, 0.8], &[1.0, 5.0], &[0.1, 0.1])
            .unwrap()
            .with_label("bns");
        let b = Catalog::from_columns(&[0.5], &[3.0], &[0.1]).unwrap();
        let txt = render_catalogs(&[a, b], Some(&Cosmology::fiducial()), 40, 12).unwrap();
        assert!(txt.contains("o = bns"));
        assert!(txt.contains("x = catalog 2"));
        assert!(txt.contains("- = theoretical dL(z)"));
        let body: String = txt.lines().skip(1).take(12).collect();
        assert_eq!(body.matches('o').count(), 2);
        assert_eq!(body.matches('x').count(), 1);
        assert!(body.contains('-'));
    }

    #[test]
    fn theoretical_line_starts_at_origin() {
        let catalog = Catalog::from_columns(&[0.5, 1.0], &[2.9, 6.7], &[0.1, 0.1]).unwrap();
        let txt = render_catalogs(&[catalog], Some(&Cosmology::fiducial()), 40, 12).unwrap();
        assert!(txt.starts_with("Plot: z=[0.000, 1.050]"), "{txt}");
        // Bottom-left cell is dL(0) = 0.
        let bottom = txt.lines().nth(12).unwrap();
        assert!(bottom.starts_with('-'), "{bottom}");
    }

    #[test]
    fn flat_curve_renders_single_row() {
        let curve = Curve::new("flat", vec![(0.0, 1.0), (1.0, 1.0)]);
        let txt = render_curves(&[curve], ("z", "p"), 10, 5);
        let rows: Vec<&str> = txt.lines().skip(1).take(5).collect();
        assert_eq!(rows.iter().filter(|r| r.contains('-')).count(), 1);
        assert!(txt.ends_with("- = flat\n"));
    }
}
