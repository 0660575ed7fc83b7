// The plot kernel: the KIM-1 "sombrero" hidden-line plot, one depth row at a time.
// Visual: rows are drawn back (top) to front (bottom); each column leaves a single
// yellow pixel on the surface and blanks everything below it down to the baseline,
// which hides the parts of the hat that lie behind nearer rows.

use crate::config::PlotConfig;
use crate::draw::draw_vline;
use crate::types::{Canvas, Palette};
use log::{debug, trace};
use std::sync::Arc;
use std::sync::mpsc::SyncSender;

/// Half-width of the hat in screen columns.
pub const XP: f32 = 144.0;
/// Phase range swept across the half-width (1.5 pi).
pub const XR: f32 = 4.71238905;
/// First and last depth row; 129 rows in total.
pub const ROW_FIRST: i32 = -64;
pub const ROW_LAST: i32 = 64;
/// Lowest canvas row a segment reaches.
pub const BASELINE: i32 = 191;

/// XP squared: the radius of the circle that bounds each row.
const RADIUS_SQ: f32 = 20736.0;
const DEPTH_STEP: f32 = 2.25;

/// What the kernel hands to its display sink.
#[derive(Debug, Clone)]
pub enum PlotEvent {
    /// One column drawn (only when publishing every column).
    Column { zi: i32, xi: i32, canvas: Arc<Canvas> },
    /// Every column of row `zi` is on the canvas.
    Row { zi: i32, canvas: Arc<Canvas> },
    /// The pass is over; `rows` counts the rows actually drawn.
    Finished { canvas: Arc<Canvas>, rows: usize },
}

/// Anything that accepts published snapshots.
pub trait PlotSink {
    fn publish(&mut self, event: PlotEvent);
}

impl PlotSink for SyncSender<PlotEvent> {
    fn publish(&mut self, event: PlotEvent) {
        // A closed window must not stop the pass; the run always completes.
        if self.send(event).is_err() {
            debug!("plot sink: display side gone, snapshot dropped");
        }
    }
}

impl PlotSink for Vec<PlotEvent> {
    fn publish(&mut self, event: PlotEvent) {
        self.push(event);
    }
}

/// Screen-space position of one surface point, before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnPoint {
    pub a: f32, // canvas column
    pub b: f32, // canvas row of the surface
}

#[inline]
fn depth_sq(zi: f32) -> f32 {
    let zt = zi * DEPTH_STEP;
    zt * zt
}

/// `xl` for row `zi`: columns -xl..=xl are drawn.
/// None when the row lies outside the circle (sqrt of a negative number);
/// such rows are skipped.
pub fn column_bound(zi: f32) -> Option<i32> {
    let radicand = RADIUS_SQ - depth_sq(zi);
    if radicand < 0.0 {
        return None;
    }
    Some(((radicand as f64).sqrt() + 0.5).floor() as i32)
}

/// Height `yy` of the surface at column `xi` of a row with squared depth `zs`.
pub fn column_height(xi: f32, zs: f32) -> f32 {
    let xf = XR / XP;
    let xt = ((xi * xi + zs) as f64).sqrt() as f32 * xf;
    ((f64::from(xt).sin() + f64::from(xt * 3.0).sin() * 0.4) * 56.0) as f32
}

pub fn column_point(xi: f32, zi: f32) -> ColumnPoint {
    let yy = column_height(xi, depth_sq(zi));
    ColumnPoint { a: xi + zi + 160.0, b: 90.0 - yy + zi }
}

/// Draw one column: the surface pixel plus the erase below it.
pub fn plot_column(canvas: &mut Canvas, xi: f32, zi: f32, palette: Palette) {
    let p = column_point(xi, zi);
    let x = p.a.round() as i32;
    let y = p.b.round() as i32;
    draw_vline(canvas, x, y, BASELINE, palette.plot);
    draw_vline(canvas, x, y + 1, BASELINE, palette.background);
}

/// Draw every column of row `zi`, calling `on_column` after each one.
/// Returns false (and draws nothing) when the row is out of domain.
pub fn plot_row<F>(canvas: &mut Canvas, zi: f32, palette: Palette, mut on_column: F) -> bool
where
    F: FnMut(i32, &Canvas),
{
    let Some(xl) = column_bound(zi) else {
        debug!("row {zi}: outside the circle, skipped");
        return false;
    };
    for xi in -xl..=xl {
        plot_column(canvas, xi as f32, zi, palette);
        on_column(xi, canvas);
    }
    true
}

/// One full pass on a fresh canvas. Publishes a snapshot after each row
/// (and each column if configured) and returns the final canvas.
pub fn run_plot<S: PlotSink + ?Sized>(config: &PlotConfig, sink: &mut S) -> Canvas {
    let palette = config.palette;
    let mut canvas = Canvas::new(palette.background);
    let mut rows = 0;

    for zi in ROW_FIRST..=ROW_LAST {
        let drawn = plot_row(&mut canvas, zi as f32, palette, |xi, c| {
            if config.publish_every_column {
                sink.publish(PlotEvent::Column { zi, xi, canvas: Arc::new(c.clone()) });
            }
        });
        if !drawn {
            continue;
        }
        rows += 1;
        trace!("row {zi} done");
        sink.publish(PlotEvent::Row { zi, canvas: Arc::new(canvas.clone()) });
    }

    sink.publish(PlotEvent::Finished { canvas: Arc::new(canvas.clone()), rows });
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn rows_of(events: &[PlotEvent]) -> Vec<i32> {
        events
            .iter()
            .filter_map(|e| match e {
                PlotEvent::Row { zi, .. } => Some(*zi),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn column_bound_matches_circle_equation() {
        for zi in ROW_FIRST..=ROW_LAST {
            let zs = (zi as f64 * 2.25).powi(2);
            let expected = ((20736.0 - zs).sqrt() + 0.5).floor() as i32;
            assert_eq!(column_bound(zi as f32), Some(expected), "zi = {zi}");
        }
    }

    #[test]
    fn column_bound_edges() {
        assert_eq!(column_bound(0.0), Some(144));
        // 64 * 2.25 = 144 exactly, so the last row sits on the circle.
        assert_eq!(column_bound(64.0), Some(0));
        assert_eq!(column_bound(-64.0), Some(0));
        assert_eq!(column_bound(65.0), None);
    }

    #[test]
    fn centre_point_is_at_160_90() {
        assert_eq!(column_height(0.0, 0.0), 0.0);
        assert_eq!(column_point(0.0, 0.0), ColumnPoint { a: 160.0, b: 90.0 });
    }

    #[test]
    fn centre_column_segment_then_erase() {
        let palette = Palette::default();
        let mut c = Canvas::new(palette.background);
        draw_vline(&mut c, 160, 90, BASELINE, palette.plot);
        assert!((90..=191).all(|y| c.pixel(160, y) == Some(palette.plot)));

        let mut c = Canvas::new(palette.background);
        plot_column(&mut c, 0.0, 0.0, palette);
        assert_eq!(c.pixel(160, 90), Some(palette.plot));
        assert!((91..=191).all(|y| c.pixel(160, y) == Some(palette.background)));
        assert_eq!(c.pixel(160, 89), Some(palette.background));
    }

    #[test]
    fn out_of_domain_row_draws_nothing() {
        let palette = Palette::default();
        let mut c = Canvas::new(palette.background);
        let mut calls = 0;
        assert!(!plot_row(&mut c, 80.0, palette, |_, _| calls += 1));
        assert_eq!(calls, 0);
        assert_eq!(c, Canvas::new(palette.background));
    }

    #[test]
    fn rows_are_emitted_in_order_then_finished() {
        let mut events: Vec<PlotEvent> = Vec::new();
        let canvas = run_plot(&PlotConfig::default(), &mut events);

        assert_eq!(rows_of(&events), (ROW_FIRST..=ROW_LAST).collect::<Vec<_>>());
        assert_eq!(events.len(), 130);
        match events.last() {
            Some(PlotEvent::Finished { canvas: last, rows }) => {
                assert_eq!(*rows, 129);
                assert_eq!(**last, canvas);
            }
            other => panic!("expected Finished, got {other:?}"),
        }
        assert_eq!((canvas.width, canvas.height), (320, 200));
    }

    #[test]
    fn snapshots_are_frozen_at_publish_time() {
        let mut events: Vec<PlotEvent> = Vec::new();
        run_plot(&PlotConfig::default(), &mut events);
        let PlotEvent::Row { canvas: first, .. } = &events[0] else {
            panic!("first event must be a row");
        };
        let PlotEvent::Row { canvas: second, .. } = &events[1] else {
            panic!("second event must be a row");
        };
        assert_ne!(first, second);
    }

    #[test]
    fn output_is_deterministic() {
        let cfg = PlotConfig::default();
        let a = run_plot(&cfg, &mut Vec::<PlotEvent>::new());
        let b = run_plot(&cfg, &mut Vec::<PlotEvent>::new());
        assert_eq!(a, b);
    }

    #[test]
    fn final_canvas_has_a_hat_and_a_clear_status_strip() {
        let palette = Palette::default();
        let canvas = run_plot(&PlotConfig::default(), &mut Vec::<PlotEvent>::new());
        let lit = canvas.pixels.iter().filter(|&&p| p == palette.plot).count();
        assert!(lit > 500, "only {lit} plot pixels");
        assert!(canvas.pixels.iter().all(|&p| p == palette.plot || p == palette.background));
        // Nothing reaches below the baseline.
        for y in (BASELINE as usize + 1)..canvas.height {
            assert!((0..canvas.width).all(|x| canvas.pixel(x, y) == Some(palette.background)));
        }
    }

    /// Counts events without keeping ~30k canvas snapshots alive.
    #[derive(Default)]
    struct Tally {
        columns: usize,
        rows: usize,
    }

    impl PlotSink for Tally {
        fn publish(&mut self, event: PlotEvent) {
            match event {
                PlotEvent::Column { .. } => self.columns += 1,
                PlotEvent::Row { .. } => self.rows += 1,
                PlotEvent::Finished { .. } => {}
            }
        }
    }

    #[test]
    fn per_column_mode_publishes_each_column() {
        let cfg = PlotConfig::default().with_publish_every_column(true);
        let mut tally = Tally::default();
        let canvas = run_plot(&cfg, &mut tally);

        let expected: usize = (ROW_FIRST..=ROW_LAST)
            .map(|zi| column_bound(zi as f32).map_or(0, |xl| 2 * xl as usize + 1))
            .sum();
        assert_eq!(tally.columns, expected);
        assert_eq!(tally.rows, 129);
        // Publishing granularity does not change the picture.
        assert_eq!(canvas, run_plot(&PlotConfig::default(), &mut Tally::default()));
    }
}
