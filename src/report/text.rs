//! Text renderer for correlation figures
//!
//! Renders heatmaps as shaded character grids and overlay panels as
//! sparklines, for terminal output.

use std::io::Write;

use crate::corr::CorrelationMatrix;

use super::{FigureSink, HeatmapSpec, PanelGrid};

/// Shading bands for correlation cells, strongest positive to strongest
/// negative; NaN renders as a blank
fn cell_char(corr: f64) -> char {
    if corr.is_nan() {
        return ' ';
    }
    match corr {
        c if c > 0.9 => '#',
        c if c > 0.6 => '=',
        c if c > 0.3 => '+',
        c if c > -0.3 => '.',
        c if c > -0.6 => '-',
        c if c > -0.9 => '~',
        _ => 'x',
    }
}

const SPARK: [char; 8] = ['\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}', '\u{2588}'];

/// Render a segment as a sparkline scaled to its own min/max
fn sparkline(values: &[f64]) -> String {
    let defined: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    let (min, max) = defined
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = max - min;

    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                ' '
            } else if span == 0.0 {
                SPARK[0]
            } else {
                let idx = ((v - min) / span * (SPARK.len() - 1) as f64).round() as usize;
                SPARK[idx.min(SPARK.len() - 1)]
            }
        })
        .collect()
}

/// Figure sink writing character renditions to an `io::Write`
pub struct TextSink<W: Write> {
    /// Matrix rendered alongside the heatmap spec
    matrix: CorrelationMatrix,
    out: W,
}

impl<W: Write> TextSink<W> {
    /// Create a sink rendering figures for `matrix` to `out`
    pub fn new(matrix: CorrelationMatrix, out: W) -> Self {
        Self { matrix, out }
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FigureSink for TextSink<W> {
    fn heatmap(&mut self, spec: &HeatmapSpec) -> anyhow::Result<()> {
        writeln!(self.out, "{}", spec.title)?;
        writeln!(self.out)?;

        let label_width = self
            .matrix
            .window_labels
            .iter()
            .map(|l| l.to_string().len())
            .max()
            .unwrap_or(1);

        for (label, row) in self.matrix.window_labels.iter().zip(self.matrix.rows.iter()) {
            let cells: String = row.iter().map(|&c| cell_char(c)).collect();
            writeln!(self.out, "{label:>label_width$} |{cells}|")?;
        }

        // Tick labels under their columns
        let mut tick_line = vec![' '; self.matrix.n_lags()];
        for (&pos, &lag) in spec.tick_positions.iter().zip(spec.tick_labels.iter()) {
            let text = lag.to_string();
            for (i, ch) in text.chars().enumerate() {
                if pos + i < tick_line.len() {
                    tick_line[pos + i] = ch;
                }
            }
        }
        let ticks: String = tick_line.into_iter().collect();
        writeln!(self.out, "{:>label_width$}  {}", "", ticks)?;
        writeln!(self.out, "{} / {}", spec.y_label, spec.x_label)?;

        Ok(())
    }

    fn overlay_grid(&mut self, grid: &PanelGrid) -> anyhow::Result<()> {
        for panel in &grid.panels {
            writeln!(self.out, "{}", panel.title)?;
            writeln!(self.out, "  {:>10} {}", panel.name_a, sparkline(&panel.segment_a))?;
            writeln!(self.out, "  {:>10} {}", panel.name_b, sparkline(&panel.segment_b))?;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

/// Format the lag frequency table for CLI output
pub fn format_lag_table(counts: &[(i64, usize)]) -> String {
    let mut table = String::from(
        "\nMOST COMMON LAGS\n\
         ----------------------\n\
         Lag        Windows\n",
    );
    for (lag, count) in counts {
        table.push_str(&format!("{lag:<10} {count}\n"));
    }
    if counts.is_empty() {
        table.push_str("(none above threshold)\n");
    }
    table
}
