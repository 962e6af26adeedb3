use gridstream_common::GridCell;
use gridstream_lifecycle::{ObjectFactory, Streamer};

/// Stream inspector for developer tooling.
///
/// Provides read-only queries against a streamer for debugging and
/// development UI; the debug map replaces an in-engine gizmo pass.
pub struct StreamInspector;

impl StreamInspector {
    /// Produce a summary of the streamer state.
    pub fn summary<F: ObjectFactory>(streamer: &Streamer<F>) -> StreamSummary {
        StreamSummary {
            last_cell: streamer.tracker().last_cell(),
            window_cells: streamer.tracker().active_cells().len(),
            live_objects: streamer.live_count(),
            registry_entries: streamer.registry().len(),
            pending_events: streamer.events().len(),
        }
    }

    /// Render an ASCII map of the cells within `extent` of the observer.
    ///
    /// Legend: `@` observer cell, `*` live object, `+` window cell,
    /// `o` registry entry outside the window, `.` empty. Rows run north to
    /// south (grid y decreasing top to bottom).
    pub fn render_map<F: ObjectFactory>(streamer: &Streamer<F>, extent: i32) -> String {
        let center = streamer.tracker().last_cell().unwrap_or(GridCell::new(0, 0));
        let mut out = String::new();
        for dy in (-extent..=extent).rev() {
            for dx in -extent..=extent {
                let cell = GridCell::new(center.x + dx, center.y + dy);
                let in_window = streamer.tracker().contains(cell);
                let glyph = if cell == center {
                    '@'
                } else if streamer.is_live(cell) {
                    '*'
                } else if in_window {
                    '+'
                } else if streamer.registry().contains(cell) {
                    'o'
                } else {
                    '.'
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

/// Summary of streamer state for the inspector.
#[derive(Debug, Clone)]
pub struct StreamSummary {
    pub last_cell: Option<GridCell>,
    pub window_cells: usize,
    pub live_objects: usize,
    pub registry_entries: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for StreamSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cell = match self.last_cell {
            Some(c) => format!("({}, {})", c.x, c.y),
            None => "none".to_string(),
        };
        write!(
            f,
            "Streamer: cell={} window={} live={} registry={} pending_events={}",
            cell, self.window_cells, self.live_objects, self.registry_entries, self.pending_events
        )
    }
}
