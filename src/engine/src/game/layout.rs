//! Layout fitting: how many rows and columns to deal, and how big to draw each cell.
//!
//! The fitter prefers the configured standard cell size and only shrinks cells when the
//! tiles cannot fit otherwise. Among the row/column splits that fit, it picks the one whose
//! shape is closest to the container's aspect ratio while covering the most space.

use tracing::{debug, info, warn};

use crate::config::LayoutConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    pub width: f64,
    pub height: f64,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f64,
}

impl Layout {
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }
}

#[derive(Clone, Copy)]
enum Scoring {
    /// Everything fits at the standard size; shape and coverage decide.
    Standard,
    /// Cells had to shrink; keeping them large dominates.
    Reduced,
}

#[derive(Clone, Debug)]
pub struct LayoutFitter {
    config: LayoutConfig,
}

impl LayoutFitter {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Always returns a layout with room for `tile_count` tiles and a cell size of at least
    /// one pixel, even when the container is too small to be usable.
    pub fn compute(&self, tile_count: usize, container: Container) -> Layout {
        let tile_count = tile_count.max(1);
        let standard = self.config.standard_cell_size;

        if let Some(layout) = self.search(tile_count, container, standard, Scoring::Standard) {
            debug!("Fitted {} tiles at standard size: {:?}", tile_count, layout);
            return layout;
        }

        if self.config.cell_size_step > 0.0 {
            let floor = self.config.min_cell_size.max(1.0);
            let steps = ((standard - floor) / self.config.cell_size_step).floor();
            for step in 1..=(steps.max(0.0) as usize) {
                let size = standard - step as f64 * self.config.cell_size_step;
                if let Some(layout) = self.search(tile_count, container, size, Scoring::Reduced) {
                    info!("Shrunk cells to fit {} tiles: {:?}", tile_count, layout);
                    return layout;
                }
            }
        }

        let layout = self.fallback(tile_count, container);
        warn!(
            "No layout for {} tiles fits {}x{}, falling back to {:?}",
            tile_count, container.width, container.height, layout
        );
        layout
    }

    /// Largest whole-pixel cell size, capped at the standard size, at which a
    /// `rows` x `cols` grid with gaps fits the container. Never below one pixel.
    pub fn cell_size_for(&self, rows: usize, cols: usize, container: Container) -> f64 {
        let gap = self.config.cell_gap;
        let by_width = (container.width - (cols.saturating_sub(1)) as f64 * gap) / cols.max(1) as f64;
        let by_height = (container.height - (rows.saturating_sub(1)) as f64 * gap) / rows.max(1) as f64;
        by_width
            .min(by_height)
            .min(self.config.standard_cell_size)
            .floor()
            .max(1.0)
    }

    /// Whether a `rows` x `cols` grid of `cell_size` cells fits the container.
    pub fn fits(&self, rows: usize, cols: usize, cell_size: f64, container: Container) -> bool {
        let gap = self.config.cell_gap;
        let width = cols as f64 * cell_size + cols.saturating_sub(1) as f64 * gap;
        let height = rows as f64 * cell_size + rows.saturating_sub(1) as f64 * gap;
        width <= container.width && height <= container.height
    }

    /// `None` when the size and gap cannot describe a grid.
    fn max_cells(&self, extent: f64, cell_size: f64) -> Option<usize> {
        let pitch = cell_size + self.config.cell_gap;
        if !pitch.is_finite() || pitch <= 0.0 || !(cell_size > 0.0) {
            return None;
        }
        Some(((extent + self.config.cell_gap) / pitch).floor() as usize)
    }

    fn search(&self, tile_count: usize, container: Container, size: f64, scoring: Scoring) -> Option<Layout> {
        let max_cols = self.max_cells(container.width, size)?;
        let max_rows = self.max_cells(container.height, size)?;
        if max_cols.saturating_mul(max_rows) < tile_count {
            return None;
        }

        let aspect = container.aspect_ratio();
        let mut best: Option<(f64, Layout)> = None;
        // past tile_count rows every candidate is a single column
        for rows in 1..=max_rows.min(tile_count) {
            let cols = tile_count.div_ceil(rows);
            if cols > max_cols {
                continue;
            }
            let cell_size = self.cell_size_for(rows, cols, container);
            let balance = 1.0 / (1.0 + (cols as f64 / rows as f64 - aspect).abs());
            let utilization = rows.saturating_mul(cols) as f64 * size * size / container.area();
            let score = match scoring {
                Scoring::Standard => 2.0 * balance + utilization,
                Scoring::Reduced => {
                    3.0 * (cell_size / self.config.standard_cell_size) + balance + utilization
                }
            };
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, Layout { rows, cols, cell_size }));
            }
        }
        best.map(|(_, layout)| layout)
    }

    fn fallback(&self, tile_count: usize, container: Container) -> Layout {
        let rows = ((tile_count as f64 * container.height / container.width).sqrt().ceil() as usize).max(1);
        let cols = tile_count.div_ceil(rows);
        Layout {
            rows,
            cols,
            cell_size: self.cell_size_for(rows, cols, container),
        }
    }
}

/// Layout that follows container resizes. Small resizes are ignored; once locked, the
/// row and column counts stay put and only the cell size is rescaled.
#[derive(Clone, Debug)]
pub struct AdaptiveLayout {
    fitter: LayoutFitter,
    tile_count: usize,
    container: Container,
    layout: Layout,
    locked: bool,
}

impl AdaptiveLayout {
    pub fn new(fitter: LayoutFitter, tile_count: usize, container: Container) -> Self {
        let layout = fitter.compute(tile_count, container);
        Self {
            fitter,
            tile_count,
            container,
            layout,
            locked: false,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Unlocks and refits for a new tile count in the current container.
    pub fn start_round(&mut self, tile_count: usize) -> Layout {
        self.locked = false;
        self.tile_count = tile_count;
        self.layout = self.fitter.compute(tile_count, self.container);
        self.layout
    }

    /// Returns the new layout if the resize was large enough to act on.
    pub fn resize(&mut self, container: Container) -> Option<Layout> {
        if !self.exceeds_threshold(container) {
            return None;
        }
        self.container = container;
        self.layout = if self.locked {
            Layout {
                cell_size: self.fitter.cell_size_for(self.layout.rows, self.layout.cols, container),
                ..self.layout
            }
        } else {
            self.fitter.compute(self.tile_count, container)
        };
        debug!("Container resized to {}x{}: {:?}", container.width, container.height, self.layout);
        Some(self.layout)
    }

    fn exceeds_threshold(&self, container: Container) -> bool {
        let threshold = self.fitter.config().resize_threshold;
        let dw = (container.width - self.container.width).abs() / self.container.width;
        let dh = (container.height - self.container.height).abs() / self.container.height;
        dw > threshold || dh > threshold
    }
}
