use crate::{
    config::GenConfig,
    error::{SymrowError, SymrowResult},
    glyph::draw_glyph,
    surface::{FrameRgba, Surface},
    task::TaskData,
    text::TextEngine,
    vocab::Glyph,
};

/// Vertical gap between a symbol cell and its position label.
const LABEL_GAP: f64 = 10.0;
/// Position label font size.
const LABEL_FONT_SIZE: f32 = 20.0;
/// Position label color.
const LABEL_RGB: [u8; 3] = [80, 80, 80];

/// Horizontally centered single-row slot layout for one canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowLayout {
    pub start_x: f64,
    pub symbol_y: f64,
    pub symbol_size: f64,
    pub spacing: f64,
}

impl RowLayout {
    /// Layout for `num_symbols` slots, matching the canvas centering rule:
    /// total width `(n-1)*spacing + symbol_size`, integer-floored start.
    pub fn new(config: &GenConfig, num_symbols: usize) -> Self {
        let n = num_symbols as i64;
        let total_width = (n - 1) * i64::from(config.symbol_spacing) + i64::from(config.symbol_size);
        let start_x = (i64::from(config.canvas_width) - total_width) / 2;
        let center_y = i64::from(config.canvas_height) / 2;
        let symbol_y = center_y - i64::from(config.symbol_size) / 2;
        Self {
            start_x: start_x as f64,
            symbol_y: symbol_y as f64,
            symbol_size: f64::from(config.symbol_size),
            spacing: f64::from(config.symbol_spacing),
        }
    }

    /// X coordinate of the slot at `position` (left-to-right).
    pub fn slot_x(&self, position: usize) -> f64 {
        self.start_x + (position as f64) * self.spacing
    }

    /// Y coordinate where position labels start, beneath the symbol cell.
    pub fn label_y(&self) -> f64 {
        self.symbol_y + self.symbol_size + LABEL_GAP
    }
}

/// Renders a task state into a still frame.
///
/// The renderer owns the text engine (fonts are resolved once) but holds no
/// per-frame state: rendering the same `(sequence, task)` twice yields
/// pixel-identical output.
pub struct StateRenderer {
    config: GenConfig,
    text: TextEngine,
}

impl StateRenderer {
    pub fn new(config: GenConfig) -> SymrowResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            text: TextEngine::new(),
        })
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    pub fn layout_for(&self, task: &TaskData) -> RowLayout {
        RowLayout::new(&self.config, task.num_symbols)
    }

    pub fn new_surface(&self) -> SymrowResult<Surface> {
        Surface::new(self.config.canvas_width, self.config.canvas_height)
    }

    /// Render the state described by `sequence` (slot index -> symbol index).
    pub fn render(&mut self, sequence: &[usize], task: &TaskData) -> SymrowResult<FrameRgba> {
        if sequence.len() != task.num_symbols {
            return Err(SymrowError::validation(
                "sequence length does not match task cardinality",
            ));
        }

        let layout = self.layout_for(task);
        let mut surface = self.new_surface()?;

        for (position_idx, &symbol_idx) in sequence.iter().enumerate() {
            let x = layout.slot_x(position_idx);
            self.draw_symbol(&mut surface, task, symbol_idx, x, layout.symbol_y)?;
            if task.use_labels {
                self.draw_label(
                    &mut surface,
                    position_idx,
                    x + layout.symbol_size / 2.0,
                    layout.label_y(),
                )?;
            }
        }

        surface.into_frame()
    }

    /// Draw one symbol of `task` with its cell's top-left corner at `(x, y)`.
    /// Symbols with no visual representation are skipped.
    pub fn draw_symbol(
        &mut self,
        surface: &mut Surface,
        task: &TaskData,
        symbol_idx: usize,
        x: f64,
        y: f64,
    ) -> SymrowResult<()> {
        let symbol = task.symbols.get(symbol_idx).ok_or_else(|| {
            SymrowError::validation(format!("symbol index {symbol_idx} out of range"))
        })?;
        let Some(glyph) = Glyph::classify(task.symbol_type, symbol) else {
            return Ok(());
        };
        draw_glyph(
            surface,
            &mut self.text,
            glyph,
            x,
            y,
            f64::from(self.config.symbol_size),
        )
    }

    /// Draw a slot-position label horizontally centered on `center_x`.
    pub fn draw_label(
        &mut self,
        surface: &mut Surface,
        position: usize,
        center_x: f64,
        top_y: f64,
    ) -> SymrowResult<()> {
        self.text.draw_top_centered(
            surface,
            &position.to_string(),
            LABEL_FONT_SIZE,
            center_x,
            top_y,
            LABEL_RGB,
        )
    }
}
