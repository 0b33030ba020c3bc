//! Frame rendering: resample, equalize, quantize and write.
//!
//! A [`Renderer`] holds the per-run configuration. A [`RenderSession`] holds
//! the per-terminal state (size, requested dimensions and the interrupt flag)
//! so several sessions can coexist, e.g. in tests.

use std::cell::Cell;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::ascii::{self, DensityRamp, GreyscaleQuantizer, Polarity, DEFAULT_LEVELS};
use crate::color::Color;
use crate::dualpixel::{CellStyle, DualPixelEncoder};
use crate::graphic::PixelBuffer;
use crate::palette::PaletteMapper;
use crate::terminal::{CursorGuard, TermSize, TerminalStream};

/// Output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One background-colored cell per pixel.
    #[default]
    Color,
    /// Two pixels per cell with the upper half block.
    DualPixelSimple,
    /// Two pixels per cell, best glyph per cell (for Terminal.app).
    DualPixelSearching,
    /// Density-ramp glyphs, no color.
    Monochrome,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Color,
        RenderMode::DualPixelSimple,
        RenderMode::DualPixelSearching,
        RenderMode::Monochrome,
    ];

    pub fn from_name(name: &str) -> Option<RenderMode> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Color => "color",
            RenderMode::DualPixelSimple => "dual-pixel-simple",
            RenderMode::DualPixelSearching => "dual-pixel-searching",
            RenderMode::Monochrome => "monochrome",
        }
    }

    /// Encoder for the dual-pixel modes.
    pub fn encoder(&self) -> Option<DualPixelEncoder> {
        match self {
            RenderMode::DualPixelSimple => Some(DualPixelEncoder::Simple),
            RenderMode::DualPixelSearching => Some(DualPixelEncoder::Searching),
            RenderMode::Color | RenderMode::Monochrome => None,
        }
    }

    /// Pixel size to resample to for an output of `width` x `height`.
    ///
    /// Cells are roughly twice as tall as wide, so every mode spends one cell
    /// row on two pixel rows: the single-pixel modes halve the height, the
    /// dual-pixel modes keep it (rounded down to even) and pair rows up.
    pub fn pixel_size(&self, width: usize, height: usize) -> (usize, usize) {
        let width = width.max(1);
        match self {
            RenderMode::Color | RenderMode::Monochrome => (width, (height / 2).max(1)),
            RenderMode::DualPixelSimple | RenderMode::DualPixelSearching => {
                (width, (height - height % 2).max(2))
            }
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub mode: RenderMode,
    /// The terminal's native background color.
    pub background: Color,
    /// Glyphs for monochrome mode.
    pub ramp: DensityRamp,
    /// Glyph printed in color mode cells.
    pub space: char,
    /// Histogram-equalize each frame.
    pub equalize: bool,
    /// Style cells that match the terminal background instead of leaving
    /// them at the default background.
    pub bgprint: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            background: Color::BLACK,
            ramp: DensityRamp::default(),
            space: '\u{a0}',
            equalize: false,
            bgprint: false,
        }
    }
}

/// Where the renderer is in the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Idle,
    Resampling,
    Equalizing,
    Quantizing,
    Writing,
}

/// Errors while writing a frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("rendering interrupted")]
    Interrupted,
}

/// Per-terminal rendering state.
#[derive(Debug, Clone)]
pub struct RenderSession {
    term: TermSize,
    width: Option<usize>,
    height: Option<usize>,
    interrupt: Arc<AtomicBool>,
}

impl RenderSession {
    pub fn new(term: TermSize) -> Self {
        Self {
            term,
            width: None,
            height: None,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Requested output width; capped at the terminal width.
    pub fn with_width(mut self, width: Option<usize>) -> Self {
        self.width = width;
        self
    }

    /// Requested output height; keeps the aspect ratio when `None`.
    pub fn with_height(mut self, height: Option<usize>) -> Self {
        self.height = height;
        self
    }

    pub fn term(&self) -> TermSize {
        self.term
    }

    /// Flag that stops rendering at the next row when set.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::SeqCst);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::SeqCst)
    }

    /// Output width and height for a source image.
    pub fn output_size(&self, img_width: usize, img_height: usize) -> (usize, usize) {
        ascii::output_size(
            img_width,
            img_height,
            self.term.cols as usize,
            self.width,
            self.height,
        )
    }

    /// Output width in columns, independent of any source size.
    pub fn output_width(&self) -> usize {
        self.output_size(1, 1).0
    }

    fn check_interrupt(&self) -> Result<(), RenderError> {
        if self.is_interrupted() {
            Err(RenderError::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Hooks called around each movie frame.
pub trait FrameObserver {
    fn before_frame(&mut self, _index: usize) -> Result<(), RenderError> {
        Ok(())
    }

    fn after_frame(&mut self, _index: usize) -> Result<(), RenderError> {
        Ok(())
    }
}

impl FrameObserver for () {}

/// How often a waiting [`StepThrough`] looks at the interrupt flag.
const STEP_POLL: Duration = Duration::from_millis(50);

/// Waits for a line of input after every frame.
///
/// Lines are read on a helper thread so the wait can end on Ctrl+C as well
/// as on Return.
pub struct StepThrough {
    lines: Receiver<()>,
    interrupt: Arc<AtomicBool>,
    closed: bool,
}

impl StepThrough {
    pub fn new<R>(input: R, interrupt: Arc<AtomicBool>) -> Self
    where
        R: io::BufRead + Send + 'static,
    {
        let (tx, lines) = mpsc::sync_channel(0);
        thread::spawn(move || read_lines(input, tx));
        Self {
            lines,
            interrupt,
            closed: false,
        }
    }

    /// Block until a line arrives, input closes, or the flag is set.
    fn wait(&mut self) -> Result<(), RenderError> {
        loop {
            if self.interrupt.load(Ordering::SeqCst) {
                return Err(RenderError::Interrupted);
            }
            if self.closed {
                return Ok(());
            }
            match self.lines.recv_timeout(STEP_POLL) {
                Ok(()) => return Ok(()),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    // Nobody is there to step, so just keep playing
                    log::debug!("step-through input closed");
                    self.closed = true;
                }
            }
        }
    }
}

impl FrameObserver for StepThrough {
    fn after_frame(&mut self, index: usize) -> Result<(), RenderError> {
        log::debug!("frame {} shown, waiting for input", index);
        self.wait()
    }
}

fn read_lines<R: io::BufRead>(mut input: R, tx: SyncSender<()>) {
    let mut line = String::new();
    loop {
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(()).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::warn!("step-through input failed: {}", e);
                break;
            }
        }
    }
}

/// Turns pixel buffers into terminal output.
pub struct Renderer {
    options: RenderOptions,
    palette: &'static PaletteMapper,
    quantizer: GreyscaleQuantizer,
    bg_index: u8,
    phase: Cell<RenderPhase>,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        let palette = PaletteMapper::shared();
        let quantizer = GreyscaleQuantizer::new(
            options.ramp.clone(),
            DEFAULT_LEVELS,
            Polarity::for_background(options.background),
        );
        let bg_index = palette.map(options.background);
        Self {
            options,
            palette,
            quantizer,
            bg_index,
            phase: Cell::new(RenderPhase::Idle),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase.get()
    }

    /// Palette index of the terminal background.
    pub fn background_index(&self) -> u8 {
        self.bg_index
    }

    /// Render one image sized for `session`.
    pub fn render<W: Write>(
        &self,
        session: &RenderSession,
        graphic: &PixelBuffer,
        out: &mut W,
    ) -> Result<(), RenderError> {
        let (width, height) = session.output_size(graphic.width(), graphic.height());
        let result = self.render_sized(session, graphic, width, height, out);
        self.phase.set(RenderPhase::Idle);
        result
    }

    /// Play a sequence of frames in place with the cursor hidden.
    ///
    /// The cursor is restored however the loop ends, including interruption
    /// and errors from the frame source or writer.
    pub fn play<W, I, O>(
        &self,
        session: &RenderSession,
        frames: I,
        out: W,
        observer: &mut O,
    ) -> Result<usize, RenderError>
    where
        W: Write,
        I: IntoIterator<Item = PixelBuffer>,
        O: FrameObserver + ?Sized,
    {
        let mut guard = CursorGuard::hide(out)?;
        let mut played = 0;
        for frame in frames {
            session.check_interrupt()?;
            observer.before_frame(played)?;
            guard.home()?;
            self.render(session, &frame, &mut *guard)?;
            guard.flush()?;
            observer.after_frame(played)?;
            played += 1;
        }
        // A frame source cut short by Ctrl+C ends the loop normally
        session.check_interrupt()?;
        guard.show()?;
        log::info!("played {} frames", played);
        Ok(played)
    }

    /// Resample (and optionally equalize) to the pixel size for this mode.
    pub fn prepare(&self, graphic: &PixelBuffer, width: usize, height: usize) -> PixelBuffer {
        let (pw, ph) = self.options.mode.pixel_size(width, height);
        self.phase.set(RenderPhase::Resampling);
        let mut scaled = graphic.resample(pw, ph);
        if self.options.equalize {
            self.phase.set(RenderPhase::Equalizing);
            scaled.equalize();
        }
        scaled
    }

    fn render_sized<W: Write>(
        &self,
        session: &RenderSession,
        graphic: &PixelBuffer,
        width: usize,
        height: usize,
        out: &mut W,
    ) -> Result<(), RenderError> {
        log::debug!(
            "rendering {}x{} source at {}x{} ({})",
            graphic.width(),
            graphic.height(),
            width,
            height,
            self.options.mode.name()
        );
        let scaled = self.prepare(graphic, width, height);
        let mut stream = TerminalStream::new(out);
        match self.options.mode.encoder() {
            Some(encoder) => self.write_dual(session, &scaled, encoder, &mut stream)?,
            None if self.options.mode == RenderMode::Monochrome => {
                self.write_monochrome(session, &scaled, &mut stream)?
            }
            None => self.write_color(session, &scaled, &mut stream)?,
        }
        stream.flush()?;
        Ok(())
    }

    fn write_color<W: Write>(
        &self,
        session: &RenderSession,
        scaled: &PixelBuffer,
        stream: &mut TerminalStream<'_, W>,
    ) -> Result<(), RenderError> {
        let bg = self.options.background;
        let mut codes = Vec::with_capacity(scaled.width());
        for row in scaled.rows() {
            session.check_interrupt()?;
            self.phase.set(RenderPhase::Quantizing);
            codes.clear();
            codes.extend(row.iter().map(|px| self.palette.map(px.opacify(bg))));

            self.phase.set(RenderPhase::Writing);
            for &code in &codes {
                self.paint_background(stream, code)?;
                stream.write_glyph(self.options.space)?;
            }
            stream.end_row()?;
        }
        Ok(())
    }

    fn write_dual<W: Write>(
        &self,
        session: &RenderSession,
        scaled: &PixelBuffer,
        encoder: DualPixelEncoder,
        stream: &mut TerminalStream<'_, W>,
    ) -> Result<(), RenderError> {
        let bg = self.options.background;
        let mut cells: Vec<CellStyle> = Vec::with_capacity(scaled.width());
        for y in (0..scaled.height() - scaled.height() % 2).step_by(2) {
            session.check_interrupt()?;
            self.phase.set(RenderPhase::Quantizing);
            cells.clear();
            cells.extend((0..scaled.width()).map(|x| {
                let top = scaled.get(x, y).opacify(bg);
                let bottom = scaled.get(x, y + 1).opacify(bg);
                encoder.encode(self.palette, top, bottom, self.options.space)
            }));

            self.phase.set(RenderPhase::Writing);
            for cell in &cells {
                stream.set_foreground(cell.fg)?;
                self.paint_background(stream, cell.bg)?;
                stream.write_glyph(cell.glyph)?;
            }
            stream.end_row()?;
        }
        Ok(())
    }

    fn write_monochrome<W: Write>(
        &self,
        session: &RenderSession,
        scaled: &PixelBuffer,
        stream: &mut TerminalStream<'_, W>,
    ) -> Result<(), RenderError> {
        let bg = self.options.background;
        let mut glyphs = Vec::with_capacity(scaled.width());
        for row in scaled.rows() {
            session.check_interrupt()?;
            self.phase.set(RenderPhase::Quantizing);
            glyphs.clear();
            glyphs.extend(
                row.iter()
                    .map(|px| self.quantizer.quantize_color(px.opacify(bg))),
            );

            self.phase.set(RenderPhase::Writing);
            for &glyph in &glyphs {
                stream.write_glyph(glyph)?;
            }
            // Nothing colored was written, so a plain newline keeps the
            // output free of escapes for copy/paste.
            debug_assert!(stream.foreground().is_none() && stream.background().is_none());
            stream.write_raw(b"\n")?;
        }
        Ok(())
    }

    fn paint_background<W: Write>(
        &self,
        stream: &mut TerminalStream<'_, W>,
        code: u8,
    ) -> io::Result<()> {
        if !self.options.bgprint && code == self.bg_index {
            stream.use_default_background()
        } else {
            stream.set_background(code)
        }
    }
}
