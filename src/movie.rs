//! Video frame source backed by FFmpeg.
//!
//! `ffprobe` reports the stream size, then `ffmpeg` decodes the video to raw
//! `rgb24` frames on its stdout, already scaled to the output width.

use std::io::{self, BufReader, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::ascii::aspect_height;
use crate::graphic::PixelBuffer;

/// Errors that can occur while opening a movie.
#[derive(Debug, thiserror::Error)]
pub enum MovieError {
    #[error("{0} not found. Please install FFmpeg to play movies")]
    ToolNotFound(&'static str),

    #[error("failed to probe '{path}': {message}")]
    ProbeFailed { path: String, message: String },

    #[error("movie I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Splits a raw `rgb24` byte stream into frames.
///
/// As an iterator it ends on the first read error and keeps that error for
/// [`FrameReader::take_error`].
pub struct FrameReader<R> {
    reader: R,
    width: usize,
    height: usize,
    frame: Vec<u8>,
    error: Option<io::Error>,
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R, width: usize, height: usize) -> Self {
        Self {
            reader,
            width,
            height,
            frame: vec![0; width * height * 3],
            error: None,
        }
    }

    /// Read the next frame. `Ok(None)` at end of stream; a trailing partial
    /// frame counts as the end.
    pub fn next_frame(&mut self) -> io::Result<Option<PixelBuffer>> {
        match self.reader.read_exact(&mut self.frame) {
            Ok(()) => Ok(Some(PixelBuffer::from_rgb8(
                self.width,
                self.height,
                &self.frame,
            ))),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The error that ended iteration, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = PixelBuffer;

    fn next(&mut self) -> Option<PixelBuffer> {
        if self.error.is_some() {
            return None;
        }
        match self.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("stopping playback after read error: {}", e);
                self.error = Some(e);
                None
            }
        }
    }
}

/// A running decoder yielding one [`PixelBuffer`] per frame.
pub struct Movie {
    child: Child,
    frames: FrameReader<BufReader<ChildStdout>>,
}

impl Movie {
    /// Start decoding `path`, scaling frames to `width` columns.
    pub fn open(path: &Path, width: usize) -> Result<Self, MovieError> {
        let (src_w, src_h) = probe(path)?;
        // yuv scalers want even dimensions
        let width = width.max(2) & !1;
        let height = aspect_height(width, src_w, src_h).max(2) & !1;
        log::info!(
            "movie {} is {}x{}, decoding at {}x{}",
            path.display(),
            src_w,
            src_h,
            width,
            height
        );

        let scale = format!("scale={}:{}", width, height);
        let mut child = Command::new("ffmpeg")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(path)
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-vf", scale.as_str(), "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| not_found_or_io(e, "ffmpeg"))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "ffmpeg stdout missing"))?;

        Ok(Self {
            child,
            frames: FrameReader::new(BufReader::new(stdout), width, height),
        })
    }

    pub fn width(&self) -> usize {
        self.frames.width
    }

    pub fn height(&self) -> usize {
        self.frames.height
    }

    /// Read the next frame. `Ok(None)` at end of stream.
    pub fn next_frame(&mut self) -> io::Result<Option<PixelBuffer>> {
        self.frames.next_frame()
    }

    /// The read error that ended playback, if any.
    pub fn take_error(&mut self) -> Option<MovieError> {
        self.frames.take_error().map(MovieError::Io)
    }
}

impl Iterator for Movie {
    type Item = PixelBuffer;

    fn next(&mut self) -> Option<PixelBuffer> {
        self.frames.next()
    }
}

impl Drop for Movie {
    fn drop(&mut self) {
        // Ensure ffmpeg does not outlive playback
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Ask ffprobe for the first video stream's dimensions.
fn probe(path: &Path) -> Result<(usize, usize), MovieError> {
    let output = Command::new("ffprobe")
        .args(["-v", "error", "-select_streams", "v:0"])
        .args(["-show_entries", "stream=width,height", "-of", "csv=p=0:s=x"])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| not_found_or_io(e, "ffprobe"))?;

    let fail = |message: String| MovieError::ProbeFailed {
        path: path.display().to_string(),
        message,
    };
    if !output.status.success() {
        return Err(fail(String::from_utf8_lossy(&output.stderr).trim().to_string()));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_dimensions(&stdout).ok_or_else(|| fail(format!("unexpected output '{}'", stdout.trim())))
}

/// Parse ffprobe's `WIDTHxHEIGHT` line.
fn parse_dimensions(s: &str) -> Option<(usize, usize)> {
    let line = s.lines().find(|l| !l.trim().is_empty())?;
    let (w, h) = line.trim().trim_end_matches('x').split_once('x')?;
    let w: usize = w.parse().ok()?;
    let h: usize = h.parse().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

fn not_found_or_io(e: io::Error, tool: &'static str) -> MovieError {
    if e.kind() == io::ErrorKind::NotFound {
        MovieError::ToolNotFound(tool)
    } else {
        MovieError::Io(e)
    }
}
