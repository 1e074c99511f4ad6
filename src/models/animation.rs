//! Animation container types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Frame, ModelError};

/// How the display is treated after a frame, before the next one is drawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisposalMethod {
    /// No disposal specified
    #[default]
    Any,
    /// Leave the frame in place
    Keep,
    /// Restore the frame area to the background
    Background,
    /// Restore the frame area to what was there before
    Previous,
}

impl fmt::Display for DisposalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisposalMethod::Any => "any",
            DisposalMethod::Keep => "keep",
            DisposalMethod::Background => "background",
            DisposalMethod::Previous => "previous",
        };
        f.write_str(name)
    }
}

/// How many times the animation repeats.
///
/// `Infinite` is the conventional loop count 0. `Finite(0)` means the file
/// carries no looping extension and plays once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoopCount {
    #[default]
    Infinite,
    Finite(u16),
}

impl fmt::Display for LoopCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopCount::Infinite => f.write_str("infinite"),
            LoopCount::Finite(n) => write!(f, "{}", n),
        }
    }
}

/// A decoded multi-frame animation.
///
/// Per-frame delays and disposal methods are kept as sequences parallel to
/// the frames; the three always have the same length. Delays are in
/// centiseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    width: u32,
    height: u32,
    frames: Vec<Frame>,
    delays: Vec<u16>,
    disposal_methods: Vec<DisposalMethod>,
    loop_count: LoopCount,
    background_index: u8,
}

impl Animation {
    /// Create an empty animation with the given canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames: Vec::new(),
            delays: Vec::new(),
            disposal_methods: Vec::new(),
            loop_count: LoopCount::default(),
            background_index: 0,
        }
    }

    /// Set the loop count.
    pub fn with_loop_count(mut self, loop_count: LoopCount) -> Self {
        self.loop_count = loop_count;
        self
    }

    /// Set the background palette index.
    pub fn with_background_index(mut self, background_index: u8) -> Self {
        self.background_index = background_index;
        self
    }

    /// Replace all frames and their timing at once.
    ///
    /// Fails unless the three sequences have the same length.
    pub fn with_frames(
        mut self,
        frames: Vec<Frame>,
        delays: Vec<u16>,
        disposal_methods: Vec<DisposalMethod>,
    ) -> Result<Self, ModelError> {
        if delays.len() != frames.len() || disposal_methods.len() != frames.len() {
            return Err(ModelError::SequenceLength {
                frames: frames.len(),
                delays: delays.len(),
                disposal_methods: disposal_methods.len(),
            });
        }
        self.frames = frames;
        self.delays = delays;
        self.disposal_methods = disposal_methods;
        Ok(self)
    }

    /// Append a frame with its delay and disposal method.
    pub fn push_frame(&mut self, frame: Frame, delay: u16, disposal: DisposalMethod) {
        self.frames.push(frame);
        self.delays.push(delay);
        self.disposal_methods.push(disposal);
    }

    /// Declared canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Declared canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn delays(&self) -> &[u16] {
        &self.delays
    }

    pub fn disposal_methods(&self) -> &[DisposalMethod] {
        &self.disposal_methods
    }

    pub fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    pub fn background_index(&self) -> u8 {
        self.background_index
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total play time of one pass through the frames, in centiseconds.
    pub fn total_delay(&self) -> u64 {
        self.delays.iter().map(|&d| d as u64).sum()
    }
}
