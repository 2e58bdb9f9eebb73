//! Tile animations

use gta_data::{SectionReader, WriteExt};

use crate::error::{Result, StyleError};

/// Milliseconds in one game cycle
pub const CYCLE_MS: u64 = 1000 / 20;

/// Which face set an animation replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimTarget {
    Side,
    Lid,
    Other(u8),
}

impl AnimTarget {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Side,
            1 => Self::Lid,
            other => Self::Other(other),
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            Self::Side => 0,
            Self::Lid => 1,
            Self::Other(raw) => raw,
        }
    }
}

/// What to draw for an animated tile at a given moment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimFrame {
    /// The tile's own picture
    Base,
    /// A tile from the aux set
    Aux(u8),
}

/// One animated tile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    /// Side or lid tile being animated
    pub block: u8,
    /// Raw [`AnimTarget`]
    pub which: u8,
    /// Game cycles per frame
    pub speed: u8,
    /// Aux tiles shown after the base picture
    pub frames: Vec<u8>,
}

impl Animation {
    pub fn target(&self) -> AnimTarget {
        AnimTarget::from_raw(self.which)
    }

    /// Frame shown `elapsed_ms` after the animation started.
    ///
    /// The cycle has as many steps as there are frames; step 0 shows the
    /// base tile and step `k` shows `frames[k - 1]`.
    pub fn frame_at(&self, elapsed_ms: u64) -> AnimFrame {
        let steps = self.frames.len() as u64;
        if steps == 0 {
            return AnimFrame::Base;
        }
        let step_ms = u64::from(self.speed.max(1)) * CYCLE_MS;
        match ((elapsed_ms / step_ms) % steps) as usize {
            0 => AnimFrame::Base,
            step => AnimFrame::Aux(self.frames[step - 1]),
        }
    }

    fn packed_len(&self) -> usize {
        4 + self.frames.len()
    }
}

/// The animation section: a count byte followed by the animations.
///
/// An empty table with no trailing bytes is written as an empty section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationTable {
    pub entries: Vec<Animation>,
    /// Bytes after the last animation, kept verbatim
    pub trailing: Vec<u8>,
}

impl AnimationTable {
    pub fn read(reader: &mut SectionReader<'_>) -> Result<Self> {
        if reader.is_empty() {
            return Ok(Self::default());
        }
        let count = reader.read_u8("animations")?;
        let mut entries = Vec::with_capacity(usize::from(count));
        for n in 0..count {
            let start = reader.offset();
            let head = reader.take("animations", 4).map_err(|_| {
                StyleError::corrupt("animations", format!("animation {n} at offset {start} is cut short"))
            })?;
            let frames = reader.take("animations", usize::from(head[3])).map_err(|_| {
                StyleError::corrupt(
                    "animations",
                    format!("animation {n} declares {} frames past the section end", head[3]),
                )
            })?;
            entries.push(Animation {
                block: head[0],
                which: head[1],
                speed: head[2],
                frames: frames.to_vec(),
            });
        }
        Ok(Self {
            entries,
            trailing: reader.take_rest().to_vec(),
        })
    }

    /// The animation replacing `block` in the given face set
    pub fn find(&self, block: u8, target: AnimTarget) -> Option<&Animation> {
        self.entries
            .iter()
            .find(|a| a.block == block && a.target() == target)
    }

    pub fn packed_len(&self) -> usize {
        if self.entries.is_empty() && self.trailing.is_empty() {
            return 0;
        }
        1 + self.entries.iter().map(Animation::packed_len).sum::<usize>() + self.trailing.len()
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.packed_len() == 0 {
            return Ok(());
        }
        let count = u8::try_from(self.entries.len()).map_err(|_| StyleError::Encode {
            section: "animations",
            message: format!("{} animations do not fit a u8 count", self.entries.len()),
        })?;
        out.put_u8(count);
        for (n, anim) in self.entries.iter().enumerate() {
            let frames = u8::try_from(anim.frames.len()).map_err(|_| StyleError::Encode {
                section: "animations",
                message: format!("animation {n} has {} frames", anim.frames.len()),
            })?;
            out.extend_from_slice(&[anim.block, anim.which, anim.speed, frames]);
            out.extend_from_slice(&anim.frames);
        }
        out.extend_from_slice(&self.trailing);
        Ok(())
    }
}
