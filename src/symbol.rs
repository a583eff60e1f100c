#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::block_coder;
use crate::data_encoder;
use crate::data_placer;
use crate::error::QrError;
use crate::error_level::ErrorLevel;
use crate::functional_placer;
use crate::mask::Mask;
use crate::mask_evaluator;
use crate::matrix::Matrix;
use crate::mode::Mode;
use crate::version::Version;

const QUIET_ZONE: i32 = 4;

/// Caller-supplied overrides for encoding. All fields are optional except
/// `error_level`, which defaults to the least redundant level rather than
/// being silently upgraded -- callers who want more resilience ask for it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncodeOptions {
    pub version: Option<u8>,
    pub mode: Option<Mode>,
    pub error_level: ErrorLevel,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { version: None, mode: None, error_level: ErrorLevel::L }
    }
}

/// A fully encoded QR Code symbol: an immutable bitmap plus the parameters
/// that produced it.
#[derive(Debug, Clone)]
pub struct Symbol {
    version: Version,
    mode: Mode,
    error_level: ErrorLevel,
    mask: Mask,
    bitmap: Matrix,
}

impl Symbol {
    /// Encodes `text` with default options (auto mode, auto version,
    /// error level L).
    pub fn encode_text(text: &str) -> Result<Symbol, QrError> {
        Symbol::encode_with_options(text, &EncodeOptions::default())
    }

    /// Encodes `text` under the given options.
    pub fn encode_with_options(text: &str, options: &EncodeOptions) -> Result<Symbol, QrError> {
        let inferred = Mode::classify(text);
        let mode = match options.mode {
            Some(forced) => Mode::validate_override(inferred, forced)?,
            None => inferred,
        };
        log::debug!("classified payload as {inferred:?}, using {mode:?}");

        let ecl = options.error_level;
        let (ver, codewords) = match options.version {
            Some(v) => {
                let ver = Version::try_new(v).ok_or(QrError::InvalidVersion(v))?;
                let codewords = data_encoder::build_codewords(text, mode, ver, ecl)?;
                (ver, codewords)
            }
            None => select_version_and_encode(text, mode, ecl)?,
        };
        log::debug!("version {} selected, {} codewords", ver.value(), codewords.len());

        Ok(Symbol::build(ver, mode, ecl, &codewords))
    }

    /// Encodes raw bytes in Byte mode, bypassing mode classification
    /// entirely and performing no transcoding: each input byte becomes
    /// one 8-bit data codeword.
    pub fn encode_bytes(data: &[u8], options: &EncodeOptions) -> Result<Symbol, QrError> {
        if let Some(forced) = options.mode {
            if forced != Mode::Byte {
                return Err(QrError::ModeIncompatible { forced, needed: Mode::Byte });
            }
        }
        let ver = match options.version {
            Some(v) => Version::try_new(v).ok_or(QrError::InvalidVersion(v))?,
            None => smallest_version_for_byte_len(data.len(), options.error_level)?,
        };
        let ecl = options.error_level;
        let capacity_bits = block_coder::data_codeword_capacity(ver, ecl) * 8;
        let mut buf = crate::bit_buffer::BitBuffer::new();
        buf.append(Mode::Byte.mode_bits(), 4);
        buf.append(data.len() as u32, Mode::Byte.num_char_count_bits(ver));
        for &b in data {
            buf.append(u32::from(b), 8);
        }
        if buf.size() > capacity_bits {
            return Err(QrError::PayloadTooLarge { needed: buf.size(), available: capacity_bits });
        }
        data_encoder::pad_to_capacity(&mut buf, capacity_bits);
        let bytes = buf.bytes();
        let blocks = block_coder::split_into_blocks(ver, ecl, &bytes);
        let codewords = block_coder::interleave(&blocks);
        Ok(Symbol::build(ver, Mode::Byte, ecl, &codewords))
    }

    fn build(ver: Version, mode: Mode, ecl: ErrorLevel, codewords: &[u8]) -> Symbol {
        let (mut grid, reserved_mask) = functional_placer::place_function_patterns(ver);
        let reserved = reserved_mask.finish();
        data_placer::place_codewords(&mut grid, &reserved, codewords);

        let (masked, mask_id) = mask_evaluator::choose_best_mask(&grid, &reserved);
        let mut finished = masked;
        functional_placer::write_format_info(&mut finished, ecl, mask_id);
        functional_placer::write_version_info(&mut finished, ver);
        log::trace!("chose mask {mask_id}");

        let bitmap = add_quiet_zone(&finished);
        Symbol { version: ver, mode, error_level: ecl, mask: Mask::new(mask_id), bitmap }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn error_level(&self) -> ErrorLevel {
        self.error_level
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// A clone of the final bitmap, including the quiet zone.
    pub fn bitmap(&self) -> Matrix {
        self.bitmap.clone()
    }

    pub fn width(&self) -> i32 {
        self.bitmap.side()
    }

    pub fn height(&self) -> i32 {
        self.bitmap.side()
    }

    /// `true` means dark. Coordinates are relative to the quiet-zone
    /// corner, i.e. `(0, 0)` is light border, not the first finder module.
    pub fn at(&self, x: i32, y: i32) -> bool {
        self.bitmap.get(x, y)
    }
}

fn add_quiet_zone(inner: &Matrix) -> Matrix {
    let side = inner.side() + QUIET_ZONE * 2;
    let mut out = Matrix::new(side);
    out.blit(inner, QUIET_ZONE, QUIET_ZONE, 0, 0, inner.side(), inner.side());
    out
}

/// Finds the smallest version able to hold `text` under `mode`/`ecl`,
/// returning its already-built codeword stream alongside it so the caller
/// doesn't redo the encoding pass.
fn select_version_and_encode(text: &str, mode: Mode, ecl: ErrorLevel) -> Result<(Version, Vec<u8>), QrError> {
    for v in Version::MIN.value()..=Version::MAX.value() {
        let ver = Version::new(v);
        match data_encoder::build_codewords(text, mode, ver, ecl) {
            Ok(codewords) => return Ok((ver, codewords)),
            Err(QrError::PayloadTooLarge { .. }) => continue,
            Err(other) => return Err(other),
        }
    }
    let max_capacity_bits = block_coder::data_codeword_capacity(Version::MAX, ecl) * 8;
    Err(QrError::PayloadTooLarge { needed: usize::MAX, available: max_capacity_bits })
}

fn smallest_version_for_byte_len(len: usize, ecl: ErrorLevel) -> Result<Version, QrError> {
    for v in Version::MIN.value()..=Version::MAX.value() {
        let ver = Version::new(v);
        let header_bits = 4 + usize::from(Mode::Byte.num_char_count_bits(ver));
        let needed_bits = header_bits + len * 8;
        let capacity_bits = block_coder::data_codeword_capacity(ver, ecl) * 8;
        if needed_bits <= capacity_bits {
            return Ok(ver);
        }
    }
    let max_capacity_bits = block_coder::data_codeword_capacity(Version::MAX, ecl) * 8;
    Err(QrError::PayloadTooLarge { needed: len * 8, available: max_capacity_bits })
}
