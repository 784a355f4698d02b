// Logical channel value, the unit of work between the document walk and the
// binary codec. One channel is extracted, resolved to a destination, packed,
// and discarded before the next is looked at.

use std::fmt;

/// Maximum display-name length the radio stores per channel.
pub const TAG_SIZE: usize = 8;

/// A single channel as described by the source document.
///
/// Frequencies (`rx`, `tx`, `offset`) are integer kilohertz: the document's
/// MHz value times 1000, with up to three fractional digits. `tx == 0` means
/// no split transmit frequency; the repeater offset applies instead.
/// The small-integer fields (`mode`, `sql`, `tone`, `dcs`, `scan`, `power`,
/// `band`) are indices into the tables in [`crate::core::constants`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channel {
    /// Program-channel name ("L1".."U9") or any alias for the home channel.
    /// When non-empty, `bank` and `slot` are ignored for placement.
    pub memname: String,

    /// Bank number: 0 or 1 selects the top bank, anything else the bottom.
    pub bank: u32,

    /// 1-based slot within the bank; 0 means auto-assign.
    pub slot: u32,

    /// Receive frequency in kHz.
    pub rx: u32,

    /// Transmit frequency in kHz, or 0 for none.
    pub tx: u32,

    /// Repeater shift direction: -1, 0 (simplex), or +1.
    pub duplex: i8,

    /// Repeater offset magnitude in kHz.
    pub offset: u32,

    /// Explicit band index (1-based), or 0 to infer from `rx`.
    pub band: u8,

    /// Operating mode index.
    pub mode: u8,

    /// Squelch type index.
    pub sql: u8,

    /// CTCSS tone index.
    pub tone: u8,

    /// DCS code index.
    pub dcs: u8,

    /// Scan mode index.
    pub scan: u8,

    /// Power level index.
    pub power: u8,

    /// Display name, at most [`TAG_SIZE`] bytes.
    pub tag: String,
}

impl Channel {
    /// Set the display tag, clipping to the radio's tag width. The clip
    /// never splits a multibyte character; one straddling the width is
    /// dropped whole.
    pub fn set_tag(&mut self, tag: &str) {
        let mut end = TAG_SIZE.min(tag.len());
        while !tag.is_char_boundary(end) {
            end -= 1;
        }
        self.tag = tag[..end].to_string();
    }

    /// Apply the default repeater offset when a shift direction was given
    /// without a magnitude: 5 MHz above 300 MHz, 600 kHz below.
    pub fn default_offset(&mut self) {
        if self.duplex != 0 && self.offset == 0 {
            self.offset = if self.rx > super::constants::UHF_THRESHOLD_KHZ {
                5000
            } else {
                600
            };
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.memname.is_empty() {
            write!(f, "{}/{}", self.bank, self.slot)
        } else {
            write!(f, "{}", self.memname)
        }
    }
}

/// Parse a decimal MHz string into integer kHz.
///
/// The integer part is scaled by 1000 and up to three fractional digits are
/// added at their decimal positions; anything past the third fractional digit
/// or a non-digit character ends the number. Unparsable input yields 0.
pub fn parse_mhz(s: &str) -> u32 {
    let s = s.trim();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };

    let mut khz = leading_digits(int_part) * 1000;

    const PLACES: [u32; 3] = [100, 10, 1];
    for (mult, ch) in PLACES.iter().zip(frac_part.chars()) {
        match ch.to_digit(10) {
            Some(d) => khz += mult * d,
            None => break,
        }
    }

    khz
}

/// Parse the leading decimal digits of a string, stopping at the first
/// non-digit. Input with no leading digits yields 0.
pub fn leading_digits(s: &str) -> u32 {
    let mut value: u32 = 0;
    for ch in s.chars() {
        match ch.to_digit(10) {
            Some(d) => value = value * 10 + d,
            None => break,
        }
    }
    value
}
