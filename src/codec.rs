// Channel binary codec: packs one logical channel into the fixed-width field
// record and tag record that get copied verbatim into the memory image.
//
// Field record byte layout (16 bytes, all fields OR'd into pre-zeroed bytes):
// - Byte 0:  programmed flag (bit 7), scan mode (bits 5-6), band (bits 0-2)
// - Byte 1:  mode (bits 4-6), duplex/tx-present flags (bits 0-2)
// - Bytes 2-4:  receive frequency digits (see below)
// - Byte 5:  squelch type (bits 4-7)
// - Bytes 6-8:  transmit frequency digits, only when a split tx is set
// - Byte 9:  power (bits 6-7), CTCSS tone index (bits 0-4)
// - Byte 10: DCS code index (bits 0-4)
// - Byte 11: bank flag (bit 7), fixed marker nibble (bits 0-3)
// - Byte 13: repeater offset in 50 kHz steps (shift set, no split tx)
//
// Frequencies are stored as decimal digits, one per nibble, spread over a
// three-byte window: 5 kHz rounding bit and 100 MHz digit in the first
// byte, 10 MHz/1 MHz digits in the second, 100 kHz/10 kHz digits in the
// third (the kHz value's successive mod-10 digits from least significant).

use crate::core::channel::{Channel, TAG_SIZE};
use crate::core::constants::UHF_THRESHOLD_KHZ;
use crate::layout::{CHANNEL_SIZE, TAG_FILL};

/// A packed channel field record.
pub type FieldRecord = [u8; CHANNEL_SIZE];

/// A packed channel tag (display name) record.
pub type TagRecord = [u8; TAG_SIZE];

/// Pack a channel into its field and tag records.
///
/// `None` encodes an unprogrammed slot: an all-zero field record and an
/// all-fill tag record, with no bits set at all.
pub fn encode_channel(chan: Option<&Channel>) -> (FieldRecord, TagRecord) {
    let mut fields: FieldRecord = [0; CHANNEL_SIZE];
    let mut tag: TagRecord = [TAG_FILL; TAG_SIZE];

    let chan = match chan {
        Some(chan) => chan,
        None => return (fields, tag),
    };

    encode_tag(&chan.tag, &mut tag);

    fields[0] |= 0x60 & (chan.scan << 5);

    if chan.band != 0 {
        fields[0] |= 0x07 & (chan.band - 1);
    } else if chan.rx > UHF_THRESHOLD_KHZ {
        fields[0] |= 0x03; // UHF
    } else {
        fields[0] |= 0x01; // VHF
    }

    pack_freq_digits(chan.rx, &mut fields[2..5]);

    if chan.tx != 0 {
        pack_freq_digits(chan.tx, &mut fields[6..9]);
        fields[1] |= 0x04;
    } else if chan.duplex > 0 {
        fields[1] |= 0x03; // +
    } else if chan.duplex < 0 {
        fields[1] |= 0x02; // -
    }

    fields[1] |= 0x70 & (chan.mode << 4);
    fields[5] |= 0xF0 & (chan.sql << 4);
    fields[9] |= 0xC0 & (chan.power << 6);
    fields[9] |= 0x1F & chan.tone;
    fields[10] |= 0x1F & chan.dcs;

    fields[11] |= 0x0F;
    if chan.bank < 2 {
        fields[11] |= 0x80;
    }

    // Offset stored as a count of 50 kHz steps. The manual allows up to
    // 99.95 MHz (1999 steps) but only this one byte is confirmed, so larger
    // counts truncate; where the top bits land is unknown.
    if chan.duplex != 0 && chan.tx == 0 {
        let steps = chan.offset / 50;
        fields[13] |= (steps & 0xFF) as u8;
    }

    fields[0] |= 0x80; // programmed

    (fields, tag)
}

/// Decimal-digit decomposition of a kHz frequency into a three-byte window.
/// Sub-10 kHz remainders of 5 or more set the rounding bit instead of a
/// digit of their own.
fn pack_freq_digits(khz: u32, window: &mut [u8]) {
    let mut x = khz;

    if x % 10 >= 5 {
        window[0] |= 0x80;
    }
    x /= 10;
    window[2] |= 0x0F & (x % 10) as u8;
    x /= 10;
    window[2] |= 0xF0 & ((x % 10) as u8) << 4;
    x /= 10;
    window[1] |= 0x0F & (x % 10) as u8;
    x /= 10;
    window[1] |= 0xF0 & ((x % 10) as u8) << 4;
    x /= 10;
    window[0] |= 0x0F & (x % 10) as u8;
}

/// Fill the tag record with the fill sentinel, then the tag's bytes verbatim
/// up to the record width.
fn encode_tag(tag: &str, out: &mut TagRecord) {
    out.fill(TAG_FILL);
    let bytes = tag.as_bytes();
    let n = bytes.len().min(TAG_SIZE);
    out[..n].copy_from_slice(&bytes[..n]);
}
