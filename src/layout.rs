// Memory image geometry and the slot/offset resolver.
//
// The 25,600-byte dump is partitioned into four disjoint regions (top bank,
// bottom bank, program channels, home), each a parallel pair of arrays: fixed
// 16-byte field records and fixed 8-byte tag records. The resolver decides
// which region a channel belongs to and at which index.

use crate::core::channel::{Channel, TAG_SIZE};
use crate::core::constants::pchannel_index;
use tracing::warn;

/// Full memory dump size; anything else is not an FTM-400 image.
pub const IMAGE_SIZE: usize = 25_600;

/// Width of one packed channel field record.
pub const CHANNEL_SIZE: usize = 16;

/// Channels per bank.
pub const NCHANNELS: usize = 500;

/// Named program channels (PMS pairs).
pub const NPCHANNELS: usize = 18;

/// First slot handed out to channels without an explicit slot.
pub const AUTO_SLOT_BASE: u32 = 101;

/// Fill byte for unused tag positions.
pub const TAG_FILL: u8 = 0xFF;

// Region base offsets. Field record arrays first, tag arrays after; the
// regions are disjoint and the last tag ends well inside the image.
pub const CHANNEL_TOP_OFFSET: usize = 0x0200;
pub const CHANNEL_BOT_OFFSET: usize = 0x2140;
pub const PCHANNEL_OFFSET: usize = 0x4080;
pub const HOME_OFFSET: usize = 0x41A0;
pub const CHANNEL_TOP_TAG_OFFSET: usize = 0x41B0;
pub const CHANNEL_BOT_TAG_OFFSET: usize = 0x5150;
pub const PCHANNEL_TAG_OFFSET: usize = 0x60F0;
pub const HOME_TAG_OFFSET: usize = 0x6180;

/// One of the four disjoint areas of the memory image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Top,
    Bottom,
    Program,
    Home,
}

impl Region {
    /// Base offset of this region's field-record array.
    pub fn field_base(self) -> usize {
        match self {
            Region::Top => CHANNEL_TOP_OFFSET,
            Region::Bottom => CHANNEL_BOT_OFFSET,
            Region::Program => PCHANNEL_OFFSET,
            Region::Home => HOME_OFFSET,
        }
    }

    /// Base offset of this region's tag-record array.
    pub fn tag_base(self) -> usize {
        match self {
            Region::Top => CHANNEL_TOP_TAG_OFFSET,
            Region::Bottom => CHANNEL_BOT_TAG_OFFSET,
            Region::Program => PCHANNEL_TAG_OFFSET,
            Region::Home => HOME_TAG_OFFSET,
        }
    }

    /// Number of slots in this region.
    pub fn capacity(self) -> usize {
        match self {
            Region::Top | Region::Bottom => NCHANNELS,
            Region::Program => NPCHANNELS,
            Region::Home => 1,
        }
    }
}

/// Where a channel's records land in the image: a region and a 0-based index
/// within it. The byte offsets follow from record widths alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub region: Region,
    pub index: usize,
}

impl Destination {
    /// Byte offset of the field record in the image.
    pub fn field_offset(&self) -> usize {
        self.region.field_base() + self.index * CHANNEL_SIZE
    }

    /// Byte offset of the tag record in the image.
    pub fn tag_offset(&self) -> usize {
        self.region.tag_base() + self.index * TAG_SIZE
    }
}

/// Hands out slots to channels that don't carry one. Shared across the whole
/// run: one counter regardless of which region the channels land in.
#[derive(Debug)]
pub struct SlotCounter {
    next: u32,
}

impl SlotCounter {
    pub fn new() -> Self {
        Self {
            next: AUTO_SLOT_BASE,
        }
    }

    fn take(&mut self) -> u32 {
        let slot = self.next;
        self.next += 1;
        slot
    }
}

impl Default for SlotCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a channel to its destination, or `None` if its slot falls outside
/// the region (that channel is dropped; the run continues).
///
/// A non-empty `memname` takes the named-channel path: a recognized program
/// channel name addresses the program region, anything else is treated as an
/// alias for the home channel. Otherwise bank 0/1 selects the top region and
/// bank 2+ the bottom one.
pub fn resolve(chan: &Channel, counter: &mut SlotCounter) -> Option<Destination> {
    // The auto slot is consumed for every slotless channel, named ones
    // included, so explicit and automatic placement interleave predictably.
    let slot = if chan.slot != 0 {
        chan.slot
    } else {
        counter.take()
    };
    let index = slot.saturating_sub(1) as usize;

    if !chan.memname.is_empty() {
        return Some(match pchannel_index(&chan.memname) {
            Some(i) => Destination {
                region: Region::Program,
                index: i,
            },
            None => Destination {
                region: Region::Home,
                index: 0,
            },
        });
    }

    let region = if chan.bank < 2 {
        Region::Top
    } else {
        Region::Bottom
    };

    if index >= region.capacity() {
        warn!(
            "channel {}: slot {} exceeds bank capacity {}, skipping",
            chan,
            slot,
            region.capacity()
        );
        return None;
    }

    Some(Destination { region, index })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_channel(bank: u32, slot: u32) -> Channel {
        Channel {
            bank,
            slot,
            ..Channel::default()
        }
    }

    fn named_channel(name: &str) -> Channel {
        Channel {
            memname: name.to_string(),
            ..Channel::default()
        }
    }

    #[test]
    fn test_regions_are_disjoint() {
        let spans = [
            (CHANNEL_TOP_OFFSET, NCHANNELS * CHANNEL_SIZE),
            (CHANNEL_BOT_OFFSET, NCHANNELS * CHANNEL_SIZE),
            (PCHANNEL_OFFSET, NPCHANNELS * CHANNEL_SIZE),
            (HOME_OFFSET, CHANNEL_SIZE),
            (CHANNEL_TOP_TAG_OFFSET, NCHANNELS * TAG_SIZE),
            (CHANNEL_BOT_TAG_OFFSET, NCHANNELS * TAG_SIZE),
            (PCHANNEL_TAG_OFFSET, NPCHANNELS * TAG_SIZE),
            (HOME_TAG_OFFSET, TAG_SIZE),
        ];

        for (i, &(a_start, a_len)) in spans.iter().enumerate() {
            assert!(a_start + a_len <= IMAGE_SIZE);
            for &(b_start, b_len) in &spans[i + 1..] {
                let overlap = a_start < b_start + b_len && b_start < a_start + a_len;
                assert!(!overlap, "spans at {:#x} and {:#x} overlap", a_start, b_start);
            }
        }
    }

    #[test]
    fn test_top_bank_offsets_increase_by_record_width() {
        let mut counter = SlotCounter::new();

        let first = resolve(&bank_channel(0, 1), &mut counter).unwrap();
        assert_eq!(first.field_offset(), CHANNEL_TOP_OFFSET);
        assert_eq!(first.tag_offset(), CHANNEL_TOP_TAG_OFFSET);

        let mut prev = first;
        for slot in 2..=20 {
            let dest = resolve(&bank_channel(1, slot), &mut counter).unwrap();
            assert_eq!(dest.field_offset(), prev.field_offset() + CHANNEL_SIZE);
            assert_eq!(dest.tag_offset(), prev.tag_offset() + TAG_SIZE);
            prev = dest;
        }
    }

    #[test]
    fn test_bottom_bank() {
        let mut counter = SlotCounter::new();
        let dest = resolve(&bank_channel(2, 1), &mut counter).unwrap();
        assert_eq!(dest.region, Region::Bottom);
        assert_eq!(dest.field_offset(), CHANNEL_BOT_OFFSET);

        // any bank >= 2 is the bottom bank
        let dest = resolve(&bank_channel(7, 1), &mut counter).unwrap();
        assert_eq!(dest.region, Region::Bottom);
    }

    #[test]
    fn test_named_channels() {
        let mut counter = SlotCounter::new();

        let dest = resolve(&named_channel("L1"), &mut counter).unwrap();
        assert_eq!(dest.region, Region::Program);
        assert_eq!(dest.field_offset(), PCHANNEL_OFFSET);

        let dest = resolve(&named_channel("U9"), &mut counter).unwrap();
        assert_eq!(dest.region, Region::Program);
        assert_eq!(dest.index, 17);

        // unrecognized names are aliases for home
        let dest = resolve(&named_channel("Home"), &mut counter).unwrap();
        assert_eq!(dest.region, Region::Home);
        assert_eq!(dest.field_offset(), HOME_OFFSET);
        assert_eq!(dest.tag_offset(), HOME_TAG_OFFSET);
    }

    #[test]
    fn test_slot_overflow_dropped() {
        let mut counter = SlotCounter::new();
        assert_eq!(
            resolve(&bank_channel(0, NCHANNELS as u32), &mut counter)
                .unwrap()
                .index,
            NCHANNELS - 1
        );
        assert!(resolve(&bank_channel(0, NCHANNELS as u32 + 1), &mut counter).is_none());
        assert!(resolve(&bank_channel(2, NCHANNELS as u32 + 1), &mut counter).is_none());
    }

    #[test]
    fn test_auto_counter_shared_across_regions() {
        let mut counter = SlotCounter::new();

        let dest = resolve(&bank_channel(0, 0), &mut counter).unwrap();
        assert_eq!(dest.index, AUTO_SLOT_BASE as usize - 1);

        // a slotless named channel still consumes a slot number
        resolve(&named_channel("L1"), &mut counter).unwrap();

        let dest = resolve(&bank_channel(2, 0), &mut counter).unwrap();
        assert_eq!(dest.index, AUTO_SLOT_BASE as usize + 1);
    }

    #[test]
    fn test_explicit_slot_leaves_counter_alone() {
        let mut counter = SlotCounter::new();
        resolve(&bank_channel(0, 42), &mut counter).unwrap();
        let dest = resolve(&bank_channel(0, 0), &mut counter).unwrap();
        assert_eq!(dest.index, AUTO_SLOT_BASE as usize - 1);
    }
}
