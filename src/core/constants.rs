// Fixed lookup tables for the FTM-400DR memory format - tones, DCS codes,
// modes, squelch types, scan modes, bands, power levels, program channels.
// All tables are process-wide read-only constants; the codec only ever sees
// the resolved small integer indices.

/// The 42 CTCSS tones the radio knows, in tenths of Hz (67.0 - 254.1 Hz).
/// The record stores the index into this table, not the tone itself.
pub const TONES: [u16; 42] = [
    670, 693, 719, 744, 770, 797, 825, 854, 885, 915, 948, 974, 1000, 1035, 1072, 1109, 1148,
    1188, 1230, 1273, 1318, 1365, 1413, 1462, 1514, 1567, 1622, 1679, 1738, 1799, 1862, 1928,
    2035, 2065, 2107, 2181, 2257, 2291, 2336, 2418, 2503, 2541,
];

/// Index of the 100.0 Hz tone, the fallback for unrecognized tone values.
pub const DEFAULT_TONE_INDEX: u8 = 12;

/// DCS codes as they appear in the source document. Index 0 is "off";
/// the 104 standard codes occupy indices 1..=104.
pub const DCS_CODES: [&str; 105] = [
    "off", "023", "025", "026", "031", "032", "036", "043", "047", "051", "053", "054", "065",
    "071", "072", "073", "074", "114", "115", "116", "122", "125", "131", "132", "134", "143",
    "145", "152", "155", "156", "162", "165", "172", "174", "205", "212", "223", "225", "226",
    "243", "244", "245", "246", "251", "252", "255", "261", "263", "265", "266", "271", "274",
    "306", "311", "315", "325", "331", "332", "343", "346", "351", "356", "364", "365", "371",
    "411", "412", "413", "423", "431", "432", "445", "446", "452", "454", "455", "462", "464",
    "465", "466", "503", "506", "516", "523", "526", "532", "546", "565", "606", "612", "624",
    "627", "631", "632", "654", "662", "664", "703", "712", "723", "731", "732", "734", "743",
    "754",
];

/// Operating modes, 0-based (FM is the default when nothing matches).
pub const MODES: [&str; 3] = ["fm", "am", "nfm"];

/// Squelch types. Index 0 means "off"/unset; only 1.. are matched.
pub const SQLS: [&str; 7] = ["off", "tone", "tsql", "rev tone", "dcs", "pr freq", "pager"];

/// Scan modes. Index 0 means "off"/unset; only 1.. are matched.
pub const SCANS: [&str; 3] = ["off", "skip", "select"];

/// Bands. Index 0 means "infer from the receive frequency"; only 1.. are
/// matched against the document value.
pub const BANDS: [&str; 4] = ["", "air", "vhf", "uhf"];

/// Transmit power levels, 0-based ("high" is the radio's default).
pub const POWER_LEVELS: [&str; 3] = ["high", "medium", "low"];

/// Named program channels (PMS lower/upper pairs), in memory order.
/// A channel addressed by any other name lands on the home channel.
pub const PCHANNEL_NAMES: [&str; 18] = [
    "L1", "U1", "L2", "U2", "L3", "U3", "L4", "U4", "L5", "U5", "L6", "U6", "L7", "U7", "L8",
    "U8", "L9", "U9",
];

/// Receive frequencies above this (in kHz) infer the UHF band.
pub const UHF_THRESHOLD_KHZ: u32 = 300 * 1000;

/// Look up a tone by its document value (integer Hz, fractional part already
/// truncated). Returns the table index.
pub fn tone_index(hz: u32) -> Option<u8> {
    TONES
        .iter()
        .position(|&t| u32::from(t / 10) == hz)
        .map(|i| i as u8)
}

/// Look up a DCS code string. Index 0 ("off") is never matched.
pub fn dcs_index(code: &str) -> Option<u8> {
    lookup_from(&DCS_CODES, 1, code)
}

/// Look up an operating mode. Matches from index 0.
pub fn mode_index(mode: &str) -> Option<u8> {
    lookup_from(&MODES, 0, mode)
}

/// Look up a squelch type. Index 0 ("off") is never matched.
pub fn sql_index(sql: &str) -> Option<u8> {
    lookup_from(&SQLS, 1, sql)
}

/// Look up a scan mode. Index 0 ("off") is never matched.
pub fn scan_index(scan: &str) -> Option<u8> {
    lookup_from(&SCANS, 1, scan)
}

/// Look up an explicit band name. Index 0 (infer) is never matched.
pub fn band_index(band: &str) -> Option<u8> {
    lookup_from(&BANDS, 1, band)
}

/// Look up a power level. Matches from index 0.
pub fn power_index(power: &str) -> Option<u8> {
    lookup_from(&POWER_LEVELS, 0, power)
}

/// Look up a program channel name. Case-sensitive, unlike the enum fields.
pub fn pchannel_index(name: &str) -> Option<usize> {
    PCHANNEL_NAMES.iter().position(|&n| n == name)
}

fn lookup_from(table: &[&str], start: usize, value: &str) -> Option<u8> {
    table[start..]
        .iter()
        .position(|entry| entry.eq_ignore_ascii_case(value))
        .map(|i| (start + i) as u8)
}
