//! Code to label lookups for enumerated log fields.
//!
//! Every lookup is total; codes not listed resolve to a fixed default label.

/// Position type code for a single point solution.
pub const POSTYPE_SINGLE: i32 = 16;

/// Label for a solution status code.
#[must_use]
pub fn solution_status_label(code: i32) -> &'static str {
    match code {
        -2 => "Solution status not set",
        0 => "Solution computed",
        1 => "Insufficient observations",
        2 => "No convergence",
        3 => "Singular AtPA matrix",
        4 => "Covariance trace exceeds maximum (trace > 1000 m)",
        5 => "Test distance exceeded (maximum of 3 rejections if distance > 10 km)",
        6 => "Converging from cold start",
        7 => "CoCom limits exceeded",
        8 => "Variance exceeds limits",
        9 => "Residuals are too large",
        10 => "Delta position is too large",
        11 => "Negative variance",
        12 => "The position is old",
        13 => "Integrity warning",
        14 => "INS has not started yet",
        15 => "INS doing its coarse alignment",
        16 => "INS position is bad",
        17 => "No IMU detected",
        18 => "Not enough satellites to verify FIX POSITION",
        19 => "Fixed position is not valid",
        20 => "Position type (HP or XP) not authorized",
        21 => "Selected RTK antenna mode not possible",
        22 => "Logging rate not supported for this solution type",
        _ => "Unknown solution status",
    }
}

/// Label for a position or velocity type code.
#[must_use]
pub fn position_type_label(code: i32) -> &'static str {
    match code {
        -1 => "NOTSET",
        0 => "NONE",
        1 => "FIXEDPOS",
        2 => "FIXEDHEIGHT",
        3 => "FIXEDVEL",
        8 => "DOPPLER_VELOCITY",
        POSTYPE_SINGLE => "SINGLE",
        17 => "PSRDIFF",
        18 => "WAAS",
        19 => "PROPAGATED",
        20 => "OMNISTAR",
        32 => "L1_FLOAT",
        33 => "IONOFREE_FLOAT",
        34 => "NARROW_FLOAT",
        48 => "L1_INT",
        49 => "WIDE_INT",
        50 => "NARROW_INT",
        51 => "RTK_DIRECT_INS",
        52 => "INS",
        53 => "INS_PSRSP",
        54 => "INS_PSRDIFF",
        55 => "INS_RTKFLOAT",
        56 => "INS_RTKFIXED",
        57 => "INS_OMNISTAR",
        58 => "INS_OMNISTAR_HP",
        59 => "INS_OMNISTAR_XP",
        64 => "OMNISTAR_HP",
        65 => "OMNISTAR_XP",
        66 => "CDGPS",
        67 => "EXT_CONSTRAINED",
        68 => "PPP_CONVERGING",
        69 => "PPP",
        70 => "OPERATIONAL",
        71 => "WARNING",
        72 => "OUT_OF_BOUNDS",
        73 => "INS_PPP_CONVERGING",
        74 => "INS_PPP",
        77 => "PPP_BASIC_CONVERGING",
        78 => "PPP_BASIC",
        79 => "INS_PPP_BASIC_CONVERGING",
        80 => "INS_PPP_BASIC",
        _ => "UNKNOWN",
    }
}

/// Label for a datum id.
#[must_use]
pub fn datum_label(code: i32) -> &'static str {
    match code {
        -1 => "UNKNOWN_DATUM",
        1 => "ADIND",
        2 => "ARC50",
        3 => "ARC60",
        4 => "AGD66",
        5 => "AGD84",
        6 => "BUKIT",
        7 => "ASTRO",
        8 => "CHATM",
        9 => "CARTH",
        10 => "CAPE",
        11 => "DJAKA",
        12 => "EGYPT",
        13 => "ED50",
        14 => "ED79",
        15 => "GUNSG",
        16 => "GEO49",
        17 => "GRB36",
        18 => "GUAM",
        19 => "HAWAII",
        20 => "KAUAI",
        21 => "MAUI",
        22 => "OAHU",
        23 => "HERAT",
        24 => "HJORS",
        25 => "HONGK",
        26 => "HUTZU",
        27 => "INDIA",
        28 => "IRE65",
        29 => "KERTA",
        30 => "KANDA",
        31 => "LIBER",
        32 => "LUZON",
        33 => "MINDA",
        34 => "MERCH",
        35 => "NAHR",
        36 => "NAD83",
        37 => "CANADA",
        38 => "ALASKA",
        39 => "NAD27",
        40 => "CARIBB",
        41 => "MEXICO",
        42 => "CAMER",
        43 => "MINNA",
        44 => "OMAN",
        45 => "PUERTO",
        46 => "QORNO",
        47 => "ROME",
        48 => "CHUA",
        49 => "SAM56",
        50 => "SAM69",
        51 => "CAMPO",
        52 => "SACOR",
        53 => "YACAR",
        54 => "TANAN",
        55 => "TIMBA",
        56 => "TOKYO",
        57 => "TRIST",
        58 => "VITI",
        59 => "WAK60",
        60 => "WGS72",
        61 => "WGS84",
        62 => "ZANDE",
        63 => "USER",
        64 => "CSRS",
        65 => "ADIM",
        66 => "ARSM",
        67 => "ENW",
        68 => "HTN",
        69 => "INDB",
        70 => "INDI",
        71 => "IRL",
        72 => "LUZA",
        73 => "LUZB",
        74 => "NAHC",
        75 => "NASP",
        76 => "OGMB",
        77 => "OHAA",
        78 => "OHAB",
        79 => "OHAC",
        80 => "OHAD",
        81 => "OHIA",
        82 => "OHIB",
        83 => "OHIC",
        84 => "OHID",
        85 => "TIL",
        86 => "TOYM",
        _ => "UNKNOWN DATUM",
    }
}

const COMPONENT_DB: i32 = 0x3A7A_0000;

/// Label for a version log component type.
#[must_use]
pub fn component_type_label(code: i32) -> &'static str {
    match code {
        1 => "OEM family component",
        2 => "Reserved",
        3 => "OEM card enclosure",
        8 => "Application specific information",
        12 => "OEM638 FPGA version",
        13 => "Second card in a ProPak6",
        14 => "Bluetooth component in a ProPak6",
        15 => "Wi-Fi component in a ProPak6",
        16 => "Cellular component in a ProPak6",
        COMPONENT_DB => "Height/track model data",
        c if c == COMPONENT_DB | 1 => "User application firmware",
        c if c == COMPONENT_DB | 5 => "Auto-starting user application firmware",
        _ => "Unknown component",
    }
}

/// Label for the GPS reference time status found in the log header.
#[must_use]
pub fn time_status_label(code: u8) -> &'static str {
    match code {
        20 => "UNKNOWN",
        60 => "APPROXIMATE",
        80 => "COARSEADJUSTING",
        100 => "COARSE",
        120 => "COARSESTEERING",
        130 => "FREEWHEELING",
        140 => "FINEADJUSTING",
        160 => "FINE",
        170 => "FINEBACKUPSTEERING",
        180 => "FINESTEERING",
        200 => "SATTIME",
        _ => "UNKNOWN",
    }
}
