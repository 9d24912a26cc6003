//! Modal registry: closed lookup tables for G/M codes and axis letters.
//!
//! Modal codes are partitioned into mutually exclusive [`Group`]s; a code
//! stays in effect for all subsequent blocks until another code from the same
//! group replaces it. The tables here are compile-time constant: a code either
//! resolves or it is rejected, never approximated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Modal groups. At most one mode per group may be active in a state.
///
/// Declaration order is the canonical rendering order for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Motion modes {G0, G1, G2, G3}
    Motion,
    /// Plane modes {G17, G18, G19}
    Plane,
    /// Distance modes {G90, G91}
    Distance,
    /// Feed rate modes {G93, G94}
    RateMode,
    /// Units modes {G20, G21}
    Units,
    /// Cutter radius compensation {G40}
    CutterComp,
    /// Tool length offset modes {G49}
    ToolLength,
    /// Work coordinate system modes {G54..G59}
    WorkCoordinates,
    /// Spindle turning modes {M3, M4, M5}
    Spindle,
    /// Coolant modes {M7, M8, M9}
    Coolant,
    /// Stopping modes {M0, M1, M2, M30}
    Stopping,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Motion => "motion",
            Self::Plane => "plane",
            Self::Distance => "distance",
            Self::RateMode => "rate mode",
            Self::Units => "units",
            Self::CutterComp => "cutter compensation",
            Self::ToolLength => "tool length",
            Self::WorkCoordinates => "work coordinates",
            Self::Spindle => "spindle",
            Self::Coolant => "coolant",
            Self::Stopping => "stopping",
        };
        write!(f, "{}", name)
    }
}

/// A supported modal code word, tagged with its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// G0 rapid positioning
    Rapid,
    /// G1 linear interpolation
    Linear,
    /// G2 clockwise arc
    CircularCw,
    /// G3 counter-clockwise arc
    CircularCcw,
    /// G17 XY plane
    PlaneXy,
    /// G18 XZ plane
    PlaneXz,
    /// G19 YZ plane
    PlaneYz,
    /// G90 absolute positioning
    Absolute,
    /// G91 incremental positioning
    Incremental,
    /// G93 inverse time feed
    InverseTime,
    /// G94 units per minute feed
    UnitsPerMinute,
    /// G20 inches
    Inches,
    /// G21 millimeters
    Millimeters,
    /// G40 cutter compensation off
    CutterCompOff,
    /// G49 tool length offset off
    ToolLengthOff,
    /// G54 first work coordinate system
    Wcs54,
    /// G55
    Wcs55,
    /// G56
    Wcs56,
    /// G57
    Wcs57,
    /// G58
    Wcs58,
    /// G59
    Wcs59,
    /// M3 spindle clockwise
    SpindleCw,
    /// M4 spindle counter-clockwise
    SpindleCcw,
    /// M5 spindle off
    SpindleOff,
    /// M7 mist coolant
    CoolantMist,
    /// M8 flood coolant
    CoolantFlood,
    /// M9 coolant off
    CoolantOff,
    /// M0 program stop
    Stop,
    /// M1 optional stop
    OptionalStop,
    /// M2 program end
    ProgramEnd,
    /// M30 program end with rewind
    ProgramEndRewind,
}

impl Mode {
    /// Canonical text of this code, e.g. `"G1"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rapid => "G0",
            Self::Linear => "G1",
            Self::CircularCw => "G2",
            Self::CircularCcw => "G3",
            Self::PlaneXy => "G17",
            Self::PlaneXz => "G18",
            Self::PlaneYz => "G19",
            Self::Absolute => "G90",
            Self::Incremental => "G91",
            Self::InverseTime => "G93",
            Self::UnitsPerMinute => "G94",
            Self::Inches => "G20",
            Self::Millimeters => "G21",
            Self::CutterCompOff => "G40",
            Self::ToolLengthOff => "G49",
            Self::Wcs54 => "G54",
            Self::Wcs55 => "G55",
            Self::Wcs56 => "G56",
            Self::Wcs57 => "G57",
            Self::Wcs58 => "G58",
            Self::Wcs59 => "G59",
            Self::SpindleCw => "M3",
            Self::SpindleCcw => "M4",
            Self::SpindleOff => "M5",
            Self::CoolantMist => "M7",
            Self::CoolantFlood => "M8",
            Self::CoolantOff => "M9",
            Self::Stop => "M0",
            Self::OptionalStop => "M1",
            Self::ProgramEnd => "M2",
            Self::ProgramEndRewind => "M30",
        }
    }

    /// The modal group this code belongs to.
    pub fn group(&self) -> Group {
        match self {
            Self::Rapid | Self::Linear | Self::CircularCw | Self::CircularCcw => Group::Motion,
            Self::PlaneXy | Self::PlaneXz | Self::PlaneYz => Group::Plane,
            Self::Absolute | Self::Incremental => Group::Distance,
            Self::InverseTime | Self::UnitsPerMinute => Group::RateMode,
            Self::Inches | Self::Millimeters => Group::Units,
            Self::CutterCompOff => Group::CutterComp,
            Self::ToolLengthOff => Group::ToolLength,
            Self::Wcs54
            | Self::Wcs55
            | Self::Wcs56
            | Self::Wcs57
            | Self::Wcs58
            | Self::Wcs59 => Group::WorkCoordinates,
            Self::SpindleCw | Self::SpindleCcw | Self::SpindleOff => Group::Spindle,
            Self::CoolantMist | Self::CoolantFlood | Self::CoolantOff => Group::Coolant,
            Self::Stop | Self::OptionalStop | Self::ProgramEnd | Self::ProgramEndRewind => {
                Group::Stopping
            }
        }
    }

    /// Look up the mode for a `(letter, integer code)` pair.
    ///
    /// Returns `None` for every unsupported pair, including structurally
    /// valid codes this tool deliberately rejects (G41/G42, G43/G44, G61/G64,
    /// G98/G99, M6, M60). The caller turns `None` into an `UnsupportedCode`
    /// error carrying the source position.
    pub fn find(letter: char, number: i32) -> Option<Mode> {
        match (letter, number) {
            ('G', 0) => Some(Self::Rapid),
            ('G', 1) => Some(Self::Linear),
            ('G', 2) => Some(Self::CircularCw),
            ('G', 3) => Some(Self::CircularCcw),
            ('G', 17) => Some(Self::PlaneXy),
            ('G', 18) => Some(Self::PlaneXz),
            ('G', 19) => Some(Self::PlaneYz),
            ('G', 90) => Some(Self::Absolute),
            ('G', 91) => Some(Self::Incremental),
            ('G', 93) => Some(Self::InverseTime),
            ('G', 94) => Some(Self::UnitsPerMinute),
            ('G', 20) => Some(Self::Inches),
            ('G', 21) => Some(Self::Millimeters),
            ('G', 40) => Some(Self::CutterCompOff),
            ('G', 49) => Some(Self::ToolLengthOff),
            ('G', 54) => Some(Self::Wcs54),
            ('G', 55) => Some(Self::Wcs55),
            ('G', 56) => Some(Self::Wcs56),
            ('G', 57) => Some(Self::Wcs57),
            ('G', 58) => Some(Self::Wcs58),
            ('G', 59) => Some(Self::Wcs59),
            ('M', 3) => Some(Self::SpindleCw),
            ('M', 4) => Some(Self::SpindleCcw),
            ('M', 5) => Some(Self::SpindleOff),
            ('M', 7) => Some(Self::CoolantMist),
            ('M', 8) => Some(Self::CoolantFlood),
            ('M', 9) => Some(Self::CoolantOff),
            ('M', 0) => Some(Self::Stop),
            ('M', 1) => Some(Self::OptionalStop),
            ('M', 2) => Some(Self::ProgramEnd),
            ('M', 30) => Some(Self::ProgramEndRewind),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Axis and parameter letters.
///
/// Persistent axes carry forward across lines under sequential merge;
/// transient ones apply only to the line that sets them. Declaration order is
/// the canonical rendering order for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// N line number
    LineNumber,
    /// F feed rate
    Feed,
    /// S spindle speed
    Speed,
    /// X position
    X,
    /// Y position
    Y,
    /// Z position
    Z,
    /// I arc center offset
    I,
    /// J arc center offset
    J,
    /// K arc center offset
    K,
    /// R radius
    Radius,
    /// L loop count or G10 register number
    Loop,
    /// P parameter address
    Param,
    /// T tool selection
    Tool,
}

impl Axis {
    /// The G-code letter for this axis or parameter.
    pub fn letter(&self) -> char {
        match self {
            Self::LineNumber => 'N',
            Self::Feed => 'F',
            Self::Speed => 'S',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
            Self::I => 'I',
            Self::J => 'J',
            Self::K => 'K',
            Self::Radius => 'R',
            Self::Loop => 'L',
            Self::Param => 'P',
            Self::Tool => 'T',
        }
    }

    /// Whether the value carries forward to subsequent lines.
    pub fn persistent(&self) -> bool {
        matches!(
            self,
            Self::LineNumber | Self::Feed | Self::Speed | Self::X | Self::Y | Self::Z
        )
    }

    /// Look up the axis for a code letter.
    pub fn from_letter(letter: char) -> Option<Axis> {
        match letter {
            'N' => Some(Self::LineNumber),
            'F' => Some(Self::Feed),
            'S' => Some(Self::Speed),
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            'I' => Some(Self::I),
            'J' => Some(Self::J),
            'K' => Some(Self::K),
            'R' => Some(Self::Radius),
            'L' => Some(Self::Loop),
            'P' => Some(Self::Param),
            'T' => Some(Self::Tool),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
