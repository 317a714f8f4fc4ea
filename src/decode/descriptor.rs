// Thu Oct 15 2026 - Alex

use serde::Serialize;
use std::fmt;

pub const DESCRIPTOR_SIZE: usize = 18;
pub const PAYLOAD_START: usize = 5;

/// One 18-byte slot, classified by its pixel clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "descriptor", rename_all = "snake_case")]
pub enum Descriptor {
    DetailedTiming(DetailedTiming),
    Monitor(MonitorDescriptor),
}

impl Descriptor {
    /// `slot` must be at least 18 bytes; `offset` is its absolute position.
    pub fn decode(slot: &[u8], offset: usize) -> Option<Self> {
        let slot: &[u8; DESCRIPTOR_SIZE] = slot.get(..DESCRIPTOR_SIZE)?.try_into().ok()?;
        let pixel_clock = u16::from_le_bytes([slot[0], slot[1]]);
        if pixel_clock != 0 {
            return Some(Descriptor::DetailedTiming(DetailedTiming::from_slot(
                slot,
                offset,
            )));
        }
        Some(Descriptor::Monitor(MonitorDescriptor::from_slot(slot, offset)))
    }

    pub fn offset(&self) -> usize {
        match self {
            Descriptor::DetailedTiming(d) => d.offset,
            Descriptor::Monitor(m) => m.offset,
        }
    }

    pub fn as_monitor(&self) -> Option<&MonitorDescriptor> {
        match self {
            Descriptor::Monitor(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_timing(&self) -> Option<&DetailedTiming> {
        match self {
            Descriptor::DetailedTiming(d) => Some(d),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetailedTiming {
    pub offset: usize,
    /// Units of 10 kHz.
    pub pixel_clock: u16,
    pub h_active: u16,
    pub h_blank: u16,
    pub v_active: u16,
    pub v_blank: u16,
    pub interlaced: bool,
}

impl DetailedTiming {
    fn from_slot(s: &[u8; DESCRIPTOR_SIZE], offset: usize) -> Self {
        Self {
            offset,
            pixel_clock: u16::from_le_bytes([s[0], s[1]]),
            h_active: s[2] as u16 | (((s[4] & 0xF0) as u16) << 4),
            h_blank: s[3] as u16 | (((s[4] & 0x0F) as u16) << 8),
            v_active: s[5] as u16 | (((s[7] & 0xF0) as u16) << 4),
            v_blank: s[6] as u16 | (((s[7] & 0x0F) as u16) << 8),
            interlaced: s[17] & 0x80 != 0,
        }
    }

    pub fn pixel_clock_khz(&self) -> u32 {
        self.pixel_clock as u32 * 10
    }
}

impl fmt::Display for DetailedTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}{} @ {}.{:02} MHz",
            self.h_active,
            self.v_active,
            if self.interlaced { "i" } else { "" },
            self.pixel_clock / 100,
            self.pixel_clock % 100
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorDescriptorKind {
    SerialNumber,
    UnspecifiedText,
    RangeLimits,
    DisplayName,
    WhitePoint,
    StandardTimingIds,
    ColorManagement,
    CvtCodes,
    AdditionalStandardTiming,
    Dummy,
    ManufacturerReserved(u8),
    Undefined(u8),
}

impl MonitorDescriptorKind {
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            0xFF => Self::SerialNumber,
            0xFE => Self::UnspecifiedText,
            0xFD => Self::RangeLimits,
            0xFC => Self::DisplayName,
            0xFB => Self::WhitePoint,
            0xFA => Self::StandardTimingIds,
            0xF9 => Self::ColorManagement,
            0xF8 => Self::CvtCodes,
            0xF7 => Self::AdditionalStandardTiming,
            0x10 => Self::Dummy,
            0x00..=0x0F => Self::ManufacturerReserved(tag),
            other => Self::Undefined(other),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::SerialNumber | Self::UnspecifiedText | Self::DisplayName
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SerialNumber => "Serial Number",
            Self::UnspecifiedText => "Unspecified Text",
            Self::RangeLimits => "Range Limits",
            Self::DisplayName => "Display Name",
            Self::WhitePoint => "White Point",
            Self::StandardTimingIds => "Standard Timing IDs",
            Self::ColorManagement => "Color Management",
            Self::CvtCodes => "CVT Codes",
            Self::AdditionalStandardTiming => "Additional Standard Timing",
            Self::Dummy => "Dummy",
            Self::ManufacturerReserved(_) => "Manufacturer Reserved",
            Self::Undefined(_) => "Undefined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorDescriptor {
    pub offset: usize,
    pub kind: MonitorDescriptorKind,
    pub payload: [u8; 13],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl MonitorDescriptor {
    fn from_slot(s: &[u8; DESCRIPTOR_SIZE], offset: usize) -> Self {
        let kind = MonitorDescriptorKind::from_tag(s[3]);
        let mut payload = [0u8; 13];
        payload.copy_from_slice(&s[PAYLOAD_START..]);
        let text = kind.is_text().then(|| decode_text(&payload));
        Self {
            offset,
            kind,
            payload,
            text,
        }
    }
}

/// ASCII up to the first newline.
fn decode_text(payload: &[u8]) -> String {
    payload
        .iter()
        .take_while(|&&b| b != 0x0A)
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}
