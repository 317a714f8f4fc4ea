// Fri Oct 16 2026 - Alex

use crate::decode::cta::CtaFeatures;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OverrideFlag {
    #[serde(rename = "SET_EDID14")]
    SetEdid14,
    #[serde(rename = "SET_RGB444")]
    SetRgb444,
    #[serde(rename = "NO_SRGB")]
    NoSrgb,
    #[serde(rename = "NO_EXTENSIONS")]
    NoExtensions,
    #[serde(rename = "NO_CTA_VSD_HDMI")]
    NoCtaVsdHdmi,
    #[serde(rename = "NO_CTA_VSD_HDMIFORUM")]
    NoCtaVsdHdmiForum,
    #[serde(rename = "NO_CTA_UNDERSCAN")]
    NoCtaUnderscan,
    #[serde(rename = "NO_CTA_YCBCR")]
    NoCtaYcbcr,
    #[serde(rename = "NO_CTA_Y444")]
    NoCtaY444,
    #[serde(rename = "NO_CTA_Y422")]
    NoCtaY422,
}

impl OverrideFlag {
    /// Evaluation order.
    pub const ALL: [OverrideFlag; 10] = [
        OverrideFlag::SetEdid14,
        OverrideFlag::SetRgb444,
        OverrideFlag::NoSrgb,
        OverrideFlag::NoExtensions,
        OverrideFlag::NoCtaVsdHdmi,
        OverrideFlag::NoCtaVsdHdmiForum,
        OverrideFlag::NoCtaUnderscan,
        OverrideFlag::NoCtaYcbcr,
        OverrideFlag::NoCtaY444,
        OverrideFlag::NoCtaY422,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OverrideFlag::SetEdid14 => "SET_EDID14",
            OverrideFlag::SetRgb444 => "SET_RGB444",
            OverrideFlag::NoSrgb => "NO_SRGB",
            OverrideFlag::NoExtensions => "NO_EXTENSIONS",
            OverrideFlag::NoCtaVsdHdmi => "NO_CTA_VSD_HDMI",
            OverrideFlag::NoCtaVsdHdmiForum => "NO_CTA_VSD_HDMIFORUM",
            OverrideFlag::NoCtaUnderscan => "NO_CTA_UNDERSCAN",
            OverrideFlag::NoCtaYcbcr => "NO_CTA_YCBCR",
            OverrideFlag::NoCtaY444 => "NO_CTA_Y444",
            OverrideFlag::NoCtaY422 => "NO_CTA_Y422",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OverrideFlag::SetEdid14 => "Force EDID version 1.4",
            OverrideFlag::SetRgb444 => "Advertise RGB 4:4:4 only",
            OverrideFlag::NoSrgb => "Clear the sRGB default color space flag",
            OverrideFlag::NoExtensions => "Remove all extension blocks",
            OverrideFlag::NoCtaVsdHdmi => "Zero the HDMI Licensing vendor block",
            OverrideFlag::NoCtaVsdHdmiForum => "Zero the HDMI Forum vendor block",
            OverrideFlag::NoCtaUnderscan => "Clear CTA underscan-by-default",
            OverrideFlag::NoCtaYcbcr => "Clear CTA YCbCr 4:4:4 and 4:2:2 support",
            OverrideFlag::NoCtaY444 => "Clear CTA YCbCr 4:4:4 support",
            OverrideFlag::NoCtaY422 => "Clear CTA YCbCr 4:2:2 support",
        }
    }

    pub fn bit(&self) -> OverrideSet {
        match self {
            OverrideFlag::SetEdid14 => OverrideSet::SET_EDID14,
            OverrideFlag::SetRgb444 => OverrideSet::SET_RGB444,
            OverrideFlag::NoSrgb => OverrideSet::NO_SRGB,
            OverrideFlag::NoExtensions => OverrideSet::NO_EXTENSIONS,
            OverrideFlag::NoCtaVsdHdmi => OverrideSet::NO_CTA_VSD_HDMI,
            OverrideFlag::NoCtaVsdHdmiForum => OverrideSet::NO_CTA_VSD_HDMIFORUM,
            OverrideFlag::NoCtaUnderscan => OverrideSet::NO_CTA_UNDERSCAN,
            OverrideFlag::NoCtaYcbcr => OverrideSet::NO_CTA_YCBCR,
            OverrideFlag::NoCtaY444 => OverrideSet::NO_CTA_Y444,
            OverrideFlag::NoCtaY422 => OverrideSet::NO_CTA_Y422,
        }
    }

    /// CTA byte 3 bits this flag clears, if it is a CTA feature flag.
    pub fn cta_feature_mask(&self) -> Option<CtaFeatures> {
        match self {
            OverrideFlag::NoCtaUnderscan => Some(CtaFeatures::UNDERSCAN),
            OverrideFlag::NoCtaYcbcr => Some(CtaFeatures::YCBCR_444 | CtaFeatures::YCBCR_422),
            OverrideFlag::NoCtaY444 => Some(CtaFeatures::YCBCR_444),
            OverrideFlag::NoCtaY422 => Some(CtaFeatures::YCBCR_422),
            _ => None,
        }
    }
}

impl fmt::Display for OverrideFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OverrideFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        OverrideFlag::ALL
            .iter()
            .copied()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown override '{}', expected one of: {}",
                    s,
                    OverrideFlag::ALL.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
                )
            })
    }
}

bitflags! {
    /// The enabled overrides for one display.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OverrideSet: u16 {
        const SET_EDID14 = 1 << 0;
        const SET_RGB444 = 1 << 1;
        const NO_SRGB = 1 << 2;
        const NO_EXTENSIONS = 1 << 3;
        const NO_CTA_VSD_HDMI = 1 << 4;
        const NO_CTA_VSD_HDMIFORUM = 1 << 5;
        const NO_CTA_UNDERSCAN = 1 << 6;
        const NO_CTA_YCBCR = 1 << 7;
        const NO_CTA_Y444 = 1 << 8;
        const NO_CTA_Y422 = 1 << 9;
    }
}

impl OverrideSet {
    pub fn has(&self, flag: OverrideFlag) -> bool {
        self.contains(flag.bit())
    }

    pub fn enable(&mut self, flag: OverrideFlag) {
        self.insert(flag.bit());
    }

    /// Enabled flags in evaluation order.
    pub fn flags(&self) -> impl Iterator<Item = OverrideFlag> + '_ {
        OverrideFlag::ALL.into_iter().filter(move |f| self.has(*f))
    }

    /// Union of the CTA feature bits the enabled flags clear. Each bit is
    /// governed only by the flags that name it.
    pub fn cta_features_cleared(&self) -> CtaFeatures {
        self.flags()
            .filter_map(|f| f.cta_feature_mask())
            .fold(CtaFeatures::empty(), |acc, m| acc | m)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.flags().map(|f| f.name()).collect()
    }
}

impl FromIterator<OverrideFlag> for OverrideSet {
    fn from_iter<I: IntoIterator<Item = OverrideFlag>>(iter: I) -> Self {
        let mut set = OverrideSet::empty();
        for flag in iter {
            set.enable(flag);
        }
        set
    }
}

impl Serialize for OverrideSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.flags())
    }
}
