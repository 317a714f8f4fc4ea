// Sat Oct 17 2026 - Alex

use crate::decode::{
    BaseBlock, CtaBlockKind, CtaDataBlock, CtaExtension, Descriptor, Edid, Extension, ExtensionBody,
    VendorBlock, VideoInput,
};
use crate::diff::marker::rows;
use crate::pipeline::DisplayReport;

pub struct ReportFormatter {
    indent: usize,
    bytes_per_row: usize,
    include_summary: bool,
    include_diff: bool,
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self {
            indent: 2,
            bytes_per_row: 16,
            include_summary: true,
            include_diff: true,
        }
    }

    pub fn with_bytes_per_row(mut self, bytes: usize) -> Self {
        self.bytes_per_row = bytes.max(1);
        self
    }

    pub fn with_summary(mut self, include: bool) -> Self {
        self.include_summary = include;
        self
    }

    pub fn with_diff(mut self, include: bool) -> Self {
        self.include_diff = include;
        self
    }

    fn pad(&self, depth: usize) -> String {
        " ".repeat(self.indent * depth)
    }

    pub fn format_report(&self, report: &DisplayReport) -> String {
        let mut lines = vec![
            format!(
                "{} (vendor 0x{:x}, product 0x{:x})",
                report.display_name, report.ids.vendor_id, report.ids.product_id
            ),
            format!("{}override path: {}", self.pad(1), report.override_path.display()),
        ];

        if self.include_summary {
            lines.push(self.format_summary(&report.summary));
        }

        if report.patches.is_empty() {
            lines.push(format!("{}no patches", self.pad(1)));
        } else {
            lines.push(format!("{}patches:", self.pad(1)));
            for patch in report.patches.iter() {
                lines.push(format!("{}{}", self.pad(2), patch));
            }
        }
        for skipped in &report.skipped {
            lines.push(format!("{}skipped {}: {}", self.pad(1), skipped.flag, skipped.reason));
        }

        lines.push(format!("{}new EDID:", self.pad(1)));
        for row in rows(&report.patched_hex, self.bytes_per_row) {
            lines.push(format!("{}{}", self.pad(2), row));
        }
        if self.include_diff {
            lines.push(format!("{}diff:", self.pad(1)));
            for row in rows(&report.diff, self.bytes_per_row) {
                lines.push(format!("{}{}", self.pad(2), row));
            }
        }
        lines.join("\n")
    }

    pub fn format_summary(&self, edid: &Edid) -> String {
        let mut lines = vec![self.format_base(&edid.base)];
        for ext in &edid.extensions {
            lines.push(self.format_extension(ext));
        }
        if edid.extensions_truncated {
            lines.push(format!(
                "{}warning: {} extension(s) declared, {} present",
                self.pad(1),
                edid.base.extension_count,
                edid.extensions.len()
            ));
        }
        lines.join("\n")
    }

    pub fn format_base(&self, base: &BaseBlock) -> String {
        let p = self.pad(1);
        let dpms: Vec<_> = base.dpms.iter_names().map(|(name, _)| name).collect();
        let mut lines = vec![
            format!(
                "{}EDID {} {} product 0x{:04X}{}",
                p,
                base.version_string(),
                base.manufacturer,
                base.product_code,
                checksum_note(base.checksum.valid)
            ),
            format!("{}input: {}", p, format_input(&base.input)),
            format!(
                "{}color format: {} ({})",
                p,
                base.color_format.as_str(),
                base.color_format_index
            ),
            format!(
                "{}DPMS: {}",
                p,
                if dpms.is_empty() { "none".to_string() } else { dpms.join(", ") }
            ),
            format!(
                "{}sRGB default: {}, preferred timing first: {}, continuous timing: {}",
                p, base.srgb, base.preferred_timing_first, base.continuous_timing_gtf_or_default
            ),
        ];
        for descriptor in &base.descriptors {
            lines.push(self.format_descriptor(descriptor, 2));
        }
        lines.push(format!("{}extensions: {}", p, base.extension_count));
        lines.join("\n")
    }

    pub fn format_descriptor(&self, descriptor: &Descriptor, depth: usize) -> String {
        let p = self.pad(depth);
        match descriptor {
            Descriptor::DetailedTiming(t) => format!("{}0x{:02X} DTD {}", p, t.offset, t),
            Descriptor::Monitor(m) => match &m.text {
                Some(text) => format!("{}0x{:02X} {}: {}", p, m.offset, m.kind.as_str(), text),
                None => format!("{}0x{:02X} {}", p, m.offset, m.kind.as_str()),
            },
        }
    }

    pub fn format_extension(&self, ext: &Extension) -> String {
        let header = format!(
            "{}block {} @0x{:03X}: {} (tag 0x{:02X}){}",
            self.pad(1),
            ext.index,
            ext.offset,
            ext.kind.as_str(),
            ext.tag,
            checksum_note(ext.checksum.valid)
        );
        match &ext.body {
            ExtensionBody::Cta(cta) => format!("{}\n{}", header, self.format_cta(cta)),
            ExtensionBody::Raw(_) => header,
        }
    }

    pub fn format_cta(&self, cta: &CtaExtension) -> String {
        let p = self.pad(2);
        let features: Vec<_> = cta.features.iter_names().map(|(name, _)| name).collect();
        let mut lines = vec![format!(
            "{}revision {}, DTDs at 0x{:02X}, native DTDs {}, features: {}",
            p,
            cta.revision,
            cta.dtd_offset,
            cta.native_dtd_count,
            if features.is_empty() { "none".to_string() } else { features.join(", ") }
        )];
        for block in &cta.data_blocks {
            lines.push(format!("{}{}", p, format_data_block(block)));
        }
        for descriptor in &cta.descriptors {
            lines.push(self.format_descriptor(descriptor, 3));
        }
        if cta.incomplete {
            lines.push(format!("{}data block collection overruns the block", p));
        }
        lines.join("\n")
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn checksum_note(valid: bool) -> &'static str {
    if valid {
        ""
    } else {
        " [checksum mismatch]"
    }
}

fn format_input(input: &VideoInput) -> String {
    match input {
        VideoInput::Analog => "analog".to_string(),
        VideoInput::Digital { bit_depth, interface } => match bit_depth {
            Some(bits) => format!("digital, {} bpc, {:?}", bits, interface),
            None => format!("digital, {:?}", interface),
        },
        VideoInput::LegacyDigital { dfp1_compatible } => {
            format!("digital (pre-1.4), DFP 1.x compatible: {}", dfp1_compatible)
        }
    }
}

pub fn format_data_block(block: &CtaDataBlock) -> String {
    let head = format!("0x{:03X} tag {} len {}", block.offset, block.tag, block.length);
    let body = match &block.kind {
        CtaBlockKind::Audio { descriptors } => format!("audio, {} SAD(s)", descriptors.len()),
        CtaBlockKind::Video { svds } => {
            let vics: Vec<String> = svds
                .iter()
                .map(|s| if s.native { format!("{}*", s.vic) } else { s.vic.to_string() })
                .collect();
            format!("video, VICs {}", vics.join(" "))
        }
        CtaBlockKind::VendorSpecific(vendor) => format_vendor(vendor),
        CtaBlockKind::SpeakerAllocation { .. } => "speaker allocation".to_string(),
        CtaBlockKind::VesaDtc { .. } => "VESA display transfer characteristic".to_string(),
        CtaBlockKind::Extended { extended_tag, .. } => match extended_tag {
            Some(t) => format!("extended tag {}", t),
            None => "extended".to_string(),
        },
        CtaBlockKind::Reserved { tag, .. } => format!("reserved tag {}", tag),
    };
    if block.incomplete {
        format!("{}: {} (truncated)", head, body)
    } else {
        format!("{}: {}", head, body)
    }
}

fn format_vendor(vendor: &VendorBlock) -> String {
    match vendor {
        VendorBlock::HdmiLicensing(hdmi) => {
            let mut s = "HDMI 1.4 VSDB".to_string();
            if let Some(addr) = hdmi.physical_address {
                s.push_str(&format!(", address {}", addr));
            }
            if let Some(clock) = hdmi.max_tmds_clock_mhz {
                s.push_str(&format!(", max TMDS {} MHz", clock));
            }
            s
        }
        VendorBlock::HdmiForum(forum) => {
            let mut s = "HDMI Forum VSDB".to_string();
            if let Some(version) = forum.version {
                s.push_str(&format!(" v{}", version));
            }
            if let Some(rate) = forum.max_tmds_rate_mhz {
                s.push_str(&format!(", max TMDS {} MHz", rate));
            }
            if let Some(range) = forum.vrr_range {
                s.push_str(&format!(", VRR {}-{} Hz", range.min_hz, range.max_hz));
            }
            s
        }
        VendorBlock::Other { oui: Some(oui), .. } => format!("vendor-specific, OUI {}", oui),
        VendorBlock::Other { oui: None, .. } => "vendor-specific, no OUI".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatchConfig;
    use crate::edid::{fixtures, hex, EdidBytes};
    use crate::pipeline::{process_display, DisplayIds, DisplayInput};

    #[test]
    fn test_report_text() {
        let input = DisplayInput::new(
            hex::encode(&fixtures::two_block_edid()),
            DisplayIds::new(0x10ac, 0xa0a1),
        );
        let report = process_display(&input, &PatchConfig::default()).unwrap();
        let text = ReportFormatter::new().format_report(&report);
        assert!(text.starts_with("TESTMON (vendor 0x10ac, product 0xa0a1)"));
        assert!(text.contains("EDID 1.4 DEL"));
        assert!(text.contains("Display Name: TESTMON"));
        assert!(text.contains("CTA/CEA-861"));
        assert!(text.contains("new EDID:"));
        assert!(text.contains("00FFFFFFFFFFFF00"));
    }

    #[test]
    fn test_summary_lists_vendor_blocks() {
        let bytes = EdidBytes::new(fixtures::with_extensions(&[fixtures::full_cta_block()])).unwrap();
        let edid = Edid::decode(&bytes).unwrap();
        let text = ReportFormatter::new().format_summary(&edid);
        assert!(text.contains("HDMI 1.4 VSDB"));
        assert!(text.contains("HDMI Forum VSDB"));
        assert!(text.contains("video, VICs"));
    }

    #[test]
    fn test_without_diff() {
        let input = DisplayInput::new(hex::encode(&fixtures::base_block()), DisplayIds::default());
        let report = process_display(&input, &PatchConfig::default()).unwrap();
        let text = ReportFormatter::new().with_diff(false).format_report(&report);
        assert!(!text.contains("diff:"));
    }
}
