//! SRT serialization

use super::SrtOptions;
use crate::formats::{CaptionFormat, CaptionWriter};
use crate::model::{Caption, CaptionSet};
use crate::time::format_srt;
use crate::utils::errors::Result;

/// SRT writer
///
/// SRT has no language or styling metadata, so one language is written
/// and style overlays are dropped.
#[derive(Debug, Clone, Default)]
pub struct SrtWriter {
    options: SrtOptions,
}

impl SrtWriter {
    /// Create a writer for the default language
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with explicit options
    #[must_use]
    pub const fn with_options(options: SrtOptions) -> Self {
        Self { options }
    }

    fn select<'a>(&self, set: &'a CaptionSet) -> &'a [Caption] {
        let preferred = set.captions(&self.options.language);
        if !preferred.is_empty() {
            return preferred;
        }
        set.iter()
            .map(|(_, captions)| captions)
            .find(|captions| !captions.is_empty())
            .unwrap_or_default()
    }

    fn cue_text(caption: &Caption) -> String {
        // Blank lines would end the block early.
        caption
            .text()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl CaptionWriter for SrtWriter {
    fn format(&self) -> CaptionFormat {
        CaptionFormat::Srt
    }

    fn write(&self, set: &CaptionSet) -> Result<Vec<u8>> {
        let captions = self.select(set);
        let mut out = String::new();

        for (index, caption) in captions.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&format!(
                "{}\n{} --> {}\n",
                index + 1,
                format_srt(caption.start),
                format_srt(caption.end)
            ));
            let text = Self::cue_text(caption);
            if !text.is_empty() {
                out.push_str(&text);
                out.push('\n');
            }
        }

        log::debug!("wrote {} SRT captions", captions.len());
        Ok(out.into_bytes())
    }
}
