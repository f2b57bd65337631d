use crate::config::TitleConfig;
use std::collections::HashSet;

/// Stems drawn from a document's titles and subtitles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleDictionary {
    title: HashSet<String>,
    subtitle: HashSet<String>,
}

impl TitleDictionary {
    pub fn new<T, S>(title: T, subtitle: S) -> Self
    where
        T: IntoIterator<Item = String>,
        S: IntoIterator<Item = String>,
    {
        Self {
            title: title.into_iter().collect(),
            subtitle: subtitle.into_iter().collect(),
        }
    }

    pub fn title_stems(&self) -> &HashSet<String> {
        &self.title
    }

    pub fn subtitle_stems(&self) -> &HashSet<String> {
        &self.subtitle
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.subtitle.is_empty()
    }

    /// Title-term score of a sentence given its comparable stems.
    ///
    /// `a·ln(TT+1)/ln(TW+1) + b·ln(MT+1)/ln(MW+1)` over distinct stems, with
    /// the dictionary sizes floored to 1. A sentence sharing no stem with
    /// either set scores exactly 0.
    pub fn score(&self, stems: &[String], coefficients: &TitleConfig) -> f64 {
        let distinct: HashSet<&str> = stems.iter().map(String::as_str).collect();
        let title_hits = distinct.iter().filter(|s| self.title.contains(**s)).count();
        let subtitle_hits = distinct
            .iter()
            .filter(|s| self.subtitle.contains(**s))
            .count();

        if title_hits == 0 && subtitle_hits == 0 {
            return 0.0;
        }

        coefficients.primary * log_ratio(title_hits, self.title.len())
            + coefficients.secondary * log_ratio(subtitle_hits, self.subtitle.len())
    }
}

fn log_ratio(hits: usize, size: usize) -> f64 {
    let size = size.max(1) as f64;
    (hits as f64 + 1.0).ln() / (size + 1.0).ln()
}
