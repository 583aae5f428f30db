use std::path::{Path, PathBuf};

use crate::document::DocumentStats;

/// Outcome of one successfully simplified file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original_bytes: u64,
    pub simplified_bytes: u64,
    pub stats: DocumentStats,
}

impl FileReport {
    pub fn reduction_percent(&self) -> f64 {
        reduction_percent(self.original_bytes, self.simplified_bytes)
    }

    /// One-line size summary, e.g. `zone_7a.geojson: 1,024 -> 512 bytes (50.0% reduction)`
    pub fn summary(&self) -> String {
        format!(
            "{}: {} -> {} bytes ({:.1}% reduction)",
            file_label(&self.input),
            group_thousands(self.original_bytes),
            group_thousands(self.simplified_bytes),
            self.reduction_percent()
        )
    }

    /// Vertex and coverage detail for verbose output
    pub fn detail(&self) -> String {
        format!(
            "{} features ({} simplified), {} -> {} vertices, {:.1}% of area kept",
            self.stats.features,
            self.stats.simplified,
            group_thousands(self.stats.coords_before as u64),
            group_thousands(self.stats.coords_after as u64),
            self.stats.area_ratio() * 100.0
        )
    }
}

/// A file that could not be processed, with the reason
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub input: PathBuf,
    pub reason: String,
}

/// Totals across a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

impl BatchSummary {
    pub fn total_original(&self) -> u64 {
        self.reports.iter().map(|r| r.original_bytes).sum()
    }

    pub fn total_simplified(&self) -> u64 {
        self.reports.iter().map(|r| r.simplified_bytes).sum()
    }

    pub fn overall_reduction(&self) -> f64 {
        reduction_percent(self.total_original(), self.total_simplified())
    }

    /// Mean output size over the successful files
    pub fn average_bytes(&self) -> f64 {
        if self.reports.is_empty() {
            0.0
        } else {
            self.total_simplified() as f64 / self.reports.len() as f64
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.reports.len() + self.failures.len()
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Overall: {} -> {} bytes ({:.1}% reduction)",
                group_thousands(self.total_original()),
                group_thousands(self.total_simplified()),
                self.overall_reduction()
            ),
            format!(
                "Total size: {:.1} MB",
                self.total_simplified() as f64 / (1024.0 * 1024.0)
            ),
            format!("Average file size: {:.1} KB", self.average_bytes() / 1024.0),
        ];
        if self.has_failures() {
            lines.push(format!(
                "Failed: {} of {} files",
                self.failures.len(),
                self.attempted()
            ));
        }
        lines
    }
}

fn reduction_percent(before: u64, after: u64) -> f64 {
    if before == 0 {
        0.0
    } else {
        (1.0 - after as f64 / before as f64) * 100.0
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `1234567` -> `"1,234,567"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
