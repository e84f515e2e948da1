use crate::bounds::{BoundsSpec, MAX_LENGTH};
use crate::error::{BoundsError, Result};
use crate::filter::RecordFilter;

use std::path::{Path, PathBuf};

/// Default directory for filtered output.
pub const DEFAULT_OUTPUT_DIR: &str = "filtered";

/// User-facing filter settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    /// GC content in percent.
    pub gc_bounds: BoundsSpec,
    /// Sequence length in bases.
    pub length_bounds: BoundsSpec,
    /// Minimum mean Phred quality.
    pub quality_threshold: f64,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            gc_bounds: BoundsSpec::Range(0.0, 100.0),
            length_bounds: BoundsSpec::Range(0.0, MAX_LENGTH),
            quality_threshold: 0.0,
        }
    }
}

impl FilterOptions {
    pub fn gc_bounds(mut self, spec: impl Into<BoundsSpec>) -> Self {
        self.gc_bounds = spec.into();
        self
    }

    pub fn length_bounds(mut self, spec: impl Into<BoundsSpec>) -> Self {
        self.length_bounds = spec.into();
        self
    }

    pub fn quality_threshold(mut self, q: f64) -> Self {
        self.quality_threshold = q;
        self
    }

    /// Normalize bounds and check the threshold.
    pub fn compile(&self) -> Result<RecordFilter> {
        if !self.quality_threshold.is_finite() {
            return Err(BoundsError::Threshold(self.quality_threshold).into());
        }
        Ok(RecordFilter {
            gc: self.gc_bounds.normalize()?,
            length: self.length_bounds.normalize()?,
            min_quality: self.quality_threshold,
        })
    }
}

/// Where filtered records go: a file `name` inside `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub dir: PathBuf,
    pub name: String,
}

impl Destination {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// `name` inside the default `filtered` directory.
    pub fn in_default_dir(name: impl Into<String>) -> Self {
        Self::new(DEFAULT_OUTPUT_DIR, name)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Directory the output file lands in; differs from `dir` when `name`
    /// carries sub-directories.
    pub fn output_dir(&self) -> PathBuf {
        self.path()
            .parent()
            .map_or_else(|| self.dir.clone(), Path::to_path_buf)
    }

    pub fn is_gzip(&self) -> bool {
        Path::new(&self.name).extension().and_then(|s| s.to_str()) == Some("gz")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Interval;

    #[test]
    fn defaults_filter_nothing() {
        let f = FilterOptions::default().compile().unwrap();
        assert_eq!(f.gc, Interval { lo: 0.0, hi: 100.0 });
        assert_eq!(f.length.hi, MAX_LENGTH);
        assert_eq!(f.min_quality, 0.0);
    }

    #[test]
    fn scalar_bounds_compile_to_zero_based_ranges() {
        let scalar = FilterOptions::default()
            .gc_bounds(60.0)
            .length_bounds(30.0)
            .compile()
            .unwrap();
        let ranged = FilterOptions::default()
            .gc_bounds((0.0, 60.0))
            .length_bounds((0.0, 30.0))
            .compile()
            .unwrap();
        assert_eq!(scalar, ranged);
    }

    #[test]
    fn bad_threshold_is_invalid_bounds() {
        let err = FilterOptions::default()
            .quality_threshold(f64::NAN)
            .compile()
            .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidBounds(BoundsError::Threshold(_))));
    }

    #[test]
    fn destination_layout() {
        let d = Destination::in_default_dir("out.fastq");
        assert_eq!(d.path(), Path::new("filtered").join("out.fastq"));
        assert!(!d.is_gzip());
        assert!(Destination::new("x", "a.fq.gz").is_gzip());
        assert_eq!(d.output_dir(), Path::new("filtered"));
        let nested = Destination::new("filtered", "run1/out.fastq");
        assert_eq!(nested.output_dir(), Path::new("filtered").join("run1"));
    }
}
