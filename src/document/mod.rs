//! Reading, simplifying and writing whole GeoJSON documents

pub mod convert;

use geojson::{Feature, GeoJson};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SimplificationConfig;
use crate::domain::Geometry;
use crate::processor::simplify;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid GeoJSON")]
    Parse(#[from] geojson::Error),
    #[error("failed to serialize GeoJSON")]
    Serialize(#[from] serde_json::Error),
    #[error("position has {0} value(s), expected longitude and latitude")]
    InvalidPosition(usize),
}

/// Counts gathered while simplifying a document
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DocumentStats {
    /// Features (or bare geometries) visited
    pub features: usize,
    /// Geometries actually simplified (polygons and multi-polygons)
    pub simplified: usize,
    pub coords_before: usize,
    pub coords_after: usize,
    pub area_before: f64,
    pub area_after: f64,
}

impl DocumentStats {
    /// Share of the input area still covered, 1.0 when there was nothing to cover
    pub fn area_ratio(&self) -> f64 {
        if self.area_before > 0.0 {
            self.area_after / self.area_before
        } else {
            1.0
        }
    }
}

impl AddAssign for DocumentStats {
    fn add_assign(&mut self, other: Self) {
        self.features += other.features;
        self.simplified += other.simplified;
        self.coords_before += other.coords_before;
        self.coords_after += other.coords_after;
        self.area_before += other.area_before;
        self.area_after += other.area_after;
    }
}

pub fn read_document(path: &Path) -> Result<GeoJson, DocumentError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.parse::<GeoJson>()?)
}

/// Simplify every polygonal geometry in `document`
///
/// Features of a collection are processed in parallel. Properties, ids and
/// foreign members are left alone; a simplified geometry loses its `bbox`,
/// which no longer describes it exactly.
pub fn simplify_document(
    document: &mut GeoJson,
    config: &SimplificationConfig,
) -> Result<DocumentStats, DocumentError> {
    match document {
        GeoJson::FeatureCollection(collection) => {
            let per_feature = collection
                .features
                .par_iter_mut()
                .map(|feature| simplify_feature(feature, config))
                .collect::<Result<Vec<_>, _>>()?;

            let mut stats = DocumentStats::default();
            for s in per_feature {
                stats += s;
            }
            Ok(stats)
        }
        GeoJson::Feature(feature) => simplify_feature(feature, config),
        GeoJson::Geometry(geometry) => simplify_geometry(geometry, config),
    }
}

fn simplify_feature(
    feature: &mut Feature,
    config: &SimplificationConfig,
) -> Result<DocumentStats, DocumentError> {
    match feature.geometry.as_mut() {
        Some(geometry) => simplify_geometry(geometry, config),
        None => Ok(DocumentStats {
            features: 1,
            ..Default::default()
        }),
    }
}

fn simplify_geometry(
    geometry: &mut geojson::Geometry,
    config: &SimplificationConfig,
) -> Result<DocumentStats, DocumentError> {
    let original = convert::to_geometry(&geometry.value)?;

    let mut stats = DocumentStats {
        features: 1,
        coords_before: original.coord_count(),
        area_before: original.area(),
        ..Default::default()
    };

    let passthrough = matches!(original, Geometry::Other(_));
    let result = simplify(original, config);

    stats.coords_after = result.coord_count();
    stats.area_after = result.area();
    if !passthrough {
        stats.simplified = 1;
        geometry.bbox = None;
    }

    geometry.value = convert::to_value(result);
    Ok(stats)
}

/// Serialize `document`, compact unless `pretty`
pub fn render_document(document: &GeoJson, pretty: bool) -> Result<String, DocumentError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(rendered)
}

/// Write `document` to `path` and return the number of bytes written
pub fn write_document(path: &Path, document: &GeoJson, pretty: bool) -> Result<u64, DocumentError> {
    let rendered = render_document(document, pretty)?;
    let write_err = |source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(rendered.as_bytes()).map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    Ok(rendered.len() as u64)
}
