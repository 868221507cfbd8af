//! Table and polygon file I/O for the `jitter` subcommand.
//!
//! - Points: CSV with float columns `x`, `y`; an empty cell marks a missing point.
//! - Polygons: JSON `{"crs": "...", "polygons": [{"exterior": [[x, y], ...], "interiors": [...]}]}`.
//! - Output: CSV, or Parquet when the path ends in `.parquet`, with columns
//!   `x`, `y`, `polygon` (all nullable).

use anyhow::{Context, Result};
use polars::prelude::*;
use polyscatter::{Polygon, PolygonLayer, Vec2};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// On-disk polygon layer.
#[derive(Debug, Deserialize, Serialize)]
pub struct PolygonFile {
    pub crs: String,
    pub polygons: Vec<PolygonRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PolygonRecord {
    pub exterior: Vec<[f64; 2]>,
    #[serde(default)]
    pub interiors: Vec<Vec<[f64; 2]>>,
}

fn ring(coords: &[[f64; 2]]) -> Vec<Vec2> {
    coords.iter().map(|&[x, y]| Vec2::new(x, y)).collect()
}

impl PolygonFile {
    /// Validate every record into a `Polygon`, keeping file order.
    pub fn into_layer(self) -> Result<PolygonLayer> {
        let polygons = self
            .polygons
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                let holes: Vec<Vec<Vec2>> = rec.interiors.iter().map(|r| ring(r)).collect();
                Polygon::new(&ring(&rec.exterior), &holes)
                    .with_context(|| format!("polygon record {i}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(PolygonLayer {
            crs: self.crs,
            polygons,
        })
    }
}

pub fn read_polygons(path: &Path) -> Result<PolygonLayer> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: PolygonFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing polygons from {}", path.display()))?;
    file.into_layer()
}

pub fn read_points(path: &Path) -> Result<Vec<Option<Vec2>>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x/y columns from {}", path.display()))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    let points = xs
        .into_iter()
        .zip(ys.into_iter())
        .map(|xy| match xy {
            (Some(x), Some(y)) => Some(Vec2::new(x, y)),
            _ => None,
        })
        .collect();
    Ok(points)
}

pub fn write_points(
    path: &Path,
    points: &[Option<Vec2>],
    assignments: &[Option<usize>],
) -> Result<()> {
    let xs: Vec<Option<f64>> = points.iter().map(|p| p.map(|p| p.x)).collect();
    let ys: Vec<Option<f64>> = points.iter().map(|p| p.map(|p| p.y)).collect();
    let polygon: Vec<Option<u32>> = assignments.iter().map(|a| a.map(|i| i as u32)).collect();
    let mut df = df!("x" => xs, "y" => ys, "polygon" => polygon)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let is_parquet = path.extension().is_some_and(|e| e == "parquet");
    if is_parquet {
        ParquetWriter::new(&mut file).finish(&mut df)?;
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn polygon_file_parses_and_validates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polys.json");
        std::fs::write(
            &path,
            r#"{"crs": "EPSG:3857", "polygons": [
                {"exterior": [[0, 0], [2, 0], [2, 2], [0, 2]]},
                {"exterior": [[3, 0], [5, 0], [5, 2], [3, 2], [3, 0]], "interiors": []}
            ]}"#,
        )
        .unwrap();
        let layer = read_polygons(&path).unwrap();
        assert_eq!(layer.crs, "EPSG:3857");
        assert_eq!(layer.polygons.len(), 2);
        assert!((layer.polygons[1].area() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn bad_polygon_record_names_its_index() {
        let file = PolygonFile {
            crs: "EPSG:3857".into(),
            polygons: vec![
                PolygonRecord {
                    exterior: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
                    interiors: vec![],
                },
                PolygonRecord {
                    exterior: vec![[0.0, 0.0], [1.0, 0.0]],
                    interiors: vec![],
                },
            ],
        };
        let err = file.into_layer().unwrap_err();
        assert!(format!("{err:#}").contains("polygon record 1"));
    }

    #[test]
    fn points_csv_keeps_missing_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pts.csv");
        std::fs::write(&path, "x,y\n1.0,1.0\n,\n4.5,0.5\n").unwrap();
        let pts = read_points(&path).unwrap();
        assert_eq!(
            pts,
            vec![Some(Vec2::new(1.0, 1.0)), None, Some(Vec2::new(4.5, 0.5))]
        );
    }

    #[test]
    fn written_csv_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/jittered.csv");
        let pts = vec![Some(Vec2::new(0.25, 1.5)), None];
        write_points(&path, &pts, &[Some(0), None]).unwrap();
        assert_eq!(read_points(&path).unwrap(), pts);
    }
}
