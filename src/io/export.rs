//! Exports: the loaded plant document as JSON and the composed scene as CSV.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::ViewerResult;
use crate::geometry::{Drawable, Primitive};

/// Default file name offered for plant exports.
pub const EXPORT_FILE_NAME: &str = "coal-plant-data.json";

/// Column header of the scene manifest.
const MANIFEST_HEADER: &str = "id,name,category,primitive,x,y,z,\
                               width,height,depth,radius,color";

/// Writes `document` to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if file creation or serialization fails.
pub fn export_plant_json(document: &Value, path: &Path) -> ViewerResult<()> {
    let file = File::create(path)?;
    write_plant_json(document, io::BufWriter::new(file))
}

/// Writes `document` as pretty-printed JSON (two-space indent) to any writer.
///
/// The output parses back to a value equal to `document`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_plant_json(document: &Value, mut writer: impl Write) -> ViewerResult<()> {
    serde_json::to_writer_pretty(&mut writer, document).map_err(io::Error::from)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Exports the drawable set as a CSV manifest at `path`.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_manifest_csv(drawables: &[Drawable], path: &Path) -> ViewerResult<()> {
    let file = File::create(path)?;
    write_manifest_csv(drawables, io::BufWriter::new(file))
}

/// Writes one row per drawable: identity, primitive, world-space center
/// and size. Sizes that do not apply to the primitive are left empty.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_manifest_csv(drawables: &[Drawable], writer: impl Write) -> ViewerResult<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(MANIFEST_HEADER.split(',').map(str::trim))?;

    for d in drawables {
        let (width, height, depth, radius) = match d.primitive {
            Primitive::Box {
                width,
                height,
                depth,
            } => (Some(width), Some(height), Some(depth), None),
            Primitive::Cylinder { radius, height, .. } => (None, Some(height), None, Some(radius)),
            Primitive::Sphere { radius, .. } => (None, None, None, Some(radius)),
        };
        let center = d.center();
        wtr.write_record(&[
            d.id.clone(),
            d.name.clone(),
            d.category.to_string(),
            d.primitive.name().to_string(),
            format!("{:.3}", center.x),
            format!("{:.3}", center.y),
            format!("{:.3}", center.z),
            fmt_opt(width),
            fmt_opt(height),
            fmt_opt(depth),
            fmt_opt(radius),
            d.color.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.3}")).unwrap_or_default()
}
