//! Plain-text scene and metadata reports for the CLI.

use crate::geometry::{Drawable, Primitive};
use crate::model::{Dropped, Metadata};
use crate::scene::Scene;

/// Label/value lines of the metadata panel, in display order.
///
/// Only fields that are present produce lines; revisions come last, one
/// line each, with date, number and author appended when known.
pub fn metadata_lines(meta: &Metadata) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(name) = &meta.document_name {
        lines.push(format!("Document: {name}"));
    }
    if let Some(unit) = &meta.unit_info {
        lines.push(format!("Unit: {unit}"));
    }
    if let Some(elevation) = &meta.elevation {
        lines.push(format!("Elevation: {elevation}"));
    }
    if !meta.document_numbers.is_empty() {
        lines.push(format!(
            "Document Numbers: {}",
            meta.document_numbers.join(", ")
        ));
    }
    let revisions = meta.revisions();
    if !revisions.is_empty() {
        lines.push("Revision Info:".to_string());
        for rev in revisions {
            let mut line = format!("  - {}", rev.info);
            if let Some(date) = rev.date {
                line.push_str(&format!(" | Date: {date}"));
            }
            if let Some(number) = rev.number {
                line.push_str(&format!(" | Rev: {number}"));
            }
            if let Some(by) = rev.by {
                line.push_str(&format!(" | By: {by}"));
            }
            lines.push(line);
        }
    }
    lines
}

/// One-line description of a drawable.
pub fn drawable_line(d: &Drawable) -> String {
    let c = d.center();
    let shape = match d.primitive {
        Primitive::Box {
            width,
            height,
            depth,
        } => format!("box {width:.2}x{height:.2}x{depth:.2}"),
        Primitive::Cylinder { radius, height, .. } => {
            format!("cylinder r={radius:.2} h={height:.2}")
        }
        Primitive::Sphere { radius, .. } => format!("sphere r={radius:.2}"),
    };
    format!(
        "{:<10} {:<12} {:<28} at ({:.2}, {:.2}, {:.2}) {} \"{}\"",
        d.category.to_string(),
        d.id,
        shape,
        c.x,
        c.y,
        c.z,
        d.color,
        d.name
    )
}

pub fn print_scene(scene: &Scene) {
    println!("--- Scene ---");
    for d in &scene.drawables {
        println!("{}", drawable_line(d));
    }
    println!("\n{}", scene.summary());
}

pub fn print_dropped(dropped: &[Dropped]) {
    if dropped.is_empty() {
        return;
    }
    println!("\n--- Skipped ---");
    for note in dropped {
        println!("{note}");
    }
}

pub fn print_metadata(meta: Option<&Metadata>) {
    println!("\n--- Document Metadata ---");
    match meta.filter(|m| !m.is_empty()) {
        Some(meta) => {
            for line in metadata_lines(meta) {
                println!("{line}");
            }
        }
        None => println!("(none)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_lines_skip_absent_fields() {
        let meta = Metadata {
            document_name: Some("General arrangement".into()),
            document_numbers: vec!["A-100".into(), "A-101".into()],
            revision_info: vec!["Issued for construction".into()],
            revision_numbers: vec!["2".into()],
            ..Metadata::default()
        };
        assert_eq!(
            metadata_lines(&meta),
            [
                "Document: General arrangement",
                "Document Numbers: A-100, A-101",
                "Revision Info:",
                "  - Issued for construction | Rev: 2",
            ]
        );
        assert!(metadata_lines(&Metadata::default()).is_empty());
    }
}
