//! PDF rendering of a [`ReportBundle`] with genpdf.
//!
//! genpdf needs real font files for metrics. The font directory comes from
//! `REPORT_FONT_DIR`; without it a few common system locations are tried.
//! Rendering is CPU-bound and should run on a blocking thread.

use std::path::Path;

use genpdf::fonts::{self, FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{elements, Alignment, Document, Element, SimplePageDecorator};

use super::ReportBundle;

/// Directories searched when no font directory is configured.
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/TTF",
    "/System/Library/Fonts/Supplemental",
    "/Library/Fonts",
];

/// Font family names tried in each directory, in order.
const FONT_NAMES: &[&str] = &["LiberationSans", "DejaVuSans", "Arial"];

const PAGE_MARGIN_MM: i32 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("No usable report font found (searched: {0})")]
    FontsUnavailable(String),

    #[error("PDF rendering failed: {0}")]
    Render(#[from] genpdf::error::Error),
}

/// Load the first usable font family.
///
/// A configured directory is the only candidate; otherwise the well-known
/// system directories are searched.
pub fn load_fonts(font_dir: Option<&Path>) -> Result<FontFamily<FontData>, ReportError> {
    let candidates: Vec<&Path> = match font_dir {
        Some(dir) => vec![dir],
        None => FONT_DIRS.iter().map(Path::new).collect(),
    };

    candidates
        .iter()
        .filter(|dir| dir.exists())
        .find_map(|dir| {
            FONT_NAMES
                .iter()
                .find_map(|name| fonts::from_files(*dir, name, None).ok())
        })
        .ok_or_else(|| {
            let searched: Vec<String> = candidates
                .iter()
                .map(|dir| dir.display().to_string())
                .collect();
            ReportError::FontsUnavailable(searched.join(", "))
        })
}

/// Render the bundle to PDF bytes (A4, genpdf's default paper size).
pub fn render(bundle: &ReportBundle, font_dir: Option<&Path>) -> Result<Vec<u8>, ReportError> {
    let font_family = load_fonts(font_dir)?;
    let profile = &bundle.profile;

    let mut doc = Document::new(font_family);
    doc.set_title(format!("Activity Report - {}", profile.username));

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(PAGE_MARGIN_MM);
    let running_head = format!("Student Activity Report | {}", profile.username);
    decorator.set_header(move |page| {
        elements::Paragraph::new(format!("{running_head} | Page {page}"))
            .aligned(Alignment::Right)
            .styled(Style::new().with_font_size(8))
    });
    doc.set_page_decorator(decorator);

    doc.push(
        elements::Paragraph::new("Student Activity Report")
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(18)),
    );
    doc.push(elements::Break::new(1.0));

    doc.push(elements::Paragraph::new(format!("Name: {}", profile.username)));
    doc.push(elements::Paragraph::new(format!("Email: {}", profile.email)));
    let department = match (&profile.department_name, &profile.department_acronym) {
        (Some(name), Some(acronym)) => format!("{name} ({acronym})"),
        (Some(name), None) => name.clone(),
        (None, Some(acronym)) => acronym.clone(),
        (None, None) => "N/A".to_string(),
    };
    doc.push(elements::Paragraph::new(format!("Department: {department}")));

    let heading = Style::new().bold().with_font_size(13);
    let small = Style::new().with_font_size(9);

    for section in &bundle.sections {
        doc.push(elements::Break::new(1.0));
        doc.push(elements::Paragraph::new(section.title()).styled(heading));

        if section.entries.is_empty() {
            doc.push(elements::Paragraph::new("No approved records.").styled(small));
            continue;
        }

        for entry in &section.entries {
            doc.push(elements::Break::new(0.5));
            for (label, value) in &entry.fields {
                doc.push(elements::Paragraph::new(format!("{label}: {value}")));
            }
            if let Some(approved_at) = entry.approved_at {
                doc.push(
                    elements::Paragraph::new(format!(
                        "Approved on {}",
                        approved_at.format("%d %b %Y")
                    ))
                    .styled(small),
                );
            }
        }
    }

    doc.push(elements::Break::new(2.0));
    doc.push(
        elements::Paragraph::new(format!(
            "Generated {} | {} approved records",
            bundle.generated_at.format("%d %b %Y %H:%M UTC"),
            bundle.record_count()
        ))
        .aligned(Alignment::Center)
        .styled(small),
    );

    let mut bytes = Vec::new();
    doc.render(&mut bytes)?;
    Ok(bytes)
}
