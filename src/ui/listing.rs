use anyhow::{Context, Result};
use std::io::Write;

use super::palette::{Palette, Role};
use crate::models::{EcoVolume, KnownOpenings, OpeningContext};

/// Print the openings stored under `context`, grouped by ECO volume
///
/// The total always counts every stored opening; `filter` only limits which
/// groups are listed. Returns the scanned registry.
pub fn list_known_openings(
    filter: Option<EcoVolume>,
    context: &OpeningContext,
    palette: &Palette,
    out: &mut dyn Write,
) -> Result<KnownOpenings> {
    let known = KnownOpenings::scan(context.openings_dir())?;
    render_known_openings(&known, filter, palette, out).context("Failed to print known openings")?;
    Ok(known)
}

/// Write the grouped listing of an already scanned registry
pub fn render_known_openings(
    known: &KnownOpenings,
    filter: Option<EcoVolume>,
    palette: &Palette,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    writeln!(
        out,
        "🔥 You already know a total of {} openings!!! 🔥\n",
        palette.paint(&known.total().to_string(), Role::Accent)
    )?;

    for (volume, members) in known.groups(filter) {
        let title = format!("{} ({})", volume.description(), members.len());
        writeln!(out, "{}!\n", palette.paint(&title, Role::Title))?;
        for member in members {
            writeln!(out, "✔️  {}", member)?;
        }
        writeln!(out)?;
    }

    let anomalies = known.anomalies().len();
    if anomalies > 0 {
        writeln!(
            out,
            "{} stored {} not filed under an ECO volume",
            palette.paint(&anomalies.to_string(), Role::Muted),
            if anomalies == 1 { "file is" } else { "files are" }
        )?;
    }

    Ok(())
}
