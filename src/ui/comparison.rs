use std::io::Write;
use unicode_width::UnicodeWidthStr;

use super::palette::{Palette, Role};
use crate::models::Opening;

const TABLE_TITLE: &str = "New Openings";
const HEADERS: [&str; 3] = ["", "ECO", "Name"];
const COLUMN_GAP: &str = "  ";

/// Whether an opening was already stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    New,
    Known,
}

impl Marker {
    pub fn symbol(self) -> &'static str {
        match self {
            Marker::New => "🆕",
            Marker::Known => "",
        }
    }

    fn role(self) -> Role {
        match self {
            Marker::New => Role::Highlight,
            Marker::Known => Role::Muted,
        }
    }
}

/// One line of the new-vs-known table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub marker: Marker,
    pub eco: String,
    pub name: String,
}

/// Check every opening against the store, keeping input order
pub fn build_rows(openings: &[Opening]) -> Vec<ComparisonRow> {
    openings
        .iter()
        .map(|opening| ComparisonRow {
            marker: if opening.exists() {
                Marker::Known
            } else {
                Marker::New
            },
            eco: opening.eco().to_string(),
            name: opening.name().to_string(),
        })
        .collect()
}

/// Print which openings are new and which are already known
pub fn render_new_vs_known(
    openings: &[Opening],
    palette: &Palette,
    out: &mut dyn Write,
) -> std::io::Result<Vec<ComparisonRow>> {
    let rows = build_rows(openings);
    render_rows(&rows, palette, out)?;
    Ok(rows)
}

/// Write the table for precomputed rows
pub fn render_rows(rows: &[ComparisonRow], palette: &Palette, out: &mut dyn Write) -> std::io::Result<()> {
    let mut widths = HEADERS.map(|header| header.width());
    for row in rows {
        let cells = [row.marker.symbol(), row.eco.as_str(), row.name.as_str()];
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
    }
    let total_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);

    writeln!(
        out,
        "{}",
        palette.paint(&center(TABLE_TITLE, total_width), Role::Title)
    )?;
    writeln!(out, "{}", palette.paint(&join_cells(&HEADERS, &widths), Role::Accent))?;
    writeln!(out, "{}", "─".repeat(total_width))?;

    for row in rows {
        let role = row.marker.role();
        let cells = [
            pad(row.marker.symbol(), widths[0]),
            palette.paint(&pad(&row.eco, widths[1]), role),
            palette.paint(&pad(&row.name, widths[2]), role),
        ];
        writeln!(out, "{}", cells.join(COLUMN_GAP).trim_end())?;
    }

    Ok(())
}

fn join_cells(cells: &[&str; 3], widths: &[usize; 3]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

/// Right-pad by display width, so wide glyphs line up
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn center(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width()) / 2;
    format!("{}{}", " ".repeat(fill), text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardTemplate, OpeningContext};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn opening(ctx: &Arc<OpeningContext>, eco: &str, name: &str) -> Opening {
        Opening::new(name, "site", eco, "1. e4", ctx.clone()).unwrap()
    }

    fn setup() -> (TempDir, Arc<OpeningContext>) {
        let dir = TempDir::new().unwrap();
        let ctx = Arc::new(OpeningContext::new(
            dir.path().to_path_buf(),
            CardTemplate::default(),
        ));
        (dir, ctx)
    }

    #[test]
    fn test_rows_keep_input_order_and_mark_new() {
        let (_dir, ctx) = setup();
        let known = opening(&ctx, "C50", "Italian Game");
        known.store(false).unwrap();
        let new = opening(&ctx, "A00", "Polish Opening");

        let rows = build_rows(&[known, new]);
        assert_eq!(
            rows,
            vec![
                ComparisonRow {
                    marker: Marker::Known,
                    eco: "C50".to_string(),
                    name: "Italian Game".to_string(),
                },
                ComparisonRow {
                    marker: Marker::New,
                    eco: "A00".to_string(),
                    name: "Polish Opening".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_rendered_table() {
        let (_dir, ctx) = setup();
        let known = opening(&ctx, "C50", "Italian Game");
        known.store(false).unwrap();
        let new = opening(&ctx, "B22", "Sicilian Defense: Alapin Variation");

        let mut out = Vec::new();
        render_new_vs_known(&[new, known], &Palette::plain(), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].trim() == "New Openings");
        assert_eq!(lines[1], "    ECO  Name");
        assert!(lines[2].chars().all(|c| c == '─'));
        assert_eq!(lines[3], "🆕  B22  Sicilian Defense: Alapin Variation");
        assert_eq!(lines[4], "    C50  Italian Game");
    }

    #[test]
    fn test_known_rows_are_muted_and_new_rows_highlighted() {
        let (_dir, ctx) = setup();
        let known = opening(&ctx, "C50", "Italian Game");
        known.store(false).unwrap();
        let new = opening(&ctx, "B22", "Sicilian Defense: Alapin Variation");

        let palette = Palette::default();
        let mut out = Vec::new();
        render_new_vs_known(&[new, known], &palette, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[3].contains(&palette.paint("B22", Role::Highlight)));
        assert!(lines[4].contains(&palette.paint("C50", Role::Muted)));
        // Escapes are empty when the terminal disables color
        if palette.paint("x", Role::Highlight) != palette.paint("x", Role::Muted) {
            assert!(!lines[3].contains(&palette.paint("B22", Role::Muted)));
            assert!(!lines[4].contains(&palette.paint("C50", Role::Highlight)));
        }
    }

    #[test]
    fn test_empty_batch_prints_header_only() {
        let mut out = Vec::new();
        let rows = render_new_vs_known(&[], &Palette::plain(), &mut out).unwrap();
        assert!(rows.is_empty());
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("🆕", 3), "🆕 ");
        assert_eq!(pad("Grünfeld", 10), "Grünfeld  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }
}
