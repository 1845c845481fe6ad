//! Fixed-column PDB backbone parser.
//!
//! Extracts one point per residue from the α-carbon (`CA`) rows of `ATOM`
//! records. Everything else in the file — heteroatoms, remarks, alternate
//! conformations, connectivity — is irrelevant to a backbone trace and is
//! skipped without complaint.

use glam::Vec3;

/// Record marker identifying an atomic coordinate line.
const RECORD_MARKER: &str = "ATOM";

/// Backbone reference atom name (α-carbon).
const BACKBONE_ATOM: &str = "CA";

/// Fixed column ranges of the PDB `ATOM` record.
const ATOM_NAME_COLS: std::ops::Range<usize> = 12..16;
const X_COLS: std::ops::Range<usize> = 30..38;
const Y_COLS: std::ops::Range<usize> = 38..46;
const Z_COLS: std::ops::Range<usize> = 46..54;

/// Why a qualifying `ATOM`/CA line failed to produce a point.
///
/// Never escapes this module: the parse policy is to skip the offending
/// line and keep going, since real structure files routinely carry noise
/// in and around the main chain.
#[derive(Debug, PartialEq, Eq)]
enum LineError {
    /// Line too short to hold the three coordinate fields.
    Truncated,
    /// A coordinate field held non-numeric text.
    MalformedCoordinate,
}

/// Parse backbone reference-atom positions from structure-file text.
///
/// Returns the α-carbon positions in file order. Lines that are not `ATOM`
/// records, or whose atom name is not `CA`, contribute nothing. A CA line
/// with malformed coordinate columns is skipped (with a warning) and the
/// rest of the file still parses. Empty or whitespace-only input yields an
/// empty vector.
#[must_use]
pub fn parse_backbone(text: &str) -> Vec<Vec3> {
    let mut points = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        if !line.starts_with(RECORD_MARKER) {
            continue;
        }
        let Some(name) = line.get(ATOM_NAME_COLS) else {
            continue;
        };
        if name.trim() != BACKBONE_ATOM {
            continue;
        }

        match parse_coordinates(line) {
            Ok(point) => points.push(point),
            Err(e) => {
                log::warn!(
                    "skipping CA record at line {}: {:?}",
                    line_no + 1,
                    e
                );
            }
        }
    }

    log::debug!("parsed {} backbone points", points.len());
    points
}

/// Extract the x/y/z fields of one qualifying line.
fn parse_coordinates(line: &str) -> Result<Vec3, LineError> {
    let x = parse_field(line, X_COLS)?;
    let y = parse_field(line, Y_COLS)?;
    let z = parse_field(line, Z_COLS)?;
    Ok(Vec3::new(x, y, z))
}

/// Parse one fixed-width numeric field.
fn parse_field(
    line: &str,
    cols: std::ops::Range<usize>,
) -> Result<f32, LineError> {
    let field = line.get(cols).ok_or(LineError::Truncated)?;
    field
        .trim()
        .parse::<f32>()
        .map_err(|_| LineError::MalformedCoordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a well-formed `ATOM` line for the given atom name and
    /// coordinates, with correct fixed-column layout.
    fn atom_line(name: &str, x: f32, y: f32, z: f32) -> String {
        format!(
            "ATOM      1 {name:<4} ALA A   1    {x:8.3}{y:8.3}{z:8.3}  1.00  0.00           C"
        )
    }

    #[test]
    fn parses_ca_lines_in_file_order() {
        let text = [
            atom_line(" CA", 1.0, 2.0, 3.0),
            atom_line(" CA", 4.0, 5.0, 6.0),
            atom_line(" CA", 7.0, 8.0, 9.0),
        ]
        .join("\n");

        let points = parse_backbone(&text);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(points[1], Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(points[2], Vec3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn ignores_non_atom_records_and_other_atoms() {
        let text = [
            "HEADER    HYDROLASE".to_owned(),
            atom_line(" N", 0.0, 0.0, 0.0),
            atom_line(" CA", 1.0, 1.0, 1.0),
            atom_line(" C", 2.0, 2.0, 2.0),
            "HETATM    9  CA  CA  A 201      10.0    10.0    10.0".to_owned(),
            "TER".to_owned(),
        ]
        .join("\n");

        let points = parse_backbone(&text);
        assert_eq!(points, vec![Vec3::new(1.0, 1.0, 1.0)]);
    }

    #[test]
    fn atom_name_must_match_exactly() {
        // CB shares a prefix character with CA but is a sidechain atom.
        let text = [
            atom_line(" CB", 9.0, 9.0, 9.0),
            atom_line(" CA", 1.0, 0.0, 0.0),
        ]
        .join("\n");

        let points = parse_backbone(&text);
        assert_eq!(points, vec![Vec3::new(1.0, 0.0, 0.0)]);
    }

    #[test]
    fn malformed_coordinate_skips_only_that_line() {
        let bad = "ATOM      2  CA  ALA A   2      xx.xxx   1.000   1.000";
        let text = [
            atom_line(" CA", 0.0, 0.0, 0.0),
            bad.to_owned(),
            atom_line(" CA", 2.0, 0.0, 0.0),
        ]
        .join("\n");

        let points = parse_backbone(&text);
        assert_eq!(
            points,
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn truncated_ca_line_is_skipped() {
        let text = ["ATOM      1  CA  ALA".to_owned(), atom_line(" CA", 1.0, 2.0, 3.0)]
            .join("\n");

        let points = parse_backbone(&text);
        assert_eq!(points, vec![Vec3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn empty_and_whitespace_input_yield_empty() {
        assert!(parse_backbone("").is_empty());
        assert!(parse_backbone("  \n\t\n  ").is_empty());
    }

    #[test]
    fn negative_coordinates_parse() {
        let text = atom_line(" CA", -12.345, 0.001, -0.5);
        let points = parse_backbone(&text);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - -12.345).abs() < 1e-3);
        assert!((points[0].z - -0.5).abs() < 1e-3);
    }
}
