// ranger_sim/src/io/world.rs

use super::{expect_fields, field, number, read_to_string, records};
use crate::error::DataError;
use nalgebra::Point2;
use ranger_core::prelude::{LandmarkId, LandmarkMap};
use std::path::Path;

/// Reads a landmark map from a world file with one `id x y` per line.
pub fn read_world(path: &Path) -> Result<LandmarkMap, DataError> {
    parse_world(&read_to_string(path)?)
}

pub fn parse_world(text: &str) -> Result<LandmarkMap, DataError> {
    let mut map = LandmarkMap::new();
    for (line, fields) in records(text) {
        expect_fields(&fields, 3, line)?;
        let id = LandmarkId(field(&fields, 0, "landmark id", line)?);
        let position = Point2::new(
            number(&fields, 1, "x", line)?,
            number(&fields, 2, "y", line)?,
        );
        map.insert(id, position)
            .map_err(|source| DataError::Landmark { line, source })?;
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_landmarks_and_skips_comments() {
        let map = parse_world("# id x y\n1 2 1\n\n2 0 4\n3 2.5 -1.25\n").unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.position(LandmarkId(3)).unwrap(), Point2::new(2.5, -1.25));
    }

    #[test]
    fn reports_line_of_bad_record() {
        let err = parse_world("1 2 1\n2 zero 4\n").unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 2, .. }), "{err}");

        let err = parse_world("1 2 1\n1 3 3\n").unwrap_err();
        assert!(matches!(err, DataError::Landmark { line: 2, .. }), "{err}");

        let err = parse_world("1 2\n").unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 1, .. }), "{err}");

        let err = parse_world("1 2 1\n2 NaN 4\n").unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 2, .. }), "{err}");
    }
}
