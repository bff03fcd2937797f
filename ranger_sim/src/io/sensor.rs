// ranger_sim/src/io/sensor.rs

use super::{expect_fields, field, number, read_to_string, records};
use crate::error::DataError;
use ranger_core::prelude::{LandmarkId, LandmarkObservation, OdometryDelta, TimestepRecord};
use std::path::Path;

/// Reads a sensor log into one record per timestep.
///
/// `ODOMETRY rot1 trans rot2` opens a timestep; each following
/// `SENSOR id range bearing` line belongs to it.
pub fn read_sensor_data(path: &Path) -> Result<Vec<TimestepRecord>, DataError> {
    parse_sensor_data(&read_to_string(path)?)
}

pub fn parse_sensor_data(text: &str) -> Result<Vec<TimestepRecord>, DataError> {
    let mut timesteps: Vec<TimestepRecord> = Vec::new();

    for (line, fields) in records(text) {
        match fields[0] {
            "ODOMETRY" => {
                expect_fields(&fields, 4, line)?;
                let odometry = OdometryDelta::new(
                    number(&fields, 1, "rot1", line)?,
                    number(&fields, 2, "trans", line)?,
                    number(&fields, 3, "rot2", line)?,
                );
                timesteps.push(TimestepRecord::new(odometry, Vec::new()));
            }
            "SENSOR" => {
                expect_fields(&fields, 4, line)?;
                let current = timesteps.last_mut().ok_or_else(|| {
                    DataError::parse(line, "SENSOR reading before the first ODOMETRY line")
                })?;
                let range = number(&fields, 2, "range", line)?;
                if range < 0.0 {
                    return Err(DataError::parse(line, format!("negative range {range}")));
                }
                current.observations.push(LandmarkObservation {
                    landmark_id: LandmarkId(field(&fields, 1, "landmark id", line)?),
                    range,
                    bearing: number(&fields, 3, "bearing", line)?,
                });
            }
            other => {
                return Err(DataError::parse(
                    line,
                    format!("unknown record type '{other}'"),
                ))
            }
        }
    }

    Ok(timesteps)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
ODOMETRY 0.1 0.5 0.0
SENSOR 1 1.9 0.3
SENSOR 4 2.2 -0.1
ODOMETRY 0.0 0.5 0.05
ODOMETRY -0.1 0.4 0.0
SENSOR 2 3.0 1.2
";

    #[test]
    fn groups_sensor_lines_under_odometry() {
        let records = parse_sensor_data(LOG).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].odometry, OdometryDelta::new(0.1, 0.5, 0.0));
        assert_eq!(
            records[0].observations,
            vec![
                LandmarkObservation::new(1, 1.9, 0.3),
                LandmarkObservation::new(4, 2.2, -0.1),
            ]
        );
        assert!(records[1].observations.is_empty());
        assert_eq!(records[2].observations.len(), 1);
    }

    #[test]
    fn sensor_before_odometry_is_rejected() {
        let err = parse_sensor_data("SENSOR 1 1.0 0.0\n").unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 1, .. }), "{err}");
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(parse_sensor_data("ODOMETRY 0.1 0.5\n").is_err());
        assert!(parse_sensor_data("ODOMETRY 0 1 0\nSENSOR 1 -1.0 0.0\n").is_err());
        assert!(parse_sensor_data("ODOMETRY 0 1 0\nLIDAR 1 2 3\n").is_err());
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        for log in [
            "ODOMETRY 0 1 0\nSENSOR 1 NaN 0.0\n",
            "ODOMETRY 0 1 0\nSENSOR 1 inf 0.0\n",
            "ODOMETRY 0 1 0\nSENSOR 1 2.0 -inf\n",
            "ODOMETRY NaN 1 0\n",
            "ODOMETRY 0 inf 0\n",
        ] {
            let err = parse_sensor_data(log).unwrap_err();
            assert!(matches!(err, DataError::Parse { .. }), "{log:?}: {err}");
        }
    }
}
