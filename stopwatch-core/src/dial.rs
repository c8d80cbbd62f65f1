//! Analog face geometry: one full hand rotation per minute.
//! Angles are degrees clockwise from twelve o'clock.

use crate::tracker::Snapshot;
use crate::Seconds;

const SECONDS_PER_TURN: f64 = 60.0;

/// Four graduation marks per second.
pub const GRADUATION_COUNT: usize = 60 * 4;

/// Every fifth mark is drawn full strength.
const MAJOR_EVERY: usize = 5;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Graduation {
    pub index: usize,
    pub angle: f64,
    pub major: bool,
}

fn angle_of(seconds: Seconds) -> f64 {
    seconds.rem_euclid(SECONDS_PER_TURN) * 360.0 / SECONDS_PER_TURN
}

pub fn hand_angle(total: Seconds) -> f64 {
    angle_of(total)
}

/// Marker for the end of the most recent completed lap.
pub fn lap_marker_angle(snapshot: &Snapshot) -> Option<f64> {
    snapshot.lap_boundary.map(angle_of)
}

pub fn graduations() -> impl Iterator<Item = Graduation> {
    (0..GRADUATION_COUNT).map(|index| Graduation {
        index,
        angle: index as f64 * 360.0 / GRADUATION_COUNT as f64,
        major: index % MAJOR_EVERY == 0,
    })
}

/// Major mark closest to `angle`, wrapping past the last mark back to zero.
pub fn nearest_major(angle: f64) -> Graduation {
    let step = 360.0 / GRADUATION_COUNT as f64;
    let index = (angle.rem_euclid(360.0) / step).round() as usize;
    let index = ((index + MAJOR_EVERY / 2) / MAJOR_EVERY * MAJOR_EVERY) % GRADUATION_COUNT;
    graduations()
        .nth(index)
        .unwrap_or(Graduation { index: 0, angle: 0.0, major: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::ElapsedTimeTracker;

    #[test]
    fn test_hand_angle_wraps_each_minute() {
        assert_eq!(hand_angle(0.0), 0.0);
        assert_eq!(hand_angle(15.0), 90.0);
        assert_eq!(hand_angle(45.0), 270.0);
        assert_eq!(hand_angle(60.0), 0.0);
        assert_eq!(hand_angle(75.0), 90.0);
    }

    #[test]
    fn test_lap_marker() {
        let mut sw = ElapsedTimeTracker::new();
        assert_eq!(lap_marker_angle(&sw.snapshot()), None);

        sw.start(0.0).unwrap();
        sw.tick(90.0).unwrap();
        sw.lap();
        sw.tick(100.0).unwrap();
        assert_eq!(lap_marker_angle(&sw.snapshot()), Some(180.0));
    }

    #[test]
    fn test_graduations() {
        let marks: Vec<Graduation> = graduations().collect();
        assert_eq!(marks.len(), 240);
        assert_eq!(marks[0], Graduation { index: 0, angle: 0.0, major: true });
        assert_eq!(marks[1].angle, 1.5);
        assert!(!marks[1].major);
        assert!(marks[5].major);
        assert_eq!(marks[60].angle, 90.0);
        assert_eq!(marks.iter().filter(|g| g.major).count(), 48);
    }

    #[test]
    fn test_nearest_major() {
        assert_eq!(nearest_major(0.0).index, 0);
        // 129 degrees is mark 86; majors around it are 85 and 90
        assert_eq!(nearest_major(129.0).index, 85);
        assert_eq!(nearest_major(132.0).index, 90);
        assert!(nearest_major(132.0).major);
        assert_eq!(nearest_major(359.0).index, 0);
        assert_eq!(nearest_major(hand_angle(30.0)).angle, 180.0);
    }
}
