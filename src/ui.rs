use std::io::{self, Write};

use stopwatch_core::{
    format_elapsed, format_lap_line, hand_angle, lap_marker_angle, nearest_major, Snapshot,
};

const FOOTER: &str = "s/ENTER=start/stop  l=lap  r=reset  q=quit";

/// Single status line, rewritten in place on every tick.
pub fn draw_status<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    write!(out, "\r  {}  ", format_elapsed(snapshot.total))?;
    out.flush()
}

/// Full screen: total, state, face angles, laps most recent first.
pub fn draw_stopwatch<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "STOPWATCH")?;
    let state = if snapshot.running { "running" } else { "stopped" };
    writeln!(out, "  {}  [{}]", format_elapsed(snapshot.total), state)?;

    let hand = hand_angle(snapshot.total);
    write!(out, "  hand {:5.1} (mark {:3})", hand, nearest_major(hand).index)?;
    if let Some(marker) = lap_marker_angle(snapshot) {
        write!(out, "  lap marker {:5.1}", marker)?;
    }
    writeln!(out)?;

    for (i, lap) in snapshot.laps.iter().enumerate().rev() {
        writeln!(out, "  {}", format_lap_line(i + 1, lap))?;
    }

    writeln!(out, "{}", FOOTER)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stopwatch_core::ElapsedTimeTracker;

    fn render(snapshot: &Snapshot) -> String {
        let mut buf = Vec::new();
        draw_stopwatch(&mut buf, snapshot).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_draw_fresh() {
        let text = render(&ElapsedTimeTracker::new().snapshot());
        assert!(text.contains("STOPWATCH"));
        assert!(text.contains("00:00.0  [stopped]"));
        assert!(!text.contains("Lap"));
        assert!(!text.contains("lap marker"));
    }

    #[test]
    fn test_draw_laps_newest_first() {
        let mut sw = ElapsedTimeTracker::new();
        sw.start(0.0).unwrap();
        sw.tick(15.0).unwrap();
        sw.lap();
        sw.tick(20.0).unwrap();
        sw.lap();
        sw.tick(21.5).unwrap();

        let text = render(&sw.snapshot());
        assert!(text.contains("00:21.5  [running]"));
        assert!(text.contains("hand 129.0 (mark  85)"));
        assert!(text.contains("lap marker 120.0"));

        let lap3 = text.find("Lap  3  00:01.5").unwrap();
        let lap2 = text.find("Lap  2  00:05.0 (shortest)").unwrap();
        let lap1 = text.find("Lap  1  00:15.0 (longest)").unwrap();
        assert!(lap3 < lap2 && lap2 < lap1);
    }

    #[test]
    fn test_draw_status() {
        let mut sw = ElapsedTimeTracker::new();
        sw.start(0.0).unwrap();
        sw.tick(65.25).unwrap();
        let mut buf = Vec::new();
        draw_status(&mut buf, &sw.snapshot()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\r  01:05.2  ");
    }
}
