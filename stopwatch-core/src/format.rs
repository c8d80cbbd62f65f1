use crate::tracker::{Lap, LapKind};
use crate::Seconds;

/// Format seconds as "MM:SS.t" (tenths, truncated). Minutes keep counting past 59.
pub fn format_elapsed(seconds: Seconds) -> String {
    // Snap to hundredths first so 0.19999999999999998 still reads as .2
    let tenths = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 100.0).round() as u64 / 10
    } else {
        0
    };
    let m = tenths / 600;
    let s = (tenths / 10) % 60;
    let t = tenths % 10;
    format!("{:02}:{:02}.{}", m, s, t)
}

/// One lap row, 1-based: "Lap  3  00:12.4 (longest)"
pub fn format_lap_line(index: usize, lap: &Lap) -> String {
    let marker = match lap.kind {
        LapKind::Shortest => " (shortest)",
        LapKind::Longest => " (longest)",
        LapKind::Regular => "",
    };
    format!("Lap {:2}  {}{}", index, format_elapsed(lap.duration), marker)
}
