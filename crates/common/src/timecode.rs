//! Frame/time conversion for the editor timeline.
//!
//! All preview and export timing in Reelcut runs at a fixed frame rate.
//! The conversions here are the single source of truth for mapping a
//! continuous timeline position (seconds) to a discrete frame number.

/// Fixed timeline frame rate, frames per second.
pub const FRAME_RATE: u32 = 30;

/// Frame number for a timeline position in seconds.
///
/// Floating-point subtraction upstream can produce a tiny negative
/// epsilon; those floor to frame 0 rather than wrapping.
pub fn frame_for_time(secs: f64) -> u32 {
    let frame = (secs * FRAME_RATE as f64).floor();
    if frame <= 0.0 {
        0
    } else {
        frame as u32
    }
}

/// Timeline position in seconds for a frame number.
pub fn time_for_frame(frame: u32) -> f64 {
    frame as f64 / FRAME_RATE as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_for_time_floors() {
        assert_eq!(frame_for_time(0.0), 0);
        assert_eq!(frame_for_time(1.0), 30);
        assert_eq!(frame_for_time(0.999), 29);
        assert_eq!(frame_for_time(2.5), 75);
    }

    #[test]
    fn test_negative_epsilon_floors_to_zero() {
        assert_eq!(frame_for_time(-1e-12), 0);
        assert_eq!(frame_for_time(-0.25), 0);
    }

    #[test]
    fn test_roundtrip_within_duration() {
        for i in 0..300 {
            let t = i as f64 * 0.1;
            let frame = frame_for_time(t);
            assert!(time_for_frame(frame) <= t + 1e-9);
        }
    }
}
