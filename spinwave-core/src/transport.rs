//! Playback transport arithmetic: time labels, progress and seek positions.
//!
//! Media durations are NaN until metadata loads and infinite for streams,
//! so every helper that divides by a duration returns `None` instead of a
//! poisoned value.

fn usable_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

/// `mm:ss`, zero padded. Minutes keep counting past 59.
pub fn format_time(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let total = seconds.floor() as u64;
    Some(format!("{:02}:{:02}", total / 60, total % 60))
}

/// `mm:ss / mm:ss`, or `None` while the duration is unknown.
pub fn time_stamp(current: f64, duration: f64) -> Option<String> {
    let duration = usable_duration(duration)?;
    Some(format!("{} / {}", format_time(current.max(0.0))?, format_time(duration)?))
}

/// Played share of the track in percent, clamped to `[0, 100]`.
pub fn progress_percent(current: f64, duration: f64) -> Option<f64> {
    let duration = usable_duration(duration)?;
    if !current.is_finite() {
        return None;
    }
    Some((current / duration * 100.0).clamp(0.0, 100.0))
}

/// Horizontal position inside a bar of `bar_width` as a fraction in `[0, 1]`.
pub fn pointer_fraction(offset_x: f64, bar_width: f64) -> Option<f64> {
    if !(bar_width.is_finite() && bar_width > 0.0) || !offset_x.is_finite() {
        return None;
    }
    Some((offset_x / bar_width).clamp(0.0, 1.0))
}

/// Media time under a pointer at `fraction` of the seek bar.
pub fn seek_time(fraction: f64, duration: f64) -> Option<f64> {
    let duration = usable_duration(duration)?;
    if !fraction.is_finite() {
        return None;
    }
    Some(fraction.clamp(0.0, 1.0) * duration)
}

/// Scrubbing on the seek bar: pressing seeks and starts a drag, moves seek
/// only while the drag is held.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeekDrag {
    active: bool,
}

impl SeekDrag {
    pub fn press(&mut self, fraction: f64) -> Option<f64> {
        self.active = true;
        self.drag_to(fraction)
    }

    /// Fraction to seek to for a move, `None` when not dragging.
    pub fn drag_to(&self, fraction: f64) -> Option<f64> {
        if !self.active || !fraction.is_finite() {
            return None;
        }
        Some(fraction.clamp(0.0, 1.0))
    }

    pub fn release(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

pub fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        return 1.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Cubic ease-out over `t` in `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0).as_deref(), Some("00:00"));
        assert_eq!(format_time(65.9).as_deref(), Some("01:05"));
        assert_eq!(format_time(3600.0).as_deref(), Some("60:00"));
        assert_eq!(format_time(f64::NAN), None);
        assert_eq!(format_time(-1.0), None);
    }

    #[test]
    fn test_unknown_duration_is_suppressed() {
        for d in [f64::NAN, f64::INFINITY, 0.0, -3.0] {
            assert_eq!(time_stamp(10.0, d), None, "duration {d}");
            assert_eq!(progress_percent(10.0, d), None, "duration {d}");
            assert_eq!(seek_time(0.5, d), None, "duration {d}");
        }
    }

    #[test]
    fn test_time_stamp_and_progress() {
        assert_eq!(time_stamp(30.0, 200.0).as_deref(), Some("00:30 / 03:20"));
        assert_eq!(progress_percent(50.0, 200.0), Some(25.0));
        assert_eq!(progress_percent(250.0, 200.0), Some(100.0));
        assert_eq!(progress_percent(f64::NAN, 200.0), None);
    }

    #[test]
    fn test_seek() {
        assert_eq!(pointer_fraction(50.0, 200.0), Some(0.25));
        assert_eq!(pointer_fraction(-5.0, 200.0), Some(0.0));
        assert_eq!(pointer_fraction(10.0, 0.0), None);
        assert_eq!(seek_time(0.25, 200.0), Some(50.0));
        assert_eq!(seek_time(1.5, 200.0), Some(200.0));
        assert_eq!(seek_time(f64::NAN, 200.0), None);
    }

    #[test]
    fn test_seek_drag_follows_pointer_while_held() {
        let mut drag = SeekDrag::default();
        assert_eq!(drag.drag_to(0.3), None);

        assert_eq!(drag.press(0.2), Some(0.2));
        assert!(drag.is_active());
        assert_eq!(drag.drag_to(0.6), Some(0.6));
        assert_eq!(drag.drag_to(1.4), Some(1.0));
        assert_eq!(drag.drag_to(f64::NAN), None);
        assert_eq!(seek_time(drag.drag_to(0.5).unwrap_or_default(), 200.0), Some(100.0));

        drag.release();
        assert!(!drag.is_active());
        assert_eq!(drag.drag_to(0.9), None);
    }

    #[test]
    fn test_clamp_volume() {
        assert_eq!(clamp_volume(0.4), 0.4);
        assert_eq!(clamp_volume(1.7), 1.0);
        assert_eq!(clamp_volume(-0.1), 0.0);
        assert_eq!(clamp_volume(f64::NAN), 1.0);
    }

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }
}
