//! Sampling an animation into still frames

/// Number of frames for `duration` seconds at `fps` frames per second
pub fn frame_count(duration: f64, fps: f64) -> usize {
    let frames = (duration * fps).round();
    if frames.is_finite() && frames > 0.0 {
        frames as usize
    } else {
        0
    }
}

/// How far through the animation each of `count` frames is, from 0 to 1
///
/// The first frame is blank and the last one is the finished drawing. A
/// single frame shows the finished drawing.
pub fn frame_fractions(count: usize) -> impl Iterator<Item = f64> {
    (0..count).map(move |index| {
        if count == 1 {
            1.0
        } else {
            index as f64 / (count - 1) as f64
        }
    })
}

/// Ink budget of each of `count` frames of a drawing `total_length` long
pub fn frame_budgets(count: usize, total_length: f64) -> impl Iterator<Item = f64> {
    frame_fractions(count).map(move |fraction| fraction * total_length)
}

/// File name of the frame at zero-based `index`, e.g. `frame01.svg` for the first
pub fn frame_file_name(index: usize) -> String {
    format!("frame{:02}.svg", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(5.0, 30.0), 150);
        assert_eq!(frame_count(0.5, 3.0), 2);
        assert_eq!(frame_count(0.0, 30.0), 0);
        assert_eq!(frame_count(f64::NAN, 30.0), 0);
    }

    #[test]
    fn test_fractions_span_zero_to_one() {
        let fractions: Vec<f64> = frame_fractions(5).collect();
        assert_eq!(fractions, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_single_and_no_frames() {
        assert_eq!(frame_fractions(1).collect::<Vec<_>>(), vec![1.0]);
        assert_eq!(frame_fractions(0).count(), 0);
    }

    #[test]
    fn test_budgets_end_at_total() {
        let budgets: Vec<f64> = frame_budgets(3, 260.0).collect();
        assert_eq!(budgets, vec![0.0, 130.0, 260.0]);
    }

    #[test]
    fn test_file_names_are_one_based() {
        assert_eq!(frame_file_name(0), "frame01.svg");
        assert_eq!(frame_file_name(9), "frame10.svg");
        assert_eq!(frame_file_name(149), "frame150.svg");
    }
}
