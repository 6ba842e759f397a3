/// One time-stamped sample in a track.
#[derive(Debug, Clone, Copy)]
pub struct Keyframe<T> {
    pub time: f32,
    pub value: T,
}

/// What a track does when evaluated outside its keyframe range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Pair the last keyframe with the first, `next = track[(i + 1) % len]`.
    /// Matches the reference viewer, including its extrapolation behavior at
    /// the boundary.
    #[default]
    Wrap,
    /// Hold the nearest endpoint value.
    Clamp,
}

/// Evaluates a time-sorted track at `time` with the given blend function.
/// `None` only for an empty track; a single-keyframe track returns its value
/// exactly at any time.
pub fn sample<T: Copy>(
    keys: &[Keyframe<T>],
    time: f32,
    boundary: Boundary,
    mix: impl Fn(&T, &T, f32) -> T,
) -> Option<T> {
    let first = keys.first()?;
    let last = keys.last()?;
    if keys.len() == 1 {
        return Some(first.value);
    }

    if boundary == Boundary::Clamp {
        if time <= first.time {
            return Some(first.value);
        }
        if time >= last.time {
            return Some(last.value);
        }
    }

    for pair in keys.windows(2) {
        let (cur, next) = (&pair[0], &pair[1]);
        if cur.time <= time && time <= next.time {
            let span = next.time - cur.time;
            let factor = if span > 0.0 { (time - cur.time) / span } else { 0.0 };
            return Some(mix(&cur.value, &next.value, factor));
        }
    }

    // Out of range: wrap around by pairing the last keyframe with the first.
    let span = first.time - last.time;
    let factor = if span != 0.0 {
        (time - last.time) / span
    } else {
        0.0
    };
    Some(mix(&last.value, &first.value, factor))
}
