use std::fmt;

/// An opaque 24-bit colour, printed as six lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colour of the first click in a session track.
pub const TRACK_START: Rgb = Rgb(0x00, 0x00, 0x66);

/// Colour the track fades towards at its last click.
pub const TRACK_END: Rgb = Rgb(0xCC, 0x99, 0x00);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// `steps` colours walking from `start` towards `end`.
///
/// Entry `x` sits `x/steps` of the way along each channel, so the first
/// colour is `start` and the last stops one step short of `end`.
pub fn gradient(start: Rgb, end: Rgb, steps: usize) -> Vec<Rgb> {
    if steps == 0 {
        return Vec::new();
    }

    (0..steps)
        .map(|x| {
            Rgb(
                channel(start.0, end.0, x, steps),
                channel(start.1, end.1, x, steps),
                channel(start.2, end.2, x, steps),
            )
        })
        .collect()
}

fn channel(from: u8, to: u8, x: usize, steps: usize) -> u8 {
    let (from, to) = (i64::from(from), i64::from(to));
    let value = from + (to - from) * x as i64 / steps as i64;
    value.clamp(0, 255) as u8
}
