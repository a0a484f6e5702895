/// Percentage identity of two aligned sequences, in `[0, 100]`.
///
/// Only the first two entries of `alignment` are looked at. Positions are
/// compared up to the length of the shorter entry; a gap character is
/// compared like any other character, so `-` against a base is a mismatch.
/// Returns `0.0` when fewer than two entries are given or the compared
/// window is empty.
pub fn get_identity<S: AsRef<str>>(alignment: &[S]) -> f64 {
    if alignment.len() < 2 {
        return 0.0;
    }
    let a = alignment[0].as_ref().as_bytes();
    let b = alignment[1].as_ref().as_bytes();

    let window = a.len().min(b.len());
    if window == 0 {
        return 0.0;
    }
    let identical = a.iter().zip(b).filter(|(x, y)| x == y).count();
    identical as f64 * 100.0 / window as f64
}
