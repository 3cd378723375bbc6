//! Integer to text in an arbitrary radix

use heapless::String;

/// Longest output: `u32::MAX` in binary
pub const MAX_DIGITS: usize = 32;

/// Format `value` in `radix` using digits `0-9A-Z`
///
/// A radix below 2 falls back to decimal; a radix above 36 is clamped to 36.
pub fn format_radix(value: u32, radix: u8) -> String<MAX_DIGITS> {
    let radix = match radix {
        0 | 1 => 10,
        r if r > 36 => 36,
        r => u32::from(r),
    };

    let mut digits = [0u8; MAX_DIGITS];
    let mut start = MAX_DIGITS;
    let mut n = value;
    loop {
        // n % radix < 36
        let d = (n % radix) as u8;
        start -= 1;
        digits[start] = if d < 10 { b'0' + d } else { b'A' + d - 10 };
        n /= radix;
        if n == 0 {
            break;
        }
    }

    let mut out = String::new();
    for &b in &digits[start..] {
        // At most MAX_DIGITS pushes
        let _ = out.push(char::from(b));
    }
    out
}
