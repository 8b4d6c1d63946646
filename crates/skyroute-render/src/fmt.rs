//! Number and text formatting for SVG attributes and path data.

use std::fmt::Write as _;

/// Shortest round-trippable decimal, without `-0` or float noise near integers.
pub fn fmt_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }

    let _ = write!(out, "{v}");
}

/// Path coordinates keep 3 fractional digits, rounded half-up (`Math.round(x * 1000) / 1000`).
pub fn fmt_path_into(out: &mut String, v: f64) {
    if !v.is_finite() || v.abs() < 0.0005 {
        out.push('0');
        return;
    }

    let k = (v * 1000.0 + 0.5).floor() as i64;
    if k == 0 {
        out.push('0');
        return;
    }

    let abs = k.unsigned_abs();
    if k < 0 {
        out.push('-');
    }
    let _ = write!(out, "{}", abs / 1000);

    let frac = abs % 1000;
    if frac == 0 {
        return;
    }
    let digits = format!("{frac:03}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

pub fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(write: impl FnOnce(&mut String)) -> String {
        let mut out = String::new();
        write(&mut out);
        out
    }

    fn fmt(v: f64) -> String {
        render(|out| fmt_into(out, v))
    }

    fn fmt_path(v: f64) -> String {
        render(|out| fmt_path_into(out, v))
    }

    #[test]
    fn fmt_matches_expected() {
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(1.0000004), "1");
        assert_eq!(fmt(-1.0000004), "-1");
        assert_eq!(fmt(0.5), "0.5");
        assert_eq!(fmt(1.5), "1.5");
    }

    #[test]
    fn fmt_path_matches_expected() {
        assert_eq!(fmt_path(f64::INFINITY), "0");
        assert_eq!(fmt_path(0.0004), "0");
        assert_eq!(fmt_path(-0.0004), "0");
        assert_eq!(fmt_path(1.23456), "1.235");
        assert_eq!(fmt_path(1.0), "1");
        assert_eq!(fmt_path(-1.2345), "-1.234");
        assert_eq!(fmt_path(320.1), "320.1");
        assert_eq!(fmt_path(-0.25), "-0.25");
    }

    #[test]
    fn escape_xml_escapes_markup() {
        let escape = |text: &str| render(|out| escape_xml_into(out, text));
        assert_eq!(escape("O'Hare & <Midway>"), "O&#39;Hare &amp; &lt;Midway&gt;");
        assert_eq!(escape("plain"), "plain");

        let mut out = String::from("<text>");
        escape_xml_into(&mut out, "A&B");
        assert_eq!(out, "<text>A&amp;B");
    }
}
