//! Title templates
//!
//! Titles may carry placeholders addressed by position, `%[1]v`, filled
//! from the argument set, or by fixture key, `%[input.a]v`, filled from a
//! fixture record. A placeholder is `%[` address `]`, optional flags
//! (`#`, `+`, `-`, `0`), width, `.precision` and a verb.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::Value;

use super::args::Arguments;
use crate::common::Result;
use crate::fixture::Gold;

const VERBS: &str = "vTtbcdoqxXUeEfFgGsp";

fn positional() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"%\[([0-9]+)\](#?[+\-0]?\d*(?:\.\d*)?)([{VERBS}])"))
            .expect("positional placeholder pattern is valid")
    })
}

fn keyed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"%\[([A-Za-z_]\w*\.[\w.]+)\](#?[+\-0]?\d*(?:\.\d*)?)([{VERBS}])"
        ))
        .expect("keyed placeholder pattern is valid")
    })
}

/// Fill positional placeholders from `args`
///
/// Templates without placeholders come back unchanged; unused arguments
/// are ignored and a missing one renders as `%!v(BADINDEX)`.
pub fn render(template: &str, args: &Arguments) -> String {
    positional()
        .replace_all(template, |caps: &Captures| {
            let verb = verb_of(caps);
            let value = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| args.values().get(i));

            match value {
                Some(value) => Directive::parse(&caps[2], verb).format(value),
                None => format!("%!{}(BADINDEX)", verb),
            }
        })
        .into_owned()
}

/// Whether the template addresses fixture keys
pub fn has_keyed(template: &str) -> bool {
    keyed().is_match(template)
}

/// Fill fixture-keyed placeholders from a fixture record
///
/// Each placeholder is resolved through [`Gold::get`], then rewritten to
/// positional form in order of appearance and formatted like [`render`].
pub fn render_gold(template: &str, gold: &Gold) -> Result<String> {
    let re = keyed();
    let values = re
        .captures_iter(template)
        .map(|caps| gold.get(&caps[1]))
        .collect::<Result<Vec<_>>>()?;

    let mut position = 0;
    let rewritten = re.replace_all(template, |caps: &Captures| {
        position += 1;
        format!("%[{}]{}{}", position, &caps[2], &caps[3])
    });

    Ok(render(&rewritten, &Arguments::new(values)))
}

/// Render a title at any level: fixture keys when a record is available
/// and the template uses them, positions otherwise
pub fn render_title(template: &str, args: &Arguments, gold: Option<&Gold>) -> Result<String> {
    match gold {
        Some(gold) if has_keyed(template) => render_gold(template, gold),
        _ => Ok(render(template, args)),
    }
}

fn verb_of(caps: &Captures) -> char {
    caps[3].chars().next().unwrap_or('v')
}

/// Parsed flags, width, precision and verb of one placeholder
#[derive(Debug, Default, PartialEq)]
struct Directive {
    sharp: bool,
    plus: bool,
    minus: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: char,
}

impl Directive {
    fn parse(flags: &str, verb: char) -> Self {
        let mut directive = Directive {
            verb,
            ..Default::default()
        };
        let mut chars = flags.chars().peekable();

        while let Some(&c) = chars.peek() {
            match c {
                '#' => directive.sharp = true,
                '+' => directive.plus = true,
                '-' => directive.minus = true,
                '0' => directive.zero = true,
                _ => break,
            }
            chars.next();
        }

        let rest: String = chars.collect();
        let (width, precision) = match rest.split_once('.') {
            Some((w, p)) => (w, Some(p)),
            None => (rest.as_str(), None),
        };
        directive.width = width.parse().ok();
        directive.precision = precision.map(|p| p.parse().unwrap_or(0));
        directive
    }

    fn format(&self, value: &Value) -> String {
        let (body, numeric) = match self.verb {
            'v' | 's' => (self.text(value), false),
            'T' => (type_name(value).to_string(), false),
            't' => match value {
                Value::Bool(b) => (b.to_string(), false),
                _ => (self.bad(value), false),
            },
            'q' => match value {
                Value::String(_) => (value.to_string(), false),
                _ => match integer(value).and_then(|n| u32::try_from(n).ok()).and_then(char::from_u32) {
                    Some(c) => (format!("'{}'", c), false),
                    None => (self.bad(value), false),
                },
            },
            'c' => match integer(value).and_then(|n| u32::try_from(n).ok()).and_then(char::from_u32) {
                Some(c) => (c.to_string(), false),
                None => (self.bad(value), false),
            },
            'U' => match integer(value) {
                Some(n) if n >= 0 => (format!("U+{:04X}", n), false),
                _ => (self.bad(value), false),
            },
            'd' | 'b' | 'o' => match integer(value) {
                Some(n) => (self.integer(n), true),
                None => (self.bad(value), false),
            },
            'x' | 'X' => match (integer(value), value) {
                (Some(n), _) => (self.integer(n), true),
                (None, Value::String(s)) => (self.hex_bytes(s.as_bytes()), false),
                _ => (self.bad(value), false),
            },
            'e' | 'E' | 'f' | 'F' | 'g' | 'G' => match value.as_f64() {
                Some(x) => (self.float(x), true),
                None => (self.bad(value), false),
            },
            _ => (self.bad(value), false),
        };
        self.pad(body, numeric)
    }

    fn text(&self, value: &Value) -> String {
        if self.sharp || self.plus {
            return value.to_string();
        }
        let text = natural(value);
        match (self.precision, value) {
            (Some(p), Value::String(_)) => text.chars().take(p).collect(),
            _ => text,
        }
    }

    fn integer(&self, n: i128) -> String {
        let magnitude = n.unsigned_abs();
        let digits = match self.verb {
            'b' => format!("{}{:b}", if self.sharp { "0b" } else { "" }, magnitude),
            'o' => format!("{}{:o}", if self.sharp { "0" } else { "" }, magnitude),
            'x' => format!("{}{:x}", if self.sharp { "0x" } else { "" }, magnitude),
            'X' => format!("{}{:X}", if self.sharp { "0X" } else { "" }, magnitude),
            _ => magnitude.to_string(),
        };
        self.signed(n < 0, digits)
    }

    fn float(&self, x: f64) -> String {
        let digits = match self.verb {
            'e' | 'E' => exponent(x.abs(), self.precision.unwrap_or(6), self.verb == 'E'),
            'f' | 'F' => format!("{:.*}", self.precision.unwrap_or(6), x.abs()),
            _ => general(x.abs(), self.precision, self.verb == 'G'),
        };
        self.signed(x.is_sign_negative() && x != 0.0, digits)
    }

    fn signed(&self, negative: bool, digits: String) -> String {
        if negative {
            format!("-{}", digits)
        } else if self.plus {
            format!("+{}", digits)
        } else {
            digits
        }
    }

    fn hex_bytes(&self, bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|b| {
                if self.verb == 'X' {
                    format!("{:02X}", b)
                } else {
                    format!("{:02x}", b)
                }
            })
            .collect()
    }

    fn bad(&self, value: &Value) -> String {
        format!("%!{}({})", self.verb, natural(value))
    }

    fn pad(&self, body: String, numeric: bool) -> String {
        let len = body.chars().count();
        let Some(width) = self.width.filter(|w| *w > len) else {
            return body;
        };
        let fill = width - len;

        if self.minus {
            format!("{}{}", body, " ".repeat(fill))
        } else if self.zero && numeric {
            let split = body.find(|c: char| c.is_ascii_digit()).unwrap_or(0);
            let (sign, digits) = body.split_at(split);
            format!("{}{}{}", sign, "0".repeat(fill), digits)
        } else {
            format!("{}{}", " ".repeat(fill), body)
        }
    }
}

/// The natural text of a value: strings raw, composites as compact JSON
fn natural(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn integer(value: &Value) -> Option<i128> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }
    n.as_f64()
        .filter(|x| x.is_finite() && x.fract() == 0.0 && x.abs() < 1e30)
        .map(|x| x as i128)
}

/// `d.dddddde±dd`, two exponent digits at least
fn exponent(x: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, x);
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    let e = if upper { 'E' } else { 'e' };
    format!("{}{}{}{:02}", mantissa, e, sign, exp.abs())
}

/// Shortest form without precision; `precision` significant digits with it
fn general(x: f64, precision: Option<usize>, upper: bool) -> String {
    let Some(p) = precision else {
        return x.to_string();
    };
    let p = p.max(1);
    if x == 0.0 || !x.is_finite() {
        return x.to_string();
    }

    let exp = x.log10().floor() as i32;
    if exp < -4 || exp >= p as i32 {
        let full = exponent(x, p - 1, upper);
        match full.split_once(|c| c == 'e' || c == 'E') {
            Some((mantissa, rest)) => {
                let e = if upper { 'E' } else { 'e' };
                format!("{}{}{}", trim_fraction(mantissa), e, rest)
            }
            None => full,
        }
    } else {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, x))
    }
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s;
    use serde_json::json;

    #[test]
    fn test_no_placeholders_is_unchanged() {
        for template in ["plain title", "100% sure", "%[a]v", "%d without index", ""] {
            assert_eq!(render(template, &s![]), template);
            assert_eq!(render(template, &s![1, "x", 2.5]), template);
        }
    }

    #[test]
    fn test_positional() {
        let args = s![12, "p", 2.5, true];
        assert_eq!(render("p.set_price(%[1]v) is called", &args), "p.set_price(12) is called");
        assert_eq!(render("%[2]s has %[1]d and %[1]v", &args), "p has 12 and 12");
        assert_eq!(render("%[3]v %[4]t", &args), "2.5 true");
    }

    #[test]
    fn test_missing_index() {
        assert_eq!(render("a=%[2]v", &s![1]), "a=%!v(BADINDEX)");
        assert_eq!(render("a=%[0]d", &s![1]), "a=%!d(BADINDEX)");
    }

    #[test]
    fn test_verbs() {
        let args = s![255, "hi", 3.14159, -7, 65];
        assert_eq!(render("%[1]x %[1]X %[1]#x %[1]o %[1]b", &args), "ff FF 0xff 377 11111111");
        assert_eq!(render("%[2]q %[2]x %[2]T %[1]T", &args), "\"hi\" 6869 string int");
        assert_eq!(render("%[3].2f %[3]e %[3].3g", &args), "3.14 3.141590e+00 3.14");
        assert_eq!(render("%[4]d %[4]+d %[1]+d", &args), "-7 -7 +255");
        assert_eq!(render("%[5]c %[5]U %[5]q", &args), "A U+0041 'A'");
        assert_eq!(render("%[2]d", &args), "%!d(hi)");
    }

    #[test]
    fn test_width_and_flags() {
        let args = s![42, "ab", -3];
        assert_eq!(render("[%[1]5d]", &args), "[   42]");
        assert_eq!(render("[%[1]-5d]", &args), "[42   ]");
        assert_eq!(render("[%[1]05d]", &args), "[00042]");
        assert_eq!(render("[%[3]05d]", &args), "[-0003]");
        assert_eq!(render("[%[2]4s]", &args), "[  ab]");
        assert_eq!(render("[%[2].1s]", &args), "[a]");
    }

    #[test]
    fn test_composites_and_json_form() {
        let args = s![vec![1, 2], json!({"a": 1}), "x", json!(null)];
        assert_eq!(render("%[1]v %[2]v %[4]v", &args), "[1,2] {\"a\":1} null");
        assert_eq!(render("%[3]v %[3]+v %[3]#v", &args), "x \"x\" \"x\"");
    }

    #[test]
    fn test_float_formats() {
        assert_eq!(general(1234567.0, Some(3), false), "1.23e+06");
        assert_eq!(general(0.00001234, Some(2), true), "1.2E-05");
        assert_eq!(general(5.0, None, false), "5");
        assert_eq!(exponent(0.0, 2, false), "0.00e+00");
    }

    #[test]
    fn test_render_gold() {
        let gold = Gold::new(json!({"a": 2, "b": 3}), json!({"sum": 5}));
        let title = render_gold("two values a=%[input.a]v b=%[input.b]v", &gold).unwrap();
        assert_eq!(title, "two values a=2 b=3");
        let title = render_gold("sum should be %[golden.sum]03d", &gold).unwrap();
        assert_eq!(title, "sum should be 005");
    }

    #[test]
    fn test_render_gold_errors_surface() {
        let gold = Gold::new(json!({"a": 2}), json!({"sum": 5}));
        let err = render_gold("bad %[output.a]v", &gold).unwrap_err();
        assert!(err.is_authoring());
        let err = render_gold("bad %[input.a.b]v", &gold).unwrap_err();
        assert!(!err.is_authoring());
    }

    #[test]
    fn test_render_title_picks_mode() {
        let gold = Gold::new(json!({"a": 2}), json!(null));
        let args = s![9];
        assert_eq!(render_title("x=%[input.a]v", &args, Some(&gold)).unwrap(), "x=2");
        assert_eq!(render_title("x=%[1]v", &args, Some(&gold)).unwrap(), "x=9");
        assert_eq!(render_title("x=%[input.a]v", &args, None).unwrap(), "x=%[input.a]v");
    }
}
