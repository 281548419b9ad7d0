//! printf-style template formatting for positional rendering.
//!
//! Supported directives: `%v %s %q %d %b %o %x %X %c %f %F %e %E %g %G %t %%`
//! with the flags `- + # 0` and space, an optional width and an optional
//! `.precision`. Formatting never fails; problems are reported inline:
//!
//! | Problem | Output |
//! |---|---|
//! | wrong argument type | `%!d(string=hi)` |
//! | not enough arguments | `%!s(MISSING)` |
//! | too many arguments | `%!(EXTRA string=x, number=2)` |
//! | `%` at end of template | `%!(NOVERB)` |

use regex::Regex;
use serde_json::{Number, Value};
use std::sync::OnceLock;

static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();

fn directive_regex() -> &'static Regex {
    DIRECTIVE_REGEX
        .get_or_init(|| Regex::new(r"(?s)%([-+# 0]*)(\d+)?(?:\.(\d*))?(.)?").unwrap())
}

/// Format `template`, substituting `args` in order.
pub fn sprintf(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    let mut next_arg = 0;

    for caps in directive_regex().captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        let spec = Directive::from_captures(&caps);
        match spec.verb {
            None => out.push_str("%!(NOVERB)"),
            Some('%') => out.push('%'),
            Some(verb) => match args.get(next_arg) {
                Some(arg) => {
                    next_arg += 1;
                    out.push_str(&spec.format(verb, arg));
                }
                None => {
                    out.push_str("%!");
                    out.push(verb);
                    out.push_str("(MISSING)");
                }
            },
        }
    }
    out.push_str(&template[last..]);

    if next_arg < args.len() {
        let extra: Vec<String> = args[next_arg..].iter().map(describe).collect();
        out.push_str("%!(EXTRA ");
        out.push_str(&extra.join(", "));
        out.push(')');
    }

    out
}

/// One parsed `%` directive.
#[derive(Debug, Default)]
struct Directive {
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: Option<char>,
}

impl Directive {
    fn from_captures(caps: &regex::Captures<'_>) -> Self {
        let mut spec = Directive::default();

        if let Some(flags) = caps.get(1) {
            for flag in flags.as_str().chars() {
                match flag {
                    '-' => spec.minus = true,
                    '+' => spec.plus = true,
                    '#' => spec.sharp = true,
                    '0' => spec.zero = true,
                    ' ' => spec.space = true,
                    _ => {}
                }
            }
        }
        spec.width = caps.get(2).and_then(|m| m.as_str().parse().ok());
        spec.precision = caps
            .get(3)
            .map(|m| m.as_str().parse().unwrap_or(0));
        spec.verb = caps.get(4).and_then(|m| m.as_str().chars().next());

        spec
    }

    fn format(&self, verb: char, arg: &Value) -> String {
        let rendered = match (verb, arg) {
            ('v', value) => Some(self.format_value(value)),
            ('s', Value::String(s)) => Some(self.text(s)),
            ('s', Value::Number(_) | Value::Bool(_)) => Some(self.text(&plain(arg))),
            ('q', Value::String(s)) => Some(self.text(&Value::String(s.clone()).to_string())),
            ('t', Value::Bool(b)) => Some(self.text(if *b { "true" } else { "false" })),
            ('d' | 'b' | 'o' | 'x' | 'X', Value::Number(n)) => {
                as_int(n).map(|i| self.integer(verb, i))
            }
            ('x' | 'X', Value::String(s)) => Some(self.text(&hex_bytes(s, verb == 'X'))),
            ('c', Value::Number(n)) => as_int(n)
                .and_then(|i| u32::try_from(i).ok())
                .and_then(char::from_u32)
                .map(|c| self.text(&c.to_string())),
            ('f' | 'F' | 'e' | 'E' | 'g' | 'G', Value::Number(n)) => {
                n.as_f64().map(|f| self.float(verb, f))
            }
            _ => None,
        };

        rendered.unwrap_or_else(|| format!("%!{}({})", verb, describe(arg)))
    }

    fn format_value(&self, value: &Value) -> String {
        match value {
            Value::Number(n) => match (as_int(n), n.as_f64()) {
                (Some(i), _) => self.integer('d', i),
                (None, Some(f)) => {
                    let sign = if f < 0.0 { "-" } else { self.positive_sign() };
                    self.number(sign, shortest_form(f.abs(), 21, false))
                }
                (None, None) => self.signed_number(n.to_string()),
            },
            Value::String(s) => self.text(s),
            other => self.text(&plain(other)),
        }
    }

    fn signed_number(&self, digits: String) -> String {
        match digits.strip_prefix('-') {
            Some(abs) => self.number("-", abs.to_string()),
            None => self.number(self.positive_sign(), digits),
        }
    }

    fn text(&self, s: &str) -> String {
        let s: String = match self.precision {
            Some(p) => s.chars().take(p).collect(),
            None => s.to_string(),
        };
        self.pad_spaces(s)
    }

    fn integer(&self, verb: char, value: i128) -> String {
        let sign = if value < 0 { "-" } else { self.positive_sign() };
        let abs = value.unsigned_abs();

        let (prefix, mut digits) = match verb {
            'b' => ("0b", format!("{:b}", abs)),
            'o' => ("0", format!("{:o}", abs)),
            'x' => ("0x", format!("{:x}", abs)),
            'X' => ("0X", format!("{:X}", abs)),
            _ => ("", abs.to_string()),
        };

        if let Some(p) = self.precision {
            if digits.len() < p {
                digits = format!("{}{}", "0".repeat(p - digits.len()), digits);
            }
        }

        let prefix = if self.sharp { prefix } else { "" };
        self.number(&format!("{}{}", sign, prefix), digits)
    }

    fn float(&self, verb: char, value: f64) -> String {
        let sign = if value < 0.0 { "-" } else { self.positive_sign() };
        let abs = value.abs();

        let digits = match verb {
            'f' | 'F' => format!("{:.*}", self.precision.unwrap_or(6), abs),
            'e' | 'E' => exponent_form(abs, self.precision.unwrap_or(6), verb == 'E'),
            _ => general_form(abs, self.precision, self.sharp, verb == 'G'),
        };

        self.number(sign, digits)
    }

    fn positive_sign(&self) -> &'static str {
        if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }

    /// Pad a number to width, zero-filling between sign and digits when the
    /// `0` flag is set.
    fn number(&self, prefix: &str, digits: String) -> String {
        let len = prefix.chars().count() + digits.chars().count();
        match self.width {
            Some(w) if w > len && self.zero && !self.minus => {
                format!("{}{}{}", prefix, "0".repeat(w - len), digits)
            }
            _ => self.pad_spaces(format!("{}{}", prefix, digits)),
        }
    }

    fn pad_spaces(&self, s: String) -> String {
        let len = s.chars().count();
        match self.width {
            Some(w) if w > len => {
                let fill = " ".repeat(w - len);
                if self.minus {
                    s + &fill
                } else {
                    fill + &s
                }
            }
            _ => s,
        }
    }
}

fn as_int(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// `d.dddddde±dd`
fn exponent_form(abs: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, abs);
    fix_exponent(&raw, upper)
}

/// `%g`: exponent form for very large or small magnitudes, plain otherwise.
fn general_form(abs: f64, precision: Option<usize>, keep_zeros: bool, upper: bool) -> String {
    match precision {
        None => shortest_form(abs, 6, upper),
        Some(p) => {
            let p = p.max(1);
            let raw = format!("{:.*e}", p - 1, abs);
            let exp = decimal_exponent(&raw);
            if exp < -4 || exp >= p as i32 {
                let fixed = fix_exponent(&raw, upper);
                if keep_zeros {
                    return fixed;
                }
                match fixed.split_once(if upper { 'E' } else { 'e' }) {
                    Some((mantissa, rest)) => format!(
                        "{}{}{}",
                        trim_fraction(mantissa),
                        if upper { 'E' } else { 'e' },
                        rest
                    ),
                    None => fixed,
                }
            } else {
                let decimals = (p as i32 - 1 - exp).max(0) as usize;
                let plain = format!("{:.*}", decimals, abs);
                if keep_zeros {
                    plain
                } else {
                    trim_fraction(&plain)
                }
            }
        }
    }
}

/// Shortest digits that read back as `abs`, in exponent form once the
/// decimal exponent reaches `threshold` (6 for `%g`, 21 for `%v`) or drops
/// below -4.
fn shortest_form(abs: f64, threshold: i32, upper: bool) -> String {
    let raw = format!("{:e}", abs);
    let exp = decimal_exponent(&raw);
    if exp < -4 || exp >= threshold {
        fix_exponent(&raw, upper)
    } else {
        abs.to_string()
    }
}

fn decimal_exponent(raw: &str) -> i32 {
    raw.split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

/// Turn Rust's `1.5e3` into `1.5e+03`.
fn fix_exponent(raw: &str, upper: bool) -> String {
    let Some((mantissa, exp)) = raw.split_once('e') else {
        return raw.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    let e = if upper { 'E' } else { 'e' };
    format!("{}{}{}{:02}", mantissa, e, sign, exp.abs())
}

fn trim_fraction(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn hex_bytes(s: &str, upper: bool) -> String {
    s.bytes()
        .map(|b| {
            if upper {
                format!("{:02X}", b)
            } else {
                format!("{:02x}", b)
            }
        })
        .collect()
}

/// Strings as-is, everything else as compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn describe(value: &Value) -> String {
    format!("{}={}", type_name(value), plain(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_substitution() {
        assert_eq!(sprintf("hello, %s", &[json!("Bob")]), "hello, Bob");
        assert_eq!(
            sprintf("hello %s, welcome", &[json!("inhere")]),
            "hello inhere, welcome"
        );
    }

    #[test]
    fn test_no_directives() {
        assert_eq!(sprintf("plain text", &[]), "plain text");
    }

    #[test]
    fn test_percent_literal() {
        assert_eq!(sprintf("100%% sure", &[]), "100% sure");
    }

    #[test]
    fn test_integers() {
        assert_eq!(sprintf("%d apples", &[json!(3)]), "3 apples");
        assert_eq!(sprintf("%5d|", &[json!(42)]), "   42|");
        assert_eq!(sprintf("%-5d|", &[json!(42)]), "42   |");
        assert_eq!(sprintf("%05d", &[json!(-42)]), "-0042");
        assert_eq!(sprintf("%+d", &[json!(7)]), "+7");
        assert_eq!(sprintf("%.3d", &[json!(7)]), "007");
    }

    #[test]
    fn test_radix() {
        assert_eq!(sprintf("%x %X %o %b", &[json!(255), json!(255), json!(8), json!(5)]), "ff FF 10 101");
        assert_eq!(sprintf("%#x %#o", &[json!(255), json!(8)]), "0xff 010");
        assert_eq!(sprintf("%x", &[json!("hi")]), "6869");
    }

    #[test]
    fn test_floats() {
        assert_eq!(sprintf("%f", &[json!(3.5)]), "3.500000");
        assert_eq!(sprintf("%.2f", &[json!(3.14159)]), "3.14");
        assert_eq!(sprintf("%8.2f|", &[json!(-3.14159)]), "   -3.14|");
        assert_eq!(sprintf("%e", &[json!(1234.5678)]), "1.234568e+03");
        assert_eq!(sprintf("%E", &[json!(0.00012)]), "1.200000E-04");
        assert_eq!(sprintf("%f", &[json!(2)]), "2.000000");
    }

    #[test]
    fn test_general_float() {
        assert_eq!(sprintf("%g", &[json!(3.25)]), "3.25");
        assert_eq!(sprintf("%g", &[json!(0.00001)]), "1e-05");
        assert_eq!(sprintf("%.3g", &[json!(3.14159)]), "3.14");
        assert_eq!(sprintf("%.2g", &[json!(1234.0)]), "1.2e+03");
    }

    #[test]
    fn test_general_float_switches_to_exponent_at_six_digits() {
        assert_eq!(sprintf("%g", &[json!(123456.0)]), "123456");
        assert_eq!(sprintf("%g", &[json!(1234567.0)]), "1.234567e+06");
        assert_eq!(sprintf("%G", &[json!(1e20)]), "1E+20");
        assert_eq!(sprintf("%g", &[json!(0.0001)]), "0.0001");
    }

    #[test]
    fn test_value_verb_float_keeps_wide_threshold() {
        assert_eq!(sprintf("%v", &[json!(1234567.0)]), "1234567");
        assert_eq!(sprintf("%v", &[json!(1e21)]), "1e+21");
        assert_eq!(sprintf("%v", &[json!(-0.5)]), "-0.5");
    }

    #[test]
    fn test_value_verb() {
        assert_eq!(sprintf("%v %v %v", &[json!("a"), json!(1), json!(true)]), "a 1 true");
        assert_eq!(sprintf("%v", &[json!(null)]), "null");
        assert_eq!(sprintf("%v", &[json!([1, 2])]), "[1,2]");
        assert_eq!(sprintf("%v", &[json!(1.5)]), "1.5");
    }

    #[test]
    fn test_string_precision_and_width() {
        assert_eq!(sprintf("%.3s", &[json!("abcdef")]), "abc");
        assert_eq!(sprintf("%6s|", &[json!("ab")]), "    ab|");
        assert_eq!(sprintf("%-6s|", &[json!("ab")]), "ab    |");
        assert_eq!(sprintf("%4s|", &[json!("博客")]), "  博客|");
    }

    #[test]
    fn test_quote_bool_char() {
        assert_eq!(sprintf("%q", &[json!("say \"hi\"")]), "\"say \\\"hi\\\"\"");
        assert_eq!(sprintf("%t", &[json!(false)]), "false");
        assert_eq!(sprintf("%c", &[json!(65)]), "A");
    }

    #[test]
    fn test_scalar_with_s_verb() {
        assert_eq!(sprintf("%s/%s", &[json!(22), json!(true)]), "22/true");
    }

    #[test]
    fn test_wrong_type_marker() {
        assert_eq!(sprintf("%d", &[json!("hi")]), "%!d(string=hi)");
        assert_eq!(sprintf("%t", &[json!(1)]), "%!t(number=1)");
        assert_eq!(sprintf("%s", &[json!({"a": 1})]), "%!s(object={\"a\":1})");
    }

    #[test]
    fn test_missing_argument_marker() {
        assert_eq!(sprintf("%s and %s", &[json!("one")]), "one and %!s(MISSING)");
    }

    #[test]
    fn test_extra_argument_marker() {
        assert_eq!(
            sprintf("hi %s", &[json!("a"), json!("b"), json!(2)]),
            "hi a%!(EXTRA string=b, number=2)"
        );
    }

    #[test]
    fn test_no_verb_marker() {
        assert_eq!(sprintf("50%", &[]), "50%!(NOVERB)");
    }

    #[test]
    fn test_unknown_verb_marker() {
        assert_eq!(sprintf("%z", &[json!(1)]), "%!z(number=1)");
    }
}
