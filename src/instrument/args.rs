//! Argument Rendering
//!
//! Renders call arguments and values as quoted literals, the format in which
//! call history is recorded and replayed (`('foo',)`, `(42,)`, `(b'\x00',)`).

use crate::cache::CacheValue;

// == Repr ==
/// A value that can be written as a literal in call history.
pub trait Repr {
    /// Returns the literal form of the value.
    fn repr(&self) -> String;
}

// == Call Args ==
/// The positional arguments of one call, rendered as a tuple literal.
pub trait CallArgs {
    /// Returns the tuple literal, e.g. `('foo',)` for a single argument.
    fn render_args(&self) -> String;
}

impl<T: Repr + ?Sized> Repr for &T {
    fn repr(&self) -> String {
        (**self).repr()
    }
}

impl Repr for str {
    fn repr(&self) -> String {
        let quote = pick_quote(self.contains('\''), self.contains('"'));
        let mut out = String::with_capacity(self.len() + 2);
        out.push(quote);
        for c in self.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c == quote => {
                    out.push('\\');
                    out.push(c);
                }
                c if needs_escape(c) => {
                    let code = c as u32;
                    if code <= 0xff {
                        out.push_str(&format!("\\x{:02x}", code));
                    } else if code <= 0xffff {
                        out.push_str(&format!("\\u{:04x}", code));
                    } else {
                        out.push_str(&format!("\\U{:08x}", code));
                    }
                }
                c => out.push(c),
            }
        }
        out.push(quote);
        out
    }
}

impl Repr for String {
    fn repr(&self) -> String {
        self.as_str().repr()
    }
}

impl Repr for [u8] {
    fn repr(&self) -> String {
        let quote = pick_quote(self.contains(&b'\''), self.contains(&b'"'));
        let mut out = String::with_capacity(self.len() + 3);
        out.push('b');
        out.push(quote);
        for &byte in self {
            match byte {
                b'\\' => out.push_str("\\\\"),
                b'\n' => out.push_str("\\n"),
                b'\r' => out.push_str("\\r"),
                b'\t' => out.push_str("\\t"),
                b if b as char == quote => {
                    out.push('\\');
                    out.push(quote);
                }
                0x20..=0x7e => out.push(byte as char),
                _ => out.push_str(&format!("\\x{:02x}", byte)),
            }
        }
        out.push(quote);
        out
    }
}

impl Repr for Vec<u8> {
    fn repr(&self) -> String {
        self.as_slice().repr()
    }
}

impl Repr for bool {
    fn repr(&self) -> String {
        let literal = if *self { "True" } else { "False" };
        literal.to_string()
    }
}

impl Repr for f64 {
    fn repr(&self) -> String {
        float_literal(*self)
    }
}

macro_rules! impl_repr_integer {
    ($($ty:ty),*) => {
        $(impl Repr for $ty {
            fn repr(&self) -> String {
                self.to_string()
            }
        })*
    };
}

impl_repr_integer!(i32, i64, u32, u64, usize);

impl<T: Repr> Repr for Option<T> {
    fn repr(&self) -> String {
        match self {
            Some(value) => value.repr(),
            None => "None".to_string(),
        }
    }
}

impl Repr for CacheValue {
    fn repr(&self) -> String {
        match self {
            CacheValue::Str(s) => s.repr(),
            CacheValue::Bytes(b) => b.repr(),
            CacheValue::Int(i) => i.repr(),
            CacheValue::Float(f) => f.repr(),
        }
    }
}

// A single value is one positional argument.
impl CallArgs for CacheValue {
    fn render_args(&self) -> String {
        format!("({},)", self.repr())
    }
}

impl CallArgs for () {
    fn render_args(&self) -> String {
        "()".to_string()
    }
}

impl<A: Repr> CallArgs for (A,) {
    fn render_args(&self) -> String {
        format!("({},)", self.0.repr())
    }
}

macro_rules! impl_call_args_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Repr),+> CallArgs for ($($name,)+) {
            fn render_args(&self) -> String {
                let parts = [$(self.$idx.repr()),+];
                format!("({})", parts.join(", "))
            }
        }
    };
}

impl_call_args_tuple!(A: 0, B: 1);
impl_call_args_tuple!(A: 0, B: 1, C: 2);
impl_call_args_tuple!(A: 0, B: 1, C: 2, D: 3);

/// True for characters a literal shows as an escape: controls, separators
/// other than the plain space, format characters and private use code points.
fn needs_escape(c: char) -> bool {
    if c.is_control() {
        return true;
    }
    matches!(
        c as u32,
        0x00a0
            | 0x00ad
            | 0x0600..=0x0605
            | 0x061c
            | 0x06dd
            | 0x070f
            | 0x0890..=0x0891
            | 0x08e2
            | 0x1680
            | 0x180e
            | 0x2000..=0x200f
            | 0x2028..=0x202f
            | 0x205f..=0x2064
            | 0x2066..=0x206f
            | 0x3000
            | 0xe000..=0xf8ff
            | 0xfeff
            | 0xfff9..=0xfffb
            | 0x110bd
            | 0x110cd
            | 0x13430..=0x1343f
            | 0x1bca0..=0x1bca3
            | 0x1d173..=0x1d17a
            | 0xe0001
            | 0xe0020..=0xe007f
            | 0xf0000..=0xffffd
            | 0x100000..=0x10fffd
    )
}

/// Single quotes unless the text holds a single quote and no double quote.
fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

// == Float Literal ==
/// Shortest round-trip decimal form of `value`: `3.0`, `0.1`, `1e+16`, `inf`, `nan`.
///
/// This is also the byte form floats are stored under.
pub fn float_literal(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let debug = format!("{:?}", value);
    match debug.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => debug,
    }
}
