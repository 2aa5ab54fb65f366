//! Conversion of Rust values to Elisp expressions.
//!
//! | Rust value | Elisp |
//! |---|---|
//! | [`Expr`] and node types | unchanged |
//! | `bool` | `t` / `nil` |
//! | `()`, `None` | `nil` |
//! | integers, floats, `str`, `String`, `char` | literals |
//! | `Vec`, slices, arrays | quoted list |
//! | tuples | unquoted list |
//! | `BTreeMap`, `HashMap`, JSON objects | alist or plist, see [`DictFormat`] |
//!
//! Values whose type is only known at runtime go through
//! [`to_elisp_value`](crate::to_elisp_value) instead.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::builders::{make_alist_with, make_plist_with};
use crate::error::ElispError;
use crate::expr::{Cons, Expr, List, Literal, Quote, Raw, Symbol};

/// Elisp representation used for maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictFormat {
    /// `((k . v) ...)`
    #[default]
    Alist,
    /// `(:k v ...)`
    Plist,
}

impl FromStr for DictFormat {
    type Err = ElispError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alist" => Ok(DictFormat::Alist),
            "plist" => Ok(DictFormat::Plist),
            other => Err(ElispError::InvalidDictFormat(other.to_string())),
        }
    }
}

/// Options controlling conversion of composite values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub dict_format: DictFormat,
}

impl ConvertOptions {
    pub fn plist() -> Self {
        ConvertOptions {
            dict_format: DictFormat::Plist,
        }
    }
}

/// Types that can be converted to an Elisp expression.
pub trait ToElisp {
    /// Convert using the given options.
    fn to_elisp_with(&self, options: &ConvertOptions) -> Expr;

    /// Convert using default options.
    fn to_elisp(&self) -> Expr {
        self.to_elisp_with(&ConvertOptions::default())
    }

    /// The form that [`quote`](crate::quote) wraps. Strings override this to
    /// produce a symbol, so quoting `"foo"` gives `'foo` rather than `'"foo"`.
    fn to_quote_form(&self, options: &ConvertOptions) -> Expr {
        self.to_elisp_with(options)
    }
}

/// Convert a value using default options.
pub fn to_elisp<T: ToElisp + ?Sized>(value: &T) -> Expr {
    value.to_elisp()
}

/// Types usable as keys of an alist or plist.
///
/// Strings become symbols; everything else converts as usual.
pub trait MapKey {
    fn to_key(&self) -> Expr;
}

// ============================================================================
// Expression types
// ============================================================================

impl ToElisp for Expr {
    fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
        self.clone()
    }
}

macro_rules! node_to_elisp {
    ($($ty:ty),*) => {
        $(
            impl ToElisp for $ty {
                fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
                    Expr::from(self.clone())
                }
            }
        )*
    };
}

node_to_elisp!(Literal, Symbol, Cons, List, Quote, Raw);

// ============================================================================
// Atoms
// ============================================================================

impl ToElisp for bool {
    fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
        crate::el_bool(*self).into()
    }
}

impl ToElisp for () {
    fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
        Symbol::nil().into()
    }
}

impl<T: ToElisp> ToElisp for Option<T> {
    fn to_elisp_with(&self, options: &ConvertOptions) -> Expr {
        match self {
            Some(value) => value.to_elisp_with(options),
            None => Symbol::nil().into(),
        }
    }
}

macro_rules! integer_to_elisp {
    ($($ty:ty),*) => {
        $(
            impl ToElisp for $ty {
                fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
                    Expr::Literal(Literal::Integer(i128::from(*self)))
                }
            }

            impl MapKey for $ty {
                fn to_key(&self) -> Expr {
                    self.to_elisp()
                }
            }
        )*
    };
}

integer_to_elisp!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl ToElisp for isize {
    fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
        Expr::Literal(Literal::Integer(*self as i128))
    }
}

impl ToElisp for usize {
    fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
        Expr::Literal(Literal::Integer(*self as i128))
    }
}

impl ToElisp for f32 {
    fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
        Expr::Literal(Literal::Float(f64::from(*self)))
    }
}

impl ToElisp for f64 {
    fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
        Expr::Literal(Literal::Float(*self))
    }
}

impl ToElisp for str {
    fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
        Expr::Literal(Literal::String(self.to_string()))
    }

    fn to_quote_form(&self, _options: &ConvertOptions) -> Expr {
        Symbol::new(self).into()
    }
}

impl ToElisp for String {
    fn to_elisp_with(&self, options: &ConvertOptions) -> Expr {
        self.as_str().to_elisp_with(options)
    }

    fn to_quote_form(&self, options: &ConvertOptions) -> Expr {
        self.as_str().to_quote_form(options)
    }
}

impl ToElisp for char {
    fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
        Expr::Literal(Literal::String(self.to_string()))
    }
}

// ============================================================================
// References
// ============================================================================

impl<T: ToElisp + ?Sized> ToElisp for &T {
    fn to_elisp_with(&self, options: &ConvertOptions) -> Expr {
        (**self).to_elisp_with(options)
    }

    fn to_quote_form(&self, options: &ConvertOptions) -> Expr {
        (**self).to_quote_form(options)
    }
}

impl<T: ToElisp + ?Sized> ToElisp for Box<T> {
    fn to_elisp_with(&self, options: &ConvertOptions) -> Expr {
        (**self).to_elisp_with(options)
    }

    fn to_quote_form(&self, options: &ConvertOptions) -> Expr {
        (**self).to_quote_form(options)
    }
}

// ============================================================================
// Sequences
// ============================================================================

impl<T: ToElisp> ToElisp for [T] {
    fn to_elisp_with(&self, options: &ConvertOptions) -> Expr {
        let list: List = self.iter().map(|item| item.to_elisp_with(options)).collect();
        Expr::from(list).quote()
    }
}

impl<T: ToElisp, const N: usize> ToElisp for [T; N] {
    fn to_elisp_with(&self, options: &ConvertOptions) -> Expr {
        self.as_slice().to_elisp_with(options)
    }
}

impl<T: ToElisp> ToElisp for Vec<T> {
    fn to_elisp_with(&self, options: &ConvertOptions) -> Expr {
        self.as_slice().to_elisp_with(options)
    }
}

macro_rules! tuple_to_elisp {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: ToElisp),+> ToElisp for ($($name,)+) {
            fn to_elisp_with(&self, options: &ConvertOptions) -> Expr {
                Expr::list(vec![$(self.$idx.to_elisp_with(options)),+])
            }
        }

        impl<$($name: ToElisp),+> MapKey for ($($name,)+) {
            fn to_key(&self) -> Expr {
                self.to_elisp()
            }
        }
    };
}

tuple_to_elisp!(A: 0);
tuple_to_elisp!(A: 0, B: 1);
tuple_to_elisp!(A: 0, B: 1, C: 2);
tuple_to_elisp!(A: 0, B: 1, C: 2, D: 3);
tuple_to_elisp!(A: 0, B: 1, C: 2, D: 3, F: 4);
tuple_to_elisp!(A: 0, B: 1, C: 2, D: 3, F: 4, G: 5);
tuple_to_elisp!(A: 0, B: 1, C: 2, D: 3, F: 4, G: 5, H: 6);
tuple_to_elisp!(A: 0, B: 1, C: 2, D: 3, F: 4, G: 5, H: 6, I: 7);

// ============================================================================
// Maps
// ============================================================================

fn map_to_elisp<'a, K, V, I>(pairs: I, options: &ConvertOptions) -> Expr
where
    K: MapKey + ?Sized + 'a,
    V: ToElisp + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    match options.dict_format {
        DictFormat::Alist => make_alist_with(pairs, false, options),
        DictFormat::Plist => make_plist_with(pairs, false, options),
    }
}

impl<K: MapKey, V: ToElisp> ToElisp for BTreeMap<K, V> {
    fn to_elisp_with(&self, options: &ConvertOptions) -> Expr {
        map_to_elisp(self.iter(), options)
    }
}

/// Pairs come out in the map's iteration order, which is unspecified.
impl<K: MapKey, V: ToElisp, S> ToElisp for HashMap<K, V, S> {
    fn to_elisp_with(&self, options: &ConvertOptions) -> Expr {
        map_to_elisp(self.iter(), options)
    }
}

impl ToElisp for serde_json::Value {
    fn to_elisp_with(&self, options: &ConvertOptions) -> Expr {
        use serde_json::Value;

        match self {
            Value::Null => Symbol::nil().into(),
            Value::Bool(b) => b.to_elisp_with(options),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Expr::integer(i)
                } else if let Some(u) = n.as_u64() {
                    Expr::integer(u)
                } else {
                    Expr::float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => s.to_elisp_with(options),
            Value::Array(items) => items.to_elisp_with(options),
            Value::Object(map) => map_to_elisp(map.iter(), options),
        }
    }
}

// ============================================================================
// Map keys
// ============================================================================

impl MapKey for str {
    fn to_key(&self) -> Expr {
        Symbol::new(self).into()
    }
}

impl MapKey for String {
    fn to_key(&self) -> Expr {
        Symbol::new(self.as_str()).into()
    }
}

impl MapKey for char {
    fn to_key(&self) -> Expr {
        Symbol::new(self.to_string()).into()
    }
}

impl MapKey for Symbol {
    fn to_key(&self) -> Expr {
        self.clone().into()
    }
}

impl MapKey for Expr {
    fn to_key(&self) -> Expr {
        self.clone()
    }
}

/// Non-string keys convert exactly like values.
macro_rules! converted_map_key {
    ($($ty:ty),*) => {
        $(
            impl MapKey for $ty {
                fn to_key(&self) -> Expr {
                    self.to_elisp()
                }
            }
        )*
    };
}

converted_map_key!(isize, usize, f32, f64, bool, ());
converted_map_key!(Literal, Cons, List, Quote, Raw);

impl<T: ToElisp> MapKey for Option<T> {
    fn to_key(&self) -> Expr {
        self.to_elisp()
    }
}

impl<K: MapKey + ?Sized> MapKey for &K {
    fn to_key(&self) -> Expr {
        (**self).to_key()
    }
}
