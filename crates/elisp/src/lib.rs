//! Emacs Lisp expression trees for Rust.
//!
//! This crate builds Elisp source code from Rust values. It has three layers:
//! - [`Expr`] and its node types, rendered to source text with `Display`
//! - builders that convert Rust values to expressions ([`ToElisp`],
//!   [`to_elisp_value`], [`funccall`], [`make_alist`], ...)
//! - the [`E`] facade for writing nested expressions tersely
//!
//! Example:
//! ```
//! use emacs_elisp::{E, make_plist};
//!
//! let expr = E.attr("json_encode").call().arg(make_plist([("name", "emacs")], true));
//! assert_eq!(expr.to_string(), r#"(json-encode '(:name "emacs"))"#);
//! ```

mod builders;
mod convert;
mod dsl;
mod error;
mod expr;
mod print;
mod ser;

pub use builders::{
    Call, IntoFunction, Source, cons, el_bool, el_let, el_list, el_list_with, el_true, funccall,
    funccall_kw, make_alist, make_alist_with, make_plist, make_plist_with, nil, quote, raw,
    snake_to_kebab, source, symbol, symbols,
};
pub use convert::{ConvertOptions, DictFormat, MapKey, ToElisp, to_elisp};
pub use dsl::{E, Elisp};
pub use error::{ElispError, ErrorKind};
pub use expr::{Cons, Expr, List, Literal, Quote, Raw, Symbol};
pub use print::{escape_string, format_float, render};
pub use ser::{to_elisp_value, to_elisp_value_with};
