//! A terse front end for writing Elisp from Rust.
//!
//! ```
//! use emacs_elisp::E;
//!
//! let expr = E.attr("message").call().arg("Hello from %s").arg(E.of("rust"));
//! assert_eq!(expr.to_string(), r#"(message "Hello from %s" "rust")"#);
//!
//! assert_eq!(E.attr("foo_bar").to_string(), "foo-bar");
//! assert_eq!(E.item("foo_bar").to_string(), "foo_bar");
//! ```

use serde::Serialize;

use crate::builders;
use crate::convert::ToElisp;
use crate::error::ElispError;
use crate::expr::{Cons, Expr, Raw, Symbol};

/// The DSL entry point. Holds no state; use the [`E`] constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Elisp;

/// Shared instance of [`Elisp`].
pub const E: Elisp = Elisp;

impl Elisp {
    /// Convert a value, same as [`to_elisp`](crate::to_elisp).
    pub fn of<T: ToElisp + ?Sized>(&self, value: &T) -> Expr {
        value.to_elisp()
    }

    /// Convert a value whose type is only checked at runtime.
    pub fn of_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Expr, ElispError> {
        crate::to_elisp_value(value)
    }

    /// Attribute-style symbol lookup: `E.attr("foo_bar")` is `foo-bar`.
    pub fn attr(&self, name: &str) -> Symbol {
        Symbol::kebab(name)
    }

    /// Index-style symbol lookup: the name is used verbatim.
    pub fn item(&self, name: &str) -> Symbol {
        Symbol::new(name)
    }

    /// Quote, see [`builders::quote`].
    pub fn q<T: ToElisp + ?Sized>(&self, value: &T) -> Expr {
        builders::quote(value)
    }

    /// Cons cell, see [`builders::cons`].
    pub fn c(&self, car: impl ToElisp, cdr: impl ToElisp) -> Cons {
        builders::cons(car, cdr)
    }

    /// Unquoted list of symbols.
    pub fn s<I>(&self, names: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        builders::symbols(names, false)
    }

    /// Quoted list of symbols, `E.sq(["a", "b"])` is `'(a b)`.
    pub fn sq<I>(&self, names: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        builders::symbols(names, true)
    }

    /// Raw source code.
    pub fn r(&self, src: impl Into<String>) -> Raw {
        Raw::new(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Call, Quote, funccall_kw, symbol, symbols};

    #[test]
    fn test_attr() {
        assert_eq!(E.attr("foo"), Symbol::new("foo"));
        assert_eq!(E.attr("foo_bar"), Symbol::new("foo-bar"));
        assert_eq!(E.attr("json_encode").to_string(), "json-encode");
    }

    #[test]
    fn test_item() {
        assert_eq!(E.item("foo"), Symbol::new("foo"));
        assert_eq!(E.item("foo_bar"), Symbol::new("foo_bar"));
        assert_eq!(E.item(":baz").to_string(), ":baz");
        assert_eq!(E.item("Upper-Case").to_string(), "Upper-Case");
    }

    #[test]
    fn test_of_is_conversion() {
        assert_eq!(E.of(&1), Expr::integer(1));
        assert_eq!(E.of("rhizome-emacs"), Expr::string("rhizome-emacs"));
        assert_eq!(E.of(&vec![1, 2]).to_string(), "'(1 2)");
    }

    #[test]
    fn test_symbol_call() {
        let expr = E
            .attr("message")
            .call()
            .arg("Hello from %s")
            .arg(E.of("rhizome-emacs"));
        assert_eq!(
            expr.to_string(),
            "(message \"Hello from %s\" \"rhizome-emacs\")"
        );
    }

    #[test]
    fn test_symbol_call_matches_funccall() {
        let sym = symbol("foo");
        let via_call: Expr = sym.call().arg(1).kwarg("kw_arg", 2).arg("x").into();
        let via_funccall: Expr = funccall_kw(
            &sym,
            [Expr::integer(1), Expr::string("x")],
            [("kw_arg", 2)],
        )
        .into();
        assert_eq!(via_call, via_funccall);
        assert_eq!(via_call.to_string(), "(foo 1 \"x\" :kw-arg 2)");
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(E.q("foo"), Expr::Quote(Quote::new(Symbol::new("foo"))));
        assert_eq!(E.attr("json").q().to_string(), "'json");
        assert_eq!(E.c(E.item("a"), 1).to_string(), "(cons a 1)");
        assert_eq!(E.s(["a", "b"]).to_string(), "(a b)");
        assert_eq!(E.sq(["a", "b"]).to_string(), "'(a b)");
        assert_eq!(E.sq(["a"]), symbols(["a"], true));
        assert_eq!(E.r("(+ 1 2)").to_string(), "(+ 1 2)");
    }

    #[test]
    fn test_nested_calls() {
        let expr: Expr = E
            .attr("progn")
            .call()
            .arg(E.attr("require").call().arg(E.attr("json").q()))
            .arg(E.attr("json_encode").call().arg(vec![1, 2]))
            .into();
        assert_eq!(
            expr.to_string(),
            "(progn (require 'json) (json-encode '(1 2)))"
        );
        assert!(matches!(Call::new("x").build().items(), [Expr::Symbol(_)]));
    }
}
