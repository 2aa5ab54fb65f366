//! Functions to build Elisp expressions.

use std::fmt::{self, Display, Formatter};

use crate::convert::{ConvertOptions, MapKey, ToElisp};
use crate::expr::{Cons, Expr, List, Raw, Symbol};

/// The `nil` symbol.
pub fn nil() -> Symbol {
    Symbol::nil()
}

/// The standard Elisp representation of true, `t`.
pub fn el_true() -> Symbol {
    Symbol::t()
}

/// Convert a boolean to `t` or `nil`.
pub fn el_bool(value: bool) -> Symbol {
    if value { el_true() } else { nil() }
}

/// Convert a symbol name from `snake_case` to `kebab-case`.
pub fn snake_to_kebab(name: &str) -> String {
    name.replace('_', "-")
}

/// Create a symbol with the name exactly as given.
pub fn symbol(name: impl Into<Symbol>) -> Symbol {
    name.into()
}

/// Create a list of symbols, optionally quoted.
pub fn symbols<I>(names: I, quote: bool) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Symbol>,
{
    let list: List = names
        .into_iter()
        .map(|name| Expr::Symbol(name.into()))
        .collect();
    maybe_quote(list.into(), quote)
}

/// Create an unquoted list, converting every item.
pub fn el_list<I>(items: I) -> List
where
    I: IntoIterator,
    I::Item: ToElisp,
{
    el_list_with(items, &ConvertOptions::default())
}

pub fn el_list_with<I>(items: I, options: &ConvertOptions) -> List
where
    I: IntoIterator,
    I::Item: ToElisp,
{
    items
        .into_iter()
        .map(|item| item.to_elisp_with(options))
        .collect()
}

/// Create a cons cell, converting both sides.
pub fn cons(car: impl ToElisp, cdr: impl ToElisp) -> Cons {
    Cons::new(car.to_elisp(), cdr.to_elisp())
}

/// Convert and quote a value.
///
/// Strings are taken as symbol names: `quote("foo")` is `'foo`, not `'"foo"`.
pub fn quote<T: ToElisp + ?Sized>(value: &T) -> Expr {
    value.to_quote_form(&ConvertOptions::default()).quote()
}

/// Create raw source code.
pub fn raw(src: impl Into<String>) -> Raw {
    Raw::new(src)
}

fn maybe_quote(expr: Expr, quote: bool) -> Expr {
    if quote { expr.quote() } else { expr }
}

/// Create an alist `((k . v) ...)` from key-value pairs.
pub fn make_alist<I, K, V>(pairs: I, quote: bool) -> Expr
where
    I: IntoIterator<Item = (K, V)>,
    K: MapKey,
    V: ToElisp,
{
    make_alist_with(pairs, quote, &ConvertOptions::default())
}

pub fn make_alist_with<I, K, V>(pairs: I, quote: bool, options: &ConvertOptions) -> Expr
where
    I: IntoIterator<Item = (K, V)>,
    K: MapKey,
    V: ToElisp,
{
    let alist: List = pairs
        .into_iter()
        .map(|(key, value)| Cons::new(key.to_key(), value.to_elisp_with(options)).into())
        .collect();
    maybe_quote(alist.into(), quote)
}

/// Create a plist `(:k v ...)` from key-value pairs.
///
/// Symbol keys are given a leading `:` unless they already have one.
pub fn make_plist<I, K, V>(pairs: I, quote: bool) -> Expr
where
    I: IntoIterator<Item = (K, V)>,
    K: MapKey,
    V: ToElisp,
{
    make_plist_with(pairs, quote, &ConvertOptions::default())
}

pub fn make_plist_with<I, K, V>(pairs: I, quote: bool, options: &ConvertOptions) -> Expr
where
    I: IntoIterator<Item = (K, V)>,
    K: MapKey,
    V: ToElisp,
{
    let mut items = Vec::new();
    for (key, value) in pairs {
        let key = match key.to_key() {
            Expr::Symbol(symbol) => Expr::Symbol(symbol.to_keyword()),
            other => other,
        };
        items.push(key);
        items.push(value.to_elisp_with(options));
    }
    maybe_quote(Expr::list(items), quote)
}

/// Things that can sit in the function position of a call.
pub trait IntoFunction {
    fn into_function(self) -> Expr;
}

impl IntoFunction for &str {
    fn into_function(self) -> Expr {
        Symbol::new(self).into()
    }
}

impl IntoFunction for String {
    fn into_function(self) -> Expr {
        Symbol::new(self).into()
    }
}

impl IntoFunction for Symbol {
    fn into_function(self) -> Expr {
        self.into()
    }
}

impl IntoFunction for &Symbol {
    fn into_function(self) -> Expr {
        self.clone().into()
    }
}

impl IntoFunction for Expr {
    fn into_function(self) -> Expr {
        self
    }
}

/// Create a function call `(f args...)`.
pub fn funccall<F, I>(f: F, args: I) -> List
where
    F: IntoFunction,
    I: IntoIterator,
    I::Item: ToElisp,
{
    Call::new(f).args(args).build()
}

/// Create a function call with keyword arguments, `(f args... :key value ...)`.
///
/// Keyword names are converted like `my_num` -> `:my-num`.
pub fn funccall_kw<F, I, K, N, V>(f: F, args: I, kwargs: K) -> List
where
    F: IntoFunction,
    I: IntoIterator,
    I::Item: ToElisp,
    K: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: ToElisp,
{
    let mut call = Call::new(f).args(args);
    for (name, value) in kwargs {
        call = call.kwarg(name.as_ref(), value);
    }
    call.build()
}

/// Builder for a function call expression.
///
/// Positional and keyword arguments may be added in any order; keyword
/// arguments always end up after all positional ones, each in the order added.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    function: Expr,
    args: Vec<Expr>,
    kwargs: Vec<(Symbol, Expr)>,
}

impl Call {
    pub fn new(function: impl IntoFunction) -> Self {
        Call {
            function: function.into_function(),
            args: Vec::new(),
            kwargs: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl ToElisp) -> Self {
        self.args.push(value.to_elisp());
        self
    }

    pub fn args<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToElisp,
    {
        self.args
            .extend(values.into_iter().map(|value| value.to_elisp()));
        self
    }

    /// Add a keyword argument; `name` is kebab-cased and prefixed with `:`.
    pub fn kwarg(mut self, name: &str, value: impl ToElisp) -> Self {
        let key = Symbol::keyword(&snake_to_kebab(name));
        self.kwargs.push((key, value.to_elisp()));
        self
    }

    pub fn build(self) -> List {
        let mut items = Vec::with_capacity(1 + self.args.len() + 2 * self.kwargs.len());
        items.push(self.function);
        items.extend(self.args);
        for (key, value) in self.kwargs {
            items.push(key.into());
            items.push(value);
        }
        List::new(items)
    }
}

impl From<Call> for Expr {
    fn from(call: Call) -> Self {
        call.build().into()
    }
}

impl ToElisp for Call {
    fn to_elisp_with(&self, _options: &ConvertOptions) -> Expr {
        self.clone().into()
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Expr::from(self.clone()))
    }
}

/// Source code given as raw text, an expression, or a sequence of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Raw(String),
    Expr(Expr),
    Seq(Vec<Source>),
}

impl From<&str> for Source {
    fn from(src: &str) -> Self {
        Source::Raw(src.to_string())
    }
}

impl From<String> for Source {
    fn from(src: String) -> Self {
        Source::Raw(src)
    }
}

impl From<Expr> for Source {
    fn from(expr: Expr) -> Self {
        Source::Expr(expr)
    }
}

impl From<List> for Source {
    fn from(list: List) -> Self {
        Source::Expr(list.into())
    }
}

impl From<Call> for Source {
    fn from(call: Call) -> Self {
        Source::Expr(call.into())
    }
}

impl<T: Into<Source>> From<Vec<T>> for Source {
    fn from(items: Vec<T>) -> Self {
        Source::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl Source {
    /// The source as a single expression. Sequences are enclosed in `progn`.
    pub fn into_expr(self) -> Expr {
        match self {
            Source::Raw(src) => Expr::raw(src),
            Source::Expr(expr) => expr,
            Source::Seq(items) => {
                funccall("progn", items.into_iter().map(Source::into_expr)).into()
            }
        }
    }
}

/// Get source code as a single expression, see [`Source::into_expr`].
pub fn source(src: impl Into<Source>) -> Expr {
    src.into().into_expr()
}

/// Create a `let` form. Variable names are kebab-cased.
pub fn el_let<B, N, V, I>(bindings: B, body: I) -> List
where
    B: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: ToElisp,
    I: IntoIterator,
    I::Item: ToElisp,
{
    let varlist: List = bindings
        .into_iter()
        .map(|(name, value)| {
            Expr::list(vec![
                Symbol::kebab(name.as_ref()).into(),
                value.to_elisp(),
            ])
        })
        .collect();
    Call::new("let").arg(varlist).args(body).build()
}
