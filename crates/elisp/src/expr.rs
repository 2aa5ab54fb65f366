//! Elisp expression types.

use crate::builders::Call;

/// A self-evaluating atom.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i128),
    Float(f64),
    String(String),
}

/// An Elisp symbol.
///
/// The name is used exactly as given. Converting `snake_case` names happens
/// only in [`Symbol::kebab`] and the DSL's attribute-style lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    name: String,
}

/// A single cons cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cons {
    car: Box<Expr>,
    cdr: Box<Expr>,
}

/// A proper list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    items: Vec<Expr>,
}

/// A quoted form, rendered with a leading `'`.
///
/// Quoting is flat: a `Quote` never directly wraps another `Quote`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    expr: Box<Expr>,
}

/// Raw Elisp source pasted in verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw {
    src: String,
}

/// An Elisp syntax node.
///
/// Every node is an immutable value. Rendering to source text is done through
/// [`Display`](std::fmt::Display) or [`crate::render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Symbol(Symbol),
    Cons(Cons),
    List(List),
    Quote(Quote),
    Raw(Raw),
}

// ============================================================================
// Symbol
// ============================================================================

impl Symbol {
    /// Creates a symbol with the name exactly as given.
    pub fn new(name: impl Into<String>) -> Self {
        Symbol { name: name.into() }
    }

    /// Creates a symbol, converting the name from `snake_case` to `kebab-case`.
    pub fn kebab(name: &str) -> Self {
        Symbol::new(crate::snake_to_kebab(name))
    }

    /// Creates a keyword symbol, adding the leading `:` if it is missing.
    pub fn keyword(name: &str) -> Self {
        if name.starts_with(':') {
            Symbol::new(name)
        } else {
            Symbol::new(format!(":{}", name))
        }
    }

    /// The `nil` symbol.
    pub fn nil() -> Self {
        Symbol::new("nil")
    }

    /// The `t` symbol.
    pub fn t() -> Self {
        Symbol::new("t")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_keyword(&self) -> bool {
        self.name.starts_with(':')
    }

    /// Returns true for symbols that evaluate to themselves (`nil`, `t`, keywords).
    pub fn is_const(&self) -> bool {
        self.is_keyword() || self.name == "nil" || self.name == "t"
    }

    /// Returns the keyword form of this symbol.
    pub fn to_keyword(&self) -> Symbol {
        Symbol::keyword(&self.name)
    }

    /// Starts a function call with this symbol in function position.
    ///
    /// ```
    /// use emacs_elisp::E;
    ///
    /// let call = E.attr("message").call().arg("Hello %s").arg("world");
    /// assert_eq!(call.to_string(), r#"(message "Hello %s" "world")"#);
    /// ```
    pub fn call(&self) -> Call {
        Call::new(self.clone())
    }

    /// Quotes this symbol.
    pub fn q(&self) -> Expr {
        Expr::Symbol(self.clone()).quote()
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol::new(name)
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

// ============================================================================
// Cons / List / Quote / Raw
// ============================================================================

impl Cons {
    pub fn new(car: impl Into<Expr>, cdr: impl Into<Expr>) -> Self {
        Cons {
            car: Box::new(car.into()),
            cdr: Box::new(cdr.into()),
        }
    }

    pub fn car(&self) -> &Expr {
        &self.car
    }

    pub fn cdr(&self) -> &Expr {
        &self.cdr
    }
}

impl List {
    pub fn new(items: Vec<Expr>) -> Self {
        List { items }
    }

    pub fn items(&self) -> &[Expr] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<Expr> {
        self.items
    }
}

impl FromIterator<Expr> for List {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        List::new(iter.into_iter().collect())
    }
}

impl Quote {
    /// Quotes `expr`. An expression that is already quoted is returned as is.
    pub fn new(expr: impl Into<Expr>) -> Self {
        match expr.into() {
            Expr::Quote(quote) => quote,
            other => Quote {
                expr: Box::new(other),
            },
        }
    }

    /// The quoted expression.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl Raw {
    pub fn new(src: impl Into<String>) -> Self {
        Raw { src: src.into() }
    }

    pub fn src(&self) -> &str {
        &self.src
    }
}

// ============================================================================
// Expr
// ============================================================================

impl Expr {
    pub fn integer(value: impl Into<i128>) -> Self {
        Expr::Literal(Literal::Integer(value.into()))
    }

    pub fn float(value: impl Into<f64>) -> Self {
        Expr::Literal(Literal::Float(value.into()))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(Symbol::new(name))
    }

    pub fn list(items: Vec<Expr>) -> Self {
        Expr::List(List::new(items))
    }

    pub fn raw(src: impl Into<String>) -> Self {
        Expr::Raw(Raw::new(src))
    }

    /// Quotes this expression. Quoting a quoted expression is a no-op.
    pub fn quote(self) -> Expr {
        match self {
            Expr::Quote(_) => self,
            other => Expr::Quote(Quote::new(other)),
        }
    }

    /// Shorthand for [`Expr::quote`] that borrows.
    pub fn q(&self) -> Expr {
        self.clone().quote()
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, Expr::Quote(_))
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Expr::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Expr::List(list) => Some(list.items()),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Renders this expression as Elisp source text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Expr::Literal(value)
    }
}

impl From<Symbol> for Expr {
    fn from(value: Symbol) -> Self {
        Expr::Symbol(value)
    }
}

impl From<&Symbol> for Expr {
    fn from(value: &Symbol) -> Self {
        Expr::Symbol(value.clone())
    }
}

impl From<Cons> for Expr {
    fn from(value: Cons) -> Self {
        Expr::Cons(value)
    }
}

impl From<List> for Expr {
    fn from(value: List) -> Self {
        Expr::List(value)
    }
}

impl From<Quote> for Expr {
    fn from(value: Quote) -> Self {
        Expr::Quote(value)
    }
}

impl From<Raw> for Expr {
    fn from(value: Raw) -> Self {
        Expr::Raw(value)
    }
}

impl From<&Expr> for Expr {
    fn from(value: &Expr) -> Self {
        value.clone()
    }
}
