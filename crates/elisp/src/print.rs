//! Rendering expressions as Elisp source text.

use std::fmt::{self, Display, Formatter, Write};

use crate::expr::{Cons, Expr, List, Literal, Quote, Raw, Symbol};

/// Render an expression as Elisp source text.
pub fn render(expr: &Expr) -> String {
    expr.to_string()
}

/// Write `expr`, either as code or as data inside a quoted form.
///
/// As code a cons cell is a call to `cons`; as data it is dotted-pair syntax.
/// A quote met while already writing data adds nothing, the enclosing quote
/// covers it.
fn write_expr(f: &mut Formatter<'_>, expr: &Expr, quoted: bool) -> fmt::Result {
    match expr {
        Expr::Literal(literal) => write!(f, "{}", literal),
        Expr::Symbol(symbol) => write!(f, "{}", symbol),
        Expr::Raw(raw) => f.write_str(raw.src()),
        Expr::Quote(quote) => {
            if !quoted {
                f.write_char('\'')?;
            }
            write_expr(f, quote.expr(), true)
        }
        Expr::Cons(cons) => write_cons(f, cons, quoted),
        Expr::List(list) => write_list(f, list, quoted),
    }
}

fn write_cons(f: &mut Formatter<'_>, cons: &Cons, quoted: bool) -> fmt::Result {
    if quoted {
        f.write_char('(')?;
        write_expr(f, cons.car(), true)?;
        f.write_str(" . ")?;
        write_expr(f, cons.cdr(), true)?;
    } else {
        f.write_str("(cons ")?;
        write_expr(f, cons.car(), false)?;
        f.write_char(' ')?;
        write_expr(f, cons.cdr(), false)?;
    }
    f.write_char(')')
}

/// A list headed by a cons cell can never be a call, so it is an alist and
/// always written as data.
fn write_list(f: &mut Formatter<'_>, list: &List, quoted: bool) -> fmt::Result {
    let quoted = quoted || matches!(list.items().first(), Some(Expr::Cons(_)));
    f.write_char('(')?;
    for (idx, item) in list.items().iter().enumerate() {
        if idx > 0 {
            f.write_char(' ')?;
        }
        write_expr(f, item, quoted)?;
    }
    f.write_char(')')
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_expr(f, self, false)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Float(n) => f.write_str(&format_float(*n)),
            Literal::String(s) => f.write_str(&escape_string(s)),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.name().is_empty() {
            // Read syntax of the interned symbol with an empty name.
            f.write_str("##")
        } else {
            f.write_str(self.name())
        }
    }
}

impl Display for Cons {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_cons(f, self, false)
    }
}

impl Display for List {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_list(f, self, false)
    }
}

impl Display for Quote {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('\'')?;
        write_expr(f, self.expr(), true)
    }
}

impl Display for Raw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.src())
    }
}

/// Format a float so the Elisp reader never mistakes it for an integer.
pub fn format_float(n: f64) -> String {
    if n.is_nan() {
        "0.0e+NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "1.0e+INF".to_string()
        } else {
            "-1.0e+INF".to_string()
        }
    } else if n.fract() == 0.0 {
        format!("{:.1}", n)
    } else {
        format!("{}", n)
    }
}

/// Quote and escape a string as an Elisp string literal.
///
/// The output reads back as exactly `s`. Control characters without a named
/// escape use three-digit octal so a following digit is never absorbed.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
