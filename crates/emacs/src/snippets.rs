//! Elisp forms wrapped around user code before it is sent to Emacs.

use emacs_elisp::{Call, E, Expr, el_let, nil};

/// `(progn (require 'json) (json-encode expr))`
pub fn encode_json(expr: impl Into<Expr>) -> Expr {
    E.attr("progn")
        .call()
        .arg(require_json())
        .arg(E.attr("json_encode").call().arg(expr.into()))
        .into()
}

/// Evaluate `expr` inside `condition-case` and produce a JSON object
/// `{"value": ..., "error": ...}`.
///
/// `error` is `null` on success, otherwise a JSON object with the error
/// symbol, data and message. `value` is `null` on failure. When `encoded` is
/// set, `expr` must already evaluate to a JSON string.
pub fn catch_errors_json(expr: impl Into<Expr>, encoded: bool) -> Expr {
    let expr = expr.into();
    let value_enc: Expr = if encoded {
        expr
    } else {
        E.attr("json_encode").call().arg(expr).into()
    };

    let err = E.item("err");
    let error_plist = E
        .attr("json_encode_plist")
        .call()
        .arg(
            Call::new("list")
                .arg(E.item(":symbol"))
                .arg(E.attr("car").call().arg(&err))
                .arg(E.item(":data"))
                .arg(E.attr("cdr").call().arg(&err))
                .arg(E.item(":msg"))
                .arg(E.attr("error_message_string").call().arg(&err)),
        );
    let handler = Call::new("error")
        .arg(E.attr("setq").call().arg(E.attr("err_enc")).arg(error_plist))
        .arg("null");
    let guarded = E
        .attr("condition_case")
        .call()
        .arg(&err)
        .arg(value_enc)
        .arg(handler);

    el_let(
        [("value_enc", Expr::from(nil())), ("err_enc", Expr::string("null"))],
        [
            require_json(),
            E.attr("setq").call().arg(E.attr("value_enc")).arg(guarded).into(),
            E.attr("format")
                .call()
                .arg(r#"{"value": %s, "error": %s}"#)
                .arg(E.attr("value_enc"))
                .arg(E.attr("err_enc"))
                .into(),
        ],
    )
    .into()
}

fn require_json() -> Expr {
    E.attr("require").call().arg(E.attr("json").q()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_json() {
        let expr = encode_json(E.attr("buffer_name").call());
        assert_eq!(
            expr.to_string(),
            "(progn (require 'json) (json-encode (buffer-name)))"
        );
    }

    #[test]
    fn test_catch_errors_json() {
        let expr = catch_errors_json(E.r("(+ 1 2)"), false);
        assert_eq!(
            expr.to_string(),
            concat!(
                r#"(let ((value-enc nil) (err-enc "null")) "#,
                r#"(require 'json) "#,
                r#"(setq value-enc (condition-case err (json-encode (+ 1 2)) "#,
                r#"(error (setq err-enc (json-encode-plist (list :symbol (car err) :data (cdr err) :msg (error-message-string err)))) "null"))) "#,
                r#"(format "{\"value\": %s, \"error\": %s}" value-enc err-enc))"#,
            )
        );
    }

    #[test]
    fn test_catch_errors_json_already_encoded() {
        let expr = catch_errors_json(E.r("(json-encode-list '(1 2))"), true);
        let rendered = expr.to_string();
        assert!(rendered.contains("(condition-case err (json-encode-list '(1 2)) (error"));
        assert!(!rendered.contains("(json-encode (json-encode-list"));
    }
}
