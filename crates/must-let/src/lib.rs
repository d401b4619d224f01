//! Offline vendor of the `must_let!` macro (upstream: sujayakar/must-let).
//!
//! `must_let!(let PATTERN = EXPR)` evaluates `EXPR`, binds the variables in
//! `PATTERN` into the enclosing scope when it matches, and panics otherwise.

#[macro_export]
macro_rules! must_let {
    (let $pattern:pat = $expr:expr) => {
        let $pattern = $expr else {
            panic!(
                "must_let!: pattern `{}` did not match `{}`",
                stringify!($pattern),
                stringify!($expr),
            );
        };
    };
}
