//! Input normalization for natural notation
//!
//! Rewrites the raw string into the canonical form the tree builder
//! consumes: lower-case, no whitespace, `pi` as the single marker `p`,
//! function names reduced to short codes, and explicit parentheses where
//! the one-character-at-a-time builder could not otherwise tell a unary
//! sign from a binary minus. Pure string-to-string; running the whole
//! pass over its own output is a no-op.

/// Canonical codes produced here: `s c t ct` (+ leading `a` / trailing `h`
/// kept verbatim), `l` for log, `le`/`l10` for ln/lg, `p` for pi.
pub(crate) fn normalize(input: &str) -> String {
    let s = strip_and_lower(input);
    let s = s.replace("pi", "p");
    let s = insert_constant_mul(&s);
    let s = wrap_digit_arguments(&s);
    let s = canonicalize_names(&s);
    wrap_signed_operands(&s)
}

fn strip_and_lower(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// `2e3` -> `2*e*3`: a constant marker directly against a digit means
/// multiplication on both sides.
fn insert_constant_mul(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if let Some(p) = prev {
            let boundary = (p.is_ascii_digit() && matches!(c, 'e' | 'p'))
                || (matches!(p, 'e' | 'p') && c.is_ascii_digit());
            if boundary {
                out.push('*');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Whether a raw letter run spells a function name (`sin`, `acos`, `tanh`,
/// `ln`, `log`, ...). Canonical single-letter codes are deliberately not in
/// this set, which keeps the pass idempotent on its own output.
fn is_function_spelling(run: &str) -> bool {
    if matches!(run, "ln" | "lg" | "log") {
        return true;
    }
    let run = run.strip_prefix('a').unwrap_or(run);
    let run = run.strip_suffix('h').unwrap_or(run);
    matches!(run, "sin" | "cos" | "tan" | "ctg")
}

/// `log10` -> `log(10)`, `ln2.5` -> `ln(2.5)`: a bare digit run directly
/// after a function spelling becomes its parenthesized argument.
fn wrap_digit_arguments(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_lowercase() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_lowercase() {
                i += 1;
            }
            let run: String = chars[start..i].iter().collect();
            out.push_str(&run);
            if is_function_spelling(&run)
                && i < chars.len()
                && (chars[i].is_ascii_digit() || chars[i] == '.')
            {
                let arg_start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                out.push('(');
                out.extend(&chars[arg_start..i]);
                out.push(')');
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Reduce spellings to the single-token codes the builder resolves.
/// Leading `a` and trailing `h` fall through untouched (`asin` -> `as`,
/// `tanh` -> `th`) for the pending-name resolver to judge.
fn canonicalize_names(s: &str) -> String {
    s.replace("sin", "s")
        .replace("cos", "c")
        .replace("ctg", "ct")
        .replace("tan", "t")
        .replace("log", "l")
        .replace("ln", "le")
        .replace("lg", "l10")
}

/// Characters after which a `-` must mean a sign, not a subtraction
fn is_sign_trigger(c: char) -> bool {
    matches!(c, '*' | '/' | '^' | 's' | 'c' | 't' | 'h' | 'l')
}

/// `^-3` -> `^(-3)`: wrap a signed operand where the builder would
/// otherwise see two operators in a row. Only digit/point/constant runs
/// and balanced groups are wrapped; a `-` before a bare function name is
/// left alone and later rejected by the builder.
fn wrap_signed_operands(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        out.push(chars[i]);
        if is_sign_trigger(chars[i]) && chars.get(i + 1) == Some(&'-') {
            if let Some(end) = signed_operand_end(&chars, i + 1) {
                out.push('(');
                out.extend(&chars[i + 1..end]);
                out.push(')');
                i = end;
                continue;
            }
        }
        i += 1;
    }
    out
}

/// End (exclusive) of the operand starting with the `-` at `minus`,
/// or None when nothing wrappable follows the sign
fn signed_operand_end(chars: &[char], minus: usize) -> Option<usize> {
    let mut j = minus + 1;
    match chars.get(j) {
        Some('(') => {
            let mut depth = 0usize;
            j += 1;
            while j < chars.len() {
                match chars[j] {
                    '(' => depth += 1,
                    ')' if depth == 0 => return Some(j + 1),
                    ')' => depth -= 1,
                    _ => {}
                }
                j += 1;
            }
            None
        }
        Some(c) if c.is_ascii_digit() || matches!(c, '.' | 'e' | 'p') => {
            while j < chars.len()
                && (chars[j].is_ascii_digit() || matches!(chars[j], '.' | 'e' | 'p'))
            {
                j += 1;
            }
            Some(j)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(normalize(" 1 + 2 "), "1+2");
        assert_eq!(normalize("SIN(1)"), "s(1)");
    }

    #[test]
    fn test_pi_marker() {
        assert_eq!(normalize("pi"), "p");
        assert_eq!(normalize("2pi"), "2*p");
        assert_eq!(normalize("pi2"), "p*2");
    }

    #[test]
    fn test_constant_multiplication() {
        assert_eq!(normalize("2e3"), "2*e*3");
        assert_eq!(normalize("e"), "e");
        assert_eq!(normalize("2e"), "2*e");
    }

    #[test]
    fn test_digit_argument_wrapping() {
        assert_eq!(normalize("log10(100)"), "l(10)(100)");
        assert_eq!(normalize("lg100"), "l10(100)");
        assert_eq!(normalize("ln2.5"), "le(2.5)");
        assert_eq!(normalize("sin2"), "s(2)");
    }

    #[test]
    fn test_name_canonicalization() {
        assert_eq!(normalize("sin(1)"), "s(1)");
        assert_eq!(normalize("asin(1)"), "as(1)");
        assert_eq!(normalize("sinh(1)"), "sh(1)");
        assert_eq!(normalize("ctg(1)"), "ct(1)");
        assert_eq!(normalize("ctgh(1)"), "cth(1)");
        assert_eq!(normalize("atan(1)"), "at(1)");
        assert_eq!(normalize("ln(5)"), "le(5)");
        assert_eq!(normalize("log(2)(8)"), "l(2)(8)");
    }

    #[test]
    fn test_sign_wrapping() {
        assert_eq!(normalize("2^-3"), "2^(-3)");
        assert_eq!(normalize("2*-3"), "2*(-3)");
        assert_eq!(normalize("2/-3"), "2/(-3)");
        assert_eq!(normalize("2^-(1+2)"), "2^(-(1+2))");
        assert_eq!(normalize("sin-3"), "s(-3)");
        // binary minus stays untouched
        assert_eq!(normalize("2-3"), "2-3");
        assert_eq!(normalize("(1)-3"), "(1)-3");
        // a sign before a bare function name is not wrapped
        assert_eq!(normalize("2^-sin(1)"), "2^-s(1)");
    }

    #[test]
    fn test_idempotence() {
        for input in [
            "1+2*3",
            "2^-3",
            "2pi",
            "log10(100)",
            "ln 100",
            "sin-3",
            "asin(0.5)+ctgh(2)",
            "2e3",
            "lg100",
            "(-2)^2",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }
}
