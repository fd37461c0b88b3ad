use super::lexer::Lexer;
use super::types::{ContainerStart, Token, TokenKind};

pub const DEFAULT_MARKER: &str = "StyleSheet.create";

/// Find the first `<marker>({` in a token stream and return the position of
/// the opening brace. A type argument list (`<marker><Styles>({`) is allowed.
///
/// Matching runs on tokens, so mentions inside comments and string literals
/// never qualify.
pub fn locate_container(tokens: &[Token], marker: &str) -> Option<ContainerStart> {
    let pattern: Vec<TokenKind> = Lexer::new(marker, 1).map(|t| t.kind).collect();
    if pattern.is_empty() {
        return None;
    }

    (0..tokens.len()).find_map(|start| {
        let matches_marker = tokens
            .get(start..start + pattern.len())?
            .iter()
            .map(|t| &t.kind)
            .eq(pattern.iter());
        if !matches_marker {
            return None;
        }
        brace_after_call(tokens, start + pattern.len())
    })
}

/// `(` then `{`, after an optional `<...>`.
fn brace_after_call(tokens: &[Token], at: usize) -> Option<ContainerStart> {
    let mut i = skip_type_arguments(tokens, at)?;
    if tokens.get(i)?.kind != TokenKind::LParen {
        return None;
    }
    i += 1;
    let brace = tokens.get(i)?;
    if brace.kind != TokenKind::LBrace {
        return None;
    }
    Some(ContainerStart {
        token: i,
        line: brace.line,
    })
}

fn skip_type_arguments(tokens: &[Token], at: usize) -> Option<usize> {
    if tokens.get(at)?.kind != TokenKind::Other('<') {
        return Some(at);
    }

    let mut depth = 0usize;
    for (i, tok) in tokens.iter().enumerate().skip(at) {
        match tok.kind {
            TokenKind::Other('<') => depth += 1,
            TokenKind::Other('>') => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            TokenKind::LParen | TokenKind::LBrace | TokenKind::Other(';') => return None,
            _ => {}
        }
    }
    None
}
