mod lexer;
mod locate;
mod tree;
mod types;

use tracing::{debug, warn};

pub use lexer::Lexer;
pub use locate::{locate_container, DEFAULT_MARKER};
pub use tree::build_tree;
pub use types::{ContainerStart, Group, Node, NodeId, NodeKind, StyleTree, Token, TokenKind};

/// Locate the container in `source` and build its node arena.
///
/// `None` means the container was not found, either because no `<marker>({`
/// occurs outside comments and strings or because its literal never closes.
pub fn parse_styles(source: &str, marker: &str) -> Option<StyleTree> {
    let tokens: Vec<Token> = Lexer::new(source, 1).collect();
    let start = locate_container(&tokens, marker)?;
    debug!(marker, line = start.line, "container located");

    let tree = build_tree(tokens.into_iter().skip(start.token));
    match &tree {
        Some(t) => debug!(nodes = t.nodes.len(), "container parsed"),
        None => warn!(marker, line = start.line, "container literal is not closed"),
    }
    tree
}
