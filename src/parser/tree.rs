use tracing::debug;

use super::types::{Node, NodeId, NodeKind, StyleTree, Token, TokenKind};

#[derive(Debug, Clone, Copy)]
enum EntryState {
    ExpectKey,
    /// After `key:`; `None` when the key is not a plain identifier.
    ExpectValue(Option<NodeId>),
    /// Inside a value that is not an object literal, at bracket depth `n`.
    SkipValue(u32),
    AfterValue,
}

struct Frame {
    object: NodeId,
    state: EntryState,
}

struct Builder {
    tree: StyleTree,
    stack: Vec<Frame>,
}

/// Build the node arena for the object literal that `tokens` opens.
///
/// The first token must be the container's `{`. Returns `None` if the tokens
/// run out before the balancing `}`.
pub fn build_tree(tokens: impl IntoIterator<Item = Token>) -> Option<StyleTree> {
    let mut tokens = tokens.into_iter().peekable();
    let first = tokens.next()?;
    if first.kind != TokenKind::LBrace {
        return None;
    }

    let mut builder = Builder {
        tree: StyleTree {
            nodes: vec![Node {
                kind: NodeKind::Object,
                parent: None,
                children: Vec::new(),
                depth: 0,
                line: first.line,
            }],
        },
        stack: vec![Frame {
            object: StyleTree::ROOT,
            state: EntryState::ExpectKey,
        }],
    };

    while let Some(tok) = tokens.next() {
        let key_follows = matches!(tokens.peek(), Some(t) if t.kind == TokenKind::Colon);
        if key_follows && builder.expects_key() {
            tokens.next();
        }
        if builder.feed(tok, key_follows) {
            return Some(builder.tree);
        }
    }

    None
}

impl Builder {
    fn expects_key(&self) -> bool {
        matches!(
            self.stack.last().map(|f| f.state),
            Some(EntryState::ExpectKey | EntryState::AfterValue)
        )
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind, depth: u16, line: usize) -> NodeId {
        let id = NodeId(self.tree.nodes.len());
        self.tree.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            depth,
            line,
        });
        self.tree.nodes[parent.0].children.push(id);
        id
    }

    fn set_state(&mut self, state: EntryState) {
        if let Some(frame) = self.stack.last_mut() {
            frame.state = state;
        }
    }

    /// Close the innermost object. Returns true once the container closes.
    fn close_object(&mut self) -> bool {
        self.stack.pop();
        self.stack.is_empty()
    }

    /// Feed one token. `key_follows` means the token was followed by a `:`
    /// that has already been consumed if a key was expected.
    fn feed(&mut self, tok: Token, key_follows: bool) -> bool {
        let Some(frame) = self.stack.last() else {
            return true;
        };
        let (object, state) = (frame.object, frame.state);

        match state {
            EntryState::ExpectKey => match tok.kind {
                TokenKind::RBrace => self.close_object(),
                TokenKind::Comma => false,
                TokenKind::Word(ref name) | TokenKind::Str(ref name) if key_follows => {
                    let key = is_identifier(name).then(|| {
                        let depth = self.tree.node(object).depth.saturating_add(1);
                        self.push_node(object, NodeKind::Key(name.clone()), depth, tok.line)
                    });
                    self.set_state(EntryState::ExpectValue(key));
                    false
                }
                // Spread, shorthand and computed entries
                _ => {
                    self.set_state(EntryState::SkipValue(0));
                    self.feed(tok, false)
                }
            },
            EntryState::ExpectValue(Some(key)) if tok.kind == TokenKind::LBrace => {
                let depth = self.tree.node(key).depth;
                let value = self.push_node(key, NodeKind::Object, depth, tok.line);
                self.set_state(EntryState::AfterValue);
                self.stack.push(Frame {
                    object: value,
                    state: EntryState::ExpectKey,
                });
                false
            }
            EntryState::ExpectValue(key) => {
                if object == StyleTree::ROOT {
                    if let Some(name) = key.and_then(|k| self.tree.key_name(k)) {
                        debug!(entry = name, line = tok.line, "top-level entry is not an object literal");
                    }
                }
                self.set_state(EntryState::SkipValue(0));
                self.feed(tok, false)
            }
            EntryState::SkipValue(depth) => match tok.kind {
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => {
                    self.set_state(EntryState::SkipValue(depth + 1));
                    false
                }
                TokenKind::RBrace if depth == 0 => self.close_object(),
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    self.set_state(EntryState::SkipValue(depth.saturating_sub(1)));
                    false
                }
                TokenKind::Comma if depth == 0 => {
                    self.set_state(EntryState::ExpectKey);
                    false
                }
                _ => false,
            },
            EntryState::AfterValue => match tok.kind {
                TokenKind::Comma => {
                    self.set_state(EntryState::ExpectKey);
                    false
                }
                TokenKind::RBrace => self.close_object(),
                // Entry without a separating comma
                TokenKind::Word(_) | TokenKind::Str(_) if key_follows => {
                    self.set_state(EntryState::ExpectKey);
                    self.feed(tok, true)
                }
                _ => {
                    self.set_state(EntryState::SkipValue(0));
                    self.feed(tok, false)
                }
            },
        }
    }
}

/// Key names follow the same rule at every level: ASCII alphanumerics and `_`.
pub(crate) fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn parse(src: &str) -> StyleTree {
        build_tree(Lexer::new(src, 1)).expect("container should close")
    }

    fn group_names(tree: &StyleTree) -> Vec<&str> {
        tree.groups().iter().map(|g| g.name).collect()
    }

    fn prop_names(tree: &StyleTree, body: NodeId) -> Vec<&str> {
        tree.keys_of(body)
            .filter_map(|k| tree.key_name(k))
            .collect()
    }

    #[test]
    fn test_groups_and_props() {
        let tree = parse("{\n  a: {\n    flex: 1,\n    color: 'red',\n  },\n  b: { margin: 2 },\n}");
        assert_eq!(group_names(&tree), vec!["a", "b"]);

        let groups = tree.groups();
        assert_eq!(groups[0].line, 2);
        assert_eq!(prop_names(&tree, groups[0].body), vec!["flex", "color"]);
        assert_eq!(prop_names(&tree, groups[1].body), vec!["margin"]);
    }

    #[test]
    fn test_nested_literal_is_a_property() {
        let tree = parse("{ card: { shadowOffset: { width: 0, height: 2 }, elevation: 3 }, next: {} }");
        assert_eq!(group_names(&tree), vec!["card", "next"]);
        let body = tree.groups()[0].body;
        assert_eq!(prop_names(&tree, body), vec!["shadowOffset", "elevation"]);

        let width = tree
            .nodes
            .iter()
            .find(|n| n.kind == NodeKind::Key("width".into()))
            .unwrap();
        assert_eq!(width.depth, 3);
    }

    #[test]
    fn test_missing_trailing_comma() {
        let tree = parse("{\n  a: { flex: 1 },\n  b: {\n    flex: 1,\n    flex: 2\n  }\n}");
        assert_eq!(group_names(&tree), vec!["a", "b"]);
        let body = tree.groups()[1].body;
        assert_eq!(prop_names(&tree, body), vec!["flex", "flex"]);
    }

    #[test]
    fn test_missing_separator_between_groups() {
        let tree = parse("{ a: { flex: 1 }\n b: { color: 1 } }");
        assert_eq!(group_names(&tree), vec!["a", "b"]);
        let body = tree.groups()[1].body;
        assert_eq!(prop_names(&tree, body), vec!["color"]);
    }

    #[test]
    fn test_skipped_entries() {
        let tree = parse(
            "{ ...base, plain: compute(1, {x: 2}), [dyn]: { a: 1 }, 'quoted': { 'z': 1, 'bad-key': 2 }, row: { ...flex, p: Platform.select({ ios: 1 }) } }",
        );
        assert_eq!(group_names(&tree), vec!["quoted", "row"]);
        let groups = tree.groups();
        assert_eq!(prop_names(&tree, groups[0].body), vec!["z"]);
        assert_eq!(prop_names(&tree, groups[1].body), vec!["p"]);
    }

    #[test]
    fn test_regex_value_keeps_body_open() {
        let tree = parse("{\n  a: { x: /}/.test(s) ? 1 : 2, x: 3 },\n  a: {},\n}");
        assert_eq!(group_names(&tree), vec!["a", "a"]);
        let body = tree.groups()[0].body;
        assert_eq!(prop_names(&tree, body), vec!["x", "x"]);
    }

    #[test]
    fn test_unterminated() {
        assert!(build_tree(Lexer::new("{ a: { flex: 1 }", 1)).is_none());
        assert!(build_tree(Lexer::new("a: {}", 1)).is_none());
    }

    #[test]
    fn test_parent_links() {
        let tree = parse("{ a: { b: 1 } }");
        for (i, node) in tree.nodes.iter().enumerate().skip(1) {
            let parent = node.parent.unwrap();
            assert!(tree.node(parent).children.contains(&NodeId(i)));
        }
    }

    #[test]
    fn test_identifier_rule() {
        assert!(is_identifier("container_2"));
        assert!(!is_identifier("bad-key"));
        assert!(!is_identifier("$x"));
        assert!(!is_identifier(""));
    }
}
