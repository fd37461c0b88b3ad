/// Lexical token kinds inside a style literal.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Spread, // ...
    /// Identifier or numeric literal.
    Word(String),
    /// String literal content, without quotes.
    Str(String),
    /// Template literal; content is not needed.
    Template,
    /// Regex literal, flags included.
    Regex,
    /// Anything else (operators, dots, semicolons).
    Other(char),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based line in the source text.
    pub line: usize,
}

/// Where the container literal starts in a token stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerStart {
    /// Index of the `{` token that opens the container literal.
    pub token: usize,
    /// 1-based line of that brace.
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An object literal `{ ... }`.
    Object,
    /// A `key:` entry; its only child, if any, is the object literal value.
    Key(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Object nesting depth; the container object is 0, its keys are 1.
    pub depth: u16,
    pub line: usize,
}

/// Arena of nodes for one container literal. Node 0 is the container object.
#[derive(Debug, Clone)]
pub struct StyleTree {
    pub nodes: Vec<Node>,
}

/// One top-level entry whose value is an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub name: &'a str,
    pub line: usize,
    /// The group's body object.
    pub body: NodeId,
}

impl StyleTree {
    pub const ROOT: NodeId = NodeId(0);
    /// Depth of keys inside a group body.
    pub const PROPERTY_DEPTH: u16 = 2;

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn key_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Key(name) => Some(name),
            NodeKind::Object => None,
        }
    }

    /// Object literal value of a key, if the key has one.
    pub fn object_value(&self, key: NodeId) -> Option<NodeId> {
        self.node(key)
            .children
            .iter()
            .copied()
            .find(|c| self.node(*c).kind == NodeKind::Object)
    }

    /// Key nodes directly inside an object, in document order.
    pub fn keys_of(&self, object: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(object)
            .children
            .iter()
            .copied()
            .filter(|c| matches!(self.node(*c).kind, NodeKind::Key(_)))
    }

    /// Top-level groups in document order, duplicates included.
    pub fn groups(&self) -> Vec<Group<'_>> {
        self.keys_of(Self::ROOT)
            .filter_map(|key| {
                let body = self.object_value(key)?;
                Some(Group {
                    name: self.key_name(key)?,
                    line: self.node(key).line,
                    body,
                })
            })
            .collect()
    }

    /// Property keys of every group in document order, each paired with the
    /// group occurrence whose body holds it.
    pub fn properties(&self) -> impl Iterator<Item = (Group<'_>, NodeId)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, node)| {
            if node.depth != Self::PROPERTY_DEPTH || !matches!(node.kind, NodeKind::Key(_)) {
                return None;
            }
            let body = node.parent?;
            let group_key = self.node(body).parent?;
            let group = Group {
                name: self.key_name(group_key)?,
                line: self.node(group_key).line,
                body,
            };
            Some((group, NodeId(i)))
        })
    }
}
