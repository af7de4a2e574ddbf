//! Parser for DOT-shaped workflow graph documents.
//!
//! The accepted dialect is a small subset of DOT: an optional `strict`
//! marker, a `digraph`/`graph` header with an optional name, then a braced
//! body of statements. A statement is a node (with an optional bracketed
//! attribute list), an edge chain whose endpoints implicitly declare nodes,
//! or a graph-scope `name = value` setting, which is parsed and dropped.
//! Attribute lists after an edge chain belong to the edge and carry no node
//! configuration.
//!
//! Gain attributes `kp`, `ki`, `kd` configure the declared node; everything
//! else (`label`, `shape`, ...) is ignored. Repeated statements for one
//! node merge, later attribute wins. Output order is first appearance.

use std::fs;
use std::path::Path;

use crate::config::NodeConfig;
use crate::error::{Error, Result};
use crate::lexer::{lex, Token};

/// Load a workflow graph document from disk.
pub fn load_graph(path: impl AsRef<Path>) -> Result<Vec<NodeConfig>> {
    let text = fs::read_to_string(path)?;
    parse_graph(&text)
}

/// Parse an in-memory workflow graph document.
pub fn parse_graph(text: &str) -> Result<Vec<NodeConfig>> {
    let tokens = lex(text)?;
    Parser::new(&tokens).document()
}

struct Parser<'a> {
    tokens: &'a [(Token, usize)],
    pos: usize,
    nodes: Vec<NodeConfig>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [(Token, usize)]) -> Self {
        Self {
            tokens,
            pos: 0,
            nodes: Vec::new(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Line of the current token; at end of input, of the last token.
    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |&(_, line)| line)
    }

    fn syntax(&self, message: impl Into<String>) -> Error {
        Error::Syntax {
            line: self.line(),
            message: message.into(),
        }
    }

    fn unexpected(&self, context: &str) -> Error {
        let found = match self.peek() {
            Some(token) => format!("{token:?}"),
            None => "end of input".to_string(),
        };
        self.syntax(format!("expected {context}, found {found}"))
    }

    fn document(mut self) -> Result<Vec<NodeConfig>> {
        if matches!(self.peek(), Some(Token::Strict)) {
            self.advance();
        }
        match self.peek() {
            Some(Token::Digraph | Token::Graph) => self.advance(),
            _ => return Err(self.unexpected("`digraph` or `graph`")),
        }
        if matches!(self.peek(), Some(Token::Ident(_) | Token::Quoted(_))) {
            self.advance();
        }
        match self.peek() {
            Some(Token::LBrace) => self.advance(),
            _ => return Err(self.unexpected("`{` to open the graph body")),
        }
        loop {
            match self.peek() {
                Some(Token::RBrace) => {
                    self.advance();
                    break;
                }
                Some(_) => self.statement()?,
                None => return Err(self.syntax("unclosed graph body")),
            }
        }
        if self.peek().is_some() {
            return Err(self.unexpected("end of document after `}`"));
        }
        Ok(self.nodes)
    }

    fn statement(&mut self) -> Result<()> {
        let first = self.identifier("a node or setting name")?;

        // graph-scope setting such as `rankdir=LR` - parsed and dropped
        if matches!(self.peek(), Some(Token::Eq)) {
            self.advance();
            self.value("a setting value")?;
            self.terminator();
            return Ok(());
        }

        let index = self.declare(&first);
        let mut is_edge = false;
        while matches!(
            self.peek(),
            Some(Token::DirectedEdge | Token::UndirectedEdge)
        ) {
            self.advance();
            let endpoint = self.identifier("an edge endpoint")?;
            self.declare(&endpoint);
            is_edge = true;
        }

        if matches!(self.peek(), Some(Token::LBracket)) {
            let attrs = self.attribute_list()?;
            if !is_edge {
                self.apply(index, attrs)?;
            }
        }
        self.terminator();
        Ok(())
    }

    fn attribute_list(&mut self) -> Result<Vec<(String, String)>> {
        self.advance(); // [
        let mut attrs = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RBracket) => {
                    self.advance();
                    return Ok(attrs);
                }
                None => return Err(self.syntax("unclosed attribute list")),
                Some(_) => {}
            }
            let key = self.identifier("an attribute name")?;
            match self.peek() {
                Some(Token::Eq) => self.advance(),
                _ => return Err(self.unexpected("`=` after an attribute name")),
            }
            let value = self.value("an attribute value")?;
            attrs.push((key, value));
            // `,` and `;` both separate entries; bare whitespace works too
            while matches!(self.peek(), Some(Token::Comma | Token::Semicolon)) {
                self.advance();
            }
        }
    }

    fn identifier(&mut self, context: &str) -> Result<String> {
        match self.peek().cloned() {
            Some(Token::Ident(id) | Token::Quoted(id)) => {
                self.advance();
                Ok(id)
            }
            _ => Err(self.unexpected(context)),
        }
    }

    fn value(&mut self, context: &str) -> Result<String> {
        match self.peek().cloned() {
            Some(Token::Ident(value) | Token::Quoted(value) | Token::Number(value)) => {
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected(context)),
        }
    }

    fn terminator(&mut self) {
        if matches!(self.peek(), Some(Token::Semicolon)) {
            self.advance();
        }
    }

    /// Register a node on first appearance; returns its position.
    fn declare(&mut self, id: &str) -> usize {
        match self.nodes.iter().position(|node| node.id == id) {
            Some(index) => index,
            None => {
                self.nodes.push(NodeConfig::new(id));
                self.nodes.len() - 1
            }
        }
    }

    fn apply(&mut self, index: usize, attrs: Vec<(String, String)>) -> Result<()> {
        for (key, value) in attrs {
            match key.as_str() {
                "kp" | "ki" | "kd" => {}
                _ => continue,
            }
            let parsed: f64 = value.parse().map_err(|_| Error::Attribute {
                node: self.nodes[index].id.clone(),
                key: key.clone(),
                value,
            })?;
            match key.as_str() {
                "kp" => self.nodes[index].kp = parsed,
                "ki" => self.nodes[index].ki = parsed,
                _ => self.nodes[index].kd = parsed,
            }
        }
        Ok(())
    }
}
