//! Lexical analysis for workflow graph documents.
//!
//! Tokenizes the DOT-shaped graph dialect using logos. Whitespace and both
//! line-comment forms (`//` and `#`) are stripped during lexing. Each token
//! is paired with its 1-based source line so parse errors can point at the
//! offending statement.

use logos::Logos;

use crate::error::{Error, Result};

/// Workflow graph token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    /// Keyword `strict`
    #[token("strict")]
    Strict,
    /// Keyword `digraph`
    #[token("digraph")]
    Digraph,
    /// Keyword `graph`
    #[token("graph")]
    Graph,

    /// Delimiter `{`
    #[token("{")]
    LBrace,
    /// Delimiter `}`
    #[token("}")]
    RBrace,
    /// Delimiter `[`
    #[token("[")]
    LBracket,
    /// Delimiter `]`
    #[token("]")]
    RBracket,

    /// Operator `=`
    #[token("=")]
    Eq,
    /// Separator `,`
    #[token(",")]
    Comma,
    /// Separator `;`
    #[token(";")]
    Semicolon,
    /// Edge operator `->`
    #[token("->")]
    DirectedEdge,
    /// Edge operator `--`
    #[token("--")]
    UndirectedEdge,

    /// Bare identifier (node names, attribute keys, bare values)
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Numeric literal, kept as written
    #[regex(r"[-+]?(\.[0-9]+|[0-9]+\.?[0-9]*)([eE][-+]?[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),

    /// Double-quoted identifier or value, quotes stripped
    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    Quoted(String),
}

/// Tokenize a document, pairing every token with its 1-based line.
pub fn lex(text: &str) -> Result<Vec<(Token, usize)>> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();
    while let Some(item) = lexer.next() {
        let line = line_of(text, lexer.span().start);
        match item {
            Ok(token) => tokens.push((token, line)),
            Err(()) => {
                return Err(Error::Syntax {
                    line,
                    message: format!("unrecognized character {:?}", lexer.slice()),
                });
            }
        }
    }
    Ok(tokens)
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_tokens(text: &str) -> Vec<Token> {
        lex(text).unwrap().into_iter().map(|(token, _)| token).collect()
    }

    #[test]
    fn tokenizes_a_node_statement() {
        let tokens = lex_tokens(r#"controller [kp=2.0, label="main loop"];"#);
        assert_eq!(
            tokens,
            vec![
                Token::Ident("controller".into()),
                Token::LBracket,
                Token::Ident("kp".into()),
                Token::Eq,
                Token::Number("2.0".into()),
                Token::Comma,
                Token::Ident("label".into()),
                Token::Eq,
                Token::Quoted("main loop".into()),
                Token::RBracket,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn keywords_beat_identifiers_only_on_exact_match() {
        assert_eq!(lex_tokens("digraph"), vec![Token::Digraph]);
        assert_eq!(lex_tokens("digraphs"), vec![Token::Ident("digraphs".into())]);
    }

    #[test]
    fn edge_operators_are_not_numbers() {
        assert_eq!(
            lex_tokens("a -> b -- c"),
            vec![
                Token::Ident("a".into()),
                Token::DirectedEdge,
                Token::Ident("b".into()),
                Token::UndirectedEdge,
                Token::Ident("c".into()),
            ]
        );
        assert_eq!(
            lex_tokens("-1.5e-3 .5 3."),
            vec![
                Token::Number("-1.5e-3".into()),
                Token::Number(".5".into()),
                Token::Number("3.".into()),
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        let tokens = lex_tokens("// header\n# note\na\t->\nb");
        assert_eq!(
            tokens,
            vec![
                Token::Ident("a".into()),
                Token::DirectedEdge,
                Token::Ident("b".into()),
            ]
        );
    }

    #[test]
    fn lines_are_tracked_per_token() {
        let tokens = lex("a\n  b\n\nc").unwrap();
        let lines: Vec<usize> = tokens.iter().map(|&(_, line)| line).collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }

    #[test]
    fn stray_characters_are_syntax_errors() {
        let err = lex("a\n@").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 2, .. }));
    }
}
