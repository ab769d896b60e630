//! Parser for the circuit netlist.

use std::collections::HashMap;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::components::ComponentKind;
use crate::error::{KirchhoffError, Result};

/// Parser for circuit netlists.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire circuit description.
    pub fn parse(&mut self) -> Result<CircuitAst> {
        let mut ast = CircuitAst::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => {
                    let component = self.parse_component()?;
                    ast.components.push(component);
                }
                _ => {
                    return Err(KirchhoffError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.expect_line_end()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn at_line_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
    }

    fn expect_line_end(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(KirchhoffError::parse(
                self.current.line,
                format!("unexpected trailing token: {:?}", self.current.text),
            )),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(KirchhoffError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn parse_directive(&mut self, ast: &mut CircuitAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".connect" | ".wire" => {
                let from = self.expect(TokenKind::Identifier)?;
                let to = self.expect(TokenKind::Identifier)?;
                ast.connections.push(ConnectionDef {
                    from: TerminalName::parse(&from.text, line)?,
                    to: TerminalName::parse(&to.text, line)?,
                    line,
                });
            }
            ".title" => {
                let mut words = Vec::new();
                while !self.at_line_end() {
                    words.push(self.current.text.clone());
                    self.advance()?;
                }
                ast.title = Some(words.join(" "));
            }
            _ => {
                return Err(KirchhoffError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_component(&mut self) -> Result<ComponentDef> {
        let keyword = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let component_type = ComponentKind::from_keyword(&keyword).ok_or_else(|| {
            KirchhoffError::UnknownComponentType {
                component_type: keyword.clone(),
                line,
            }
        })?;

        let name = self.expect(TokenKind::Identifier)?.text;
        if name.contains('.') {
            return Err(KirchhoffError::invalid_component(
                &name,
                line,
                "component names cannot contain '.'",
            ));
        }

        let mut value = None;
        let mut keywords = Vec::new();
        let mut params = HashMap::new();
        let mut ends = Vec::new();

        while !self.at_line_end() {
            let tok = self.current.clone();
            self.advance()?;

            match tok.kind {
                TokenKind::Identifier if self.current.kind == TokenKind::Equals => {
                    self.advance()?; // consume '='
                    let val_tok = self.current.clone();
                    if !matches!(val_tok.kind, TokenKind::Number | TokenKind::Identifier) {
                        return Err(KirchhoffError::invalid_parameter(
                            &name,
                            &tok.text,
                            "missing value",
                        ));
                    }
                    self.advance()?;
                    let v = parse_value(&val_tok.text).ok_or_else(|| {
                        KirchhoffError::invalid_parameter(
                            &name,
                            &tok.text,
                            format!("invalid number: {}", val_tok.text),
                        )
                    })?;
                    params.insert(tok.text.to_lowercase(), v);
                }
                TokenKind::Identifier if tok.text.contains('.') => {
                    ends.push(TerminalName::parse(&tok.text, line)?);
                }
                TokenKind::Identifier => keywords.push(tok.text),
                TokenKind::Number => {
                    let v = parse_value(&tok.text).ok_or_else(|| {
                        KirchhoffError::parse(line, format!("invalid number: {}", tok.text))
                    })?;
                    if value.replace(v).is_some() {
                        return Err(KirchhoffError::invalid_component(
                            &name,
                            line,
                            "more than one value given",
                        ));
                    }
                }
                _ => {
                    return Err(KirchhoffError::parse(
                        line,
                        format!("unexpected token: {:?}", tok.text),
                    ));
                }
            }
        }

        if ends.len() > 2 {
            return Err(KirchhoffError::invalid_component(
                &name,
                line,
                format!("a wire has two ends, got {} bindings", ends.len()),
            ));
        }

        Ok(ComponentDef {
            component_type,
            name,
            value,
            keywords,
            params,
            ends,
            line,
        })
    }
}
