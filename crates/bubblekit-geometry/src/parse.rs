//! Parser for the serialised path form produced by `Display`.
//!
//! Accepts absolute `M`, `L`, `A` and `Z` commands. Numbers may be separated
//! by whitespace or commas, and extra coordinate pairs after `M` or `L` are
//! read as further line segments.

use glam::Vec2;

use crate::error::PathParseError;
use crate::path::{Path, PathCommand};

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Command(char),
    Number(&'a str),
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() || c == ',' {
            i += 1;
        } else if c.is_ascii_alphabetic() && c != 'e' && c != 'E' {
            tokens.push(Token::Command(c));
            i += 1;
        } else {
            let start = i;
            i += 1;
            while i < bytes.len() {
                let n = bytes[i] as char;
                let exponent_sign =
                    (n == '-' || n == '+') && matches!(bytes[i - 1] as char, 'e' | 'E');
                if n.is_ascii_digit() || n == '.' || n == 'e' || n == 'E' || exponent_sign {
                    i += 1;
                } else {
                    break;
                }
            }
            tokens.push(Token::Number(&input[start..i]));
        }
    }
    tokens
}

struct Cursor<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl Cursor<'_> {
    fn peek_number(&self) -> bool {
        matches!(self.tokens.get(self.pos), Some(Token::Number(_)))
    }

    fn number(&mut self, command: char) -> Result<f32, PathParseError> {
        match self.tokens.get(self.pos) {
            Some(Token::Number(token)) => {
                self.pos += 1;
                let value: f32 = token
                    .parse()
                    .map_err(|_| PathParseError::InvalidNumber((*token).to_string()))?;
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(PathParseError::InvalidNumber((*token).to_string()))
                }
            }
            _ => Err(PathParseError::MissingNumber { command }),
        }
    }

    fn point(&mut self, command: char) -> Result<Vec2, PathParseError> {
        let x = self.number(command)?;
        let y = self.number(command)?;
        Ok(Vec2::new(x, y))
    }

    fn flag(&mut self, command: char) -> Result<bool, PathParseError> {
        match self.tokens.get(self.pos) {
            Some(Token::Number(token)) => {
                let flag = match *token {
                    "0" => false,
                    "1" => true,
                    other => return Err(PathParseError::InvalidFlag(other.to_string())),
                };
                self.pos += 1;
                Ok(flag)
            }
            _ => Err(PathParseError::MissingNumber { command }),
        }
    }
}

impl Path {
    /// Parse a path from its serialised form, e.g. `"M0 0 L10 0 A2 2 0 0 1 12 2 Z"`.
    pub fn from_svg(input: &str) -> Result<Path, PathParseError> {
        let mut cursor = Cursor {
            tokens: tokenize(input),
            pos: 0,
        };
        let mut commands = Vec::new();

        while let Some(token) = cursor.tokens.get(cursor.pos).cloned() {
            let command = match token {
                Token::Command(c) => c,
                Token::Number(_) => return Err(PathParseError::MissingCommand),
            };
            cursor.pos += 1;

            match command {
                'M' => {
                    commands.push(PathCommand::MoveTo(cursor.point(command)?));
                    while cursor.peek_number() {
                        commands.push(PathCommand::LineTo(cursor.point(command)?));
                    }
                }
                'L' => loop {
                    commands.push(PathCommand::LineTo(cursor.point(command)?));
                    if !cursor.peek_number() {
                        break;
                    }
                },
                'A' => loop {
                    let rx = cursor.number(command)?;
                    let ry = cursor.number(command)?;
                    let rotation = cursor.number(command)?;
                    let large_arc = cursor.flag(command)?;
                    let sweep = cursor.flag(command)?;
                    let to = cursor.point(command)?;
                    commands.push(PathCommand::ArcTo {
                        radii: Vec2::new(rx, ry),
                        x_rotation: rotation.to_radians(),
                        large_arc,
                        sweep,
                        to,
                    });
                    if !cursor.peek_number() {
                        break;
                    }
                },
                'Z' => commands.push(PathCommand::Close),
                other => return Err(PathParseError::UnknownCommand(other)),
            }
        }

        Ok(Path::from_commands(commands))
    }
}
