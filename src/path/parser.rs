//! Path expression string parser.

use super::ast::{DocPath, Segment};
use super::error::PathError;

/// Parser for path expression strings.
pub struct Parser {
    input: String,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given expression string.
    pub fn new(expression: &str) -> Self {
        Self {
            input: expression.to_string(),
            position: 0,
        }
    }

    /// Parses the expression string into a DocPath.
    ///
    /// An empty string parses to the empty path.
    pub fn parse(expression: &str) -> Result<DocPath, PathError> {
        let mut parser = Parser::new(expression);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<DocPath, PathError> {
        let mut segments = Vec::new();

        while !self.is_eof() {
            match self.peek() {
                Some('[') => {
                    segments.push(self.parse_bracket_expression()?);
                }
                Some('.') => {
                    if segments.is_empty() {
                        return Err(PathError::InvalidSyntax {
                            message: "Path cannot start with '.'".to_string(),
                        });
                    }
                    self.next();
                    segments.push(self.parse_dotted_segment()?);
                }
                Some(_) => {
                    // A name may open the path or follow a bracket directly.
                    segments.push(self.parse_dotted_segment()?);
                }
                None => break,
            }
        }

        Ok(DocPath::new(segments))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Checks if we've reached the end of input.
    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), PathError> {
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(PathError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(PathError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Parses a dot-notation segment: a name with `\.`/`\[`/`\\`/`\*`
    /// escapes, or the bare wildcard `*`.
    fn parse_dotted_segment(&mut self) -> Result<Segment, PathError> {
        let mut text = String::new();
        let mut escaped_any = false;

        while let Some(ch) = self.peek() {
            match ch {
                '.' | '[' => break,
                '\\' => {
                    self.next();
                    let pos = self.position;
                    match self.next() {
                        Some(escaped @ ('.' | '[' | '\\' | '*')) => {
                            text.push(escaped);
                            escaped_any = true;
                        }
                        Some(other) => {
                            return Err(PathError::UnexpectedToken {
                                position: pos,
                                found: other.to_string(),
                                expected: "an escapable character ('.', '[', '\\', '*')"
                                    .to_string(),
                            });
                        }
                        None => {
                            return Err(PathError::UnexpectedEnd {
                                expected: "an escapable character after '\\'".to_string(),
                            });
                        }
                    }
                }
                _ => {
                    text.push(ch);
                    self.next();
                }
            }
        }

        if text.is_empty() {
            return Err(PathError::InvalidSyntax {
                message: "Expected identifier".to_string(),
            });
        }

        // Only an unescaped bare "*" is the wildcard marker.
        if text == "*" && !escaped_any {
            Ok(Segment::Wildcard)
        } else {
            Ok(Segment::Name(text))
        }
    }

    /// Parses a bracket expression: `[index]`, `['name']`, `["name"]`, `[*]`.
    fn parse_bracket_expression(&mut self) -> Result<Segment, PathError> {
        self.expect('[')?;
        self.skip_whitespace();

        let segment = match self.peek() {
            Some('*') => {
                self.next();
                Segment::Wildcard
            }
            Some('\'') | Some('"') => {
                // Quoting removes any special meaning, so ['*'] is the
                // literal key "*".
                let name = self.parse_bracket_string()?;
                Segment::Name(name)
            }
            Some('0'..='9') => {
                let index = self.parse_bracket_index()?;
                Segment::Index(index)
            }
            Some('-') => {
                return Err(PathError::InvalidSyntax {
                    message: "Negative indices are not supported".to_string(),
                });
            }
            Some(_) | None => {
                return Err(PathError::InvalidSyntax {
                    message: "Invalid bracket expression".to_string(),
                });
            }
        };

        self.skip_whitespace();
        self.expect(']')?;
        Ok(segment)
    }

    /// Parses a quoted string inside brackets.
    fn parse_bracket_string(&mut self) -> Result<String, PathError> {
        let quote = self.next().unwrap();
        let mut value = String::new();

        loop {
            match self.next() {
                Some(ch) if ch == quote => break,
                Some('\\') => match self.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('\'') => value.push('\''),
                    Some('"') => value.push('"'),
                    Some(_) | None => {
                        return Err(PathError::InvalidSyntax {
                            message: "Invalid escape sequence".to_string(),
                        });
                    }
                },
                Some(ch) => value.push(ch),
                None => {
                    return Err(PathError::UnexpectedEnd {
                        expected: format!("closing quote '{}'", quote),
                    });
                }
            }
        }

        Ok(value)
    }

    /// Parses a non-negative index inside brackets.
    fn parse_bracket_index(&mut self) -> Result<usize, PathError> {
        let mut num = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num.push(ch);
                self.next();
            } else {
                break;
            }
        }
        num.parse::<usize>().map_err(|_| PathError::InvalidSyntax {
            message: format!("Invalid index: {}", num),
        })
    }
}
