//! Splits the numeric arguments of a command into numbers.

use crate::ParseError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Separator,
    Integer,
    Float,
    Exponent,
}

/// A character-class state machine reading a sequence of numbers.
///
/// Numbers are separated by whitespace, commas, or a sign starting the next number
/// (`10-5` reads as `10, -5`). A second decimal point or sign inside a number is a
/// syntax error.
///
/// In flag mode (see `with_flags`), the arguments at the flag positions are read as a
/// single `0` or `1` character, which does not need to be followed by a separator: the
/// arc arguments `1 1 0 0110 10` hold the flags `0` and `1` and the end point `10 10`.
pub struct Tokenizer<'l> {
    src: &'l str,
    offset: usize,
    flags: Option<&'l dyn Fn(usize) -> bool>,
    numbers: Vec<f64>,
    state: State,
    start: usize,
    mantissa_digits: bool,
    exponent_digits: bool,
    exponent_sign: bool,
}

impl<'l> Tokenizer<'l> {
    /// Creates a tokenizer for `src`, which starts at byte `offset` of the whole input.
    pub fn new(src: &'l str, offset: usize) -> Self {
        Tokenizer {
            src,
            offset,
            flags: None,
            numbers: Vec::new(),
            state: State::Separator,
            start: 0,
            mantissa_digits: false,
            exponent_digits: false,
            exponent_sign: false,
        }
    }

    /// Enables flag mode for the argument indices selected by `is_flag`.
    pub fn with_flags(mut self, is_flag: &'l dyn Fn(usize) -> bool) -> Self {
        self.flags = Some(is_flag);
        self
    }

    pub fn tokenize(mut self) -> Result<Vec<f64>, ParseError> {
        for (i, c) in self.src.char_indices() {
            if self.state == State::Separator && self.expects_flag() {
                match c {
                    '0' => self.numbers.push(0.0),
                    '1' => self.numbers.push(1.0),
                    c if is_separator(c) => {}
                    c => {
                        return Err(ParseError::InvalidFlag {
                            character: c,
                            index: self.offset + i,
                        })
                    }
                }
                continue;
            }

            self.step(i, c)?;
        }

        if self.state != State::Separator {
            self.finish(self.src.len())?;
        }

        Ok(self.numbers)
    }

    fn expects_flag(&self) -> bool {
        match self.flags {
            Some(is_flag) => is_flag(self.numbers.len()),
            None => false,
        }
    }

    fn step(&mut self, i: usize, c: char) -> Result<(), ParseError> {
        match (self.state, c) {
            (_, c) if is_separator(c) => {
                if self.state != State::Separator {
                    self.finish(i)?;
                }
            }
            (State::Separator, '+' | '-') => self.begin(i, State::Integer),
            (State::Separator, '.') => self.begin(i, State::Float),
            (State::Separator, '0'..='9') => {
                self.begin(i, State::Integer);
                self.mantissa_digits = true;
            }
            (State::Integer | State::Float, '0'..='9') => self.mantissa_digits = true,
            (State::Integer, '.') => self.state = State::Float,
            (State::Integer | State::Float, 'e' | 'E') if self.mantissa_digits => {
                self.state = State::Exponent;
            }
            (State::Integer | State::Float, '+' | '-') if self.mantissa_digits => {
                self.finish(i)?;
                self.begin(i, State::Integer);
            }
            (State::Exponent, '+' | '-') if !self.exponent_sign && !self.exponent_digits => {
                self.exponent_sign = true;
            }
            (State::Exponent, '0'..='9') => self.exponent_digits = true,
            (State::Exponent, '+' | '-') if self.exponent_digits => {
                self.finish(i)?;
                self.begin(i, State::Integer);
            }
            (_, c) => return Err(self.syntax_error(c, i)),
        }

        Ok(())
    }

    fn begin(&mut self, i: usize, state: State) {
        self.state = state;
        self.start = i;
        self.mantissa_digits = false;
        self.exponent_digits = false;
        self.exponent_sign = false;
    }

    fn finish(&mut self, end: usize) -> Result<(), ParseError> {
        let text = &self.src[self.start..end];
        match text.parse::<f64>() {
            // Literals overflowing to infinity are rejected.
            Ok(value) if self.mantissa_digits && value.is_finite() => self.numbers.push(value),
            _ => {
                let (index, character) = text.char_indices().last().unwrap_or((0, ' '));
                return Err(self.syntax_error(character, self.start + index));
            }
        }

        self.state = State::Separator;
        Ok(())
    }

    fn syntax_error(&self, character: char, i: usize) -> ParseError {
        ParseError::Syntax {
            character,
            index: self.offset + i,
            partial: self.numbers.clone(),
        }
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Reads a sequence of numbers.
pub fn tokenize(src: &str) -> Result<Vec<f64>, ParseError> {
    Tokenizer::new(src, 0).tokenize()
}

#[test]
fn numbers() {
    assert_eq!(tokenize("").unwrap(), Vec::<f64>::new());
    assert_eq!(tokenize(" 1 2,3 ,4").unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(tokenize("10-5+2").unwrap(), vec![10.0, -5.0, 2.0]);
    assert_eq!(tokenize("-.5 .25 1.").unwrap(), vec![-0.5, 0.25, 1.0]);
    assert_eq!(tokenize("1e2 1.5E-1 2e+1-3").unwrap(), vec![100.0, 0.15, 20.0, -3.0]);
}

#[test]
fn syntax_errors() {
    assert_eq!(
        tokenize("1 2.5.3"),
        Err(ParseError::Syntax {
            character: '.',
            index: 5,
            partial: vec![1.0],
        })
    );
    assert!(matches!(tokenize("--1"), Err(ParseError::Syntax { character: '-', index: 1, .. })));
    assert!(matches!(tokenize("1 x"), Err(ParseError::Syntax { character: 'x', index: 2, .. })));
    assert!(matches!(tokenize("1e"), Err(ParseError::Syntax { character: 'e', index: 1, .. })));
    assert!(matches!(tokenize("3 -"), Err(ParseError::Syntax { character: '-', index: 2, .. })));
    assert_eq!(
        tokenize("2 1e400"),
        Err(ParseError::Syntax {
            character: '0',
            index: 6,
            partial: vec![2.0],
        })
    );
    assert!(matches!(tokenize("-1e309"), Err(ParseError::Syntax { index: 5, .. })));
    assert_eq!(tokenize("1e308").unwrap(), vec![1e308]);
    assert!(matches!(
        Tokenizer::new("1 2 .", 10).tokenize(),
        Err(ParseError::Syntax { index: 14, .. })
    ));
}

#[test]
fn flags() {
    let is_flag = |i: usize| i % 7 == 3 || i % 7 == 4;
    let parse = |src: &str| Tokenizer::new(src, 0).with_flags(&is_flag).tokenize();

    assert_eq!(
        parse("1 1 0 0110 10").unwrap(),
        vec![1.0, 1.0, 0.0, 0.0, 1.0, 10.0, 10.0]
    );
    assert_eq!(
        parse("5,5,30,1,0,2,2 5 5 0 1 1 -1 -1").unwrap(),
        vec![5.0, 5.0, 30.0, 1.0, 0.0, 2.0, 2.0, 5.0, 5.0, 0.0, 1.0, 1.0, -1.0, -1.0]
    );
    assert_eq!(
        parse("1 1 0 2 0 1 1"),
        Err(ParseError::InvalidFlag {
            character: '2',
            index: 6,
        })
    );
}
