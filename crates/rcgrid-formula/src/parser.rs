//! Expression parser
//!
//! A recursive descent parser that computes the value of an expression while it
//! walks the grammar; no syntax tree is built. Precedence, lowest to highest:
//!
//! 1. `or`
//! 2. `and`
//! 3. `==`, `!=`
//! 4. `<`, `>`
//! 5. `+`, `-`
//! 6. `*`, `/`, `%`
//! 7. unary `-`, `not`
//! 8. number, cell reference, `if(c, a, b)`, parentheses
//!
//! Every operand is parsed and evaluated even when the result is already decided
//! (`1 or R5C5` still resolves `R5C5`, and both branches of `if` are evaluated).
//! Referenced cells in those operands are therefore resolved and cached too.
//!
//! Parentheses, `if`, unary operators and cell references each take one level of
//! a nesting budget shared with the cells they lead into. Running out of it is a
//! [`FormulaError::DepthLimitExceeded`] error rather than a stack overflow.

use rcgrid_core::{Coordinates, Table};

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::{self, EvaluationOptions};
use crate::reference::CellReference;
use crate::tokenizer::{Token, TokenKind, Tokenizer};

const TRUE: f64 = 1.0;
const FALSE: f64 = 0.0;

/// Values `>= 1.0` are true, everything else is false
fn truthy(value: f64) -> bool {
    value >= 1.0
}

fn boolean(b: bool) -> f64 {
    if b {
        TRUE
    } else {
        FALSE
    }
}

/// Evaluates one expression in the context of a table and a cell position
///
/// `origin` is the cell the expression belongs to; relative references are
/// resolved against it. `depth` is the nesting level already used by the
/// references that led here.
pub struct ExpressionParser<'t, 'a> {
    tokenizer: Tokenizer<'a>,
    current: Token<'a>,
    table: &'t mut Table,
    origin: Coordinates,
    options: EvaluationOptions,
    depth: usize,
}

impl<'t, 'a> ExpressionParser<'t, 'a> {
    /// Evaluate `expression` as if it were stored at `coords`
    ///
    /// Shorthand for [`evaluate`](crate::evaluate).
    pub fn evaluate(expression: &str, table: &mut Table, coords: Coordinates) -> FormulaResult<f64> {
        evaluator::evaluate(expression, table, coords)
    }

    pub(crate) fn new(
        expression: &'a str,
        table: &'t mut Table,
        origin: Coordinates,
        options: EvaluationOptions,
        depth: usize,
    ) -> FormulaResult<Self> {
        let mut tokenizer = Tokenizer::new(expression);
        let current = tokenizer.next_token()?;
        Ok(Self {
            tokenizer,
            current,
            table,
            origin,
            options,
            depth,
        })
    }

    /// Parse the whole input; anything after a complete expression is an error
    pub(crate) fn parse(mut self) -> FormulaResult<f64> {
        let value = self.parse_expression()?;

        if self.current.kind != TokenKind::End {
            return Err(FormulaError::Syntax(format!(
                "unexpected token '{}' after end of expression",
                self.current.lexeme
            )));
        }

        Ok(value)
    }

    // === Token handling ===

    fn advance(&mut self) -> FormulaResult<()> {
        self.current = self.tokenizer.next_token()?;
        Ok(())
    }

    /// Run `f` one nesting level deeper
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> FormulaResult<T>) -> FormulaResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(FormulaError::DepthLimitExceeded(self.options.max_depth));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> FormulaResult<()> {
        if self.current.kind != kind {
            return Err(FormulaError::Syntax(format!(
                "expected {what}, got {}",
                describe(&self.current)
            )));
        }
        self.advance()
    }

    // === Grammar ===

    fn parse_expression(&mut self) -> FormulaResult<f64> {
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> FormulaResult<f64> {
        let mut left = self.parse_logical_and()?;

        while self.current.is_keyword("or") {
            self.advance()?;
            let right = self.parse_logical_and()?;
            left = boolean(truthy(left) || truthy(right));
        }

        Ok(left)
    }

    fn parse_logical_and(&mut self) -> FormulaResult<f64> {
        let mut left = self.parse_equality()?;

        while self.current.is_keyword("and") {
            self.advance()?;
            let right = self.parse_equality()?;
            left = boolean(truthy(left) && truthy(right));
        }

        Ok(left)
    }

    fn parse_equality(&mut self) -> FormulaResult<f64> {
        let mut left = self.parse_comparison()?;

        loop {
            let op = self.current.kind;
            if !matches!(op, TokenKind::Equal | TokenKind::NotEqual) {
                break;
            }

            self.advance()?;
            let right = self.parse_comparison()?;
            left = boolean(if op == TokenKind::Equal {
                left == right
            } else {
                left != right
            });
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> FormulaResult<f64> {
        let mut left = self.parse_term()?;

        loop {
            let op = self.current.kind;
            if !matches!(op, TokenKind::LessThan | TokenKind::GreaterThan) {
                break;
            }

            self.advance()?;
            let right = self.parse_term()?;
            left = boolean(if op == TokenKind::LessThan {
                left < right
            } else {
                left > right
            });
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> FormulaResult<f64> {
        let mut left = self.parse_factor()?;

        loop {
            let op = self.current.kind;
            if !matches!(op, TokenKind::Plus | TokenKind::Minus) {
                break;
            }

            self.advance()?;
            let right = self.parse_factor()?;
            if op == TokenKind::Plus {
                left += right;
            } else {
                left -= right;
            }
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> FormulaResult<f64> {
        let mut left = self.parse_unary()?;

        loop {
            let op = self.current.kind;
            if !matches!(op, TokenKind::Star | TokenKind::Slash | TokenKind::Percent) {
                break;
            }

            self.advance()?;
            let right = self.parse_unary()?;
            left = match op {
                TokenKind::Star => left * right,
                TokenKind::Slash => {
                    if right == 0.0 {
                        return Err(FormulaError::DivisionByZero);
                    }
                    left / right
                }
                // `%` on f64 is fmod: the result takes the sign of the dividend
                _ => left % right,
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<f64> {
        if self.current.kind == TokenKind::Minus {
            self.advance()?;
            let value = self.nested(Self::parse_unary)?;
            return Ok(-value);
        }

        if self.current.is_keyword("not") {
            self.advance()?;
            let value = self.nested(Self::parse_unary)?;
            return Ok(boolean(value < 1.0));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> FormulaResult<f64> {
        match self.current.kind {
            TokenKind::Number => {
                let value = self.current.lexeme.parse::<f64>().map_err(|_| {
                    FormulaError::Syntax(format!("invalid number '{}'", self.current.lexeme))
                })?;
                self.advance()?;
                Ok(value)
            }

            TokenKind::CellRef => self.parse_cell_reference(),

            TokenKind::Identifier if self.current.lexeme == "if" => self.nested(Self::parse_if),

            TokenKind::LeftParen => {
                self.advance()?;
                let value = self.nested(Self::parse_expression)?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(value)
            }

            _ => Err(FormulaError::Syntax(format!(
                "invalid primary expression at {}",
                describe(&self.current)
            ))),
        }
    }

    fn parse_if(&mut self) -> FormulaResult<f64> {
        self.advance()?;
        self.expect(TokenKind::LeftParen, "'(' after if")?;

        let condition = self.parse_expression()?;
        self.expect(TokenKind::Comma, "',' after condition")?;

        let when_true = self.parse_expression()?;
        self.expect(TokenKind::Comma, "',' in if")?;

        let when_false = self.parse_expression()?;
        self.expect(TokenKind::RightParen, "')'")?;

        Ok(if truthy(condition) {
            when_true
        } else {
            when_false
        })
    }

    fn parse_cell_reference(&mut self) -> FormulaResult<f64> {
        let reference = CellReference::parse(self.current.lexeme)?;
        self.advance()?;

        let target = reference.resolve(self.origin)?;
        if !self.table.contains(target) {
            return Err(FormulaError::MissingReference(target));
        }

        evaluator::cell_value(self.table, target, &self.options, self.depth)
    }
}

fn describe(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::End => "end of expression".to_string(),
        _ => format!("'{}'", token.lexeme),
    }
}
