use super::grammar::InfixOperator;
use super::token::Token;

/// Operators that continue an expression from the token after its left operand.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParserOperator {
    Infix(InfixOperator),
    Call,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Precedence {
    // Lowest precedence
    Lowest,
    Equality,
    Comparison,
    Addition,
    Multiplication,
    Unary,
    Call, // Highest precedence
}

impl ParserOperator {
    pub fn from_token(token: &Token) -> Option<ParserOperator> {
        if let Some(op) = Self::try_infix(token) {
            return Some(ParserOperator::Infix(op));
        }

        match token {
            Token::LeftParen => Some(ParserOperator::Call),
            _ => None,
        }
    }

    fn try_infix(token: &Token) -> Option<InfixOperator> {
        let op = match token {
            Token::Plus => InfixOperator::Add,
            Token::Minus => InfixOperator::Subtract,
            Token::Asterisk => InfixOperator::Multiply,
            Token::Slash => InfixOperator::Divide,
            Token::DoubleEq => InfixOperator::EqualTo,
            Token::BangEq => InfixOperator::NotEqualTo,
            Token::RightAngle => InfixOperator::GreaterThan,
            Token::LeftAngle => InfixOperator::LessThan,
            _ => return None,
        };
        Some(op)
    }

    /// Binds tighter than `min_precedence`. Equal precedence does not bind,
    /// which keeps every binary operator left-associative.
    pub fn is_higher_precedence(&self, min_precedence: Precedence) -> bool {
        self.precedence() > min_precedence
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            ParserOperator::Infix(op) => match op {
                InfixOperator::Add | InfixOperator::Subtract => Precedence::Addition,
                InfixOperator::Multiply | InfixOperator::Divide => Precedence::Multiplication,
                InfixOperator::EqualTo | InfixOperator::NotEqualTo => Precedence::Equality,
                InfixOperator::GreaterThan | InfixOperator::LessThan => Precedence::Comparison,
            },
            ParserOperator::Call => Precedence::Call,
        }
    }
}
