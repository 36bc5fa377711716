use super::errors::{ParserError, ParserErrorType, ParserResult};
use super::grammar::{Block, Expr, ExprType, FuncInfo, Identifier, Program, Stmt, StmtType};
use super::grammar::{InfixOperator, PrefixOperator};
use super::lexer::Lexer;
use super::parser_utils::{ParserOperator, Precedence};
use super::span::{CodePosition, Span};
use super::token::{SpannedToken, Token};

use std::rc::Rc;

/// Pratt parser over a two-token window (`current`, `peek`).
///
/// Syntax errors do not stop the parse. Each one is recorded, the parser
/// skips to the end of the failed statement (the next `;` or, inside a
/// block, the block's `}`) and carries on, so a single pass reports every
/// independent mistake in the line.
pub struct Parser<'s> {
    lexer: Lexer<'s>,
    current: SpannedToken,
    peek: SpannedToken,
    errors: Vec<ParserError>,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let peek = lexer.next_token();

        Parser {
            lexer,
            current,
            peek,
            errors: vec![],
        }
    }

    /// Diagnostics collected so far, in source order.
    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// Parses statements until end of input. Check `errors()` before
    /// evaluating the result.
    pub fn parse_program(&mut self) -> Program {
        let mut stmts = vec![];

        while self.current.token != Token::EndOfFile {
            if let Some(stmt) = self.parse_statement_with_recovery(false) {
                stmts.push(stmt);
            }
            self.bump();
        }

        Program { stmts }
    }

    /// Advances the window by one token.
    fn bump(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn expect_peek(&mut self, expected: Token) -> ParserResult<()> {
        if self.peek.token == expected {
            self.bump();
            Ok(())
        } else {
            Err(self.error_at(
                self.peek.span,
                ParserErrorType::ExpectedToken {
                    expected: expected.kind_name(),
                    got: self.peek.token.kind_name(),
                },
            ))
        }
    }

    fn skip_optional_semicolon(&mut self) {
        if self.peek.token == Token::Semicolon {
            self.bump();
        }
    }

    fn error_at(&self, span: Span, error: ParserErrorType) -> ParserError {
        ParserError { span, error }
    }

    fn emit_error(&mut self, error: ParserError) {
        tracing::debug!(%error, "syntax error");
        self.errors.push(error);
    }

    /// Skips from the offending token to the end of the failed statement.
    /// Braces opened along the way are matched, so a `;` or `}` inside a
    /// nested block does not end it. Inside a block, `current` is left on the
    /// block's closing `}`.
    fn synchronize(&mut self, error_pos: CodePosition, in_block: bool) {
        while self.current.span.start_pos < error_pos && self.current.token != Token::EndOfFile {
            self.bump();
        }

        let mut depth = 0usize;
        loop {
            match self.current.token {
                Token::EndOfFile => break,
                Token::Semicolon if depth == 0 => break,
                Token::RightBrace if depth == 0 && in_block => break,
                Token::RightBrace => depth = depth.saturating_sub(1),
                Token::LeftBrace => depth += 1,
                _ => {}
            }
            self.bump();
        }
    }

    fn parse_statement_with_recovery(&mut self, in_block: bool) -> Option<Stmt> {
        match self.parse_statement() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                let error_pos = err.span.start_pos;
                self.emit_error(err);
                self.synchronize(error_pos, in_block);
                None
            }
        }
    }

    /// Leaves `current` on the last token of the statement.
    fn parse_statement(&mut self) -> ParserResult<Stmt> {
        let token = self.current.clone();

        let stmt_type = match self.current.token {
            Token::Let => self.parse_let()?,
            Token::Return => {
                self.bump();
                let value = self.parse_expression(Precedence::Lowest)?;
                self.skip_optional_semicolon();
                StmtType::Return(value)
            }
            Token::LeftBrace => {
                let block = self.parse_block()?;
                self.skip_optional_semicolon();
                StmtType::Block(block)
            }
            _ => {
                let expr = self.parse_expression(Precedence::Lowest)?;
                self.skip_optional_semicolon();
                StmtType::Expression(expr)
            }
        };

        Ok(Stmt::new(stmt_type, token))
    }

    fn parse_let(&mut self) -> ParserResult<StmtType> {
        if !matches!(self.peek.token, Token::Identifier(_)) {
            // Reuse the generic message so the offending token is named.
            return Err(self.error_at(
                self.peek.span,
                ParserErrorType::ExpectedToken {
                    expected: "IDENT",
                    got: self.peek.token.kind_name(),
                },
            ));
        }
        self.bump();
        let name = self.parse_current_identifier()?;

        self.expect_peek(Token::Equals)?;
        self.bump();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(StmtType::Let(name, value))
    }

    /// Parses `{ ... }` starting at the `{`. Leaves `current` on the `}`.
    fn parse_block(&mut self) -> ParserResult<Block> {
        let token = self.current.clone();
        self.bump();

        let mut stmts = vec![];
        while !matches!(self.current.token, Token::RightBrace | Token::EndOfFile) {
            match self.parse_statement_with_recovery(true) {
                Some(stmt) => stmts.push(stmt),
                // Recovery stopped on this block's `}`.
                None if self.current.token == Token::RightBrace => continue,
                None => {}
            }
            self.bump();
        }

        if self.current.token == Token::EndOfFile {
            return Err(self.error_at(self.current.span, ParserErrorType::UnclosedBrace));
        }

        Ok(Block { stmts, token })
    }

    /// Pratt parsing algo.
    pub fn parse_expression(&mut self, min_precedence: Precedence) -> ParserResult<Expr> {
        let mut lhs = self.parse_prefix()?;

        while let Some(op) = ParserOperator::from_token(&self.peek.token) {
            if !op.is_higher_precedence(min_precedence) {
                break;
            }

            self.bump();
            lhs = match op {
                ParserOperator::Infix(op) => self.parse_infix(op, lhs)?,
                ParserOperator::Call => self.parse_call(lhs)?,
            };
        }

        Ok(lhs)
    }

    /// Parses the expression starting at `current`.
    fn parse_prefix(&mut self) -> ParserResult<Expr> {
        let token = self.current.clone();

        let expr = match &token.token {
            Token::Identifier(name) => {
                ExprType::Identifier(Identifier::new(name.clone(), token.span))
            }
            Token::Integer(text) => match text.parse() {
                Ok(value) => ExprType::Integer(value),
                Err(_) => {
                    return Err(
                        self.error_at(token.span, ParserErrorType::InvalidInteger(text.clone()))
                    )
                }
            },
            Token::String(s) => ExprType::Str(s.clone()),
            Token::True => ExprType::Boolean(true),
            Token::False => ExprType::Boolean(false),
            Token::Bang | Token::Minus => {
                let op = match token.token {
                    Token::Bang => PrefixOperator::LogicalNot,
                    _ => PrefixOperator::Negate,
                };
                self.bump();
                let operand = self.parse_expression(Precedence::Unary)?;
                ExprType::Prefix(op, Box::new(operand))
            }
            Token::LeftParen => return self.parse_grouped(),
            Token::If => self.parse_if()?,
            Token::Function => self.parse_function_literal()?,
            Token::Illegal(text) => {
                return Err(self.error_at(token.span, ParserErrorType::IllegalToken(text.clone())))
            }
            t => {
                return Err(self.error_at(token.span, ParserErrorType::NoPrefixParse(t.to_string())))
            }
        };

        Ok(Expr::new(expr, token))
    }

    /// `current` is the operator; its own precedence bounds the right operand.
    fn parse_infix(&mut self, op: InfixOperator, lhs: Expr) -> ParserResult<Expr> {
        let token = self.current.clone();
        let precedence = ParserOperator::Infix(op).precedence();

        self.bump();
        let rhs = self.parse_expression(precedence)?;

        Ok(Expr::new(
            ExprType::Infix(op, Box::new(lhs), Box::new(rhs)),
            token,
        ))
    }

    /// `current` is the `(` following the callee.
    fn parse_call(&mut self, callee: Expr) -> ParserResult<Expr> {
        let token = self.current.clone();
        let args = self.parse_comma_sep(|this| this.parse_expression(Precedence::Lowest))?;

        Ok(Expr::new(ExprType::Call(Box::new(callee), args), token))
    }

    /// `current` is the `(`. Leaves `current` on the matching `)`.
    fn parse_grouped(&mut self) -> ParserResult<Expr> {
        self.bump();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(Token::RightParen)?;
        Ok(expr)
    }

    fn parse_if(&mut self) -> ParserResult<ExprType> {
        self.expect_peek(Token::LeftParen)?;
        let condition = self.parse_grouped()?;

        self.expect_peek(Token::LeftBrace)?;
        let consequence = self.parse_block()?;

        let alternative = if self.peek.token == Token::Else {
            self.bump();
            self.expect_peek(Token::LeftBrace)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(ExprType::If(Box::new(condition), consequence, alternative))
    }

    fn parse_function_literal(&mut self) -> ParserResult<ExprType> {
        self.expect_peek(Token::LeftParen)?;
        let params = self.parse_comma_sep(Self::parse_current_identifier)?;

        self.expect_peek(Token::LeftBrace)?;
        let body = self.parse_block()?;

        Ok(ExprType::Function(Rc::new(FuncInfo { params, body })))
    }

    fn parse_current_identifier(&mut self) -> ParserResult<Identifier> {
        match &self.current.token {
            Token::Identifier(name) => Ok(Identifier::new(name.clone(), self.current.span)),
            t => Err(self.error_at(
                self.current.span,
                ParserErrorType::ExpectedToken {
                    expected: "IDENT",
                    got: t.kind_name(),
                },
            )),
        }
    }

    /// Parses `(item, item, ...)` starting at the `(`.
    fn parse_comma_sep<T, F>(&mut self, parse_item: F) -> ParserResult<Vec<T>>
    where
        F: Fn(&mut Parser<'s>) -> ParserResult<T>,
    {
        let mut items = vec![];
        if self.peek.token == Token::RightParen {
            self.bump();
            return Ok(items);
        }

        self.bump();
        items.push(parse_item(self)?);

        while self.peek.token == Token::Comma {
            self.bump();
            self.bump();
            items.push(parse_item(self)?);
        }

        self.expect_peek(Token::RightParen)?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Program, Vec<String>) {
        let mut parser = Parser::new(source);
        let program = parser.parse_program();
        (program, parser.error_messages())
    }

    fn parse_ok(source: &str) -> Program {
        let (program, errors) = parse(source);
        assert!(errors.is_empty(), "unexpected errors for {:?}: {:?}", source, errors);
        program
    }

    fn render(source: &str) -> String {
        parse_ok(source).ast_string()
    }

    #[test]
    fn test_let_statement() {
        let program = parse_ok("let x = 5;");
        assert_eq!(program.stmts.len(), 1);

        let stmt = &program.stmts[0];
        assert_eq!(stmt.token_literal(), "let");
        match &stmt.stmt {
            StmtType::Let(name, value) => {
                assert_eq!(name.name, "x");
                assert_eq!(value.expr, ExprType::Integer(5));
                assert_eq!(value.token_literal(), "5");
            }
            other => panic!("expected let, got {:?}", other),
        }
    }

    #[test]
    fn test_return_and_expression_statements() {
        let program = parse_ok("return 10; foobar; \"hi\"");
        let kinds: Vec<_> = program.stmts.iter().map(|s| s.token_literal()).collect();
        assert_eq!(kinds, vec!["return", "foobar", "hi"]);

        assert!(matches!(program.stmts[0].stmt, StmtType::Return(_)));
        match &program.stmts[2].stmt {
            StmtType::Expression(expr) => assert_eq!(expr.expr, ExprType::Str("hi".to_owned())),
            other => panic!("expected expression, got {:?}", other),
        }
    }

    #[test]
    fn test_optional_semicolons() {
        assert_eq!(render("let x = 1\nx"), "let x = 1; x");
        assert_eq!(render("return 2"), "return 2;");

        // A stray `;` does not start a statement.
        let (_, errors) = parse("5;;");
        assert_eq!(errors, vec!["1:3: no prefix parse function for ; found"]);
    }

    #[test]
    fn test_operator_precedence() {
        let cases = [
            ("1 + 2 * 3", "(1+(2*3))"),
            ("-a * b", "((-a)*b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a+b)+c)"),
            ("a + b - c", "((a+b)-c)"),
            ("a * b / c", "((a*b)/c)"),
            ("a + b / c", "(a+(b/c))"),
            ("a + b * c + d / e - f", "(((a+(b*c))+(d/e))-f)"),
            ("3 + 4; -5 * 5", "(3+4); ((-5)*5)"),
            ("5 > 4 == 3 < 4", "((5>4)==(3<4))"),
            ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3+(4*5))==((3*1)+(4*5)))"),
            ("true != false", "(true!=false)"),
            ("1 + (2 + 3) + 4", "((1+(2+3))+4)"),
            ("(5 + 5) * 2", "((5+5)*2)"),
            ("-(5 + 5)", "(-(5+5))"),
            ("!(true == true)", "(!(true==true))"),
            ("a + add(b * c) + d", "((a+add((b*c)))+d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2*3), (4+5), add(6, (7*8)))",
            ),
        ];

        for (source, expected) in cases {
            assert_eq!(render(source), expected, "source: {}", source);
        }
    }

    #[test]
    fn test_infix_structure() {
        let program = parse_ok("1 - 2 - 3");
        let expr = match &program.stmts[0].stmt {
            StmtType::Expression(expr) => expr,
            other => panic!("expected expression, got {:?}", other),
        };

        match &expr.expr {
            ExprType::Infix(InfixOperator::Subtract, lhs, rhs) => {
                assert_eq!(lhs.ast_string(), "(1-2)");
                assert_eq!(rhs.expr, ExprType::Integer(3));
            }
            other => panic!("expected subtraction, got {:?}", other),
        }
    }

    #[test]
    fn test_if_expression() {
        assert_eq!(render("if (x < y) { x }"), "if ((x<y)) { x }");
        assert_eq!(
            render("if (x < y) { x } else { y; 1 }"),
            "if ((x<y)) { x } else { y; 1 }"
        );
    }

    #[test]
    fn test_function_literal() {
        let program = parse_ok("fn(x, y) { x + y; }");
        let func_info = match &program.stmts[0].stmt {
            StmtType::Expression(Expr {
                expr: ExprType::Function(func_info),
                ..
            }) => func_info.clone(),
            other => panic!("expected function literal, got {:?}", other),
        };

        let params: Vec<_> = func_info.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["x", "y"]);
        assert_eq!(func_info.body.stmts.len(), 1);

        assert_eq!(render("fn() {}"), "fn() {}");
        assert_eq!(render("fn(x) { return x; }"), "fn(x) { return x; }");
    }

    #[test]
    fn test_call_expression() {
        assert_eq!(render("add(1, 2 * 3, 4 + 5);"), "add(1, (2*3), (4+5))");
        assert_eq!(render("f()"), "f()");
        assert_eq!(render("fn(x) { x }(5)"), "fn(x) { x }(5)");
        assert_eq!(render("adder(1)(2)"), "adder(1)(2)");
    }

    #[test]
    fn test_block_statement() {
        let program = parse_ok("{ let x = 10; x }");
        match &program.stmts[0].stmt {
            StmtType::Block(block) => assert_eq!(block.stmts.len(), 2),
            other => panic!("expected block, got {:?}", other),
        }
        assert_eq!(render("{ return 1; 2; }"), "{ return 1; 2 }");
    }

    #[test]
    fn test_rendering_round_trips() {
        let sources = [
            "1 + 2 * 3",
            "-a * b - !c",
            "let adder = fn(x) { fn(y) { x + y }; }; let add5 = adder(5); add5(3);",
            "if (1 > 2) { 10 } else { 20 }",
            "let f = fn(n) { if (n < 2) { return 1; } n * f(n - 1) }; f(5)",
            "{ let x = 10; { x } }; x",
            "a; -b",
            "fn(){}()",
        ];

        for source in sources {
            let rendered = render(source);
            assert_eq!(render(&rendered), rendered, "source: {}", source);
        }
    }

    #[test]
    fn test_expected_token_errors() {
        let (program, errors) = parse("let = 5;");
        assert!(program.stmts.is_empty());
        assert_eq!(
            errors,
            vec!["1:5: expected next token to be IDENT, got = instead"]
        );

        let (_, errors) = parse("(1 + 2");
        assert_eq!(
            errors,
            vec!["1:7: expected next token to be ), got EOF instead"]
        );
    }

    #[test]
    fn test_collects_multiple_errors() {
        let (_, errors) = parse("let x 5; let = 10; let 838383;");
        assert_eq!(
            errors,
            vec![
                "1:7: expected next token to be =, got INT instead",
                "1:14: expected next token to be IDENT, got = instead",
                "1:24: expected next token to be IDENT, got INT instead",
            ]
        );
    }

    #[test]
    fn test_recovery_stops_at_closing_brace() {
        let cases = [
            ("if (true) { let = 1 }", "1:17: expected next token to be IDENT, got = instead"),
            ("let f = fn(x) { x + }; f", "1:21: no prefix parse function for } found"),
            ("{ 1 + }", "1:7: no prefix parse function for } found"),
            ("{ let = 1; 2 }", "1:7: expected next token to be IDENT, got = instead"),
        ];

        for (source, expected) in cases {
            let (_, errors) = parse(source);
            assert_eq!(errors, vec![expected], "source: {}", source);
        }
    }

    #[test]
    fn test_statements_after_broken_block_survive() {
        let (program, errors) = parse("{ let = 1 } let y = 2;");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.ast_string(), "{} let y = 2;");

        let (program, errors) = parse("{ let = 1; 2 } 3");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.ast_string(), "{ 2 } 3");
    }

    #[test]
    fn test_recovery_skips_nested_blocks() {
        let (program, errors) = parse("{ (fn() { 1 } x; 2 } 3");
        assert_eq!(
            errors,
            vec!["1:15: expected next token to be ), got IDENT instead"]
        );
        assert_eq!(program.stmts.len(), 2);

        let (_, errors) = parse("let f = fn(x { x; 1 }; f");
        assert_eq!(errors, vec!["1:14: expected next token to be ), got { instead"]);
    }

    #[test]
    fn test_typed_errors_carry_spans() {
        let mut parser = Parser::new("let x = 1;\nlet 5;");
        parser.parse_program();

        let errors = parser.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span.start_pos.line_no, 2);
        assert_eq!(errors[0].span.start_pos.column_no, 5);
        assert!(matches!(
            errors[0].error,
            ParserErrorType::ExpectedToken { expected: "IDENT", got: "INT" }
        ));
    }

    #[test]
    fn test_recovers_at_next_statement() {
        let (program, errors) = parse("let = 1; let y = 2;");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.ast_string(), "let y = 2;");
    }

    #[test]
    fn test_no_prefix_errors() {
        let (_, errors) = parse("1 + ;");
        assert_eq!(errors, vec!["1:5: no prefix parse function for ; found"]);

        let (_, errors) = parse("return");
        assert_eq!(
            errors,
            vec!["1:7: no prefix parse function for end of input found"]
        );
    }

    #[test]
    fn test_illegal_and_integer_errors() {
        let (_, errors) = parse("1 + @");
        assert_eq!(errors, vec!["1:5: illegal token @"]);

        let (_, errors) = parse("99999999999999999999");
        assert_eq!(
            errors,
            vec!["1:1: could not parse \"99999999999999999999\" as integer"]
        );
    }

    #[test]
    fn test_function_errors() {
        let (_, errors) = parse("fn(x { x }");
        assert_eq!(errors[0], "1:6: expected next token to be ), got { instead");

        let (_, errors) = parse("fn(1) { 1 }");
        assert_eq!(errors[0], "1:4: expected next token to be IDENT, got INT instead");
    }

    #[test]
    fn test_unclosed_block() {
        let (_, errors) = parse("{ 1; 2");
        assert_eq!(errors, vec!["1:7: unterminated block, expected }"]);

        let (_, errors) = parse("if (true) { 1");
        assert_eq!(errors, vec!["1:14: unterminated block, expected }"]);
    }
}
