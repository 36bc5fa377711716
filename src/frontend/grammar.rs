use super::span::Span;
use super::token::SpannedToken;
use std::rc::Rc;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOperator {
    Negate,
    LogicalNot,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    LessThan,
}

/// Root of a parsed line. Owned by the caller and never mutated by evaluation.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Stmt {
    pub stmt: StmtType,
    pub token: SpannedToken,
}

#[derive(Debug, PartialEq, Clone)]
pub enum StmtType {
    Let(Identifier, Expr),
    Return(Expr),
    Expression(Expr),
    Block(Block),
}

/// Braced statement list; evaluated in its own child scope.
#[derive(Debug, PartialEq, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub token: SpannedToken,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Expr {
    pub expr: ExprType,
    pub token: SpannedToken,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExprType {
    Identifier(Identifier),
    Integer(i64),
    Str(String),
    Boolean(bool),
    Prefix(PrefixOperator, Box<Expr>),
    Infix(InfixOperator, Box<Expr>, Box<Expr>),
    If(Box<Expr>, Block, Option<Block>),
    Function(Rc<FuncInfo>),
    Call(Box<Expr>, Vec<Expr>),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// Parameters and body of a function literal. Shared with every closure
/// created from it, so closures outlive the program they were parsed from.
#[derive(Debug, PartialEq, Clone)]
pub struct FuncInfo {
    pub params: Vec<Identifier>,
    pub body: Block,
}

impl PrefixOperator {
    pub fn symbol(&self) -> &str {
        match self {
            PrefixOperator::LogicalNot => "!",
            PrefixOperator::Negate => "-",
        }
    }
}

impl InfixOperator {
    pub fn symbol(&self) -> &str {
        match self {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::EqualTo => "==",
            InfixOperator::NotEqualTo => "!=",
            InfixOperator::GreaterThan => ">",
            InfixOperator::LessThan => "<",
        }
    }
}

impl Identifier {
    pub fn new(name: String, span: Span) -> Self {
        Self { name, span }
    }
}

impl Program {
    pub fn ast_string(&self) -> String {
        render_stmts(&self.stmts)
    }
}

impl Stmt {
    pub fn new(stmt: StmtType, token: SpannedToken) -> Self {
        Stmt { stmt, token }
    }

    pub fn token_literal(&self) -> &str {
        self.token.token.literal()
    }

    pub fn ast_string(&self) -> String {
        match &self.stmt {
            StmtType::Let(name, value) => format!("let {} = {};", name.name, value.ast_string()),
            StmtType::Return(value) => format!("return {};", value.ast_string()),
            StmtType::Expression(expr) => expr.ast_string(),
            StmtType::Block(block) => block.ast_string(),
        }
    }
}

impl Block {
    pub fn ast_string(&self) -> String {
        if self.stmts.is_empty() {
            "{}".to_owned()
        } else {
            format!("{{ {} }}", render_stmts(&self.stmts))
        }
    }
}

impl FuncInfo {
    pub fn ast_string(&self) -> String {
        let params: Vec<_> = self.params.iter().map(|p| p.name.as_str()).collect();
        format!("fn({}) {}", params.join(", "), self.body.ast_string())
    }
}

impl Expr {
    pub fn new(expr: ExprType, token: SpannedToken) -> Self {
        Expr { expr, token }
    }

    pub fn token_literal(&self) -> &str {
        self.token.token.literal()
    }

    pub fn ast_string(&self) -> String {
        match &self.expr {
            ExprType::Identifier(ident) => ident.name.clone(),
            ExprType::Integer(n) => n.to_string(),
            ExprType::Str(s) => format!("\"{}\"", s),
            ExprType::Boolean(b) => b.to_string(),
            ExprType::Prefix(op, expr) => format!("({}{})", op.symbol(), expr.ast_string()),
            ExprType::Infix(op, lhs, rhs) => format!(
                "({}{}{})",
                lhs.ast_string(),
                op.symbol(),
                rhs.ast_string()
            ),
            ExprType::If(condition, consequence, alternative) => {
                let mut out = format!(
                    "if ({}) {}",
                    condition.ast_string(),
                    consequence.ast_string()
                );
                if let Some(alternative) = alternative {
                    out.push_str(" else ");
                    out.push_str(&alternative.ast_string());
                }
                out
            }
            ExprType::Function(func_info) => func_info.ast_string(),
            ExprType::Call(callee, args) => {
                let args: Vec<_> = args.iter().map(|a| a.ast_string()).collect();
                format!("{}({})", callee.ast_string(), args.join(", "))
            }
        }
    }
}

/// Joins statements with spaces. Expression statements that are followed by
/// another statement get a `;` so the text parses back the same way.
fn render_stmts(stmts: &[Stmt]) -> String {
    let mut rendered = Vec::with_capacity(stmts.len());

    for (i, stmt) in stmts.iter().enumerate() {
        let mut text = stmt.ast_string();
        if matches!(stmt.stmt, StmtType::Expression(_)) && i + 1 < stmts.len() {
            text.push(';');
        }
        rendered.push(text);
    }

    rendered.join(" ")
}
