// AST (Abstract Syntax Tree) definitions for the C-like source language
//
// Every node owns its children outright (`Box`/`Vec`), so a tree is freed by
// dropping its `Program` root. Nodes carry no source positions: two trees
// built from differently spaced sources compare equal when their structure
// and literal text match.

/// Source location information for tokens and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Type specifier keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSpec {
    Int,
    Float,
    Char,
    Long,
    Void,
}

impl TypeSpec {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeSpec::Int => "int",
            TypeSpec::Float => "float",
            TypeSpec::Char => "char",
            TypeSpec::Long => "long",
            TypeSpec::Void => "void",
        }
    }
}

/// An identifier leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Ident { name: name.into() }
    }
}

/// Constant leaves; the payload is the literal text exactly as scanned
/// (quotes, escapes, radix prefixes and `L` suffixes included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Long(String),
    Int(String),
    Float(String),
    Char(String),
    Str(String),
}

impl Constant {
    pub fn text(&self) -> &str {
        match self {
            Constant::Long(s)
            | Constant::Int(s)
            | Constant::Float(s)
            | Constant::Char(s)
            | Constant::Str(s) => s,
        }
    }
}

/// One `[...]` dimension of an array declarator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dimension {
    Const(String),
    Ident(Ident),
}

impl Dimension {
    pub fn text(&self) -> &str {
        match self {
            Dimension::Const(s) => s,
            Dimension::Ident(id) => &id.name,
        }
    }
}

/// Array declarator: dimensions in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    pub dims: Vec<Dimension>,
}

/// Binary operators. Each one belongs to exactly one precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Logical
    Or,
    And,
    // Equality
    Eq,
    Ne,
    // Relational
    Lt,
    Gt,
    Le,
    Ge,
    // Additive
    Add,
    Sub,
    // Multiplicative
    Mul,
    Div,
    Mod,
}

impl BinOp {
    /// Canonical operator text
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
        }
    }
}

/// Unary prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus, // +x
    Neg,  // -x
    Not,  // !x
}

impl UnOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnOp::Plus => "+",
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}

/// Left and right operands of a binary node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpr {
    pub op: BinOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl BinaryExpr {
    pub fn new(op: BinOp, left: Expr, right: Expr) -> Self {
        BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Expressions, one variant per grammar level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Assign {
        target: Ident,
        value: Box<Expr>,
    },
    LogicalOr(BinaryExpr),
    LogicalAnd(BinaryExpr),
    Equality(BinaryExpr),
    Relational(BinaryExpr),
    Additive(BinaryExpr),
    Multiplicative(BinaryExpr),
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    /// Function call; `args` is empty when the call has no argument list
    Call {
        callee: Ident,
        args: Vec<Expr>,
    },
    ArrayAccess {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Parenthesized(Box<Expr>),
    Identifier(Ident),
    Const(Constant),
}

/// Variable declaration. The same shape is used for file-scope and local
/// declarations; the enclosing variant tells them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub var_type: TypeSpec,
    pub name: Ident,
    pub array: Option<ArrayType>,
    pub init: Option<Expr>,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub param_type: TypeSpec,
    pub name: Ident,
    pub array: Option<ArrayType>,
}

/// `{ local declarations; statements }`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundStmt {
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
}

/// `expr;` or the empty statement `;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprStmt {
    pub expr: Option<Expr>,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Compound(CompoundStmt),
    Expr(ExprStmt),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    For {
        init: ExprStmt,
        condition: ExprStmt,
        step: Expr,
        body: Box<Stmt>,
    },
    Return(Option<Expr>),
    Break,
    Continue,
    LocalVarDecl(VarDecl),
}

/// `type name(params) { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub return_type: TypeSpec,
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: CompoundStmt,
}

/// `type name(params);`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub return_type: TypeSpec,
    pub name: Ident,
    pub params: Vec<Param>,
}

/// Top-level items, in program order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalDecl {
    FunctionDef(FunctionDef),
    FunctionDecl(FunctionDecl),
    VarDecl(VarDecl),
    LineComment(String),
    BlockComment(String),
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub decls: Vec<ExternalDecl>, // ExternalDeclList
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
