use crate::types::Type;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw constants that can appear directly in source
/// code. Numbers are stored as `f64` because the language has a single
/// numeric type (`float`), even though the lexer only accepts digit runs.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A numeric literal such as `42`.
    Number(f64),
    /// A string literal such as `"hello"`, with the quotes stripped.
    String(String),
    /// A boolean literal: `true` or `false`.
    Bool(bool),
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Expressions always produce a value when evaluated. The tree is built once
/// by the parser and is read-only afterwards; each node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string or boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line: usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (negation).
    Unary {
        /// The unary operator to apply.
        op: UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (arithmetic, logic or equality).
    Binary {
        /// Left operand.
        left: Box<Self>,
        /// The operator.
        op: BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A function call expression such as `f(1, 2)`.
    Call {
        /// Name of the function being called.
        name: String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// An array literal such as `[1, 2, 3]`.
    Array {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Call { line, .. }
            | Self::Array { line, .. } => *line,
        }
    }
}

/// One `if` or `elseif` clause: a condition paired with its body.
#[derive(Debug, Clone, PartialEq)]
pub struct IfClause {
    /// The clause condition; must evaluate to a boolean.
    pub condition: Expr,
    /// The body executed when the condition is true.
    pub body: Statement,
}

/// A single `name: Type` pair in a function declaration's parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter name.
    pub name: String,
    /// The declared parameter type.
    pub ty: Type,
}

/// Represents a user-defined function declaration.
///
/// The declaration is kept alive for as long as any function value created
/// from it exists, so the evaluator stores it behind an `Rc`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The name of the function.
    pub name: String,
    /// The parameter list, in call order.
    pub parameters: Vec<Parameter>,
    /// The declared return type (`void` for procedures).
    pub return_type: Type,
    /// The statements of the mandatory body block.
    pub body: Vec<Statement>,
    /// Line number in the source code.
    pub line: usize,
}

/// An abstract syntax tree node representing a statement.
///
/// Statements are executed for their effects and may produce a control
/// signal (`return`/`break`) instead of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A brace-delimited block introducing a new scope.
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A variable declaration using `let`, `const` or `var`.
    VariableDeclaration {
        /// The name of the variable.
        name: String,
        /// The annotated type; `None` for `var`, whose type is inferred from
        /// the initializer.
        ty: Option<Type>,
        /// The initializer expression.
        value: Expr,
        /// Whether the binding is immutable (`const`).
        is_constant: bool,
        /// Line number in the source code.
        line: usize,
    },
    /// A variable assignment binding a name to a new value.
    Assignment {
        /// The name of the variable.
        name: String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// An `if` statement with chained `elseif` clauses and an optional
    /// `else` body.
    If {
        /// The `if` clause followed by any `elseif` clauses, in source order.
        clauses: Vec<IfClause>,
        /// The optional `else` body.
        else_body: Option<Box<Self>>,
        /// Line number in the source code.
        line: usize,
    },
    /// A `while` loop.
    While {
        /// The loop condition, re-evaluated before every iteration.
        condition: Expr,
        /// The loop body.
        body: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A `for (let i = lower, upper)` loop over an inclusive numeric range.
    For {
        /// The loop variable name.
        variable: String,
        /// The lower bound expression.
        lower: Expr,
        /// The inclusive upper bound expression.
        upper: Expr,
        /// The loop body.
        body: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A `return` statement with an optional value.
    Return {
        /// The returned expression; `None` means `return;`, which yields
        /// `void`.
        value: Option<Expr>,
        /// Line number in the source code.
        line: usize,
    },
    /// A `break` statement.
    Break {
        /// Line number in the source code.
        line: usize,
    },
    /// A function declaration.
    Function(FunctionDecl),
    /// A bare call evaluated for its effects, such as `print(x);`.
    Call {
        /// Name of the function being called.
        name: String,
        /// Arguments to the function.
        arguments: Vec<Expr>,
        /// Line number in the source code.
        line: usize,
    },
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Logical or (`||`)
    Or,
    /// Logical and (`&&`)
    And,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Addition and string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
}

impl BinaryOperator {
    /// Returns the binding strength of the operator.
    ///
    /// Used by the precedence-climbing expression parser: higher values bind
    /// tighter, and operators of equal precedence associate to the left.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Equal | Self::NotEqual => 3,
            Self::Add | Self::Sub => 4,
            Self::Mul | Self::Div => 5,
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        write!(f, "{operator}")
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
        }
    }
}
