//! Python syntax tree consumed by the code generator.
//!
//! The shapes follow the node kinds of the Python 2 `ast` module closely so a
//! tree dumped by an external parser maps onto them without reinterpretation.
//! Every node carries a `"kind"` tag when serialized:
//!
//! ```json
//! {"kind": "Assign", "targets": [{"kind": "Name", "id": "x"}],
//!  "value": {"kind": "Num", "n": 1}}
//! ```
//!
//! The tree is closed: adding a node kind means every consumer's `match`
//! stops compiling until it handles it.

use serde::{Deserialize, Serialize};

/// Root of a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Stmt {
    FunctionDef(FunctionDef),

    If {
        test: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },

    While {
        test: Expr,
        body: Vec<Stmt>,
    },

    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
    },

    TryExcept {
        body: Vec<Stmt>,
        #[serde(default)]
        handlers: Vec<ExceptHandler>,
        #[serde(default)]
        finalbody: Vec<Stmt>,
    },

    Assign {
        targets: Vec<Expr>,
        value: Expr,
    },

    AugAssign {
        target: Expr,
        op: Operator,
        value: Expr,
    },

    /// Expression evaluated for its side effects.
    Expr {
        value: Expr,
    },

    Return {
        value: Option<Expr>,
    },

    /// `raise exc`, or a bare re-raise when `exc` is absent.
    Raise {
        exc: Option<Expr>,
    },

    /// The Python 2 print statement.
    Print {
        values: Vec<Expr>,
    },

    Import {
        names: Vec<Alias>,
    },

    ImportFrom {
        module: Option<String>,
        names: Vec<Alias>,
        #[serde(default)]
        level: u32,
    },

    Pass,
    Break,
    Continue,
}

impl Stmt {
    /// Node kind name, as used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::FunctionDef(_) => "FunctionDef",
            Stmt::If { .. } => "If",
            Stmt::While { .. } => "While",
            Stmt::For { .. } => "For",
            Stmt::TryExcept { .. } => "TryExcept",
            Stmt::Assign { .. } => "Assign",
            Stmt::AugAssign { .. } => "AugAssign",
            Stmt::Expr { .. } => "Expr",
            Stmt::Return { .. } => "Return",
            Stmt::Raise { .. } => "Raise",
            Stmt::Print { .. } => "Print",
            Stmt::Import { .. } => "Import",
            Stmt::ImportFrom { .. } => "ImportFrom",
            Stmt::Pass => "Pass",
            Stmt::Break => "Break",
            Stmt::Continue => "Continue",
        }
    }

    pub fn expr(value: Expr) -> Self {
        Stmt::Expr { value }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign {
            targets: vec![target],
            value,
        }
    }

    pub fn aug_assign(target: Expr, op: Operator, value: Expr) -> Self {
        Stmt::AugAssign { target, op, value }
    }

    pub fn if_stmt(test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt>) -> Self {
        Stmt::If { test, body, orelse }
    }

    pub fn while_loop(test: Expr, body: Vec<Stmt>) -> Self {
        Stmt::While { test, body }
    }

    pub fn for_loop(target: impl Into<String>, iter: Expr, body: Vec<Stmt>) -> Self {
        Stmt::For {
            target: Expr::name(target),
            iter,
            body,
        }
    }

    pub fn try_except(body: Vec<Stmt>, handlers: Vec<ExceptHandler>) -> Self {
        Stmt::TryExcept {
            body,
            handlers,
            finalbody: Vec::new(),
        }
    }

    pub fn function(def: FunctionDef) -> Self {
        Stmt::FunctionDef(def)
    }

    pub fn return_stmt(value: Option<Expr>) -> Self {
        Stmt::Return { value }
    }

    pub fn raise(exc: Option<Expr>) -> Self {
        Stmt::Raise { exc }
    }

    pub fn print(values: Vec<Expr>) -> Self {
        Stmt::Print { values }
    }
}

/// `def name(args): body`, possibly decorated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    /// Positional parameter names, in order.
    #[serde(default)]
    pub args: Vec<String>,
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub decorators: Vec<Expr>,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>, args: Vec<String>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            args,
            body,
            decorators: Vec::new(),
        }
    }

    pub fn with_decorator(mut self, decorator: Expr) -> Self {
        self.decorators.push(decorator);
        self
    }
}

/// One `except` clause of a try statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptHandler {
    /// Exception type to match; `None` for a bare `except:`.
    #[serde(rename = "type")]
    pub ty: Option<Expr>,
    /// Name the caught exception is bound to.
    pub name: Option<String>,
    pub body: Vec<Stmt>,
}

impl ExceptHandler {
    pub fn new(ty: Option<Expr>, name: Option<&str>, body: Vec<Stmt>) -> Self {
        Self {
            ty,
            name: name.map(str::to_string),
            body,
        }
    }
}

/// `name as asname` inside an import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
}

/// `name=value` argument of a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub arg: String,
    pub value: Expr,
}

impl Keyword {
    pub fn new(arg: impl Into<String>, value: Expr) -> Self {
        Self {
            arg: arg.into(),
            value,
        }
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Expr {
    Name {
        id: String,
    },

    Attribute {
        value: Box<Expr>,
        attr: String,
    },

    Subscript {
        value: Box<Expr>,
        slice: Box<Slice>,
    },

    Tuple {
        elts: Vec<Expr>,
    },

    List {
        elts: Vec<Expr>,
    },

    /// Key/value pairs in source order.
    Dict {
        entries: Vec<(Expr, Expr)>,
    },

    Str {
        s: String,
    },

    Num {
        n: Number,
    },

    /// `left op0 comparators[0] op1 comparators[1] ...`
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },

    BoolOp {
        op: BoolOperator,
        values: Vec<Expr>,
    },

    BinOp {
        left: Box<Expr>,
        op: Operator,
        right: Box<Expr>,
    },

    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },

    Lambda {
        args: Vec<String>,
        body: Box<Expr>,
    },

    Call {
        func: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
        #[serde(default)]
        keywords: Vec<Keyword>,
    },

    Yield {
        value: Option<Box<Expr>>,
    },
}

impl Expr {
    /// Node kind name, as used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Name { .. } => "Name",
            Expr::Attribute { .. } => "Attribute",
            Expr::Subscript { .. } => "Subscript",
            Expr::Tuple { .. } => "Tuple",
            Expr::List { .. } => "List",
            Expr::Dict { .. } => "Dict",
            Expr::Str { .. } => "Str",
            Expr::Num { .. } => "Num",
            Expr::Compare { .. } => "Compare",
            Expr::BoolOp { .. } => "BoolOp",
            Expr::BinOp { .. } => "BinOp",
            Expr::UnaryOp { .. } => "UnaryOp",
            Expr::Lambda { .. } => "Lambda",
            Expr::Call { .. } => "Call",
            Expr::Yield { .. } => "Yield",
        }
    }

    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name { id: id.into() }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::Str { s: s.into() }
    }

    pub fn int(n: i64) -> Self {
        Expr::Num { n: Number::Int(n) }
    }

    pub fn float(n: f64) -> Self {
        Expr::Num {
            n: Number::Float(n),
        }
    }

    pub fn attribute(value: Expr, attr: impl Into<String>) -> Self {
        Expr::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        }
    }

    pub fn subscript(value: Expr, index: Expr) -> Self {
        Expr::Subscript {
            value: Box::new(value),
            slice: Box::new(Slice::Index { value: index }),
        }
    }

    /// `value[...]`
    pub fn ellipsis_subscript(value: Expr) -> Self {
        Expr::Subscript {
            value: Box::new(value),
            slice: Box::new(Slice::Ellipsis),
        }
    }

    pub fn tuple(elts: Vec<Expr>) -> Self {
        Expr::Tuple { elts }
    }

    pub fn list(elts: Vec<Expr>) -> Self {
        Expr::List { elts }
    }

    pub fn dict(entries: Vec<(Expr, Expr)>) -> Self {
        Expr::Dict { entries }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            keywords: Vec::new(),
        }
    }

    pub fn call_with_keywords(func: Expr, args: Vec<Expr>, keywords: Vec<Keyword>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            keywords,
        }
    }

    pub fn binop(left: Expr, op: Operator, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Build a (possibly chained) comparison.
    pub fn compare(left: Expr, rest: Vec<(CmpOp, Expr)>) -> Self {
        let (ops, comparators) = rest.into_iter().unzip();
        Expr::Compare {
            left: Box::new(left),
            ops,
            comparators,
        }
    }

    pub fn bool_op(op: BoolOperator, values: Vec<Expr>) -> Self {
        Expr::BoolOp { op, values }
    }

    pub fn unary(op: UnaryOperator, operand: Expr) -> Self {
        Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn lambda(args: Vec<String>, body: Expr) -> Self {
        Expr::Lambda {
            args,
            body: Box::new(body),
        }
    }

    pub fn yield_expr(value: Option<Expr>) -> Self {
        Expr::Yield {
            value: value.map(Box::new),
        }
    }
}

/// The bracketed part of a subscript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Slice {
    Index {
        value: Expr,
    },
    Ellipsis,
    Slice {
        lower: Option<Expr>,
        upper: Option<Expr>,
        step: Option<Expr>,
    },
}

/// Numeric literal value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Arithmetic and bitwise binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Invert,
    Not,
    UAdd,
    USub,
}
