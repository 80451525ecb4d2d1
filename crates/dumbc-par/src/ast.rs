//! AST node definitions and the resolved `Type` universe.
//!
//! Every node carries a [`Location`]. Expression nodes additionally carry a
//! `ty` field that starts `None` after parsing and is filled in by
//! `TypePass` — see the invariants in the data model section of the
//! specification this crate implements.
//!
//! `Type` lives here rather than in `dumbc-sem` so that AST nodes can embed
//! a resolved type without a dependency cycle (semantic passes already
//! depend on this crate for the AST they walk).

use dumbc_util::{Location, Symbol};

/// The built-in type universe plus a catch-all for any other name that
/// appears in a type position. Unlike the dynamically-typed source this is
/// derived from, the name is resolved to a concrete variant immediately at
/// parse time (`Type::from_name`); names outside the closed builtin set
/// become `Unknown` rather than a parse error, since only variable
/// annotations are range-checked against `VAR_TYPES` — argument types,
/// return types, and cast targets are accepted verbatim and left for later
/// passes (or the backend) to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    I8,
    I32,
    I64,
    U8,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Str,
    Void,
    Unknown(Symbol),
}

impl Type {
    pub fn from_name(name: Symbol) -> Self {
        match name.as_str() {
            "i8" => Type::I8,
            "i32" => Type::I32,
            "i64" => Type::I64,
            "u8" => Type::U8,
            "u32" => Type::U32,
            "u64" => Type::U64,
            "f32" => Type::F32,
            "f64" => Type::F64,
            "bool" => Type::Bool,
            "str" => Type::Str,
            "void" => Type::Void,
            _ => Type::Unknown(name),
        }
    }

    pub fn name(self) -> String {
        match self {
            Type::I8 => "i8".into(),
            Type::I32 => "i32".into(),
            Type::I64 => "i64".into(),
            Type::U8 => "u8".into(),
            Type::U32 => "u32".into(),
            Type::U64 => "u64".into(),
            Type::F32 => "f32".into(),
            Type::F64 => "f64".into(),
            Type::Bool => "bool".into(),
            Type::Str => "str".into(),
            Type::Void => "void".into(),
            Type::Unknown(sym) => sym.as_str().to_string(),
        }
    }

    pub fn is_signed_int(self) -> bool {
        matches!(self, Type::I8 | Type::I32 | Type::I64)
    }

    pub fn is_unsigned_int(self) -> bool {
        matches!(self, Type::U8 | Type::U32 | Type::U64)
    }

    pub fn is_integer(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    pub fn is_float(self) -> bool {
        matches!(self, Type::F32 | Type::F64)
    }

    /// `NUMERICAL = INTEGERS ∪ FLOATS`.
    pub fn is_numerical(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// `VAR_TYPES = NUMERICAL ∪ {bool, str}` — the set a `var` annotation
    /// is checked against.
    pub fn is_var_type(self) -> bool {
        self.is_numerical() || matches!(self, Type::Bool | Type::Str)
    }

    /// Bit width of an integer type; `None` for anything else.
    pub fn int_bits(self) -> Option<u32> {
        match self {
            Type::I8 | Type::U8 => Some(8),
            Type::I32 | Type::U32 => Some(32),
            Type::I64 | Type::U64 => Some(64),
            _ => None,
        }
    }
}

/// A closed operator enumeration. Category predicates mirror the
/// partition the specification draws and the coarser validation groupings
/// `TypePass` dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    LogAnd,
    LogOr,
    BitNot,
    LogNot,
    Pos,
    Neg,
}

impl Operator {
    /// `+ - * / % & | ^ << >>` — the "arithmetic binary" partition.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Operator::Add
                | Operator::Sub
                | Operator::Mul
                | Operator::Div
                | Operator::Mod
                | Operator::BitAnd
                | Operator::BitOr
                | Operator::BitXor
                | Operator::Shl
                | Operator::Shr
        )
    }

    /// `< <= > >= == !=`.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge | Operator::Eq | Operator::Ne
        )
    }

    /// `== !=` specifically — treated as logical at validation time but
    /// tolerant of any numeric common type, per §4.4.
    pub fn is_equality(self) -> bool {
        matches!(self, Operator::Eq | Operator::Ne)
    }

    /// `|| &&`.
    pub fn is_logical(self) -> bool {
        matches!(self, Operator::LogAnd | Operator::LogOr)
    }

    /// `& | ^`.
    pub fn is_bitwise(self) -> bool {
        matches!(self, Operator::BitAnd | Operator::BitOr | Operator::BitXor)
    }

    /// `<< >>`.
    pub fn is_shift(self) -> bool {
        matches!(self, Operator::Shl | Operator::Shr)
    }

    pub fn is_binary(self) -> bool {
        !self.is_unary()
    }

    /// `~ ! +u -u`.
    pub fn is_unary(self) -> bool {
        matches!(self, Operator::BitNot | Operator::LogNot | Operator::Pos | Operator::Neg)
    }

    /// Result type for a relational comparison is always `bool`; every
    /// other binary category keeps the common operand type.
    pub fn produces_bool(self) -> bool {
        self.is_relational() || self.is_logical()
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    BinaryOp {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
        ty: Option<Type>,
        loc: Location,
    },
    Assignment {
        lvalue: Box<Expr>,
        rvalue: Box<Expr>,
        op: Option<Operator>,
        ty: Option<Type>,
        loc: Location,
    },
    UnaryOp {
        op: Operator,
        value: Box<Expr>,
        ty: Option<Type>,
        loc: Location,
    },
    Cast {
        value: Box<Expr>,
        src_ty: Option<Type>,
        dst_ty: Type,
        ty: Option<Type>,
        loc: Location,
    },
    IntegerConstant {
        value: u64,
        ty: Option<Type>,
        loc: Location,
    },
    FloatConstant {
        value: f64,
        ty: Option<Type>,
        loc: Location,
    },
    BooleanConstant {
        value: bool,
        ty: Option<Type>,
        loc: Location,
    },
    StringConstant {
        value: Symbol,
        ty: Option<Type>,
        loc: Location,
    },
    Identifier {
        name: Symbol,
        ty: Option<Type>,
        loc: Location,
    },
    FuncCall {
        name: Symbol,
        args: Vec<Expr>,
        ty: Option<Type>,
        loc: Location,
    },
}

impl Expr {
    pub fn loc(&self) -> Location {
        match self {
            Expr::BinaryOp { loc, .. }
            | Expr::Assignment { loc, .. }
            | Expr::UnaryOp { loc, .. }
            | Expr::Cast { loc, .. }
            | Expr::IntegerConstant { loc, .. }
            | Expr::FloatConstant { loc, .. }
            | Expr::BooleanConstant { loc, .. }
            | Expr::StringConstant { loc, .. }
            | Expr::Identifier { loc, .. }
            | Expr::FuncCall { loc, .. } => *loc,
        }
    }

    pub fn ty(&self) -> Option<Type> {
        match self {
            Expr::BinaryOp { ty, .. }
            | Expr::Assignment { ty, .. }
            | Expr::UnaryOp { ty, .. }
            | Expr::Cast { ty, .. }
            | Expr::IntegerConstant { ty, .. }
            | Expr::FloatConstant { ty, .. }
            | Expr::BooleanConstant { ty, .. }
            | Expr::StringConstant { ty, .. }
            | Expr::Identifier { ty, .. }
            | Expr::FuncCall { ty, .. } => *ty,
        }
    }

    pub fn set_ty(&mut self, new_ty: Type) {
        let slot = match self {
            Expr::BinaryOp { ty, .. }
            | Expr::Assignment { ty, .. }
            | Expr::UnaryOp { ty, .. }
            | Expr::Cast { ty, .. }
            | Expr::IntegerConstant { ty, .. }
            | Expr::FloatConstant { ty, .. }
            | Expr::BooleanConstant { ty, .. }
            | Expr::StringConstant { ty, .. }
            | Expr::Identifier { ty, .. }
            | Expr::FuncCall { ty, .. } => ty,
        };
        *slot = Some(new_ty);
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Block(Block),
    If {
        cond: Expr,
        then: Block,
        /// Either `Stmt::Block` (plain `else`) or `Stmt::If` (`else if`
        /// chain), or absent.
        otherwise: Option<Box<Stmt>>,
        loc: Location,
    },
    While {
        cond: Expr,
        body: Block,
        loc: Location,
    },
    Break {
        loc: Location,
    },
    Continue {
        loc: Location,
    },
    Return {
        value: Option<Expr>,
        loc: Location,
    },
    Var {
        name: Symbol,
        ty: Option<Type>,
        initial_value: Expr,
        loc: Location,
    },
    Expression {
        expr: Expr,
        loc: Location,
    },
}

impl Stmt {
    pub fn loc(&self) -> Location {
        match self {
            Stmt::Block(b) => b.loc,
            Stmt::If { loc, .. }
            | Stmt::While { loc, .. }
            | Stmt::Break { loc }
            | Stmt::Continue { loc }
            | Stmt::Return { loc, .. }
            | Stmt::Var { loc, .. }
            | Stmt::Expression { loc, .. } => *loc,
        }
    }

    /// A terminator unconditionally transfers control out of its block
    /// (`return`/`break`/`continue`); `DeadCodePass` truncates each block
    /// at the first one.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Stmt::Return { .. } | Stmt::Break { .. } | Stmt::Continue { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrArg {
    Integer(u64),
    Float(f64),
    Bool(bool),
    Ident(Symbol),
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: Symbol,
    /// Absent for a bare attribute (`#[external]`); the parser rejects an
    /// empty-but-present argument list (`#[external()]` is still parsed —
    /// it's a semantic error, not a syntax one — but `#[external(,)]` style
    /// malformed lists are syntax errors).
    pub args: Option<Vec<AttrArg>>,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct Argument {
    pub name: Symbol,
    pub ty: Type,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct FunctionProto {
    pub name: Symbol,
    pub args: Vec<Argument>,
    pub ret_ty: Type,
    /// Absent if no `#[...]` block precedes the function; the parser never
    /// produces `Some(vec![])` (an empty attribute block is a syntax
    /// error).
    pub attrs: Option<Vec<Attribute>>,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub proto: FunctionProto,
    /// `None` iff the function is declared external.
    pub body: Option<Block>,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct TranslationUnit {
    pub decls: Vec<Function>,
    pub loc: Location,
}

impl TranslationUnit {
    /// The synthetic root location used when a translation unit carries no
    /// real source position of its own.
    pub const ROOT_LOC: Location = Location::new(1, 1, 0);
}
