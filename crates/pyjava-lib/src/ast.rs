//! Syntax tree produced by the parser.
//!
//! One closed enum per category (statements, expressions, patterns). The tree
//! is built once, owns its children and is read-only to the transpiler.
//! Grammar options are already resolved: a forced `if (x)` and a plain
//! `if (x)` produce the same `Group` condition.

/// Root of a parsed file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct File {
    pub body: Vec<Stmt>,
    /// Comments after the last statement.
    pub dangling: Vec<Comment>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentKind {
    /// `# text`
    Line,
    /// `#{ text #}`
    Block,
}

/// A source comment, verbatim including its delimiters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
    /// Character column of the opening `#`.
    pub column: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub leading: Vec<Comment>,
    pub trailing: Option<Comment>,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Self {
            kind,
            leading: Vec::new(),
            trailing: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// Expression statement; also carries `yield` statements.
    Expr(Expr),
    /// `a = b = value`
    Assign { targets: Vec<Expr>, value: Expr },
    AugAssign {
        target: Expr,
        op: AugOp,
        value: Expr,
    },
    /// `target: annotation [= value]`
    AnnAssign {
        target: Expr,
        annotation: Expr,
        value: Option<Expr>,
    },
    Return(Option<Expr>),
    Raise {
        exc: Option<Expr>,
        cause: Option<Expr>,
    },
    Import(Vec<Alias>),
    ImportFrom {
        level: usize,
        module: Option<String>,
        names: ImportNames,
    },
    Delete(Vec<Expr>),
    Assert { test: Expr, msg: Option<Expr> },
    /// `pass` or an empty statement `;`.
    Pass,
    Break,
    Continue,
    Global(Vec<String>),
    Nonlocal(Vec<String>),
    FunctionDef(Box<FunctionDef>),
    ClassDef(Box<ClassDef>),
    If(Box<If>),
    While(Box<While>),
    For(Box<For>),
    With(Box<With>),
    Try(Box<Try>),
    Match(Box<Match>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alias {
    /// Dotted name.
    pub name: String,
    pub asname: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportNames {
    Star,
    Names(Vec<Alias>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockForm {
    /// `{ stmts }`
    Brace,
    /// `: stmt` on the header line.
    ColonSimple,
    /// `:` followed by an indented suite.
    ColonIndented,
    /// A single statement without colon or braces.
    NoColon,
}

/// A block body and the comments around it.
#[derive(Clone, Debug, PartialEq)]
pub struct Suite<T> {
    pub form: BlockForm,
    /// Same-line comment after the header or after the opening `{`/`:`.
    pub header_comment: Option<Comment>,
    /// Comments between the header and the first item that no item owns.
    pub leading: Vec<Comment>,
    pub items: Vec<T>,
    /// Comments before the closing `}`.
    pub dangling: Vec<Comment>,
    /// Same-line comment after the closing `}`.
    pub closing_comment: Option<Comment>,
}

impl<T> Suite<T> {
    pub fn new(form: BlockForm, items: Vec<T>) -> Self {
        Self {
            form,
            header_comment: None,
            leading: Vec::new(),
            items,
            dangling: Vec::new(),
            closing_comment: None,
        }
    }

    pub fn has_comments(&self) -> bool {
        self.header_comment.is_some()
            || !self.leading.is_empty()
            || !self.dangling.is_empty()
            || self.closing_comment.is_some()
    }
}

pub type Block = Suite<Stmt>;

/// `else`/`finally` clause, or any clause with only a block.
#[derive(Clone, Debug, PartialEq)]
pub struct Clause {
    pub leading: Vec<Comment>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Decorator {
    pub leading: Vec<Comment>,
    pub expr: Expr,
    pub trailing: Option<Comment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub decorators: Vec<Decorator>,
    /// Comments between the last decorator and `def`.
    pub header_leading: Vec<Comment>,
    pub is_async: bool,
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Option<Expr>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDef {
    pub decorators: Vec<Decorator>,
    pub header_leading: Vec<Comment>,
    pub name: String,
    /// `None` without parentheses, `Some(vec![])` for `class A()`.
    pub args: Option<Vec<Arg>>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct If {
    pub test: Expr,
    pub body: Block,
    pub elifs: Vec<Elif>,
    pub orelse: Option<Clause>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Elif {
    pub leading: Vec<Comment>,
    pub test: Expr,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct While {
    pub test: Expr,
    pub body: Block,
    pub orelse: Option<Clause>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct For {
    pub is_async: bool,
    pub target: Expr,
    pub iter: Expr,
    pub body: Block,
    pub orelse: Option<Clause>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct With {
    pub is_async: bool,
    pub items: Vec<WithItem>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WithItem {
    pub context: Expr,
    pub target: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Try {
    pub body: Block,
    pub handlers: Vec<ExceptHandler>,
    pub orelse: Option<Clause>,
    pub finally: Option<Clause>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExceptHandler {
    pub leading: Vec<Comment>,
    pub kind: Option<Expr>,
    pub name: Option<String>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    pub subject: Expr,
    pub cases: Suite<MatchCase>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchCase {
    pub leading: Vec<Comment>,
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Block,
}

/// Function and lambda parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Param {
    Named {
        name: String,
        annotation: Option<Expr>,
        default: Option<Expr>,
    },
    /// `/`
    PositionalOnly,
    /// Bare `*`.
    KeywordOnly,
    /// `*args`
    VarArgs {
        name: String,
        annotation: Option<Expr>,
    },
    /// `**kwargs`
    KwArgs {
        name: String,
        annotation: Option<Expr>,
    },
}

impl Param {
    pub fn is_annotated(&self) -> bool {
        match self {
            Param::Named { annotation, .. }
            | Param::VarArgs { annotation, .. }
            | Param::KwArgs { annotation, .. } => annotation.is_some(),
            Param::PositionalOnly | Param::KeywordOnly => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Positional(Expr),
    /// `*iterable`
    Starred(Expr),
    Keyword { name: String, value: Expr },
    /// `**mapping`
    DoubleStarred(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub enum CallArgs {
    Args(Vec<Arg>),
    /// `f(x for x in y)`: the sole argument is a bare generator.
    Generator(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comprehension {
    pub is_async: bool,
    pub target: Expr,
    pub iter: Expr,
    pub ifs: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DictItem {
    Pair { key: Expr, value: Expr },
    /// `**mapping`
    Unpack(Expr),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    None,
    True,
    False,
    Ellipsis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    In,
    NotIn,
    Is,
    IsNot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    BitOr,
    BitXor,
    BitAnd,
    LShift,
    RShift,
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    MatMult,
    Pow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    UAdd,
    USub,
    Invert,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AugOp {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    LShift,
    RShift,
    Pow,
    FloorDiv,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Name(String),
    /// Numeric literal, verbatim.
    Number(String),
    /// Adjacent string literals, each verbatim with prefix and quotes.
    Strings(Vec<String>),
    Constant(Constant),
    /// `(expr)`
    Group(Box<Expr>),
    Tuple {
        elts: Vec<Expr>,
        parenthesized: bool,
    },
    List {
        elts: Vec<Expr>,
        trailing_comma: bool,
    },
    Set(Vec<Expr>),
    Dict(Vec<DictItem>),
    ListComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    SetComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    DictComp {
        key: Box<Expr>,
        value: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    GeneratorExp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    Call {
        func: Box<Expr>,
        args: CallArgs,
    },
    Subscript {
        value: Box<Expr>,
        slices: Vec<Expr>,
        trailing_comma: bool,
    },
    /// `lower:upper[:step]`, only inside subscripts.
    Slice {
        lower: Option<Box<Expr>>,
        upper: Option<Box<Expr>>,
        /// `None` without a second colon.
        step: Option<Option<Box<Expr>>>,
    },
    Starred(Box<Expr>),
    /// `name := value`
    NamedExpr {
        target: String,
        value: Box<Expr>,
    },
    BoolOp {
        op: BoolOp,
        values: Vec<Expr>,
    },
    Not(Box<Expr>),
    Compare {
        left: Box<Expr>,
        ops: Vec<(CmpOp, Expr)>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Await(Box<Expr>),
    /// `body if test else orelse`
    IfExp {
        body: Box<Expr>,
        test: Box<Expr>,
        orelse: Box<Expr>,
    },
    Lambda(Box<Lambda>),
    AnonymousClass(Box<AnonymousClass>),
    Yield(Option<Box<Expr>>),
    YieldFrom(Box<Expr>),
}

impl Expr {
    pub fn group(inner: Expr) -> Self {
        Expr::Group(Box::new(inner))
    }

    pub fn is_parenthesized_atom(&self) -> bool {
        matches!(
            self,
            Expr::Group(_)
                | Expr::Tuple {
                    parenthesized: true,
                    ..
                }
                | Expr::GeneratorExp { .. }
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LambdaParams {
    /// `lambda x, y: ...`, possibly empty.
    Bare(Vec<Param>),
    /// `lambda (x: int, y): ...`
    Parenthesized(Vec<Param>),
}

impl LambdaParams {
    pub fn params(&self) -> &[Param] {
        match self {
            LambdaParams::Bare(params) | LambdaParams::Parenthesized(params) => params,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LambdaBody {
    Expr(Expr),
    Block(Block),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lambda {
    pub is_async: bool,
    pub params: LambdaParams,
    pub returns: Option<Expr>,
    pub body: LambdaBody,
}

/// `class [(bases)] (args) { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct AnonymousClass {
    pub bases: Option<Vec<Arg>>,
    pub ctor: CallArgs,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// `_`
    Wildcard,
    Capture(String),
    /// Dotted name with at least one dot.
    Value(Vec<String>),
    Literal(PatternLiteral),
    Group(Box<Pattern>),
    Sequence {
        kind: SequenceKind,
        elts: Vec<Pattern>,
        trailing_comma: bool,
    },
    /// `*name` or `*_` (`None`).
    Star(Option<String>),
    Mapping {
        items: Vec<(Pattern, Pattern)>,
        rest: Option<String>,
    },
    Class {
        cls: Vec<String>,
        positional: Vec<Pattern>,
        keywords: Vec<(String, Pattern)>,
    },
    Or(Vec<Pattern>),
    As {
        pattern: Box<Pattern>,
        name: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceKind {
    /// `a, b` without brackets.
    Open,
    Tuple,
    List,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternLiteral {
    Number {
        negative: bool,
        text: String,
    },
    /// `[-]real (+|-) imag`
    Complex {
        negative: bool,
        real: String,
        plus: bool,
        imag: String,
    },
    Strings(Vec<String>),
    None,
    True,
    False,
}
