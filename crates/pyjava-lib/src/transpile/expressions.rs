//! Expressions, parameters and arguments.
//!
//! Parentheses in the output are exactly the groups in the tree; nothing is
//! re-parenthesized by precedence.

use crate::ast::{
    Arg, AugOp, BinOp, BoolOp, CallArgs, CmpOp, Comprehension, Constant, DictItem, Expr, Param,
    UnaryOp,
};

use super::Transpiler;

impl Transpiler {
    pub(super) fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Name(name) | Expr::Number(name) => {
                self.w().append(name);
            }
            Expr::Strings(parts) => {
                self.w().append(&parts.join(" "));
            }
            Expr::Constant(constant) => {
                self.w().append(constant_text(*constant));
            }
            Expr::Group(inner) => {
                self.w().append_char('(');
                self.expr(inner);
                self.w().append_char(')');
            }
            Expr::Tuple {
                elts,
                parenthesized,
            } => {
                if *parenthesized {
                    self.w().append_char('(');
                }
                self.comma_separated(elts, Self::expr);
                if elts.len() == 1 {
                    self.w().append_char(',');
                }
                if *parenthesized {
                    self.w().append_char(')');
                }
            }
            Expr::List {
                elts,
                trailing_comma,
            } => {
                self.w().append_char('[');
                self.comma_separated(elts, Self::expr);
                if *trailing_comma && elts.len() == 1 {
                    self.w().append_char(',');
                }
                self.w().append_char(']');
            }
            Expr::Set(elts) => {
                self.w().append("{ ");
                self.comma_separated(elts, Self::expr);
                self.w().append(" }");
            }
            Expr::Dict(items) => {
                if items.is_empty() {
                    self.w().append("{}");
                    return;
                }
                self.w().append("{ ");
                self.comma_separated(items, Self::dict_item);
                self.w().append(" }");
            }
            Expr::ListComp { elt, generators } => {
                self.w().append_char('[');
                self.expr(elt);
                self.comprehensions(generators);
                self.w().append_char(']');
            }
            Expr::SetComp { elt, generators } => {
                self.w().append("{ ");
                self.expr(elt);
                self.comprehensions(generators);
                self.w().append(" }");
            }
            Expr::DictComp {
                key,
                value,
                generators,
            } => {
                self.w().append("{ ");
                self.expr(key);
                self.w().append(": ");
                self.expr(value);
                self.comprehensions(generators);
                self.w().append(" }");
            }
            Expr::GeneratorExp { elt, generators } => {
                self.w().append_char('(');
                self.expr(elt);
                self.comprehensions(generators);
                self.w().append_char(')');
            }
            Expr::Attribute { value, attr } => {
                self.expr(value);
                self.w().append_char('.').append(attr);
            }
            Expr::Call { func, args } => {
                self.expr(func);
                self.call_args(args);
            }
            Expr::Subscript {
                value,
                slices,
                trailing_comma,
            } => {
                self.expr(value);
                self.w().append_char('[');
                self.comma_separated(slices, Self::expr);
                if *trailing_comma && slices.len() == 1 {
                    self.w().append_char(',');
                }
                self.w().append_char(']');
            }
            Expr::Slice { lower, upper, step } => {
                if let Some(lower) = lower {
                    self.expr(lower);
                }
                self.w().append_char(':');
                if let Some(upper) = upper {
                    self.expr(upper);
                }
                if let Some(step) = step {
                    self.w().append_char(':');
                    if let Some(step) = step {
                        self.expr(step);
                    }
                }
            }
            Expr::Starred(inner) => {
                self.w().append_char('*');
                self.expr(inner);
            }
            Expr::NamedExpr { target, value } => {
                self.w().append(target).append(" := ");
                self.expr(value);
            }
            Expr::BoolOp { op, values } => {
                let sep = match op {
                    BoolOp::And => " and ",
                    BoolOp::Or => " or ",
                };
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        self.w().append(sep);
                    }
                    self.expr(value);
                }
            }
            Expr::Not(operand) => {
                self.w().append("not ");
                self.expr(operand);
            }
            Expr::Compare { left, ops } => {
                self.expr(left);
                for (op, right) in ops {
                    self.w().append_char(' ').append(cmp_op_text(*op)).append_char(' ');
                    self.expr(right);
                }
            }
            Expr::BinOp { left, op, right } => {
                self.expr(left);
                self.w().append_char(' ').append(bin_op_text(*op)).append_char(' ');
                self.expr(right);
            }
            Expr::UnaryOp { op, operand } => {
                self.w().append(unary_op_text(*op));
                self.expr(operand);
            }
            Expr::Await(inner) => {
                self.w().append("await ");
                self.expr(inner);
            }
            Expr::IfExp { body, test, orelse } => {
                self.expr(body);
                self.w().append(" if ");
                self.expr(test);
                self.w().append(" else ");
                self.expr(orelse);
            }
            Expr::Lambda(lambda) => self.lambda(lambda),
            Expr::AnonymousClass(class) => self.anonymous_class(class),
            Expr::Yield(value) => {
                self.w().append("yield");
                if let Some(value) = value {
                    self.w().append_char(' ');
                    self.expr(value);
                }
            }
            Expr::YieldFrom(value) => {
                self.w().append("yield from ");
                self.expr(value);
            }
        }
    }

    fn dict_item(&mut self, item: &DictItem) {
        match item {
            DictItem::Pair { key, value } => {
                self.expr(key);
                self.w().append(": ");
                self.expr(value);
            }
            DictItem::Unpack(mapping) => {
                self.w().append("**");
                self.expr(mapping);
            }
        }
    }

    fn comprehensions(&mut self, generators: &[Comprehension]) {
        for generator in generators {
            let keyword = if generator.is_async {
                " async for "
            } else {
                " for "
            };
            self.w().append(keyword);
            self.expr(&generator.target);
            self.w().append(" in ");
            self.expr(&generator.iter);
            for condition in &generator.ifs {
                self.w().append(" if ");
                self.expr(condition);
            }
        }
    }

    /// Parameter list without the enclosing parentheses.
    pub(super) fn params(&mut self, params: &[Param]) {
        self.comma_separated(params, |t, param| match param {
            Param::Named {
                name,
                annotation,
                default,
            } => {
                t.w().append(name);
                t.annotation(annotation.as_ref());
                if let Some(default) = default {
                    t.w().append_char('=');
                    t.expr(default);
                }
            }
            Param::PositionalOnly => {
                t.w().append_char('/');
            }
            Param::KeywordOnly => {
                t.w().append_char('*');
            }
            Param::VarArgs { name, annotation } => {
                t.w().append_char('*').append(name);
                t.annotation(annotation.as_ref());
            }
            Param::KwArgs { name, annotation } => {
                t.w().append("**").append(name);
                t.annotation(annotation.as_ref());
            }
        });
    }

    fn annotation(&mut self, annotation: Option<&Expr>) {
        if let Some(annotation) = annotation {
            self.w().append(": ");
            self.expr(annotation);
        }
    }

    /// Argument list without the enclosing parentheses.
    pub(super) fn args(&mut self, args: &[Arg]) {
        self.comma_separated(args, |t, arg| match arg {
            Arg::Positional(value) => t.expr(value),
            Arg::Starred(value) => {
                t.w().append_char('*');
                t.expr(value);
            }
            Arg::Keyword { name, value } => {
                t.w().append(name).append_char('=');
                t.expr(value);
            }
            Arg::DoubleStarred(value) => {
                t.w().append("**");
                t.expr(value);
            }
        });
    }

    /// `(args)`, or the generator expression that serves as its own parentheses.
    pub(super) fn call_args(&mut self, args: &CallArgs) {
        match args {
            CallArgs::Args(args) => {
                self.w().append_char('(');
                self.args(args);
                self.w().append_char(')');
            }
            CallArgs::Generator(generator) => self.expr(generator),
        }
    }

    pub(super) fn comma_separated<T>(&mut self, items: &[T], mut item: impl FnMut(&mut Self, &T)) {
        for (i, it) in items.iter().enumerate() {
            if i > 0 {
                self.w().append(", ");
            }
            item(self, it);
        }
    }
}

fn constant_text(constant: Constant) -> &'static str {
    match constant {
        Constant::None => "None",
        Constant::True => "True",
        Constant::False => "False",
        Constant::Ellipsis => "...",
    }
}

fn cmp_op_text(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "==",
        CmpOp::NotEq => "!=",
        CmpOp::Lt => "<",
        CmpOp::LtE => "<=",
        CmpOp::Gt => ">",
        CmpOp::GtE => ">=",
        CmpOp::In => "in",
        CmpOp::NotIn => "not in",
        CmpOp::Is => "is",
        CmpOp::IsNot => "is not",
    }
}

fn bin_op_text(op: BinOp) -> &'static str {
    match op {
        BinOp::BitOr => "|",
        BinOp::BitXor => "^",
        BinOp::BitAnd => "&",
        BinOp::LShift => "<<",
        BinOp::RShift => ">>",
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mult => "*",
        BinOp::Div => "/",
        BinOp::FloorDiv => "//",
        BinOp::Mod => "%",
        BinOp::MatMult => "@",
        BinOp::Pow => "**",
    }
}

fn unary_op_text(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::UAdd => "+",
        UnaryOp::USub => "-",
        UnaryOp::Invert => "~",
    }
}

pub(super) fn aug_op_text(op: AugOp) -> &'static str {
    match op {
        AugOp::Add => "+=",
        AugOp::Sub => "-=",
        AugOp::Mult => "*=",
        AugOp::MatMult => "@=",
        AugOp::Div => "/=",
        AugOp::Mod => "%=",
        AugOp::BitAnd => "&=",
        AugOp::BitOr => "|=",
        AugOp::BitXor => "^=",
        AugOp::LShift => "<<=",
        AugOp::RShift => ">>=",
        AugOp::Pow => "**=",
        AugOp::FloorDiv => "//=",
    }
}
