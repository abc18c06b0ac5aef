use crate::elm::syntax::{Decl, Expr, Pattern, TypeExpr};
use crate::pretty::{self, Doc};
use crate::utils::quote;

/// Expression precedences
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Prec {
    Top = 0,
    Pipe,
    App,
    Atomic,
}

/// Type precedences
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum TypePrec {
    Top = 0,
    Arrow,
    Arg,
}

const INDENT: isize = 4;

fn paren(wrap: bool, doc: Doc) -> Doc {
    if wrap {
        Doc::surround("(", doc, ")")
    } else {
        doc
    }
}

/// `[ a, b ]` on one line, or one item per line with leading separators
/// aligned under the opening bracket.
fn sequence(open: &str, items: Vec<Doc>, close: &str) -> Doc {
    if items.is_empty() {
        return Doc::text(format!("{}{}", open, close));
    }
    Doc::text(format!("{} ", open))
        .append(Doc::join(items, Doc::line_or(", ", ", ")))
        .append(Doc::line_or(" ", ""))
        .append(Doc::text(close))
        .align()
        .group()
}

pub fn expr(prec: Prec, expr_: &Expr) -> Doc {
    match expr_ {
        Expr::Var(name) => Doc::text(name.clone()),
        Expr::Str(value) => Doc::text(quote(value)),
        Expr::Int(value) => Doc::text(value.to_string()),

        Expr::App(function, args) => {
            let args = args
                .iter()
                .map(|arg| Doc::line().append(expr(Prec::Atomic, arg)));
            paren(
                prec > Prec::App,
                expr(Prec::Atomic, function)
                    .append(Doc::concat(args).nest(INDENT))
                    .group(),
            )
        }

        Expr::Lambda(params, body) => {
            let params = params
                .iter()
                .map(|param| pattern(true, param))
                .collect::<Vec<_>>();
            paren(
                prec > Prec::Top,
                Doc::text("\\")
                    .append(Doc::join(params, Doc::text(" ")))
                    .append(Doc::text(" ->"))
                    .append(Doc::line().append(expr(Prec::Top, body)).nest(INDENT))
                    .group(),
            )
        }

        Expr::List(items) => sequence(
            "[",
            items.iter().map(|item| expr(Prec::Top, item)).collect(),
            "]",
        ),

        Expr::Tuple(items) => sequence(
            "(",
            items.iter().map(|item| expr(Prec::Top, item)).collect(),
            ")",
        ),

        Expr::Record(fields) => sequence(
            "{",
            fields
                .iter()
                .map(|(name, value)| {
                    Doc::text(format!("{} = ", name)).append(expr(Prec::Top, value))
                })
                .collect(),
            "}",
        ),

        Expr::Access(subject, field) => {
            expr(Prec::Atomic, subject).append(Doc::text(format!(".{}", field)))
        }

        Expr::Case(scrutinee, branches) => {
            let branches = branches.iter().map(|(pattern_, body)| {
                pattern(false, pattern_)
                    .append(Doc::text(" ->"))
                    .append(Doc::hardline().append(expr(Prec::Top, body)).nest(INDENT))
            });
            paren(
                prec > Prec::Top,
                Doc::text("case ")
                    .append(expr(Prec::Top, scrutinee))
                    .append(Doc::text(" of"))
                    .append(
                        Doc::hardline()
                            .append(Doc::join(branches, Doc::hardline().append(Doc::hardline())))
                            .nest(INDENT),
                    ),
            )
        }

        Expr::Pipe(head, stages) => {
            let stages = stages.iter().map(|stage| {
                Doc::line()
                    .append(Doc::text("|> "))
                    .append(expr(Prec::Pipe, stage))
            });
            paren(
                prec > Prec::Pipe,
                expr(Prec::Pipe, head)
                    .append(Doc::concat(stages).nest(INDENT))
                    .group(),
            )
        }
    }
}

/// Prints a pattern; `atomic` wraps constructor applications in parentheses.
pub fn pattern(atomic: bool, pattern_: &Pattern) -> Doc {
    match pattern_ {
        Pattern::Var(name) => Doc::text(name.clone()),
        Pattern::Wildcard => Doc::text("_"),
        Pattern::Ctor(name, args) if args.is_empty() => Doc::text(name.clone()),
        Pattern::Ctor(name, args) => {
            let args = args.iter().map(|arg| Doc::text(" ").append(pattern(true, arg)));
            paren(atomic, Doc::text(name.clone()).append(Doc::concat(args)))
        }
    }
}

pub fn type_expr(type_: &TypeExpr) -> Doc {
    type_prec(TypePrec::Top, type_)
}

fn type_prec(prec: TypePrec, type_: &TypeExpr) -> Doc {
    match type_ {
        TypeExpr::Named(name, args) if args.is_empty() => Doc::text(name.clone()),
        TypeExpr::Named(name, args) => {
            let args = args
                .iter()
                .map(|arg| Doc::line().append(type_prec(TypePrec::Arg, arg)));
            paren(
                prec >= TypePrec::Arg,
                Doc::text(name.clone())
                    .append(Doc::concat(args).nest(INDENT))
                    .group(),
            )
        }
        TypeExpr::Unit => Doc::text("()"),
        TypeExpr::Tuple(items) => sequence(
            "(",
            items.iter().map(type_expr).collect(),
            ")",
        ),
        TypeExpr::Record(fields) => sequence(
            "{",
            fields
                .iter()
                .map(|(name, field)| Doc::text(format!("{} : ", name)).append(type_expr(field)))
                .collect(),
            "}",
        ),
        TypeExpr::Function(argument, result) => paren(
            prec >= TypePrec::Arrow,
            type_prec(TypePrec::Arrow, argument)
                .append(Doc::text(" -> "))
                .append(type_prec(TypePrec::Top, result)),
        ),
    }
}

pub fn decl(decl_: &Decl) -> Doc {
    match decl_ {
        Decl::Value { name, signature, body } => Doc::text(format!("{} : ", name))
            .append(type_expr(signature))
            .append(Doc::hardline())
            .append(Doc::text(format!("{} =", name)))
            .append(Doc::hardline().append(expr(Prec::Top, body)).nest(INDENT)),

        Decl::TypeAlias { name, type_ } => Doc::text(format!("type alias {} =", name))
            .append(Doc::hardline().append(type_expr(type_)).nest(INDENT)),

        Decl::CustomType { name, constructors } => {
            let constructors = constructors.iter().enumerate().map(|(i, (ctor, args))| {
                let args = args
                    .iter()
                    .map(|arg| Doc::text(" ").append(type_prec(TypePrec::Arg, arg)));
                Doc::hardline()
                    .append(Doc::text(if i == 0 { "= " } else { "| " }))
                    .append(Doc::text(ctor.clone()))
                    .append(Doc::concat(args))
            });
            Doc::text(format!("type {}", name)).append(Doc::concat(constructors).nest(INDENT))
        }
    }
}

/// Renders top-level declarations separated by two blank lines.
pub fn render_decls(width: usize, decls: &[Decl]) -> String {
    decls
        .iter()
        .map(|decl_| pretty::render(width, &decl(decl_)))
        .collect::<Vec<_>>()
        .join("\n\n\n")
}
