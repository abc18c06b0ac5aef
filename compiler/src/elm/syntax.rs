//! Just enough Elm syntax to express generated codecs and type declarations.

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A variable, function or constructor, possibly qualified.
    Var(String),
    Str(String),
    Int(i64),
    App(Box<Expr>, Vec<Expr>),
    Lambda(Vec<Pattern>, Box<Expr>),
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Record(Vec<(String, Expr)>),
    Access(Box<Expr>, String),
    Case(Box<Expr>, Vec<(Pattern, Expr)>),
    /// `head |> f |> g`
    Pipe(Box<Expr>, Vec<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    pub fn str(value: impl Into<String>) -> Expr {
        Expr::Str(value.into())
    }

    /// Applies `self` to `args`, merging into an existing application.
    pub fn app(self, args: Vec<Expr>) -> Expr {
        if args.is_empty() {
            return self;
        }
        match self {
            Expr::App(function, mut existing) => {
                existing.extend(args);
                Expr::App(function, existing)
            }
            function => Expr::App(Box::new(function), args),
        }
    }

    pub fn call(function: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::var(function).app(args)
    }

    pub fn lambda(params: Vec<Pattern>, body: Expr) -> Expr {
        Expr::Lambda(params, Box::new(body))
    }

    pub fn access(self, field: impl Into<String>) -> Expr {
        Expr::Access(Box::new(self), field.into())
    }

    pub fn pipe(self, stages: Vec<Expr>) -> Expr {
        if stages.is_empty() {
            return self;
        }
        Expr::Pipe(Box::new(self), stages)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Var(String),
    Ctor(String, Vec<Pattern>),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A named type applied to arguments: `Int`, `List a`, `Json.Decode.Decoder a`.
    Named(String, Vec<TypeExpr>),
    Unit,
    Tuple(Vec<TypeExpr>),
    Record(Vec<(String, TypeExpr)>),
    Function(Box<TypeExpr>, Box<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> TypeExpr {
        TypeExpr::Named(name.into(), Vec::new())
    }

    pub fn applied(name: impl Into<String>, args: Vec<TypeExpr>) -> TypeExpr {
        TypeExpr::Named(name.into(), args)
    }

    pub fn function(argument: TypeExpr, result: TypeExpr) -> TypeExpr {
        TypeExpr::Function(Box::new(argument), Box::new(result))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Value {
        name:      String,
        signature: TypeExpr,
        body:      Expr,
    },
    TypeAlias {
        name:  String,
        type_: TypeExpr,
    },
    CustomType {
        name:         String,
        constructors: Vec<(String, Vec<TypeExpr>)>,
    },
}
