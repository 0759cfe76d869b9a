use crate::value::Value;

/// Comparison operators usable in a WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

/// A filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(String),
    Value(Value),
    BinaryOp {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
    },
    BeginsWith {
        expr: Box<Expr>,
        prefix: Box<Expr>,
    },
}

/// References a column by name.
pub fn col(name: impl Into<String>) -> Expr {
    Expr::Column(name.into())
}

/// A literal value.
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Value(value.into())
}

impl Expr {
    fn binary(self, op: BinaryOp, rhs: impl Into<Value>) -> Expr {
        Expr::BinaryOp {
            lhs: Box::new(self),
            op,
            rhs: Box::new(Expr::Value(rhs.into())),
        }
    }

    pub fn eq(self, rhs: impl Into<Value>) -> Expr {
        self.binary(BinaryOp::Eq, rhs)
    }

    pub fn ne(self, rhs: impl Into<Value>) -> Expr {
        self.binary(BinaryOp::Ne, rhs)
    }

    pub fn lt(self, rhs: impl Into<Value>) -> Expr {
        self.binary(BinaryOp::Lt, rhs)
    }

    pub fn le(self, rhs: impl Into<Value>) -> Expr {
        self.binary(BinaryOp::Le, rhs)
    }

    pub fn gt(self, rhs: impl Into<Value>) -> Expr {
        self.binary(BinaryOp::Gt, rhs)
    }

    pub fn ge(self, rhs: impl Into<Value>) -> Expr {
        self.binary(BinaryOp::Ge, rhs)
    }

    pub fn in_list<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Expr {
        Expr::InList {
            expr: Box::new(self),
            list: values.into_iter().map(|v| Expr::Value(v.into())).collect(),
        }
    }

    pub fn begins_with(self, prefix: impl Into<Value>) -> Expr {
        Expr::BeginsWith {
            expr: Box::new(self),
            prefix: Box::new(Expr::Value(prefix.into())),
        }
    }

    /// Conjunction; nested ANDs are flattened.
    pub fn and(self, other: Expr) -> Expr {
        let mut operands = match self {
            Expr::And(operands) => operands,
            expr => vec![expr],
        };
        match other {
            Expr::And(more) => operands.extend(more),
            expr => operands.push(expr),
        }
        Expr::And(operands)
    }

    /// Disjunction; nested ORs are flattened.
    pub fn or(self, other: Expr) -> Expr {
        let mut operands = match self {
            Expr::Or(operands) => operands,
            expr => vec![expr],
        };
        match other {
            Expr::Or(more) => operands.extend(more),
            expr => operands.push(expr),
        }
        Expr::Or(operands)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }

    /// Visits every column name referenced by the expression.
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Column(name) => out.push(name),
            Expr::Value(_) => {}
            Expr::BinaryOp { lhs, rhs, .. } => {
                lhs.collect_columns(out);
                rhs.collect_columns(out);
            }
            Expr::And(operands) | Expr::Or(operands) => {
                for operand in operands {
                    operand.collect_columns(out);
                }
            }
            Expr::Not(expr) => expr.collect_columns(out),
            Expr::InList { expr, list } => {
                expr.collect_columns(out);
                for item in list {
                    item.collect_columns(out);
                }
            }
            Expr::BeginsWith { expr, prefix } => {
                expr.collect_columns(out);
                prefix.collect_columns(out);
            }
        }
    }
}
