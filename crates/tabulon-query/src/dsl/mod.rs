//! Declarative query documents.
//!
//! Example (YAML):
//! ```yaml
//! config: { max_pointer_depth: 4 }
//! query:
//!   kind: criteria
//!   criteria:
//!     - { pointer: [0, 0], op: "==", value: "South Dakota" }
//!     - { pointer: [1], op: ">", value: 10000 }
//! ```
//!
//! The literal's type picks the predicate's scalar type, so comparing a
//! string column against an integer literal is a `TypeMismatch` at match time.

pub mod yaml;

use serde::{Deserialize, Serialize};

use tabulon_core::config::ConfigOverrides;
use tabulon_core::schema::DataType;
use tabulon_core::types::Scalar;

use crate::criteria::{Criteria, IntPredicate, Predicate, StrPredicate};
use crate::error::DslError;
use crate::pointer::Pointer;
use crate::query::Query;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDocument {
    #[serde(default)]
    pub config: Option<ConfigOverrides>,
    pub query: QuerySpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuerySpec {
    OrdinalInteger {
        column: usize,
        op: CompareOp,
        value: Scalar,
    },
    Criteria {
        #[serde(default)]
        criteria: Vec<CriteriaSpec>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaSpec {
    pub pointer: Pointer,
    pub op: CompareOp,
    pub value: Scalar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    pub fn eval<T: Ord + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Ne => lhs != rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Ge => lhs >= rhs,
        }
    }
}

/// Build the predicate `value <op> literal`, labelled for explain output.
pub fn comparison(op: CompareOp, literal: &Scalar) -> Predicate {
    let label = format!("{} {}", op.symbol(), literal);
    match literal.clone() {
        Scalar::Int(rhs) => {
            Predicate::Int(IntPredicate::new(move |v| op.eval(&v, &rhs)).with_label(label))
        }
        Scalar::Str(rhs) => Predicate::Str(
            StrPredicate::new(move |v| op.eval(v, rhs.as_str())).with_label(label),
        ),
    }
}

impl QuerySpec {
    pub fn compile(&self) -> Result<Query, DslError> {
        match self {
            QuerySpec::OrdinalInteger { column, op, value } => match comparison(*op, value) {
                Predicate::Int(predicate) => Ok(Query::OrdinalSingleFieldInteger {
                    column: *column,
                    predicate,
                }),
                Predicate::Str(_) => Err(DslError::LiteralType {
                    query: "ordinal_integer",
                    expected: DataType::Integer,
                    found: value.data_type(),
                }),
            },
            QuerySpec::Criteria { criteria } => Ok(Query::criteria(
                criteria
                    .iter()
                    .map(|c| Criteria::new(c.pointer.clone(), comparison(c.op, &c.value))),
            )),
        }
    }
}

impl QueryDocument {
    pub fn compile(&self) -> Result<Query, DslError> {
        self.query.compile()
    }
}
