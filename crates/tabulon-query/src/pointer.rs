//! Pointers: paths from a table row to a single cell.
//!
//! `Ordinal(c)` names column `c` of the current table. `Nested(a, inner)`
//! follows association `a` (its ordinal among the table's associations) to the
//! target row, then resolves `inner` there.
//!
//! In documents a pointer is written as its path, `[a1, ..., an, c]`.
//!
//! Paths come from untrusted documents and can be arbitrarily long, so every
//! walk over a pointer (including `Clone`, `Drop` and comparisons) is a loop.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use serde::{Deserialize, Serialize};

use tabulon_core::error::{Error, Result};
use tabulon_core::types::{Column, ScalarRef};
use tabulon_core::Table;

use crate::error::DslError;

#[derive(Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub enum Pointer {
    Ordinal(usize),
    Nested(usize, Box<Pointer>),
}

/// A pointer resolved against a concrete row: the cell is `column[row]`.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub column: &'a Column,
    pub row: usize,
}

impl<'a> Resolved<'a> {
    pub fn value(&self) -> Result<ScalarRef<'a>> {
        self.column.value_at(self.row)
    }
}

impl Pointer {
    pub fn ordinal(column: usize) -> Self {
        Pointer::Ordinal(column)
    }

    pub fn nested(association: usize, inner: Pointer) -> Self {
        Pointer::Nested(association, Box::new(inner))
    }

    /// `[a1, ..., an, c]` → `Nested(a1, ... Nested(an, Ordinal(c)))`.
    pub fn from_path(path: &[usize]) -> Option<Pointer> {
        let (&column, associations) = path.split_last()?;
        Some(
            associations
                .iter()
                .rev()
                .fold(Pointer::Ordinal(column), |inner, &a| {
                    Pointer::nested(a, inner)
                }),
        )
    }

    /// Association hops in order, then the final column ordinal.
    fn hops(&self) -> (Vec<usize>, usize) {
        let mut associations = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Pointer::Ordinal(c) => return (associations, *c),
                Pointer::Nested(a, inner) => {
                    associations.push(*a);
                    cur = inner;
                }
            }
        }
    }

    pub fn path(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.depth());
        let mut cur = self;
        loop {
            match cur {
                Pointer::Ordinal(c) => {
                    out.push(*c);
                    return out;
                }
                Pointer::Nested(a, inner) => {
                    out.push(*a);
                    cur = inner;
                }
            }
        }
    }

    /// Number of path elements: associations crossed plus the final column.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut cur = self;
        while let Pointer::Nested(_, inner) = cur {
            depth += 1;
            cur = inner;
        }
        depth
    }

    /// Resolve against `row` of `table`, crossing associations as needed.
    pub fn resolve<'a>(&self, mut table: &'a Table, mut row: usize) -> Result<Resolved<'a>> {
        let mut cur = self;
        loop {
            if row >= table.row_count() {
                return Err(Error::RowOutOfRange {
                    row,
                    len: table.row_count(),
                });
            }
            match cur {
                Pointer::Ordinal(c) => {
                    return Ok(Resolved {
                        column: table.column(*c)?,
                        row,
                    });
                }
                Pointer::Nested(a, inner) => {
                    let assoc = table.association(*a)?;
                    row = assoc.target_row(*a, row)?;
                    table = assoc.target();
                    cur = inner;
                }
            }
        }
    }

    /// Row-independent resolution: the column this pointer ends at.
    ///
    /// Fails exactly when some row would fail for a structural reason
    /// (bad column or association ordinal), which lets callers reject a
    /// malformed pointer even against an empty table.
    pub fn resolve_column<'a>(&self, mut table: &'a Table) -> Result<&'a Column> {
        let mut cur = self;
        loop {
            match cur {
                Pointer::Ordinal(c) => return table.column(*c),
                Pointer::Nested(a, inner) => {
                    table = table.association(*a)?.target();
                    cur = inner;
                }
            }
        }
    }
}

impl Clone for Pointer {
    fn clone(&self) -> Self {
        let (associations, column) = self.hops();
        associations
            .iter()
            .rev()
            .fold(Pointer::Ordinal(column), |inner, &a| Pointer::nested(a, inner))
    }
}

impl Drop for Pointer {
    fn drop(&mut self) {
        let mut next = match self {
            Pointer::Nested(_, inner) => Some(mem::replace(&mut **inner, Pointer::Ordinal(0))),
            Pointer::Ordinal(_) => None,
        };
        while let Some(mut cur) = next {
            next = match &mut cur {
                Pointer::Nested(_, inner) => Some(mem::replace(&mut **inner, Pointer::Ordinal(0))),
                Pointer::Ordinal(_) => None,
            };
        }
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self, other);
        loop {
            match (a, b) {
                (Pointer::Ordinal(x), Pointer::Ordinal(y)) => return x == y,
                (Pointer::Nested(x, xs), Pointer::Nested(y, ys)) if x == y => {
                    a = xs;
                    b = ys;
                }
                _ => return false,
            }
        }
    }
}

impl Eq for Pointer {}

impl Hash for Pointer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path().hash(state);
    }
}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pointer").field(&self.path()).finish()
    }
}

impl TryFrom<Vec<usize>> for Pointer {
    type Error = DslError;

    fn try_from(path: Vec<usize>) -> std::result::Result<Self, Self::Error> {
        Pointer::from_path(&path).ok_or(DslError::EmptyPointer)
    }
}

impl From<Pointer> for Vec<usize> {
    fn from(p: Pointer) -> Self {
        p.path()
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (associations, column) = self.hops();
        for a in associations {
            write!(f, "@{a}.")?;
        }
        write!(f, "#{column}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use tabulon_core::schema::DataType;

    fn cities() -> Table {
        let states = Arc::new(
            Table::of_columns([
                Column::of_strings(["Minnesota", "South Dakota"]),
                Column::of_strings(["MN", "SD"]),
            ])
            .unwrap(),
        );
        let mut cities =
            Table::of_columns([Column::of_strings(["Minneapolis", "Pierre", "Duluth"])]).unwrap();
        cities.associate_to(states, vec![0, 1, 0]).unwrap();
        cities
    }

    #[test]
    fn ordinal_resolves_in_place() {
        let t = cities();
        let r = Pointer::ordinal(0).resolve(&t, 1).unwrap();
        assert_eq!(r.row, 1);
        assert_eq!(r.value(), Ok(ScalarRef::Str("Pierre")));
    }

    #[test]
    fn nested_crosses_the_association() {
        let t = cities();
        let p = Pointer::nested(0, Pointer::ordinal(1));
        assert_eq!(p.resolve(&t, 1).unwrap().value(), Ok(ScalarRef::Str("SD")));
        assert_eq!(p.resolve(&t, 2).unwrap().value(), Ok(ScalarRef::Str("MN")));
        assert_eq!(p.resolve_column(&t).unwrap().data_type(), DataType::String);
    }

    #[test]
    fn bad_ordinals_are_out_of_range() {
        let t = cities();
        let err = Pointer::ordinal(3).resolve(&t, 0).unwrap_err();
        assert_eq!(err, Error::ColumnOutOfRange { ordinal: 3, count: 1 });

        let err = Pointer::nested(1, Pointer::ordinal(0))
            .resolve(&t, 0)
            .unwrap_err();
        assert_eq!(err, Error::AssociationOutOfRange { ordinal: 1, count: 1 });

        let err = Pointer::nested(0, Pointer::ordinal(2))
            .resolve_column(&t)
            .unwrap_err();
        assert!(err.is_out_of_range());

        assert!(Pointer::ordinal(0).resolve(&t, 3).unwrap_err().is_out_of_range());
    }

    #[test]
    fn path_form_round_trips() {
        let p = Pointer::from_path(&[2, 0, 5]).unwrap();
        assert_eq!(
            p,
            Pointer::nested(2, Pointer::nested(0, Pointer::ordinal(5)))
        );
        assert_eq!(p.path(), vec![2, 0, 5]);
        assert_eq!(p.depth(), 3);
        assert_eq!(p.to_string(), "@2.@0.#5");
        assert_eq!(Pointer::from_path(&[]), None);
    }

    #[test]
    fn very_long_paths_do_not_recurse() {
        let path = vec![0; 1_000_000];
        let p = Pointer::from_path(&path).unwrap();
        assert_eq!(p.depth(), 1_000_000);
        let copy = p.clone();
        assert!(copy == p);
        assert_eq!(copy.path().len(), 1_000_000);

        // association 0 exists once; the second hop runs out
        let err = p.resolve_column(&cities()).unwrap_err();
        assert_eq!(err, Error::AssociationOutOfRange { ordinal: 0, count: 0 });
        drop(copy);
        drop(p);
    }

    #[test]
    fn serde_uses_the_path_form() {
        let p: Pointer = serde_json::from_str("[1, 0]").unwrap();
        assert_eq!(p, Pointer::nested(1, Pointer::ordinal(0)));
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1,0]");
        assert!(serde_json::from_str::<Pointer>("[]").is_err());
    }
}
