use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Rotational branch of a transition: P when J drops from the initial to the
/// final state, R when it rises, Q when it stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    P,
    Q,
    R,
}

impl Branch {
    pub fn classify(j_initial: u32, j_final: u32) -> Self {
        match j_initial.cmp(&j_final) {
            Ordering::Greater => Self::P,
            Ordering::Equal => Self::Q,
            Ordering::Less => Self::R,
        }
    }

    const fn offset(self) -> usize {
        match self {
            Self::P => 0,
            Self::Q => 1,
            Self::R => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::P => "p",
            Self::Q => "q",
            Self::R => "r",
        }
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered branch pair of a line pair `(row, column)`, selecting one of the
/// nine fitted coupling surfaces through a 3x3 index map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchPair {
    pub row: Branch,
    pub column: Branch,
}

impl BranchPair {
    pub const COUNT: usize = 9;

    pub const ALL: [Self; Self::COUNT] = [
        Self::new(Branch::P, Branch::P),
        Self::new(Branch::P, Branch::Q),
        Self::new(Branch::P, Branch::R),
        Self::new(Branch::Q, Branch::P),
        Self::new(Branch::Q, Branch::Q),
        Self::new(Branch::Q, Branch::R),
        Self::new(Branch::R, Branch::P),
        Self::new(Branch::R, Branch::Q),
        Self::new(Branch::R, Branch::R),
    ];

    pub const fn new(row: Branch, column: Branch) -> Self {
        Self { row, column }
    }

    pub const fn index(self) -> usize {
        self.row.offset() * 3 + self.column.offset()
    }

    pub const fn label(self) -> &'static str {
        ["pp", "pq", "pr", "qp", "qq", "qr", "rp", "rq", "rr"][self.index()]
    }
}
