use std::fmt;

/// A user-declared variable. `index` is its position among decision variables.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecisionVariable {
    name: String,
    index: usize,
}

impl DecisionVariable {
    pub(crate) fn new<T: ToString>(name: T, index: usize) -> Self {
        Self {
            name: name.to_string(),
            index,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Identifier of this variable inside a tableau.
    pub fn id(&self) -> VarId {
        VarId(self.index)
    }
}

impl fmt::Display for DecisionVariable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Flat identifier over decision and slack variables.
///
/// Ids `0..n` are the decision variables in declaration order, ids `n..n+m`
/// are the slacks of constraints `0..m`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub fn index(&self) -> usize {
        self.0
    }

    pub fn slack(n_decision: usize, row: usize) -> Self {
        VarId(n_decision + row)
    }

    pub fn is_slack(&self, n_decision: usize) -> bool {
        self.0 >= n_decision
    }
}

/// Names for every id of a tableau: decision names followed by `s1..sm`.
#[derive(Clone, Debug, PartialEq)]
pub struct VarNames {
    names: Vec<String>,
    n_decision: usize,
}

impl VarNames {
    pub fn new(decision: &[DecisionVariable], n_constraints: usize) -> Self {
        let mut names: Vec<String> = decision.iter().map(|v| v.name().to_string()).collect();
        names.extend((1..=n_constraints).map(|i| format!("s{}", i)));
        Self {
            names,
            n_decision: decision.len(),
        }
    }

    pub fn name(&self, id: VarId) -> &str {
        self.names[id.0].as_str()
    }

    pub fn n_decision(&self) -> usize {
        self.n_decision
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
