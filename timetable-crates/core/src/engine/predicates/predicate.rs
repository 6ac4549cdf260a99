use crate::variables::DomainId;

/// An atomic statement about the domain of a single variable.
///
/// Search decisions are predicates: a decision `[x == v]` is refuted by posting `[x != v]`,
/// which is obtained through [`std::ops::Not`].
#[derive(Clone, PartialEq, Eq, Copy, Hash)]
pub enum Predicate {
    LowerBound {
        domain_id: DomainId,
        lower_bound: i32,
    },
    UpperBound {
        domain_id: DomainId,
        upper_bound: i32,
    },
    NotEqual {
        domain_id: DomainId,
        not_equal_constant: i32,
    },
    Equal {
        domain_id: DomainId,
        equality_constant: i32,
    },
}

impl Predicate {
    pub fn get_domain(&self) -> DomainId {
        match *self {
            Predicate::LowerBound { domain_id, .. }
            | Predicate::UpperBound { domain_id, .. }
            | Predicate::NotEqual { domain_id, .. }
            | Predicate::Equal { domain_id, .. } => domain_id,
        }
    }
}

impl std::ops::Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        match self {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => Predicate::UpperBound {
                domain_id,
                upper_bound: lower_bound - 1,
            },
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => Predicate::LowerBound {
                domain_id,
                lower_bound: upper_bound + 1,
            },
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => Predicate::Equal {
                domain_id,
                equality_constant: not_equal_constant,
            },
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => Predicate::NotEqual {
                domain_id,
                not_equal_constant: equality_constant,
            },
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => write!(f, "[{domain_id} >= {lower_bound}]"),
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => write!(f, "[{domain_id} <= {upper_bound}]"),
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => write!(f, "[{domain_id} != {not_equal_constant}]"),
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => write!(f, "[{domain_id} == {equality_constant}]"),
        }
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// Creates the four kinds of [`Predicate`] over a variable; used by the [`crate::predicate`]
/// macro.
pub trait PredicateConstructor {
    type Value;

    fn lower_bound_predicate(&self, bound: Self::Value) -> Predicate;
    fn upper_bound_predicate(&self, bound: Self::Value) -> Predicate;
    fn equality_predicate(&self, bound: Self::Value) -> Predicate;
    fn disequality_predicate(&self, bound: Self::Value) -> Predicate;
}

impl PredicateConstructor for DomainId {
    type Value = i32;

    fn lower_bound_predicate(&self, bound: Self::Value) -> Predicate {
        Predicate::LowerBound {
            domain_id: *self,
            lower_bound: bound,
        }
    }

    fn upper_bound_predicate(&self, bound: Self::Value) -> Predicate {
        Predicate::UpperBound {
            domain_id: *self,
            upper_bound: bound,
        }
    }

    fn equality_predicate(&self, bound: Self::Value) -> Predicate {
        Predicate::Equal {
            domain_id: *self,
            equality_constant: bound,
        }
    }

    fn disequality_predicate(&self, bound: Self::Value) -> Predicate {
        Predicate::NotEqual {
            domain_id: *self,
            not_equal_constant: bound,
        }
    }
}

/// Builds a [`Predicate`] with comparison syntax, e.g. `predicate![x >= 3]`.
#[macro_export]
macro_rules! predicate {
    ($($var:ident).+ >= $bound:expr) => {{
        #[allow(unused_imports, reason = "the trait may already be in scope")]
        use $crate::predicates::PredicateConstructor;
        $($var).+.lower_bound_predicate($bound)
    }};
    ($($var:ident).+ <= $bound:expr) => {{
        #[allow(unused_imports, reason = "the trait may already be in scope")]
        use $crate::predicates::PredicateConstructor;
        $($var).+.upper_bound_predicate($bound)
    }};
    ($($var:ident).+ == $value:expr) => {{
        #[allow(unused_imports, reason = "the trait may already be in scope")]
        use $crate::predicates::PredicateConstructor;
        $($var).+.equality_predicate($value)
    }};
    ($($var:ident).+ != $value:expr) => {{
        #[allow(unused_imports, reason = "the trait may already be in scope")]
        use $crate::predicates::PredicateConstructor;
        $($var).+.disequality_predicate($value)
    }};
}
