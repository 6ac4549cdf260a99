use log::debug;

use super::results::SatisfactionResult;
use crate::basic_types::ConstraintOperationError;
use crate::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
use crate::branching::value_selection::InDomainMin;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::constraints::Constraint;
use crate::engine::constraint_satisfaction_solver::CSPSolverExecutionFlag;
use crate::engine::termination::TerminationCondition;
use crate::engine::ConstraintSatisfactionSolver;
use crate::options::SolverOptions;
use crate::statistics::log_statistic_postfix;
use crate::statistics::StatisticLogger;
use crate::timetable_assert_simple;
use crate::variables::DomainId;

/// The brancher returned by [`Solver::default_brancher`]: the configured
/// [`VariableSelector`] combined with [`InDomainMin`].
pub type DefaultBrancher =
    IndependentVariableValueBrancher<DomainId, Box<dyn VariableSelector<DomainId>>, InDomainMin>;

/// The main interaction point which allows the creation of variables, the addition of constraints,
/// and solving problems.
///
/// # Creating Variables
/// ```rust
/// # use timetable_core::Solver;
/// let mut solver = Solver::default();
///
/// // We can create an integer variable with a domain in the range [0, 10]
/// let integer_between_bounds = solver.new_bounded_integer(0, 10);
///
/// // We can also create such a variable with a name
/// let named_integer_between_bounds = solver.new_named_bounded_integer(0, 10, "x");
///
/// // We can also create an integer variable with a non-continuous domain in the follow way
/// let sparse_integer = solver.new_sparse_integer(vec![0, 3, 5]);
/// assert_eq!(vec![0, 3, 5], solver.get_domain_values(sparse_integer));
///
/// // Booleans are 0-1 integer variables
/// let boolean = solver.new_boolean();
/// assert_eq!((0, 1), (solver.lower_bound(boolean), solver.upper_bound(boolean)));
/// ```
///
/// # Using the Solver
/// For examples on how to use the solver, see the [root-level crate documentation](crate).
#[derive(Debug, Default)]
pub struct Solver {
    /// The internal [`ConstraintSatisfactionSolver`] which is used to solve the problems.
    satisfaction_solver: ConstraintSatisfactionSolver,
}

impl Solver {
    /// Creates a solver with the provided [`SolverOptions`].
    pub fn with_options(solver_options: SolverOptions) -> Self {
        Solver {
            satisfaction_solver: ConstraintSatisfactionSolver::new(solver_options),
        }
    }

    /// Logs the statistics currently present in the solver.
    pub fn log_statistics(&self) {
        self.satisfaction_solver
            .log_statistics(StatisticLogger::default());
        log_statistic_postfix();
    }
}

/// Methods to retrieve information about variables
impl Solver {
    pub fn lower_bound(&self, variable: DomainId) -> i32 {
        self.satisfaction_solver
            .state
            .assignments
            .get_lower_bound(variable)
    }

    pub fn upper_bound(&self, variable: DomainId) -> i32 {
        self.satisfaction_solver
            .state
            .assignments
            .get_upper_bound(variable)
    }

    pub fn contains(&self, variable: DomainId, value: i32) -> bool {
        self.satisfaction_solver
            .state
            .assignments
            .is_value_in_domain(variable, value)
    }

    pub fn is_fixed(&self, variable: DomainId) -> bool {
        self.satisfaction_solver.state.assignments.is_fixed(variable)
    }

    /// The values currently in the domain of `variable`, in increasing order.
    pub fn get_domain_values(&self, variable: DomainId) -> Vec<i32> {
        self.satisfaction_solver
            .state
            .assignments
            .domain_iter(variable)
            .collect()
    }

    /// The name given to `variable` when it was created, if any.
    pub fn variable_name(&self, variable: DomainId) -> Option<&str> {
        self.satisfaction_solver
            .variable_names
            .get_int_name(variable)
    }

    pub fn num_variables(&self) -> usize {
        self.satisfaction_solver.state.assignments.num_domains()
    }

    /// Whether a constraint or search has proven that no solution exists.
    pub fn is_infeasible(&self) -> bool {
        self.satisfaction_solver.solver_state.is_infeasible()
    }
}

/// Functions to create and retrieve integer variables.
impl Solver {
    /// Create a new integer variable with the given bounds.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        timetable_assert_simple!(
            lower_bound <= upper_bound,
            "the domain [{lower_bound}, {upper_bound}] is empty"
        );
        self.satisfaction_solver
            .state
            .assignments
            .grow(lower_bound, upper_bound)
    }

    /// Create a new named integer variable with the given bounds.
    pub fn new_named_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: impl Into<String>,
    ) -> DomainId {
        let domain_id = self.new_bounded_integer(lower_bound, upper_bound);
        self.satisfaction_solver
            .variable_names
            .add_integer(domain_id, name.into());
        domain_id
    }

    /// Create a new integer variable which has a domain of predefined values. Duplicates are
    /// ignored; the values do not need to be sorted.
    ///
    /// # Example
    /// ```rust
    /// # use timetable_core::Solver;
    /// let mut solver = Solver::default();
    ///
    /// let sparse_integer = solver.new_sparse_integer(vec![5, 0, 3, 0]);
    /// assert_eq!(vec![0, 3, 5], solver.get_domain_values(sparse_integer));
    /// ```
    pub fn new_sparse_integer(&mut self, values: impl Into<Vec<i32>>) -> DomainId {
        let values = values.into();
        timetable_assert_simple!(!values.is_empty(), "a domain needs at least one value");
        self.satisfaction_solver
            .state
            .assignments
            .grow_sparse(values)
    }

    /// Create a new named integer variable which has a domain of predefined values.
    pub fn new_named_sparse_integer(
        &mut self,
        values: impl Into<Vec<i32>>,
        name: impl Into<String>,
    ) -> DomainId {
        let domain_id = self.new_sparse_integer(values);
        self.satisfaction_solver
            .variable_names
            .add_integer(domain_id, name.into());
        domain_id
    }

    /// Create a new 0-1 variable.
    pub fn new_boolean(&mut self) -> DomainId {
        self.new_bounded_integer(0, 1)
    }

    /// Create a new named 0-1 variable.
    pub fn new_named_boolean(&mut self, name: impl Into<String>) -> DomainId {
        self.new_named_bounded_integer(0, 1, name)
    }

    /// Create a variable which can only take `value`.
    pub fn new_constant(&mut self, value: i32) -> DomainId {
        self.new_bounded_integer(value, value)
    }
}

/// Functions for solving with the constraints that have been added to the [`Solver`].
impl Solver {
    /// Solves the current model in the [`Solver`] until it finds a solution, proves that there
    /// is none, or is indicated to stop by the provided [`TerminationCondition`] or the search
    /// budget.
    ///
    /// Afterwards the solver is back at the root, so constraints can be added and the search
    /// can be repeated.
    pub fn satisfy<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
    ) -> SatisfactionResult {
        let result = match self.satisfaction_solver.solve(termination, brancher) {
            CSPSolverExecutionFlag::Feasible => {
                SatisfactionResult::Solved(self.satisfaction_solver.solution())
            }
            CSPSolverExecutionFlag::Infeasible => SatisfactionResult::Infeasible,
            CSPSolverExecutionFlag::Timeout => SatisfactionResult::SearchExhausted,
        };

        // Reset the state whenever we return a result
        self.satisfaction_solver.restore_state_at_root();
        result
    }

    /// Adds the constraint to the solver and propagates it at the root.
    ///
    /// If the problem becomes trivially infeasible, a [`ConstraintOperationError`] is returned.
    /// Subsequent calls to this method will always return an error, and no modification of the
    /// solver will take place.
    ///
    /// # Example
    /// ```
    /// # use timetable_core::constraints;
    /// # use timetable_core::ConstraintOperationError;
    /// # use timetable_core::Solver;
    /// let mut solver = Solver::default();
    ///
    /// let a = solver.new_bounded_integer(0, 3);
    /// let b = solver.new_bounded_integer(0, 3);
    ///
    /// solver
    ///     .add_constraint(constraints::binary_equals(a, b, 2))
    ///     .expect("satisfiable at the root");
    /// assert_eq!(2, solver.lower_bound(a));
    ///
    /// assert_eq!(
    ///     Err(ConstraintOperationError::InfeasiblePropagator),
    ///     solver.add_constraint(constraints::equals(b, 2)),
    /// );
    /// assert!(solver.is_infeasible());
    /// ```
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), ConstraintOperationError> {
        let name = constraint.name();
        constraint
            .post(&mut self.satisfaction_solver)
            .inspect_err(|error| debug!("Posting {name} failed: {error}"))
    }
}

/// Default brancher implementation
impl Solver {
    /// Creates a [`DefaultBrancher`] over every variable created so far, using the
    /// [`crate::options::VariableSelection`] of the [`SolverOptions`].
    pub fn default_brancher(&self) -> DefaultBrancher {
        let variables = self
            .satisfaction_solver
            .state
            .assignments
            .domains()
            .collect::<Vec<_>>();
        self.brancher_for_variables(&variables)
    }

    /// Creates a [`DefaultBrancher`] which only branches on `variables`; other variables are
    /// fixed to their lower bound once these are fixed.
    pub fn brancher_for_variables(&self, variables: &[DomainId]) -> DefaultBrancher {
        IndependentVariableValueBrancher::new(
            self.satisfaction_solver.variable_selection.create(variables),
            InDomainMin,
        )
    }
}
