//! Houses the solver which attempts to find a solution to a Constraint Satisfaction Problem (CSP)
//! using chronological backtracking over binary decisions.
use std::time::Instant;

use log::debug;
use log::info;
use log::trace;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::solver_statistics::SolverStatistics;
use super::termination::TerminationCondition;
use super::Conflict;
use super::RestartOptions;
use super::RestartStrategy;
use super::State;
use super::VariableNames;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Solution;
use crate::branching::variable_selection::VariableSelection;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::cp::Snapshot;
use crate::engine::propagation::PropagatorConstructor;
use crate::predicate;
use crate::predicates::Predicate;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::timetable_assert_moderate;
use crate::timetable_assert_simple;
use crate::variables::DomainId;

/// A solver which attempts to find a solution to a Constraint Satisfaction Problem (CSP) using
/// propagation to a fixed point, binary branching and restarts.
///
/// The solver moves through the phases of [`CSPSolverStateInternal`]: after a decision the
/// domains are propagated; a fixed point without conflict leads to the next decision (or to a
/// solution when every variable is fixed), a conflict leads to backtracking. When no decision is
/// left to refute the problem is infeasible.
///
/// Backtracking refutes the most recent decision `[x == v]` by posting `[x != v]` one level up.
/// Refutations posted at the root are permanent; they remain valid after a restart.
#[derive(Debug)]
pub(crate) struct ConstraintSatisfactionSolver {
    /// The solver continuously changes states during the search.
    /// The state helps track additional information and contributes to making the code clearer.
    pub(crate) solver_state: CSPSolverState,
    /// The domains and propagators.
    pub(crate) state: State,
    /// The decisions taken on the current path, each with the snapshot taken just before it;
    /// `decisions[i]` opened decision level `i + 1`.
    decisions: Vec<(Predicate, Snapshot)>,
    /// Tracks information about the restarts. Occassionally the solver will undo all its
    /// decisions and start the search from the root node.
    restart_strategy: RestartStrategy,
    /// A random generator which is used by the brancher for breaking ties.
    random_generator: SmallRng,
    /// The limits on a single call to [`ConstraintSatisfactionSolver::solve`].
    search_budget: SearchBudget,
    /// The statistics at the start of the current call to
    /// [`ConstraintSatisfactionSolver::solve`], used to enforce the search budget.
    budget_start: SolverStatistics,
    pub(crate) variable_names: VariableNames,
    pub(crate) variable_selection: VariableSelection,
    /// Contains information about the solver, e.g. the number of decisions.
    pub(crate) solver_statistics: SolverStatistics,
}

/// Limits on the amount of search in a single call to [`crate::Solver::satisfy`].
///
/// Exceeding a limit ends the search with
/// [`crate::results::SatisfactionResult::SearchExhausted`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    /// The maximum number of failures (propagation conflicts).
    pub max_failures: Option<u64>,
    /// The maximum number of decisions.
    pub max_decisions: Option<u64>,
}

/// Options for the [`crate::Solver`] which determine how it behaves.
#[derive(Debug)]
pub struct SolverOptions {
    /// The options used by the restart strategy.
    pub restart_options: RestartOptions,
    /// The random generator used for breaking ties during variable selection.
    pub random_generator: SmallRng,
    /// The variable selection of [`crate::Solver::default_brancher`].
    pub variable_selection: VariableSelection,
    /// The limits on every call to [`crate::Solver::satisfy`].
    pub search_budget: SearchBudget,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            restart_options: RestartOptions::default(),
            random_generator: SmallRng::seed_from_u64(42),
            variable_selection: VariableSelection::default(),
            search_budget: SearchBudget::default(),
        }
    }
}

/// The result of a call to [`ConstraintSatisfactionSolver::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CSPSolverExecutionFlag {
    /// Every variable is fixed; the solution can be read from the assignments.
    Feasible,
    Infeasible,
    /// A termination condition or the search budget stopped the search.
    Timeout,
}

impl Default for ConstraintSatisfactionSolver {
    fn default() -> Self {
        ConstraintSatisfactionSolver::new(SolverOptions::default())
    }
}

impl ConstraintSatisfactionSolver {
    pub(crate) fn new(solver_options: SolverOptions) -> Self {
        ConstraintSatisfactionSolver {
            solver_state: CSPSolverState::default(),
            state: State::default(),
            decisions: Vec::new(),
            restart_strategy: RestartStrategy::new(solver_options.restart_options),
            random_generator: solver_options.random_generator,
            search_budget: solver_options.search_budget,
            budget_start: SolverStatistics::default(),
            variable_names: VariableNames::default(),
            variable_selection: solver_options.variable_selection,
            solver_statistics: SolverStatistics::default(),
        }
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.state.assignments.get_decision_level()
    }

    /// Searches for an assignment which satisfies every posted constraint.
    ///
    /// After [`CSPSolverExecutionFlag::Feasible`] the assignments hold the solution; the caller
    /// reads it and calls [`ConstraintSatisfactionSolver::restore_state_at_root`].
    pub(crate) fn solve(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        if self.solver_state.is_infeasible() {
            return CSPSolverExecutionFlag::Infeasible;
        }

        let start_time = Instant::now();
        self.initialise();

        let result = self.solve_internal(termination, brancher);

        self.solver_statistics.time_spent_in_solver += start_time.elapsed().as_millis() as u64;
        info!(
            "Search ended with {result:?} after {} decisions and {} failures",
            self.solver_statistics.num_decisions, self.solver_statistics.num_failures
        );

        result
    }

    /// Takes the solution out of the assignments; only valid directly after
    /// [`CSPSolverExecutionFlag::Feasible`].
    pub(crate) fn solution(&self) -> Solution {
        timetable_assert_simple!(self.solver_state.has_solution());
        Solution::from_assignments(&self.state.assignments)
    }

    /// Undoes every decision, making the solver ready for new constraints or another search.
    pub(crate) fn restore_state_at_root(&mut self) {
        if self.get_decision_level() > 0 {
            self.state.restore_to(0);
        }
        self.decisions.clear();

        if !self.solver_state.is_infeasible() {
            self.solver_state.declare_ready();
        }
    }

    /// Creates the propagator and propagates the root to its fixed point.
    ///
    /// A conflict at the root makes the solver infeasible; every later operation then reports
    /// [`ConstraintOperationError::InfeasibleState`].
    pub(crate) fn add_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<(), ConstraintOperationError> {
        if self.solver_state.is_infeasible() {
            return Err(ConstraintOperationError::InfeasibleState);
        }
        timetable_assert_simple!(
            self.get_decision_level() == 0,
            "constraints can only be added at the root"
        );

        let propagator_id = self.state.add_propagator(constructor);

        if let Err(conflict) = self.state.propagate_to_fixed_point() {
            debug!(
                "Adding {} made the problem infeasible ({:?})",
                self.state.propagator_name(propagator_id),
                conflict.inconsistency
            );
            self.solver_state.declare_infeasible();
            return Err(ConstraintOperationError::InfeasiblePropagator);
        }

        Ok(())
    }

    /// Posts `predicate` at the root and propagates.
    pub(crate) fn post_at_root(&mut self, predicate: Predicate) -> Result<(), ConstraintOperationError> {
        if self.solver_state.is_infeasible() {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let propagated = self
            .state
            .assignments
            .post_predicate(predicate)
            .map_err(|_| ())
            .and_then(|_| self.state.propagate_to_fixed_point().map_err(|_| ()));

        if propagated.is_err() {
            debug!("Posting {predicate} at the root made the problem infeasible");
            self.solver_state.declare_infeasible();
            return Err(ConstraintOperationError::InfeasiblePropagator);
        }

        Ok(())
    }

    pub(crate) fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.solver_statistics
            .log(statistic_logger.attach_to_prefix("search"));
        self.state
            .log_statistics(statistic_logger.attach_to_prefix("propagation"));
    }
}

// methods that serve as the main building blocks
impl ConstraintSatisfactionSolver {
    fn initialise(&mut self) {
        self.solver_state.declare_solving();
        self.budget_start = self.solver_statistics;
    }

    fn solve_internal(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        loop {
            if termination.should_stop() || self.is_search_budget_exceeded() {
                self.solver_state.declare_timeout();
                return CSPSolverExecutionFlag::Timeout;
            }

            self.propagate();
            brancher.on_domains_narrowed(&self.state.take_narrowed_domains());

            if self.solver_state.no_conflict() {
                if self.restart_strategy.should_restart() {
                    self.restart_during_search(brancher);
                    continue;
                }

                let Some(decision) = self.next_decision(brancher) else {
                    self.solver_state.declare_solution_found();
                    self.solver_statistics.num_solutions += 1;
                    brancher.on_solution(&self.solution());
                    return CSPSolverExecutionFlag::Feasible;
                };

                self.take_decision(decision);
                termination.decision_has_been_made();
            }
            // conflict
            else {
                self.solver_statistics.num_failures += 1;
                self.restart_strategy.notify_failure();

                let conflict = self.solver_state.get_conflict_info();
                brancher.on_conflict(self.state.scope(conflict.propagator_id));

                if !self.backtrack() {
                    self.solver_state.declare_infeasible();
                    return CSPSolverExecutionFlag::Infeasible;
                }

                self.solver_state.declare_solving();
            }
        }
    }

    fn propagate(&mut self) {
        if let Err(conflict) = self.state.propagate_to_fixed_point() {
            self.solver_state.declare_conflict(conflict);
        }
    }

    fn is_search_budget_exceeded(&self) -> bool {
        let failures = self.solver_statistics.num_failures - self.budget_start.num_failures;
        let decisions = self.solver_statistics.num_decisions - self.budget_start.num_decisions;

        self.search_budget
            .max_failures
            .is_some_and(|max_failures| failures >= max_failures)
            || self
                .search_budget
                .max_decisions
                .is_some_and(|max_decisions| decisions >= max_decisions)
    }

    /// Asks the brancher for a decision.
    ///
    /// A decision which is already satisfied or falsified, or no decision while some variable is
    /// unfixed, is replaced by `[x == min(x)]` for the first unfixed variable, so every decision
    /// narrows a domain and the search only ends once every variable is fixed.
    fn next_decision(&mut self, brancher: &mut impl Brancher) -> Option<Predicate> {
        let proposed = brancher.next_decision(&mut SelectionContext::new(
            &self.state.assignments,
            &mut self.random_generator,
        ));

        if let Some(decision) = proposed {
            if !self.state.assignments.is_predicate_satisfied(decision)
                && !self.state.assignments.is_predicate_falsified(decision)
            {
                return Some(decision);
            }
            trace!("Replacing the decision {decision}, it would not narrow any domain");
        }

        let assignments = &self.state.assignments;
        assignments
            .domains()
            .find(|&domain_id| !assignments.is_fixed(domain_id))
            .map(|domain_id: DomainId| predicate!(domain_id == assignments.get_lower_bound(domain_id)))
    }

    fn take_decision(&mut self, decision: Predicate) {
        let snapshot = self.state.snapshot();
        self.decisions.push((decision, snapshot));

        self.solver_statistics.num_decisions += 1;
        self.solver_statistics.peak_depth = self
            .solver_statistics
            .peak_depth
            .max(self.decisions.len() as u64);

        let narrowed = self.state.assignments.post_predicate(decision);
        timetable_assert_simple!(
            matches!(narrowed, Ok(true)),
            "a decision always narrows a domain"
        );
    }

    /// Refutes the most recent decision which can still be refuted. Returns `false` when the
    /// root has been reached, i.e. the search space is exhausted.
    fn backtrack(&mut self) -> bool {
        while let Some((decision, snapshot)) = self.decisions.pop() {
            self.state.restore(snapshot);

            match self.state.assignments.post_predicate(!decision) {
                Ok(_) => {
                    trace!("Refuted {decision} at level {}", self.decisions.len());
                    return true;
                }
                Err(_) => continue,
            }
        }

        self.state.restore_to(0);
        false
    }

    // a 'restart' differs from backtracking to level zero
    //   in that a restart also informs the restart strategy and the brancher
    fn restart_during_search(&mut self, brancher: &mut impl Brancher) {
        if self.get_decision_level() > 0 {
            self.state.restore_to(0);
            self.decisions.clear();

            self.solver_statistics.num_restarts += 1;
            brancher.on_restart();
            debug!(
                "Restart {} after {} failures",
                self.solver_statistics.num_restarts, self.solver_statistics.num_failures
            );
        }

        self.restart_strategy.notify_restart();
        timetable_assert_moderate!(self.decisions.is_empty());
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
enum CSPSolverStateInternal {
    /// No search is in progress; constraints can be added.
    #[default]
    Ready,
    /// Propagating and branching.
    Solving,
    ContainsSolution,
    Conflict {
        conflict_info: Conflict,
    },
    Infeasible,
    Timeout,
}

#[derive(Default, Debug)]
pub(crate) struct CSPSolverState {
    internal_state: CSPSolverStateInternal,
}

impl CSPSolverState {
    pub(crate) fn no_conflict(&self) -> bool {
        !self.conflicting()
    }

    pub(crate) fn conflicting(&self) -> bool {
        matches!(
            self.internal_state,
            CSPSolverStateInternal::Conflict { .. }
        )
    }

    pub(crate) fn is_infeasible(&self) -> bool {
        matches!(self.internal_state, CSPSolverStateInternal::Infeasible)
    }

    pub(crate) fn has_solution(&self) -> bool {
        matches!(
            self.internal_state,
            CSPSolverStateInternal::ContainsSolution
        )
    }

    #[cfg(test)]
    pub(crate) fn timeout(&self) -> bool {
        matches!(self.internal_state, CSPSolverStateInternal::Timeout)
    }

    fn get_conflict_info(&self) -> Conflict {
        match self.internal_state {
            CSPSolverStateInternal::Conflict { conflict_info } => conflict_info,
            _ => unreachable!("conflict info is only read in the conflict state"),
        }
    }

    fn declare_ready(&mut self) {
        timetable_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::Ready;
    }

    fn declare_solving(&mut self) {
        timetable_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::Solving;
    }

    fn declare_infeasible(&mut self) {
        self.internal_state = CSPSolverStateInternal::Infeasible;
    }

    fn declare_conflict(&mut self, conflict_info: Conflict) {
        timetable_assert_simple!(!self.conflicting());
        self.internal_state = CSPSolverStateInternal::Conflict { conflict_info };
    }

    fn declare_solution_found(&mut self) {
        timetable_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::ContainsSolution;
    }

    fn declare_timeout(&mut self) {
        timetable_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::Timeout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;
    use crate::constraints::Relation;
    use crate::engine::termination::indefinite::Indefinite;
    use crate::propagators::BinaryNotEqualsConstructor;
    use crate::propagators::LinearConstructor;

    fn input_order_brancher(
        solver: &ConstraintSatisfactionSolver,
    ) -> IndependentVariableValueBrancher<DomainId, InputOrder, InDomainMin> {
        let variables = solver.state.assignments.domains().collect::<Vec<_>>();
        IndependentVariableValueBrancher::new(InputOrder::new(&variables), InDomainMin)
    }

    fn all_different(solver: &mut ConstraintSatisfactionSolver, variables: &[DomainId]) {
        for (i, &lhs) in variables.iter().enumerate() {
            for &rhs in &variables[i + 1..] {
                solver
                    .add_propagator(BinaryNotEqualsConstructor {
                        lhs,
                        rhs,
                        offset: 0,
                    })
                    .expect("not infeasible at the root");
            }
        }
    }

    #[test]
    fn finds_a_solution_by_backtracking() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.state.assignments.grow(0, 2);
        let y = solver.state.assignments.grow(0, 2);
        let z = solver.state.assignments.grow(0, 2);
        all_different(&mut solver, &[x, y, z]);
        // x + y = 3 rules out x = 0
        solver
            .add_propagator(LinearConstructor::new(
                [(1, x), (1, y)],
                Relation::Equal,
                3,
            ))
            .expect("not infeasible at the root");

        let mut brancher = input_order_brancher(&solver);
        let flag = solver.solve(&mut Indefinite, &mut brancher);

        assert_eq!(CSPSolverExecutionFlag::Feasible, flag);
        let solution = solver.solution();
        assert_eq!(1, solution.get_integer_value(x));
        assert_eq!(2, solution.get_integer_value(y));
        assert_eq!(0, solution.get_integer_value(z));

        solver.restore_state_at_root();
        assert_eq!(0, solver.get_decision_level());
        assert_eq!(2, solver.state.assignments.get_upper_bound(x));
    }

    #[test]
    fn pigeonhole_is_infeasible() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let variables = (0..4)
            .map(|_| solver.state.assignments.grow(0, 2))
            .collect::<Vec<_>>();
        all_different(&mut solver, &variables);

        let mut brancher = input_order_brancher(&solver);
        let flag = solver.solve(&mut Indefinite, &mut brancher);

        assert_eq!(CSPSolverExecutionFlag::Infeasible, flag);
        assert!(solver.solver_state.is_infeasible());
        assert!(solver.solver_statistics.num_failures > 0);
        assert_eq!(
            Err(ConstraintOperationError::InfeasibleState),
            solver.add_propagator(LinearConstructor::new(
                [(1, variables[0])],
                Relation::Equal,
                0
            ))
        );
    }

    #[test]
    fn failure_budget_exhausts_the_search() {
        let mut solver = ConstraintSatisfactionSolver::new(SolverOptions {
            search_budget: SearchBudget {
                max_failures: Some(1),
                max_decisions: None,
            },
            ..Default::default()
        });
        let variables = (0..6)
            .map(|_| solver.state.assignments.grow(0, 4))
            .collect::<Vec<_>>();
        all_different(&mut solver, &variables);

        let mut brancher = input_order_brancher(&solver);
        let flag = solver.solve(&mut Indefinite, &mut brancher);

        assert_eq!(CSPSolverExecutionFlag::Timeout, flag);
        assert!(solver.solver_state.timeout());
        assert_eq!(1, solver.solver_statistics.num_failures);
    }

    #[test]
    fn restarts_keep_the_search_complete() {
        let mut solver = ConstraintSatisfactionSolver::new(SolverOptions {
            restart_options: RestartOptions {
                sequence_generator_type:
                    crate::basic_types::sequence_generators::SequenceGeneratorType::Geometric,
                base_interval: 1,
                geometric_coef: Some(2.0),
                no_restarts: false,
            },
            ..Default::default()
        });
        let variables = (0..5)
            .map(|_| solver.state.assignments.grow(0, 3))
            .collect::<Vec<_>>();
        all_different(&mut solver, &variables);

        let mut brancher = input_order_brancher(&solver);
        let flag = solver.solve(&mut Indefinite, &mut brancher);

        assert_eq!(CSPSolverExecutionFlag::Infeasible, flag);
        assert!(solver.solver_statistics.num_restarts > 0);
    }

    #[test]
    fn unfixed_variables_outside_the_brancher_are_decided() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.state.assignments.grow(0, 2);
        let y = solver.state.assignments.grow(5, 7);

        let mut brancher =
            IndependentVariableValueBrancher::new(InputOrder::new(&[x]), InDomainMin);
        let flag = solver.solve(&mut Indefinite, &mut brancher);

        assert_eq!(CSPSolverExecutionFlag::Feasible, flag);
        assert_eq!(5, solver.solution().get_integer_value(y));
    }

    #[test]
    fn root_conflict_makes_the_solver_infeasible() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.state.assignments.grow(0, 2);

        let result =
            solver.add_propagator(LinearConstructor::new([(1, x)], Relation::GreaterEqual, 3));

        assert_eq!(Err(ConstraintOperationError::InfeasiblePropagator), result);
        let mut brancher = input_order_brancher(&solver);
        assert_eq!(
            CSPSolverExecutionFlag::Infeasible,
            solver.solve(&mut Indefinite, &mut brancher)
        );
    }
}
