use crate::create_statistics_struct;

create_statistics_struct!(
    /// Statistics of the search performed by the [`crate::Solver`].
    SolverStatistics {
        /// The number of decisions taken by the solver
        num_decisions: u64,
        /// The number of failures (propagation conflicts) encountered by the solver
        num_failures: u64,
        /// The number of times the solver has restarted
        num_restarts: u64,
        /// The deepest decision level reached
        peak_depth: u64,
        /// The number of solutions reported
        num_solutions: u64,
        /// The amount of time in milliseconds which is spent in the solver
        time_spent_in_solver: u64,
});
