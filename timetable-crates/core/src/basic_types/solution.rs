use crate::containers::KeyedVec;
use crate::engine::Assignments;
use crate::timetable_assert_simple;
use crate::variables::DomainId;

/// A complete assignment of every variable of the [`crate::Solver`] it was taken from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    values: KeyedVec<DomainId, i32>,
}

impl Solution {
    pub(crate) fn from_assignments(assignments: &Assignments) -> Solution {
        let mut values = KeyedVec::default();
        for domain_id in assignments.domains() {
            timetable_assert_simple!(
                assignments.is_fixed(domain_id),
                "a solution can only be taken when every variable is fixed"
            );
            let _ = values.push(assignments.get_lower_bound(domain_id));
        }

        Solution { values }
    }

    pub fn get_integer_value(&self, domain_id: DomainId) -> i32 {
        self.values[domain_id]
    }
}
