//! Leveled assertions; the level is raised in tests and with the `debug-checks` feature.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub(crate) const TIMETABLE_ASSERT_LEVEL_DEFINITION: u8 = TIMETABLE_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub(crate) const TIMETABLE_ASSERT_LEVEL_DEFINITION: u8 = TIMETABLE_ASSERT_ADVANCED;

pub(crate) const TIMETABLE_ASSERT_SIMPLE: u8 = 1;
pub(crate) const TIMETABLE_ASSERT_MODERATE: u8 = 2;
pub(crate) const TIMETABLE_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! timetable_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::TIMETABLE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::TIMETABLE_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! timetable_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::TIMETABLE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::TIMETABLE_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! timetable_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::TIMETABLE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::TIMETABLE_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! timetable_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::TIMETABLE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::TIMETABLE_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
