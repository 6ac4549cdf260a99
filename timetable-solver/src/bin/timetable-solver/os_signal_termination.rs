use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use log::warn;
use timetable_core::termination::TerminationCondition;

/// A [`TerminationCondition`] which triggers once SIGINT or SIGTERM is received, so an
/// interrupted search still ends with a report.
#[derive(Clone, Debug)]
pub(crate) struct OsSignal {
    signal_received: Arc<AtomicBool>,
}

impl OsSignal {
    /// Create a termination and install the event listeners.
    ///
    /// A listener which cannot be registered is reported and skipped; the signal then keeps its
    /// default behaviour.
    pub(crate) fn install() -> OsSignal {
        const TERMINATION_SIGNALS: &[std::ffi::c_int] =
            &[signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM];

        let signal_termination = OsSignal {
            signal_received: Arc::new(AtomicBool::new(false)),
        };

        for &signal in TERMINATION_SIGNALS {
            if let Err(error) =
                signal_hook::flag::register(signal, Arc::clone(&signal_termination.signal_received))
            {
                warn!("Failed to register a listener for signal {signal}: {error}");
            }
        }

        signal_termination
    }
}

impl TerminationCondition for OsSignal {
    fn should_stop(&mut self) -> bool {
        self.signal_received.load(Ordering::Relaxed)
    }
}
