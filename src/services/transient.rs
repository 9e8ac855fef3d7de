//! Busy flags that survive cancellation.
//!
//! A stage marks itself busy before awaiting a collaborator. If that future
//! is dropped part way (the HTTP client went away, a timeout fired) the
//! flag would otherwise stay set and lock the stage. `Transient` writes the
//! idle value back on drop unless the operation settled on another value.

pub(crate) struct Transient<'a, T: Copy> {
    slot: &'a mut T,
    settle: T,
}

impl<'a, T: Copy> Transient<'a, T> {
    /// Sets `slot` to `busy`; it returns to `idle` when the guard drops.
    pub(crate) fn enter(slot: &'a mut T, busy: T, idle: T) -> Self {
        *slot = busy;
        Self { slot, settle: idle }
    }

    /// Ends the operation, leaving `value` in the slot.
    pub(crate) fn finish(mut self, value: T) {
        self.settle = value;
    }
}

impl<T: Copy> Drop for Transient<'_, T> {
    fn drop(&mut self) {
        *self.slot = self.settle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_restores_idle() {
        let mut busy = false;
        {
            let _guard = Transient::enter(&mut busy, true, false);
        }
        assert!(!busy);
    }

    #[test]
    fn test_finish_keeps_final_value() {
        let mut phase = 0u8;
        let guard = Transient::enter(&mut phase, 1, 0);
        guard.finish(2);
        assert_eq!(phase, 2);
    }
}
