//! One-shot press latch.
//!
//! This is not a contact-bounce filter: there is no timing involved. It only makes sure a
//! held button fires its action once until it is seen released.

/// Latch gating one button's action.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer<A> {
    action: A,
    latched: bool,
}

impl<A: Copy> Debouncer<A> {
    #[must_use]
    pub const fn new(action: A) -> Self {
        Self {
            action,
            latched: false,
        }
    }

    /// Feeds one sample of the line. Fires the action on the first active sample of a press.
    pub fn poll(&mut self, active: bool) -> Option<A> {
        match (active, self.latched) {
            (true, false) => {
                self.latched = true;
                Some(self.action)
            }
            (true, true) => None,
            (false, _) => {
                self.latched = false;
                None
            }
        }
    }

    #[must_use]
    pub const fn is_latched(&self) -> bool {
        self.latched
    }
}
