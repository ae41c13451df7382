//! Host-side stand-ins for GPIO lines.

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::v2::{InputPin, OutputPin};

/// Output line recording every level written to it.
pub struct MockPin(Rc<RefCell<Vec<bool>>>);

/// Read side of a [`MockPin`].
#[derive(Clone)]
pub struct Probe(Rc<RefCell<Vec<bool>>>);

impl MockPin {
    pub fn new() -> (Self, Probe) {
        let levels = Rc::new(RefCell::new(Vec::new()));
        (Self(Rc::clone(&levels)), Probe(levels))
    }
}

impl OutputPin for MockPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(true);
        Ok(())
    }
}

impl Probe {
    pub fn is_high(&self) -> bool {
        self.0.borrow().last().copied().unwrap_or(false)
    }

    pub fn history(&self) -> Vec<bool> {
        self.0.borrow().clone()
    }
}

/// Button line with a pull-up: high when released, low when pressed.
pub struct MockButton(Rc<RefCell<bool>>);

/// Finger on a [`MockButton`].
#[derive(Clone)]
pub struct Finger(Rc<RefCell<bool>>);

impl MockButton {
    pub fn new() -> (Self, Finger) {
        let pressed = Rc::new(RefCell::new(false));
        (Self(Rc::clone(&pressed)), Finger(pressed))
    }
}

impl InputPin for MockButton {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(!*self.0.borrow())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(*self.0.borrow())
    }
}

impl Finger {
    pub fn press(&self) {
        *self.0.borrow_mut() = true;
    }

    pub fn release(&self) {
        *self.0.borrow_mut() = false;
    }
}
