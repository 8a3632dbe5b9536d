use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Callbacks the viewer hands to the browser, held so they can be withdrawn
/// when the viewer unmounts.
///
/// The frame callback reschedules itself through a clone of this holder, so
/// the holder and the callback keep each other alive until [`FrameLoop::stop`].
pub struct FrameLoop<C> {
	pub frame: RefCell<Option<C>>,
	pub resize: RefCell<Option<C>>,
	pending: Cell<Option<i32>>,
}

impl<C> FrameLoop<C> {
	pub fn new() -> Rc<Self> {
		Rc::new(Self {
			frame: RefCell::new(None),
			resize: RefCell::new(None),
			pending: Cell::new(None),
		})
	}

	pub fn is_running(&self) -> bool {
		self.frame.borrow().is_some()
	}

	/// Records the id of the most recently requested animation frame.
	pub fn set_pending(&self, id: i32) {
		self.pending.set(Some(id));
	}

	/// Drops the frame callback and hands back what the browser still holds:
	/// the pending frame id to cancel and the resize listener to remove.
	pub fn stop(&self) -> (Option<i32>, Option<C>) {
		let frame = self.frame.borrow_mut().take();
		drop(frame);
		(self.pending.take(), self.resize.borrow_mut().take())
	}
}
