//! Typed change notifications for table observers.
//!
//! Views derived from a table (a grid, a chart) subscribe to a [`Notifier`]
//! and replay each [`TableEvent`] against their own state instead of
//! rebuilding from scratch. Events arrive in exactly the order the table
//! performed the matching physical operations.
//!
//! # Quiet mode
//!
//! [`Notifier::suspend`] / [`Notifier::resume`] bracket bulk work. While
//! suspended, events are swallowed and only remembered as "something
//! changed"; the outermost `resume` then delivers a single
//! [`TableEvent::Reset`] so observers rebuild once.

use std::fmt;

use xsect_primitives::{FieldIdx, RowIdx};


/// A change to a table, expressed in row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableEvent {
	/// A row appeared at `index`.
	Insert {
		/// Index of the new row.
		index: RowIdx,
	},
	/// The row at `index` was deleted; later rows shifted down by one.
	Remove {
		/// Index the row had before removal.
		index: RowIdx,
	},
	/// The row at `from` now lives at `to`; rows in between shifted by one.
	Move {
		/// Index before the move.
		from: RowIdx,
		/// Index after the move.
		to: RowIdx,
	},
	/// One field of the row at `index` was rewritten in place.
	ValueChanged {
		/// Row index.
		index: RowIdx,
		/// Field that changed.
		field: FieldIdx,
	},
	/// Contents were replaced wholesale; observers must rebuild.
	Reset,
}

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Callback = Box<dyn FnMut(&TableEvent)>;

/// Fan-out of [`TableEvent`]s to zero or more subscribers.
///
/// An idle notifier with no subscribers performs no allocation, which keeps
/// per-table overhead small when a model holds thousands of tables.
#[derive(Default)]
pub struct Notifier {
	subscribers: Vec<(SubscriptionId, Callback)>,
	next_id: u32,
	/// Nesting depth of [`Self::suspend`] calls.
	suspended: u32,
	/// Set when an event was swallowed while suspended.
	dirty: bool,
}

impl Notifier {
	/// Creates a notifier with no subscribers.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `callback` to receive every event delivered from now on.
	pub fn subscribe(&mut self, callback: impl FnMut(&TableEvent) + 'static) -> SubscriptionId {
		let id = SubscriptionId(self.next_id);
		self.next_id = self.next_id.wrapping_add(1);
		self.subscribers.push((id, Box::new(callback)));
		id
	}

	/// Removes a subscriber. Returns false if `id` was not registered.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let before = self.subscribers.len();
		self.subscribers.retain(|(sub, _)| *sub != id);
		self.subscribers.len() != before
	}

	/// Enters quiet mode. Calls nest; each needs a matching [`Self::resume`].
	pub fn suspend(&mut self) {
		self.suspended += 1;
	}

	/// Leaves one level of quiet mode.
	///
	/// When the outermost level ends and anything changed meanwhile, a single
	/// [`TableEvent::Reset`] is delivered. Returns whether it was. Calling
	/// `resume` without a matching `suspend` is a no-op.
	pub fn resume(&mut self) -> bool {
		if self.suspended == 0 {
			return false;
		}
		self.suspended -= 1;
		if self.suspended > 0 || !std::mem::take(&mut self.dirty) {
			return false;
		}
		self.deliver(&TableEvent::Reset);
		true
	}

	/// Returns true while in quiet mode.
	pub fn is_suspended(&self) -> bool {
		self.suspended > 0
	}

	/// Delivers `event` to every subscriber, or records it while suspended.
	pub fn emit(&mut self, event: TableEvent) {
		if self.suspended > 0 {
			self.dirty = true;
			return;
		}
		self.deliver(&event);
	}

	fn deliver(&mut self, event: &TableEvent) {
		for (_, callback) in &mut self.subscribers {
			callback(event);
		}
	}
}

impl fmt::Debug for Notifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Notifier")
			.field("subscribers", &self.subscribers.len())
			.field("suspended", &self.suspended)
			.field("dirty", &self.dirty)
			.finish()
	}
}
