use std::ops::{Deref, DerefMut};

use crate::coords::Mat3;

use super::ShapeBatch;

/// Transform applied to vertices at insertion time.
///
/// Disabled state always carries the identity matrix. Only the batch's
/// transform operations produce states, so callers can read one but not
/// forge one.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TransformState {
    pub(super) enabled: bool,
    pub(super) matrix: Mat3,
}

impl TransformState {
    pub const IDENTITY: Self = Self {
        enabled: false,
        matrix: Mat3::IDENTITY,
    };

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn matrix(&self) -> Mat3 {
        self.matrix
    }
}

/// Scoped transform block.
///
/// Captures the batch's [`TransformState`] on creation and puts it back when
/// dropped, including during unwinding. Shape calls go through the guard via
/// `Deref`/`DerefMut`.
pub struct TransformScope<'a> {
    batch: &'a mut ShapeBatch,
    saved: TransformState,
}

impl<'a> TransformScope<'a> {
    pub(super) fn new(batch: &'a mut ShapeBatch) -> Self {
        let saved = batch.transform_state();
        Self { batch, saved }
    }
}

impl Deref for TransformScope<'_> {
    type Target = ShapeBatch;

    fn deref(&self) -> &ShapeBatch {
        self.batch
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut ShapeBatch {
        self.batch
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.batch.set_transform_state(self.saved);
    }
}
