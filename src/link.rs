//! The boundary to a Bluetooth smart cube. Transport, pairing and reconnection live on the other
//! side of [`CubeLink`]; this crate only sees the events a cube reports and the commands it
//! accepts.

use crate::error::LinkError;

/// Something a connected cube reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CubeEvent {
    /// A face turn, in standard notation.
    Move(String),
    /// A full 54 sticker snapshot in `U R F D L B` order.
    Facelets(String),
}

/// Commands accepted by a connected cube. Replies (such as the snapshot answering
/// [`request_facelets`](CubeLink::request_facelets)) arrive later as [`CubeEvent`]s.
pub trait CubeLink {
    /// Ask the cube to report its full state.
    fn request_facelets(&mut self) -> Result<(), LinkError>;

    /// Tell the cube to treat its current state as solved.
    fn reset(&mut self) -> Result<(), LinkError>;
}

impl<T: CubeLink + ?Sized> CubeLink for &mut T {
    fn request_facelets(&mut self) -> Result<(), LinkError> {
        (**self).request_facelets()
    }

    fn reset(&mut self) -> Result<(), LinkError> {
        (**self).reset()
    }
}
