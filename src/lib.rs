//! A smart cube companion library: a sticker model of the 3x3x3 cube, move notation, CFOP phase
//! detection from facelet snapshots, a solve timer with split times and history, and a notation
//! trainer that walks the user back from mistakes.
//!
//! Nothing here talks to hardware. Moves and snapshots are fed in through
//! [`link::CubeEvent`]s and commands go out through a [`link::CubeLink`].

#![deny(missing_docs)]

pub mod cfop;
pub mod cube333;
pub mod error;
pub mod link;
pub mod moves;
pub mod timer;
pub mod trainer;
