//! Motion Lab generates character motion data from first principles: a static
//! skeleton (named bones with rest positions) and a static muscle map (named
//! actuators connecting pairs of bones) are driven through a biomechanical
//! force simulation to produce per-bone translation and rotation curves for
//! named behaviors ("idle", "walk") under a behavioral context
//! ("healthy", "impaired", "trained").
//!
//! The pipeline runs in three stages: the activation pattern generator
//! ([`pattern`]) synthesizes the full frame sequence up front, the skeletal
//! graph ([`skeleton`]) integrates forces one frame at a time, and the curve
//! assembler ([`clip`]) records node state after each step and packages the
//! result as a [`clip::Clip`] plus a diagnostic [`report::MotionReport`].
//!
//! Orientation is never integrated: bone rotations stay identity for the
//! whole simulation. A rotating skeleton needs a kinematic layer on top.

pub mod anatomy;
pub mod clip;
pub mod pattern;
pub mod report;
pub mod skeleton;
pub mod units;
