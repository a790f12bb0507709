//! FaceCam Render Engine
//!
//! Turns tracking decisions into pixels:
//! - **Overlay:** Debug view with detected faces and the camera square
//! - **Output:** Crop, resize, and mirror the virtual-camera frame
//!
//! Every function draws onto or reads from an image passed in by the
//! caller; nothing here holds frame state.

pub mod output;
pub mod overlay;

pub use output::{load_frame, prepare_input, render_output, save_frame, OutputConfig};
pub use overlay::draw_debug_overlay;
