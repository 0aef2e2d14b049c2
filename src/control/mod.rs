//! Control laws.
//!
//! Three cooperating components, all operating on the shared
//! [`state::ControllerState`]:
//!
//! - [`supervisor::Supervisor`]: master on/off, gates everything else.
//! - [`watering::WateringController`]: level-triggered servo + indicator.
//! - [`motion_light::MotionLightController`]: edge-triggered light + indicator.

pub mod motion_light;
pub mod state;
pub mod supervisor;
pub mod watering;
