//! The camera's complete interactive vocabulary.
//!
//! Every camera manipulation, whether triggered by a touch gesture, a
//! mouse drag, or a key press, is represented as a [`CameraCommand`].
//! Producers hand commands to any [`CommandSink`]; the orbit controller is
//! the only sink in the crate.

/// A normalized camera command, consumed once by a [`CommandSink`].
///
/// Deltas are in input units (pixels for orbit/pan, scale difference for
/// zoom); the receiver applies its own sensitivities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Rotate around the target.
    Orbit {
        /// Horizontal rotation input.
        delta_yaw: f32,
        /// Vertical rotation input (positive looks up).
        delta_pitch: f32,
    },
    /// Move toward (positive) or away from (negative) the target.
    Zoom {
        /// Zoom input.
        delta: f32,
    },
    /// Translate the target in the camera plane.
    Pan {
        /// Screen-right input.
        delta_x: f32,
        /// Screen-up input.
        delta_y: f32,
    },
    /// Return to the home pose and stop any motion.
    Reset,
}

impl CameraCommand {
    /// Whether every payload value is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Orbit {
                delta_yaw,
                delta_pitch,
            } => delta_yaw.is_finite() && delta_pitch.is_finite(),
            Self::Zoom { delta } => delta.is_finite(),
            Self::Pan { delta_x, delta_y } => {
                delta_x.is_finite() && delta_y.is_finite()
            }
            Self::Reset => true,
        }
    }
}

/// Receiver of camera commands.
pub trait CommandSink {
    /// Apply one command.
    fn execute(&mut self, command: CameraCommand);
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn execute(&mut self, command: CameraCommand) {
        (**self).execute(command);
    }
}

/// Collects commands in order; handy for inspecting what an input layer
/// emits without a live controller.
impl CommandSink for Vec<CameraCommand> {
    fn execute(&mut self, command: CameraCommand) {
        self.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finiteness_checks_every_field() {
        assert!(CameraCommand::Reset.is_finite());
        assert!(CameraCommand::Zoom { delta: 0.2 }.is_finite());
        assert!(!CameraCommand::Zoom { delta: f32::NAN }.is_finite());
        assert!(!CameraCommand::Orbit {
            delta_yaw: 1.0,
            delta_pitch: f32::INFINITY,
        }
        .is_finite());
        assert!(!CameraCommand::Pan {
            delta_x: f32::NEG_INFINITY,
            delta_y: 0.0,
        }
        .is_finite());
    }

    #[test]
    fn vec_sink_records_in_order() {
        let mut sink = Vec::new();
        sink.execute(CameraCommand::Reset);
        sink.execute(CameraCommand::Zoom { delta: 0.1 });
        assert_eq!(
            sink,
            vec![CameraCommand::Reset, CameraCommand::Zoom { delta: 0.1 }]
        );
    }
}
