// src/input_mapper/param_writer.rs

//! # Remote Parameter Writer
//!
//! Carries one boolean parameter change at a time to the autopilot. The
//! transport is left to the caller: a periodic timer calls
//! [`ParamWriter::poll`], sends whatever request it returns, and reports the
//! outcome through [`ParamWriter::response_received`]. New requests are
//! refused until the previous one has been answered.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Autopilot parameters the input mapper writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverrideParam {
    /// Follow the commanded roll angle instead of the course loop.
    RollCommandOverride,
    /// Follow the commanded pitch angle instead of the energy balance loop.
    PitchCommandOverride,
}

impl OverrideParam {
    /// Parameter name on the autopilot side.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RollCommandOverride => "roll_command_override",
            Self::PitchCommandOverride => "pitch_command_override",
        }
    }
}

/// A single boolean parameter write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ParamRequest {
    /// Parameter to write.
    pub name: OverrideParam,
    /// New value.
    pub value: bool,
}

impl ParamRequest {
    /// Creates a new request.
    pub fn new(name: OverrideParam, value: bool) -> Self {
        Self { name, value }
    }
}

/// Progress of the current parameter write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriterState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Built, waiting for the next poll to send it.
    RequestPending(ParamRequest),
    /// Sent, waiting for the autopilot to answer.
    AwaitingResponse,
}

/// Struct representing the remote parameter writer.
#[derive(Debug, Default)]
pub struct ParamWriter {
    state: WriterState,
}

impl ParamWriter {
    /// Creates a new idle writer.
    pub fn new() -> Self {
        Self {
            state: WriterState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// `true` from an accepted request until its response arrives.
    pub fn is_pending(&self) -> bool {
        self.state != WriterState::Idle
    }

    /// Queues `request`. Returns `false`, dropping it, if a previous
    /// request is still in flight.
    pub fn request(&mut self, request: ParamRequest) -> bool {
        if self.is_pending() {
            return false;
        }
        self.state = WriterState::RequestPending(request);
        true
    }

    /// Timer tick. Returns the request to send, if one is due.
    pub fn poll(&mut self, service_ready: bool) -> Option<ParamRequest> {
        if !self.is_pending() {
            return None;
        }
        if !service_ready {
            info!("set_parameters service not available, waiting...");
            return None;
        }
        match self.state {
            WriterState::RequestPending(request) => {
                self.state = WriterState::AwaitingResponse;
                Some(request)
            }
            _ => None,
        }
    }

    /// Records the autopilot's answer to the request last sent.
    pub fn response_received(&mut self, successful: bool) {
        if self.state != WriterState::AwaitingResponse {
            warn!("Parameter response received with no request in flight");
            return;
        }
        if !successful {
            error!("Failed to set parameter");
        }
        self.state = WriterState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll_on() -> ParamRequest {
        ParamRequest::new(OverrideParam::RollCommandOverride, true)
    }

    #[test]
    fn test_writer_round_trip() {
        let mut writer = ParamWriter::new();
        assert!(writer.request(roll_on()));
        assert_eq!(WriterState::RequestPending(roll_on()), writer.state());

        assert_eq!(Some(roll_on()), writer.poll(true));
        assert_eq!(WriterState::AwaitingResponse, writer.state());
        assert_eq!(None, writer.poll(true), "Request is sent only once.");

        writer.response_received(true);
        assert!(!writer.is_pending());
    }

    #[test]
    fn test_writer_waits_for_service() {
        let mut writer = ParamWriter::new();
        assert!(writer.request(roll_on()));

        assert_eq!(None, writer.poll(false));
        assert_eq!(WriterState::RequestPending(roll_on()), writer.state());
        assert_eq!(Some(roll_on()), writer.poll(true));
    }

    #[test]
    fn test_writer_refuses_while_pending() {
        let mut writer = ParamWriter::new();
        let pitch_off = ParamRequest::new(OverrideParam::PitchCommandOverride, false);
        assert!(writer.request(roll_on()));
        assert!(!writer.request(pitch_off));

        let _ = writer.poll(true);
        assert!(!writer.request(pitch_off), "Still awaiting a response.");

        // A failed write still frees the writer.
        writer.response_received(false);
        assert!(writer.request(pitch_off));
    }

    #[test]
    fn test_writer_ignores_stray_response() {
        let mut writer = ParamWriter::new();
        assert!(writer.request(roll_on()));
        writer.response_received(true);
        assert_eq!(WriterState::RequestPending(roll_on()), writer.state());
    }

    #[test]
    fn test_override_param_names() {
        assert_eq!("roll_command_override", OverrideParam::RollCommandOverride.as_str());
        assert_eq!("pitch_command_override", OverrideParam::PitchCommandOverride.as_str());
    }
}
