//! Handlers for the feedback gate.

mod submit_feedback;

pub use submit_feedback::{
    SubmitFeedbackCommand, SubmitFeedbackHandler, SubmitFeedbackResult,
};
